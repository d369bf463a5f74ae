//! Login form.

use serde::{Deserialize, Serialize};

/// Credentials as posted. Missing fields are treated like wrong ones.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl LoginForm {
    /// Both fields present after trimming the username.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            return None;
        }
        Some((username, &self.password))
    }
}

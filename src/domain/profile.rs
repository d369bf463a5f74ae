//! Profile: one-to-one extension of a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Blank profile for a user that has none stored yet.
    pub fn empty(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            user_id,
            bio: String::new(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply validated changes.
    pub fn apply(&mut self, draft: ProfileDraft) {
        self.bio = draft.bio;
        self.avatar_url = draft.avatar_url;
        self.updated_at = Utc::now();
    }
}

/// Validated profile fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub bio: String,
    pub avatar_url: Option<String>,
}

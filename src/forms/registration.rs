//! Registration: a user form and a profile form posted together.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{required, USERNAME_RE};
use super::{FormErrors, ProfileForm};
use crate::domain::{NewAccount, ProfileDraft};

/// Account half of the registration page
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct UserRegistrationForm {
    #[validate(
        custom(function = "required"),
        length(max = 150, message = "Ensure this value has at most 150 characters."),
        regex(
            path = *USERNAME_RE,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        )
    )]
    pub username: String,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[serde(skip_serializing)]
    #[validate(
        length(min = 8, message = "This password is too short. It must contain at least 8 characters."),
        must_match(other = "password_confirm", message = "The two password fields didn't match.")
    )]
    pub password: String,

    #[serde(skip_serializing)]
    pub password_confirm: String,
}

/// Both halves as one urlencoded body
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistrationForm {
    #[serde(flatten)]
    pub user: UserRegistrationForm,
    #[serde(flatten)]
    pub profile: ProfileForm,
}

/// Both validated payloads
#[derive(Debug, Clone)]
pub struct Registration {
    pub account: NewAccount,
    pub profile: ProfileDraft,
}

/// Per-form errors so each half renders its own messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationErrors {
    pub user: FormErrors,
    pub profile: FormErrors,
}

impl RegistrationForm {
    /// Validate both forms. Neither short-circuits the other.
    pub fn clean(self) -> Result<Registration, RegistrationErrors> {
        let mut user = self.user;
        user.username = user.username.trim().to_string();
        user.email = user.email.trim().to_string();

        let user_result = user.validate().map_err(FormErrors::from);
        let profile_result = self.profile.clean();

        match (user_result, profile_result) {
            (Ok(()), Ok(profile)) => Ok(Registration {
                account: NewAccount {
                    username: user.username,
                    email: user.email,
                    password: user.password,
                },
                profile,
            }),
            (user_result, profile_result) => Err(RegistrationErrors {
                user: user_result.err().unwrap_or_default(),
                profile: profile_result.err().unwrap_or_default(),
            }),
        }
    }

    /// Copy for re-rendering: passwords are never echoed back.
    pub fn without_passwords(&self) -> Self {
        let mut form = self.clone();
        form.user.password.clear();
        form.user.password_confirm.clear();
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegistrationForm {
        RegistrationForm {
            user: UserRegistrationForm {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "correct horse".to_string(),
                password_confirm: "correct horse".to_string(),
            },
            profile: ProfileForm {
                bio: "Hi".to_string(),
                avatar_url: String::new(),
            },
        }
    }

    #[test]
    fn test_valid_registration() {
        let registration = valid().clean().unwrap();

        assert_eq!(registration.account.username, "alice");
        assert_eq!(registration.account.password, "correct horse");
        assert_eq!(registration.profile.bio, "Hi");
    }

    #[test]
    fn test_both_forms_report_errors() {
        let mut form = valid();
        form.user.password_confirm = "different".to_string();
        form.profile.avatar_url = "not a url".to_string();

        let errors = form.clean().unwrap_err();

        assert_eq!(
            errors.user.messages("password"),
            ["The two password fields didn't match."]
        );
        assert!(errors.profile.has("avatar_url"));
    }

    #[test]
    fn test_profile_errors_alone_still_fail() {
        let mut form = valid();
        form.profile.bio = "x".repeat(600);

        let errors = form.clean().unwrap_err();
        assert!(errors.user.is_empty());
        assert!(errors.profile.has("bio"));
    }

    #[test]
    fn test_username_rules() {
        let mut form = valid();
        form.user.username = "alice smith".to_string();
        assert!(form.clean().unwrap_err().user.has("username"));

        let mut form = valid();
        form.user.username = "a".repeat(151);
        assert!(form.clean().unwrap_err().user.has("username"));
    }

    #[test]
    fn test_short_password_and_bad_email() {
        let mut form = valid();
        form.user.password = "short".to_string();
        form.user.password_confirm = "short".to_string();
        form.user.email = "nope".to_string();

        let errors = form.clean().unwrap_err();
        assert!(errors.user.has("password"));
        assert!(errors.user.has("email"));
    }

    #[test]
    fn test_passwords_are_not_echoed() {
        let form = valid().without_passwords();
        assert!(form.user.password.is_empty());
        assert!(form.user.password_confirm.is_empty());
        assert_eq!(form.user.username, "alice");

        let json = serde_json::to_string(&valid()).unwrap();
        assert!(!json.contains("correct horse"));
    }
}

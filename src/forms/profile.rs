//! Profile form (bio and avatar), used at registration and on the edit page.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{non_blank, optional_url};
use super::FormErrors;
use crate::domain::{Profile, ProfileDraft};

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ProfileForm {
    #[validate(length(max = 500, message = "Ensure this value has at most 500 characters."))]
    pub bio: String,

    #[validate(
        custom(function = "optional_url"),
        length(max = 500, message = "Ensure this value has at most 500 characters.")
    )]
    pub avatar_url: String,
}

impl ProfileForm {
    pub fn clean(mut self) -> Result<ProfileDraft, FormErrors> {
        self.bio = self.bio.trim().to_string();
        self.avatar_url = self.avatar_url.trim().to_string();

        self.validate().map_err(FormErrors::from)?;

        Ok(ProfileDraft {
            bio: self.bio,
            avatar_url: non_blank(self.avatar_url),
        })
    }
}

impl From<&Profile> for ProfileForm {
    fn from(profile: &Profile) -> Self {
        Self {
            bio: profile.bio.clone(),
            avatar_url: profile.avatar_url.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_is_valid() {
        let draft = ProfileForm::default().clean().unwrap();
        assert_eq!(draft, ProfileDraft::default());
    }

    #[test]
    fn test_bio_too_long() {
        let errors = ProfileForm {
            bio: "b".repeat(501),
            avatar_url: String::new(),
        }
        .clean()
        .unwrap_err();

        assert!(errors.has("bio"));
    }

    #[test]
    fn test_bad_avatar_url() {
        let errors = ProfileForm {
            bio: String::new(),
            avatar_url: "javascript:alert(1)".to_string(),
        }
        .clean()
        .unwrap_err();

        assert_eq!(errors.messages("avatar_url"), ["Enter a valid URL."]);
    }
}

//! Custom field validators shared by the forms.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateUrl, ValidationError};

use crate::domain::parse_price_cents;

/// Letters, digits and `@ . + - _`
pub static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern compiles"));

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required."));
    }
    Ok(())
}

/// Blank, or an absolute http(s) URL.
pub fn optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let http = value.starts_with("http://") || value.starts_with("https://");
    if !http || !value.validate_url() {
        return Err(error("url", "Enter a valid URL."));
    }
    Ok(())
}

pub fn price(value: &str) -> Result<(), ValidationError> {
    parse_price_cents(value)
        .map(|_| ())
        .map_err(|e| error("price", e.message()))
}

/// Empty string becomes `None`.
pub(crate) fn non_blank(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("x").is_ok());
        assert!(required("").is_err());
        assert!(required("   ").is_err());
    }

    #[test]
    fn test_optional_url() {
        assert!(optional_url("").is_ok());
        assert!(optional_url("https://example.com/bike.jpg").is_ok());
        assert!(optional_url("http://example.com").is_ok());
        assert!(optional_url("ftp://example.com/file").is_err());
        assert!(optional_url("not a url").is_err());
    }

    #[test]
    fn test_username_pattern() {
        assert!(USERNAME_RE.is_match("alice"));
        assert!(USERNAME_RE.is_match("a.l+i-c_e@x"));
        assert!(!USERNAME_RE.is_match("alice smith"));
        assert!(!USERNAME_RE.is_match("alice/../"));
    }

    #[test]
    fn test_price_message() {
        let err = price("abc").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Enter a number."));
    }
}

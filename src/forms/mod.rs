//! HTML form payloads and their validation.
//!
//! Each form deserializes from an urlencoded body, trims its input and
//! `clean()`s into a domain draft or a set of field errors.

mod errors;
mod listing;
mod login;
mod profile;
mod registration;
pub mod validators;

pub use errors::FormErrors;
pub use listing::ListingForm;
pub use login::LoginForm;
pub use profile::ProfileForm;
pub use registration::{Registration, RegistrationErrors, RegistrationForm, UserRegistrationForm};

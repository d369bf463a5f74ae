//! Domain layer - Core business entities and logic
//!
//! Users own exactly one profile and any number of listings. Types here
//! carry no persistence or HTTP concerns.

pub mod listing;
pub mod password;
pub mod profile;
pub mod user;

pub use listing::{format_price_cents, parse_price_cents, Listing, ListingDraft, PriceError, SearchQuery};
pub use password::Password;
pub use profile::{Profile, ProfileDraft};
pub use user::{CurrentUser, NewAccount, NewUser, User};

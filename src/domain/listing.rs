//! Listing domain entity, search query and price handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::MAX_PRICE_CENTS;

/// Listing domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    pub seller_id: Uuid,
    /// Seller's username, joined in on read
    pub seller_username: String,
    pub name: String,
    pub description: String,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Whether `user_id` is this listing's seller
    pub fn is_sold_by(&self, user_id: Uuid) -> bool {
        self.seller_id == user_id
    }

    /// Case-insensitive substring match on name OR description.
    pub fn matches(&self, query: &SearchQuery) -> bool {
        let needle = query.normalized();
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// Apply validated changes.
    pub fn apply(&mut self, draft: ListingDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price_cents = draft.price_cents;
        self.image_url = draft.image_url;
        self.updated_at = Utc::now();
    }
}

/// Validated listing fields (create and update)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    pub name: String,
    pub description: String,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
}

/// Free-text search over listings.
///
/// Built from the raw `q` parameter; blank input means "no query".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
}

impl SearchQuery {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let trimmed = raw?.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            raw: trimmed.to_string(),
            normalized: trimmed.to_lowercase(),
        })
    }

    /// Query as typed (trimmed), for echoing back into the search box
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lower-cased query used for matching
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// SQL `LIKE` pattern matching the query anywhere, with `\` as escape.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.normalized.len() + 2);
        pattern.push('%');
        for c in self.normalized.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Why a price string was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    Malformed,
    Negative,
    TooPrecise,
    TooLarge,
}

impl PriceError {
    pub fn message(self) -> &'static str {
        match self {
            PriceError::Malformed => "Enter a number.",
            PriceError::Negative => "Price cannot be negative.",
            PriceError::TooPrecise => "Ensure that there are no more than 2 decimal places.",
            PriceError::TooLarge => "Ensure that the price is at most 99999999.99.",
        }
    }
}

/// Parse a decimal price such as `12`, `12.5` or `12.50` into cents.
///
/// Blank input means "no price".
pub fn parse_price_cents(input: &str) -> Result<Option<i64>, PriceError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if input.starts_with('-') {
        return Err(PriceError::Negative);
    }

    let (whole, fraction) = match input.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (input, ""),
    };
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(PriceError::Malformed);
    }
    if fraction.len() > 2 {
        return Err(PriceError::TooPrecise);
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| PriceError::TooLarge)?
    };
    let fraction: i64 = format!("{:0<2}", fraction)
        .parse()
        .map_err(|_| PriceError::Malformed)?;

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction))
        .ok_or(PriceError::TooLarge)?;
    if cents > MAX_PRICE_CENTS {
        return Err(PriceError::TooLarge);
    }
    Ok(Some(cents))
}

/// Render cents as `1234.50`.
pub fn format_price_cents(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

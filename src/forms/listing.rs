//! Listing create/edit form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validators::{non_blank, optional_url, price, required};
use super::FormErrors;
use crate::domain::{format_price_cents, parse_price_cents, Listing, ListingDraft};

/// Raw listing form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ListingForm {
    #[validate(
        custom(function = "required"),
        length(max = 200, message = "Ensure this value has at most 200 characters.")
    )]
    pub name: String,

    #[validate(
        custom(function = "required"),
        length(max = 5000, message = "Ensure this value has at most 5000 characters.")
    )]
    pub description: String,

    #[validate(custom(function = "price"))]
    pub price: String,

    #[validate(
        custom(function = "optional_url"),
        length(max = 500, message = "Ensure this value has at most 500 characters.")
    )]
    pub image_url: String,
}

impl ListingForm {
    /// Normalize and validate; yields the fields to persist.
    pub fn clean(mut self) -> Result<ListingDraft, FormErrors> {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
        self.price = self.price.trim().to_string();
        self.image_url = self.image_url.trim().to_string();

        self.validate().map_err(FormErrors::from)?;

        let price_cents =
            parse_price_cents(&self.price).map_err(|e| FormErrors::field("price", e.message()))?;

        Ok(ListingDraft {
            name: self.name,
            description: self.description,
            price_cents,
            image_url: non_blank(self.image_url),
        })
    }
}

/// Pre-fill for the edit page
impl From<&Listing> for ListingForm {
    fn from(listing: &Listing) -> Self {
        Self {
            name: listing.name.clone(),
            description: listing.description.clone(),
            price: listing.price_cents.map(format_price_cents).unwrap_or_default(),
            image_url: listing.image_url.clone().unwrap_or_default(),
        }
    }
}

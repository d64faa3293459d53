use serde::Serialize;

use crate::models::SearchCriteria;

/// Keyword tokens the listing sources understand, one per amenity
pub const KEYWORD_GARDEN: &str = "garden";
pub const KEYWORD_BALCONY: &str = "balcony";
pub const KEYWORD_OFF_STREET: &str = "off_street_parking";
// Sources have no exact "near green space" flag; "green" is the
// closest search token
pub const KEYWORD_GREEN: &str = "green";

/// Query parameters for a listing source search
#[derive(Debug, Clone, Serialize)]
pub struct ListingQuery {
    /// Always "buy"; renting is unsupported
    pub listing_type: &'static str,
    /// Place name to search in; `None` means no location filter
    pub place_name: Option<String>,
    /// Price ceiling (GBP)
    pub price_max: f64,
    /// Amenity keyword tokens, only for amenities the buyer asked for
    pub keywords: Vec<&'static str>,
    /// Fixed first page; pagination is unsupported
    pub page: u32,
}

impl ListingQuery {
    /// Translate search criteria into source-level query parameters.
    /// Amenities left unchecked impose no constraint at all.
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        let mut keywords = Vec::new();
        if criteria.amenities.garden {
            keywords.push(KEYWORD_GARDEN);
        }
        if criteria.amenities.balcony {
            keywords.push(KEYWORD_BALCONY);
        }
        if criteria.amenities.off_street_parking {
            keywords.push(KEYWORD_OFF_STREET);
        }
        if criteria.amenities.near_green_space {
            keywords.push(KEYWORD_GREEN);
        }

        let place_name = if criteria.location.trim().is_empty() {
            None
        } else {
            Some(criteria.location.trim().to_string())
        };

        Self {
            listing_type: "buy",
            place_name,
            price_max: criteria.max_price,
            keywords,
            page: 1,
        }
    }

    /// Comma-joined keyword list for the wire, `None` when nothing was
    /// requested.
    pub fn keywords_param(&self) -> Option<String> {
        if self.keywords.is_empty() {
            None
        } else {
            Some(self.keywords.join(","))
        }
    }
}

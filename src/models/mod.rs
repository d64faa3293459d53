use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Annual interest rates (whole percent) offered to the buyer
pub const OFFERED_RATES: [f64; 4] = [3.0, 4.0, 5.0, 6.0];

/// Amenity preferences requested by the buyer.
///
/// Each flag is independent; `false` means "no preference", never
/// "must not have".
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Amenities {
    pub garden: bool,
    pub balcony: bool,
    pub off_street_parking: bool,
    pub near_green_space: bool,
}

/// One search submission from the buyer. Built fresh per search,
/// immutable while the search runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Budget ceiling in pounds
    pub max_price: f64,
    /// Free-text place name; empty means no location filter
    pub location: String,
    /// Minimum bedroom count; `None` means any
    pub min_bedrooms: Option<u32>,
    /// Upfront deposit as a percentage of the price, in [0, 100)
    pub deposit_percent: f64,
    /// Annual mortgage rate as a whole percentage (6.0 means 6%)
    pub annual_rate_percent: f64,
    pub amenities: Amenities,
}

impl SearchCriteria {
    /// Reject criteria the engine must never send to a listing source.
    ///
    /// A deposit of 100% or more leaves no principal and the
    /// amortization formula degenerates, so it is refused up front.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_price <= 0.0 {
            return Err(EngineError::InvalidCriteria(format!(
                "max price must be positive, got {}",
                self.max_price
            )));
        }
        if !(0.0..100.0).contains(&self.deposit_percent) {
            return Err(EngineError::InvalidCriteria(format!(
                "deposit percent must be in [0, 100), got {}",
                self.deposit_percent
            )));
        }
        Ok(())
    }

    /// Loan amount left after the deposit is taken off a listing price.
    pub fn principal_for(&self, price: f64) -> f64 {
        price * (1.0 - self.deposit_percent / 100.0)
    }
}

/// Tri-state amenity evidence on a listing. `None` means the source
/// gave no signal either way.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AmenityFlags {
    pub garden: Option<bool>,
    pub balcony: Option<bool>,
    pub off_street_parking: Option<bool>,
    pub near_green_space: Option<bool>,
}

/// A candidate listing as delivered by a listing source. Read-only to
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Unique key at the source (the lister URL for Nestoria)
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub bedrooms: u32,
    pub location: String,
    pub image_url: Option<String>,
    pub amenities: AmenityFlags,
    pub url: String,
    pub retrieved_at: DateTime<Utc>,
}

/// A listing plus the affordability figures derived for one search.
/// Never mutated after construction; discarded on the next search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedListing {
    #[serde(flatten)]
    pub listing: Listing,
    /// Monthly mortgage payment in pounds
    pub monthly_payment: f64,
    /// Minimum gross annual salary a lender would require
    pub required_annual_salary: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(max_price: f64, deposit: f64) -> SearchCriteria {
        SearchCriteria {
            max_price,
            location: String::new(),
            min_bedrooms: None,
            deposit_percent: deposit,
            annual_rate_percent: 6.0,
            amenities: Amenities::default(),
        }
    }

    #[test]
    fn accepts_sane_criteria() {
        assert!(criteria(200_000.0, 10.0).validate().is_ok());
        assert!(criteria(1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_budget() {
        assert!(matches!(
            criteria(0.0, 10.0).validate(),
            Err(EngineError::InvalidCriteria(_))
        ));
        assert!(matches!(
            criteria(-5.0, 10.0).validate(),
            Err(EngineError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn rejects_full_deposit() {
        assert!(matches!(
            criteria(200_000.0, 100.0).validate(),
            Err(EngineError::InvalidCriteria(_))
        ));
        assert!(matches!(
            criteria(200_000.0, -1.0).validate(),
            Err(EngineError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn principal_stays_below_price_when_deposit_paid() {
        let price = 150_000.0;
        for deposit in [5.0, 10.0, 25.0, 50.0, 99.9] {
            let principal = criteria(200_000.0, deposit).principal_for(price);
            assert!(principal >= 0.0);
            assert!(principal < price);
        }
        assert_eq!(criteria(200_000.0, 0.0).principal_for(price), price);
    }
}

//! The affordability matching engine: criteria in, enriched listings
//! out. Stateless between calls; one source call per search.

use crate::error::EngineError;
use crate::models::{EnrichedListing, Listing, SearchCriteria};
use crate::mortgage;
use crate::sources::{ListingQuery, ListingSource};
use tracing::{debug, info};

pub struct MatchEngine {
    source: Box<dyn ListingSource>,
}

impl MatchEngine {
    pub fn new(source: Box<dyn ListingSource>) -> Self {
        Self { source }
    }

    /// Run one search: validate, query the listing source, re-check
    /// bedrooms, and attach mortgage figures to every survivor.
    ///
    /// Candidate order is preserved as delivered; an empty result is a
    /// valid "no matches". Any source or calculator failure aborts the
    /// whole attempt with no partial results.
    pub async fn find_matches(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<EnrichedListing>, EngineError> {
        criteria.validate()?;

        let query = ListingQuery::from_criteria(criteria);
        debug!(source = self.source.source_name(), ?query, "running search");

        let candidates = self.source.search(&query).await?;
        let candidates = bedroom_filter(candidates, criteria.min_bedrooms);

        let mut matches = Vec::with_capacity(candidates.len());
        for listing in candidates {
            matches.push(enrich(listing, criteria)?);
        }

        info!(
            source = self.source.source_name(),
            matches = matches.len(),
            "search complete"
        );
        Ok(matches)
    }
}

/// Keep listings meeting the minimum bedroom count. The source already
/// filtered price and location; bedrooms are re-checked here because
/// not every source honours them.
fn bedroom_filter(listings: Vec<Listing>, min_bedrooms: Option<u32>) -> Vec<Listing> {
    match min_bedrooms {
        None => listings,
        Some(min) => listings.into_iter().filter(|l| l.bedrooms >= min).collect(),
    }
}

/// Derive the affordability figures for one listing under the given
/// criteria. A bad rate is a criteria-level defect, so the error
/// bubbles up and fails the batch.
fn enrich(listing: Listing, criteria: &SearchCriteria) -> Result<EnrichedListing, EngineError> {
    let principal = criteria.principal_for(listing.price);
    let monthly_payment = mortgage::monthly_payment(
        principal,
        criteria.annual_rate_percent,
        mortgage::DEFAULT_TERM_YEARS,
    )?;
    let required_annual_salary = mortgage::required_annual_salary(monthly_payment);

    Ok(EnrichedListing {
        listing,
        monthly_payment,
        required_annual_salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::models::{Amenities, AmenityFlags};
    use async_trait::async_trait;
    use chrono::Utc;

    struct StubSource {
        listings: Vec<Listing>,
    }

    #[async_trait]
    impl ListingSource for StubSource {
        async fn search(&self, _query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
            Ok(self.listings.clone())
        }

        fn source_name(&self) -> &'static str {
            "Stub"
        }
    }

    struct UnreachableSource;

    #[async_trait]
    impl ListingSource for UnreachableSource {
        async fn search(&self, _query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
            Err(SourceError::Malformed("connection refused".to_string()))
        }

        fn source_name(&self) -> &'static str {
            "Unreachable"
        }
    }

    fn listing(id: &str, price: f64, bedrooms: u32) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("{bedrooms} bed home"),
            description: "Test listing".to_string(),
            price,
            bedrooms,
            location: "Bristol".to_string(),
            image_url: None,
            amenities: AmenityFlags::default(),
            url: format!("https://example.com/{id}"),
            retrieved_at: Utc::now(),
        }
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            max_price: 200_000.0,
            location: "Bristol".to_string(),
            min_bedrooms: Some(2),
            deposit_percent: 10.0,
            annual_rate_percent: 6.0,
            amenities: Amenities::default(),
        }
    }

    #[tokio::test]
    async fn keeps_only_listings_meeting_bedroom_minimum() {
        let engine = MatchEngine::new(Box::new(StubSource {
            listings: vec![listing("two-bed", 150_000.0, 2), listing("one-bed", 130_000.0, 1)],
        }));

        let matches = engine.find_matches(&criteria()).await.unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].listing.id, "two-bed");

        // 150,000 less a 10% deposit leaves 135,000 at 6% over 25y
        assert!((matches[0].monthly_payment - 869.81).abs() < 1.0);
        let expected_salary = matches[0].monthly_payment * 12.0 / 4.5;
        assert!((matches[0].required_annual_salary - expected_salary).abs() < 1e-9);
        assert!((matches[0].required_annual_salary - 2_319.5).abs() < 3.0);
    }

    #[tokio::test]
    async fn no_bedroom_minimum_keeps_everything_in_order() {
        let engine = MatchEngine::new(Box::new(StubSource {
            listings: vec![
                listing("c", 180_000.0, 3),
                listing("a", 150_000.0, 2),
                listing("b", 130_000.0, 1),
            ],
        }));
        let mut c = criteria();
        c.min_bedrooms = None;

        let matches = engine.find_matches(&c).await.unwrap();
        let ids: Vec<&str> = matches.iter().map(|m| m.listing.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn empty_candidate_set_is_a_valid_result() {
        let engine = MatchEngine::new(Box::new(StubSource { listings: vec![] }));
        let matches = engine.find_matches(&criteria()).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn source_failure_yields_no_partial_results() {
        let engine = MatchEngine::new(Box::new(UnreachableSource));
        let err = engine.find_matches(&criteria()).await.unwrap_err();
        assert!(matches!(err, EngineError::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn invalid_criteria_rejected_before_the_source_is_consulted() {
        // An unreachable source would fail the search; the criteria
        // check must fire first.
        let engine = MatchEngine::new(Box::new(UnreachableSource));
        let mut c = criteria();
        c.deposit_percent = 100.0;

        let err = engine.find_matches(&c).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidCriteria(_)));
    }

    #[tokio::test]
    async fn zero_rate_aborts_the_whole_batch() {
        let engine = MatchEngine::new(Box::new(StubSource {
            listings: vec![listing("two-bed", 150_000.0, 2), listing("three-bed", 180_000.0, 3)],
        }));
        let mut c = criteria();
        c.annual_rate_percent = 0.0;

        let err = engine.find_matches(&c).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidRate));
    }

    #[test]
    fn bedroom_filter_is_idempotent() {
        let listings = vec![
            listing("a", 150_000.0, 2),
            listing("b", 130_000.0, 1),
            listing("c", 180_000.0, 3),
        ];
        let once = bedroom_filter(listings, Some(2));
        let twice = bedroom_filter(once.clone(), Some(2));

        let once_ids: Vec<&str> = once.iter().map(|l| l.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(once_ids, twice_ids);
    }
}

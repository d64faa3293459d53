use crate::error::SourceError;
use crate::models::Listing;
use crate::sources::types::ListingQuery;
use async_trait::async_trait;

/// Common trait for all listing sources
/// This allows easy addition of new providers (Zoopla, OnTheMarket, etc) in the future
///
/// A source owns price, location and amenity-keyword filtering; the
/// engine only re-checks bedrooms. A failed call must surface as an
/// error, never as a partial listing set.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch candidate listings matching the query
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, SourceError>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}

use crate::error::SourceError;
use crate::models::{AmenityFlags, Listing};
use crate::sources::traits::ListingSource;
use crate::sources::types::{
    ListingQuery, KEYWORD_BALCONY, KEYWORD_GARDEN, KEYWORD_GREEN, KEYWORD_OFF_STREET,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

/// Static in-memory listing source. Applies the same filtering
/// contract a remote source would: price ceiling, location text and
/// requested amenity keywords are all handled here, so the engine
/// never has to.
pub struct CatalogSource {
    listings: Vec<Listing>,
}

impl CatalogSource {
    /// Catalog seeded with a small set of sample UK listings
    pub fn new() -> Self {
        Self::with_listings(sample_listings())
    }

    /// Catalog over caller-supplied listings
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    fn matches(listing: &Listing, query: &ListingQuery) -> bool {
        if listing.price > query.price_max {
            return false;
        }
        if let Some(place) = &query.place_name {
            if !listing
                .location
                .to_lowercase()
                .contains(&place.to_lowercase())
            {
                return false;
            }
        }
        // A requested amenity must be positively present; an unknown
        // flag counts as not having it.
        query.keywords.iter().all(|kw| {
            let flag = match *kw {
                KEYWORD_GARDEN => listing.amenities.garden,
                KEYWORD_BALCONY => listing.amenities.balcony,
                KEYWORD_OFF_STREET => listing.amenities.off_street_parking,
                KEYWORD_GREEN => listing.amenities.near_green_space,
                _ => None,
            };
            flag == Some(true)
        })
    }
}

impl Default for CatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListingSource for CatalogSource {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
        let results: Vec<Listing> = self
            .listings
            .iter()
            .filter(|l| Self::matches(l, query))
            .cloned()
            .collect();

        info!(
            "catalog matched {} of {} listings",
            results.len(),
            self.listings.len()
        );
        Ok(results)
    }

    fn source_name(&self) -> &'static str {
        "Catalog"
    }
}

/// Sample listings in the shape a remote source would deliver
fn sample_listings() -> Vec<Listing> {
    let now = Utc::now();
    vec![
        Listing {
            id: "catalog_bristol_1".to_string(),
            title: "2 bed terraced house, Easton".to_string(),
            description: "Victorian terrace with a rear garden and period features."
                .to_string(),
            price: 150_000.0,
            bedrooms: 2,
            location: "Bristol".to_string(),
            image_url: None,
            amenities: AmenityFlags {
                garden: Some(true),
                balcony: Some(false),
                off_street_parking: None,
                near_green_space: Some(true),
            },
            url: "https://listings.example.co.uk/bristol/easton-2bed".to_string(),
            retrieved_at: now,
        },
        Listing {
            id: "catalog_bristol_2".to_string(),
            title: "1 bed flat, Bedminster".to_string(),
            description: "First-floor flat close to North Street shops.".to_string(),
            price: 130_000.0,
            bedrooms: 1,
            location: "Bristol".to_string(),
            image_url: None,
            amenities: AmenityFlags {
                garden: Some(false),
                balcony: Some(true),
                off_street_parking: Some(false),
                near_green_space: None,
            },
            url: "https://listings.example.co.uk/bristol/bedminster-1bed".to_string(),
            retrieved_at: now,
        },
        Listing {
            id: "catalog_leeds_1".to_string(),
            title: "3 bed semi-detached, Headingley".to_string(),
            description: "Family home with driveway parking near Meanwood Park."
                .to_string(),
            price: 215_000.0,
            bedrooms: 3,
            location: "Leeds".to_string(),
            image_url: None,
            amenities: AmenityFlags {
                garden: Some(true),
                balcony: None,
                off_street_parking: Some(true),
                near_green_space: Some(true),
            },
            url: "https://listings.example.co.uk/leeds/headingley-3bed".to_string(),
            retrieved_at: now,
        },
        Listing {
            id: "catalog_leeds_2".to_string(),
            title: "2 bed apartment, city centre".to_string(),
            description: "Modern apartment with a balcony overlooking the canal."
                .to_string(),
            price: 175_000.0,
            bedrooms: 2,
            location: "Leeds".to_string(),
            image_url: None,
            amenities: AmenityFlags {
                garden: Some(false),
                balcony: Some(true),
                off_street_parking: None,
                near_green_space: Some(false),
            },
            url: "https://listings.example.co.uk/leeds/centre-2bed".to_string(),
            retrieved_at: now,
        },
        Listing {
            id: "catalog_norwich_1".to_string(),
            title: "2 bed end-of-terrace, Golden Triangle".to_string(),
            description: "End-of-terrace with a courtyard garden, near Eaton Park."
                .to_string(),
            price: 185_000.0,
            bedrooms: 2,
            location: "Norwich".to_string(),
            image_url: None,
            amenities: AmenityFlags {
                garden: Some(true),
                balcony: Some(false),
                off_street_parking: Some(false),
                near_green_space: Some(true),
            },
            url: "https://listings.example.co.uk/norwich/golden-triangle-2bed".to_string(),
            retrieved_at: now,
        },
    ]
}

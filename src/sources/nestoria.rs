use crate::error::SourceError;
use crate::models::{AmenityFlags, Listing};
use crate::sources::traits::ListingSource;
use crate::sources::types::{
    ListingQuery, KEYWORD_BALCONY, KEYWORD_GARDEN, KEYWORD_GREEN, KEYWORD_OFF_STREET,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const API_URL: &str = "https://api.nestoria.co.uk/api";

/// Nestoria UK listing source
pub struct NestoriaSource {
    client: Client,
}

impl NestoriaSource {
    /// Create a new Nestoria source with a default HTTP client
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("home-match/0.1 (first-home affordability search)")
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ListingSource for NestoriaSource {
    async fn search(&self, query: &ListingQuery) -> Result<Vec<Listing>, SourceError> {
        info!(
            max_price = query.price_max,
            place = query.place_name.as_deref().unwrap_or("(anywhere)"),
            "searching Nestoria"
        );

        let mut params: Vec<(&str, String)> = vec![
            ("country", "uk".to_string()),
            ("pretty", "1".to_string()),
            ("action", "search_listings".to_string()),
            ("listing_type", query.listing_type.to_string()),
            ("page", query.page.to_string()),
            ("price_max", format!("{}", query.price_max)),
        ];
        if let Some(place) = &query.place_name {
            params.push(("place_name", place.clone()));
        }
        if let Some(keywords) = query.keywords_param() {
            params.push(("keywords", keywords));
        }

        debug!("GET {} with {} params", API_URL, params.len());

        let response = self.client.get(API_URL).query(&params).send().await?;

        if !response.status().is_success() {
            warn!("Nestoria returned status: {}", response.status());
            return Err(SourceError::Malformed(format!(
                "status {}",
                response.status()
            )));
        }

        let body: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(format!("undecodable body: {e}")))?;

        let fallback_place = body
            .response
            .locations
            .first()
            .map(|l| l.title.clone())
            .or_else(|| query.place_name.clone())
            .unwrap_or_default();

        let listings: Vec<Listing> = body
            .response
            .listings
            .into_iter()
            .map(|raw| raw.into_listing(&fallback_place))
            .collect();

        info!("Nestoria returned {} listings", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Nestoria"
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    response: ApiResponse,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    listings: Vec<RawListing>,
    #[serde(default)]
    locations: Vec<RawLocation>,
}

#[derive(Debug, Deserialize)]
struct RawLocation {
    #[serde(default)]
    title: String,
}

/// One listing as Nestoria serves it. Optional fields stay optional
/// here; price arrives as either a number or a string depending on the
/// feed.
#[derive(Debug, Deserialize)]
struct RawListing {
    lister_url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    price: PriceField,
    #[serde(default)]
    bedroom_number: Option<u32>,
    #[serde(default)]
    img_url: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Number(f64),
    Text(String),
}

impl Default for PriceField {
    fn default() -> Self {
        PriceField::Number(0.0)
    }
}

impl PriceField {
    fn as_f64(&self) -> f64 {
        match self {
            PriceField::Number(n) => *n,
            PriceField::Text(s) => s.replace(',', "").trim().parse().unwrap_or(0.0),
        }
    }
}

impl RawListing {
    fn into_listing(self, fallback_place: &str) -> Listing {
        // Keyword mentions are positive evidence only; a missing
        // mention stays unknown rather than becoming "does not have".
        let amenities = match &self.keywords {
            Some(kw) => {
                let kw = kw.to_lowercase();
                let flag = |token: &str| kw.contains(token).then_some(true);
                AmenityFlags {
                    garden: flag(KEYWORD_GARDEN),
                    balcony: flag(KEYWORD_BALCONY),
                    off_street_parking: flag(KEYWORD_OFF_STREET).or(flag("parking")),
                    near_green_space: flag(KEYWORD_GREEN),
                }
            }
            None => AmenityFlags::default(),
        };

        Listing {
            id: self.lister_url.clone(),
            title: self.title,
            description: self.summary,
            price: self.price.as_f64(),
            bedrooms: self.bedroom_number.unwrap_or(0),
            location: fallback_place.to_string(),
            image_url: self.img_url,
            amenities,
            url: self.lister_url,
            retrieved_at: Utc::now(),
        }
    }
}

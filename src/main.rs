mod engine;
mod error;
mod models;
mod mortgage;
mod sources;

use engine::MatchEngine;
use models::{Amenities, SearchCriteria, OFFERED_RATES};
use sources::{CatalogSource, ListingSource, NestoriaSource};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏡 Home Match - First-Home Affordability Search");
    info!("===============================================");
    info!("");

    // Sample first-time-buyer criteria; a real UI would collect these
    let criteria = SearchCriteria {
        max_price: 200_000.0,
        location: "Bristol".to_string(),
        min_bedrooms: Some(2),
        deposit_percent: 10.0,
        annual_rate_percent: 6.0,
        amenities: Amenities {
            garden: true,
            ..Amenities::default()
        },
    };

    // Pick the listing source from the environment; the engine itself
    // never changes.
    let source: Box<dyn ListingSource> = match std::env::var("LISTING_SOURCE").as_deref() {
        Ok("nestoria") => Box::new(NestoriaSource::new()?),
        _ => Box::new(CatalogSource::new()),
    };
    info!("Using listing source: {}", source.source_name());
    info!("Offered annual rates: {:?}%", OFFERED_RATES);
    info!(
        "Searching up to £{} in {}, {}+ beds, {}% deposit at {}%",
        criteria.max_price,
        criteria.location,
        criteria.min_bedrooms.unwrap_or(0),
        criteria.deposit_percent,
        criteria.annual_rate_percent
    );
    info!("");

    let engine = MatchEngine::new(source);
    let matches = engine.find_matches(&criteria).await?;

    // Display results
    info!("\n✅ Found {} matching listings\n", matches.len());

    if matches.is_empty() {
        println!("No properties found. Try new settings.");
    }

    for (i, m) in matches.iter().enumerate() {
        println!("{}. {} (£{:.0})", i + 1, m.listing.title, m.listing.price);
        println!("   {} beds, {}", m.listing.bedrooms, m.listing.location);
        println!("   Mortgage: £{:.0}/mo", m.monthly_payment);
        println!("   Salary needed: £{:.0}/yr", m.required_annual_salary);
        println!("   URL: {}", m.listing.url);
        println!();
    }

    // Save the enriched results for inspection
    let json = serde_json::to_string_pretty(&matches)?;
    tokio::fs::write("matches.json", json).await?;
    info!("💾 Saved enriched matches to matches.json");

    Ok(())
}

use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;

use searchwire::cli::{Cli, Command};
use searchwire::{FlightQuery, HotelQuery, PriceBand, SerpClient};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    let api_key = std::env::var("SERPAPI_API_KEY")
        .map_err(|_| eyre!("SERPAPI_API_KEY environment variable not set"))?;
    let base_url = cli
        .base_url
        .unwrap_or_else(|| searchwire::DEFAULT_BASE_URL.to_string());
    let client = SerpClient::new(api_key, base_url, Duration::from_millis(searchwire::DEFAULT_TIMEOUT_MS))
        .context("Failed to build search client")?;

    info!("searchwire starting");

    match cli.command {
        Command::Flights {
            source,
            destination,
            outbound_date,
            return_date,
        } => {
            let query = FlightQuery::round_trip(source, destination, outbound_date, return_date);
            let response = client.google_flights(&query).await?;
            eprintln!(
                "{} {} flight option(s), {} leg(s) in best option",
                "✓".green(),
                response.best_flights.len(),
                response.best_legs().len()
            );
            let legs: Vec<serde_json::Value> = response
                .best_legs()
                .iter()
                .map(|leg| {
                    serde_json::json!({
                        "airline": leg.airline,
                        "departure_airport": leg.departure_airport.name,
                        "departure_time": leg.departure_airport.time,
                        "arrival_airport": leg.arrival_airport.name,
                        "arrival_time": leg.arrival_airport.time,
                        "price": response.best_price(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&legs)?);
        }
        Command::Hotels {
            place,
            check_in_date,
            check_out_date,
            adults,
            budget,
        } => {
            let mut query = HotelQuery::new(place, check_in_date, check_out_date, adults);
            if let Some(tier) = budget {
                match PriceBand::for_tier(&tier) {
                    Some(band) => query = query.with_price_band(band),
                    None => eprintln!(
                        "{} Unknown budget tier '{}', searching without a price filter",
                        "!".yellow(),
                        tier
                    ),
                }
            }
            let response = client.google_hotels(&query).await?;
            eprintln!("{} {} hotel offer(s)", "✓".green(), response.offers().len());
            let offers: Vec<serde_json::Value> = response
                .offers()
                .iter()
                .map(|offer| {
                    serde_json::json!({
                        "name": offer.name,
                        "price_per_night": offer.nightly_price(),
                        "rating": offer.best_rating(),
                        "amenities": offer.amenities,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&offers)?);
        }
    }

    Ok(())
}

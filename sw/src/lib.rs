//! SearchWire - SerpApi flight and hotel search client
//!
//! Thin typed wrapper over SerpApi's `google_flights` and `google_hotels`
//! engines. Deserializes only the response slices the caller cares about
//! (best-flight legs, hotel properties/ads) and leaves everything else on
//! the floor.
//!
//! # Example
//!
//! ```ignore
//! use searchwire::{FlightQuery, SerpClient};
//!
//! let client = SerpClient::new(api_key, searchwire::DEFAULT_BASE_URL, timeout)?;
//! let query = FlightQuery::round_trip("AUS", "CDG", "2025-06-01", "2025-06-06");
//! let response = client.google_flights(&query).await?;
//! for leg in response.best_flights.iter().flat_map(|b| b.flights.iter()) {
//!     println!("{:?}", leg.airline);
//! }
//! ```

pub mod cli;
mod client;
mod flights;
mod hotels;

pub use client::{SearchError, SerpClient};
pub use flights::{AirportStop, BestFlight, FlightLeg, FlightQuery, FlightResponse};
pub use hotels::{HotelOffer, HotelQuery, HotelResponse, PriceBand, RatePerNight};

/// Default SerpApi endpoint
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Default request timeout (30s)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

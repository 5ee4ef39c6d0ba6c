//! Round-trip flight search against the Google Flights engine

use std::sync::Arc;

use async_trait::async_trait;
use searchwire::{FlightQuery, FlightResponse, SerpClient};
use tracing::debug;

use crate::connectors::{ConnectorError, FlightSearch, FlightSearchQuery};
use crate::domain::{FlightOption, FlightResults};

/// Flight connector backed by SerpApi
pub struct SerpFlightSearch {
    client: Arc<SerpClient>,
}

impl SerpFlightSearch {
    pub fn new(client: Arc<SerpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FlightSearch for SerpFlightSearch {
    async fn search(&self, query: &FlightSearchQuery) -> Result<FlightResults, ConnectorError> {
        let missing = query.missing_fields();
        if !missing.is_empty() {
            return Err(ConnectorError::MissingParameters { fields: missing });
        }

        let source = query.source_iata.clone().unwrap_or_default();
        let destination = query.destination_iata.clone().unwrap_or_default();
        debug!(%source, %destination, "search: querying flights");

        let wire = FlightQuery::round_trip(
            &source,
            &destination,
            query.departure_date.clone().unwrap_or_default(),
            query.return_date.clone().unwrap_or_default(),
        );
        let response = self.client.google_flights(&wire).await?;

        Ok(map_response(&source, &destination, &response))
    }
}

/// Flatten the top-ranked option into state records. Every leg carries
/// the option's total price.
fn map_response(source: &str, destination: &str, response: &FlightResponse) -> FlightResults {
    let mut results = FlightResults {
        source: Some(source.to_string()),
        destination: Some(destination.to_string()),
        flights: Vec::new(),
        note: None,
    };

    if response.best_flights.is_empty() {
        debug!(%source, %destination, "map_response: no flight options");
        results.note = Some("No flight options found.".to_string());
        return results;
    }

    let price = response
        .best_price()
        .map(price_display)
        .unwrap_or_else(|| "N/A".to_string());

    let legs = response.best_legs();
    if legs.is_empty() {
        results.note =
            Some("No detailed flight legs found within the best flight option.".to_string());
        return results;
    }

    results.flights = legs
        .iter()
        .map(|leg| FlightOption {
            airline: leg
                .airline
                .clone()
                .unwrap_or_else(|| "Unknown Airline".to_string()),
            departure_time: leg
                .departure_airport
                .time
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            arrival_time: leg
                .arrival_airport
                .time
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            departure_airport: leg
                .departure_airport
                .name
                .clone()
                .unwrap_or_else(|| "Unknown Departure Airport".to_string()),
            arrival_airport: leg
                .arrival_airport
                .name
                .clone()
                .unwrap_or_else(|| "Unknown Arrival Airport".to_string()),
            price: price.clone(),
        })
        .collect();

    debug!(legs = results.flights.len(), "map_response: mapped best option");
    results
}

/// Prices arrive as bare numbers or preformatted strings; both become
/// display strings without added decoration.
fn price_display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Google Flights query and response types

use serde::Deserialize;

/// Round-trip flight search parameters
#[derive(Debug, Clone)]
pub struct FlightQuery {
    /// 3-letter IATA departure code (e.g. "DXB")
    pub source: String,
    /// 3-letter IATA arrival code (e.g. "SYD")
    pub destination: String,
    /// Outbound date, YYYY-MM-DD
    pub outbound_date: String,
    /// Return date, YYYY-MM-DD
    pub return_date: String,
}

impl FlightQuery {
    /// Build a round-trip query
    pub fn round_trip(
        source: impl Into<String>,
        destination: impl Into<String>,
        outbound_date: impl Into<String>,
        return_date: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            outbound_date: outbound_date.into(),
            return_date: return_date.into(),
        }
    }

    /// Engine-specific query parameters. Up to two stops per leg.
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("engine", "google_flights".to_string()),
            ("departure_id", self.source.clone()),
            ("arrival_id", self.destination.clone()),
            ("outbound_date", self.outbound_date.clone()),
            ("return_date", self.return_date.clone()),
            ("stops", "2".to_string()),
        ]
    }
}

/// The slice of a `google_flights` response we consume
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightResponse {
    #[serde(default)]
    pub best_flights: Vec<BestFlight>,
}

impl FlightResponse {
    /// Legs of the top-ranked option, if any
    pub fn best_legs(&self) -> &[FlightLeg] {
        self.best_flights.first().map(|b| b.flights.as_slice()).unwrap_or(&[])
    }

    /// Total price of the top-ranked option, as returned by the API
    /// (usually a bare number)
    pub fn best_price(&self) -> Option<&serde_json::Value> {
        self.best_flights.first().and_then(|b| b.price.as_ref())
    }
}

/// One ranked flight option with its legs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BestFlight {
    #[serde(default)]
    pub flights: Vec<FlightLeg>,
    #[serde(default)]
    pub price: Option<serde_json::Value>,
}

/// One leg of a flight option
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlightLeg {
    #[serde(default)]
    pub airline: Option<String>,
    #[serde(default)]
    pub departure_airport: AirportStop,
    #[serde(default)]
    pub arrival_airport: AirportStop,
}

/// Airport name/time pair on either end of a leg
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirportStop {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

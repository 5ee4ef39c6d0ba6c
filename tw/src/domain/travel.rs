//! Flight and hotel records as stored in pipeline state

use serde::{Deserialize, Serialize};
use serde_json::json;

/// One leg of the selected round trip
///
/// Times and price are opaque display strings; nothing downstream
/// parses them further.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    /// Currency-agnostic display price
    pub price: String,
}

impl FlightOption {
    /// Item schema used inside itinerary document schemas
    pub(crate) fn item_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "airline": { "type": "string" },
                "departure_time": { "type": "string" },
                "arrival_time": { "type": "string" },
                "departure_airport": { "type": "string" },
                "arrival_airport": { "type": "string" },
                "price": { "type": "string" }
            },
            "required": [
                "airline",
                "departure_time",
                "arrival_time",
                "departure_airport",
                "arrival_airport",
                "price"
            ]
        })
    }
}

/// Hotel candidate
///
/// `address`, `description` and `perks` stay empty until the itinerary
/// compiler augments them. Augmentation may fail per hotel; the record
/// is then kept exactly as it was, never dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOption {
    pub hotel_name: String,

    /// Display price; numeric source values get a `$` prefix
    pub price_per_night: String,

    pub rating: Option<f64>,

    /// At most five entries, truncated at the connector boundary
    pub amenities: Vec<String>,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub perks: String,
}

impl HotelOption {
    pub(crate) fn item_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "hotel_name": { "type": "string" },
                "price_per_night": { "type": "string" },
                "rating": { "type": "number", "nullable": true },
                "amenities": { "type": "array", "items": { "type": "string" } },
                "address": { "type": "string" },
                "description": { "type": "string" },
                "perks": { "type": "string" }
            },
            "required": [
                "hotel_name",
                "price_per_night",
                "rating",
                "amenities",
                "address",
                "description",
                "perks"
            ]
        })
    }
}

/// Flight connector reply stored in pipeline state
///
/// An empty flight list is valid and must carry an explanatory note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightResults {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub flights: Vec<FlightOption>,
    pub note: Option<String>,
}

impl FlightResults {
    /// Empty result with an explanatory note
    pub fn empty_with_note(note: impl Into<String>) -> Self {
        Self {
            source: None,
            destination: None,
            flights: Vec::new(),
            note: Some(note.into()),
        }
    }

    /// One-line summary used as model context by later stages
    pub fn summary(&self) -> String {
        match &self.note {
            Some(note) => note.clone(),
            None if self.flights.is_empty() => "No flight info".to_string(),
            None => format!("{} flight legs found", self.flights.len()),
        }
    }
}

/// Hotel connector reply stored in pipeline state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelResults {
    /// Place the connector actually searched
    pub place: Option<String>,
    pub hotels: Vec<HotelOption>,
    pub note: Option<String>,
}

impl HotelResults {
    pub fn empty_with_note(note: impl Into<String>) -> Self {
        Self {
            place: None,
            hotels: Vec::new(),
            note: Some(note.into()),
        }
    }

    pub fn summary(&self) -> String {
        match &self.note {
            Some(note) => note.clone(),
            None if self.hotels.is_empty() => "No hotel info".to_string(),
            None => format!("{} hotel candidates found", self.hotels.len()),
        }
    }
}

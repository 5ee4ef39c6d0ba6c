//! Trip request and canonical trip parameters

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Raw inbound trip request, fields as the user supplied them
///
/// Nothing here is normalized: locations may be country names, dates or
/// counts may be missing entirely. Info extraction turns this into the
/// canonical TripParameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripRequest {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub hotel_city: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub no_of_adults: Option<u32>,
    pub no_of_children: Option<u32>,
    pub budget: Option<String>,
    pub activity_preferences: Option<String>,
}

/// Canonical trip parameters
///
/// Created once from the raw request at pipeline start, mutated only by
/// the info extraction stage, read-only for every stage after that. Raw
/// fields (`source`, `destination`) survive alongside the resolved IATA
/// codes so later stages and the final summary can fall back to what
/// the user actually wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripParameters {
    /// Departure location as the user wrote it (city or country)
    pub source: Option<String>,

    /// Destination as the user wrote it (city or country)
    pub destination: Option<String>,

    /// Resolved 3-letter IATA code for the departure airport
    pub source_iata: Option<String>,

    /// Resolved 3-letter IATA code for the arrival airport
    pub destination_iata: Option<String>,

    /// City used for the hotel search
    pub hotel_city: Option<String>,

    /// Departure date, YYYY-MM-DD
    pub departure_date: Option<String>,

    /// Return date, YYYY-MM-DD
    pub return_date: Option<String>,

    /// Trip length in days, inclusive of both travel days
    ///
    /// Derived from the dates; authoritative over any model-provided
    /// value.
    pub num_days: Option<i64>,

    pub no_of_adults: Option<u32>,

    /// Defaults to 0 when the request leaves it out
    pub no_of_children: u32,

    /// Budget tier ("economy", "standard", "luxury") or free text
    pub budget: Option<String>,

    pub activity_preferences: Option<String>,
}

impl TripParameters {
    /// Seed parameters from a raw request
    pub fn from_request(request: &TripRequest) -> Self {
        debug!("from_request: called");
        Self {
            source: request.source.clone(),
            destination: request.destination.clone(),
            source_iata: None,
            destination_iata: None,
            hotel_city: request.hotel_city.clone(),
            departure_date: request.departure_date.clone(),
            return_date: request.return_date.clone(),
            num_days: None,
            no_of_adults: request.no_of_adults,
            no_of_children: request.no_of_children.unwrap_or(0),
            budget: request.budget.clone(),
            activity_preferences: request.activity_preferences.clone(),
        }
    }

    /// Merge extracted fields over the current parameters
    ///
    /// Every extracted field replaces its counterpart, including
    /// replacement with absent. Raw `source`/`destination` are not part
    /// of the extraction output and survive unchanged.
    pub fn merge_extracted(&mut self, extracted: ExtractedParameters) {
        debug!("merge_extracted: called");
        self.source_iata = extracted.source_iata;
        self.destination_iata = extracted.destination_iata;
        self.hotel_city = extracted.hotel_city;
        self.departure_date = extracted.departure_date;
        self.return_date = extracted.return_date;
        self.num_days = extracted.num_days;
        self.no_of_adults = extracted.no_of_adults;
        self.no_of_children = extracted.no_of_children.unwrap_or(0);
        self.budget = extracted.budget;
        self.activity_preferences = extracted.activity_preferences;
    }

    /// Day count computed from the two dates, inclusive of both ends
    ///
    /// `None` when either date is missing or unparseable.
    pub fn computed_num_days(&self) -> Option<i64> {
        let departure = NaiveDate::parse_from_str(self.departure_date.as_deref()?, "%Y-%m-%d").ok()?;
        let ret = NaiveDate::parse_from_str(self.return_date.as_deref()?, "%Y-%m-%d").ok()?;
        Some(ret.signed_duration_since(departure).num_days() + 1)
    }
}

/// Fields produced by the info extraction model call
///
/// Deliberately a separate type from TripParameters: the model never
/// sees or returns the raw `source`/`destination` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedParameters {
    pub source_iata: Option<String>,
    pub destination_iata: Option<String>,
    pub hotel_city: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub num_days: Option<i64>,
    pub no_of_adults: Option<u32>,
    pub no_of_children: Option<u32>,
    pub budget: Option<String>,
    pub activity_preferences: Option<String>,
}

impl ExtractedParameters {
    /// Response schema for the info extraction call
    ///
    /// Every field is required but nullable, which pushes the model to
    /// emit the full key set while tolerating unknowns.
    pub fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "source_iata": {
                    "type": "string",
                    "nullable": true,
                    "description": "3-letter IATA code for the departure airport"
                },
                "destination_iata": {
                    "type": "string",
                    "nullable": true,
                    "description": "3-letter IATA code for the arrival airport"
                },
                "hotel_city": {
                    "type": "string",
                    "nullable": true,
                    "description": "City to search hotels in"
                },
                "departure_date": {
                    "type": "string",
                    "nullable": true,
                    "description": "Departure date in YYYY-MM-DD format"
                },
                "return_date": {
                    "type": "string",
                    "nullable": true,
                    "description": "Return date in YYYY-MM-DD format"
                },
                "num_days": {
                    "type": "integer",
                    "nullable": true,
                    "description": "Trip length in days including both travel days"
                },
                "no_of_adults": {
                    "type": "integer",
                    "nullable": true,
                    "description": "Number of adult travelers"
                },
                "no_of_children": {
                    "type": "integer",
                    "nullable": true,
                    "description": "Number of children, 0 when not mentioned"
                },
                "budget": {
                    "type": "string",
                    "nullable": true,
                    "description": "Budget tier: economy, standard or luxury"
                },
                "activity_preferences": {
                    "type": "string",
                    "nullable": true,
                    "description": "Free-text activity preferences"
                }
            },
            "required": [
                "source_iata",
                "destination_iata",
                "hotel_city",
                "departure_date",
                "return_date",
                "num_days",
                "no_of_adults",
                "no_of_children",
                "budget",
                "activity_preferences"
            ]
        })
    }
}

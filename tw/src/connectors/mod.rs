//! Search connectors
//!
//! Connectors sit between trip parameters and the SerpApi wire types.
//! Each connector validates that the fields its engine needs are
//! present, issues the search, and maps the provider payload into the
//! domain result types with placeholder defaults for anything the
//! provider omitted. Callers decide how to fold a failure into the
//! pipeline; connectors never panic on malformed provider data.

use async_trait::async_trait;
use searchwire::SearchError;
use thiserror::Error;

use crate::domain::{FlightResults, HotelResults, TripParameters};

mod flights;
mod hotels;

pub use flights::SerpFlightSearch;
pub use hotels::SerpHotelSearch;

/// Errors from a search connector
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Required query fields are absent or empty
    #[error("missing required parameters: {}", .fields.join(", "))]
    MissingParameters { fields: Vec<&'static str> },

    /// The underlying search call failed
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Flight availability lookup for a resolved trip
#[async_trait]
pub trait FlightSearch: Send + Sync {
    async fn search(&self, query: &FlightSearchQuery) -> Result<FlightResults, ConnectorError>;
}

/// Hotel availability lookup for a resolved trip
#[async_trait]
pub trait HotelSearch: Send + Sync {
    async fn search(&self, query: &HotelSearchQuery) -> Result<HotelResults, ConnectorError>;
}

/// Parameters a flight search needs, lifted from [`TripParameters`]
#[derive(Debug, Clone, Default)]
pub struct FlightSearchQuery {
    pub source_iata: Option<String>,
    pub destination_iata: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
}

impl FlightSearchQuery {
    pub fn from_trip(trip: &TripParameters) -> Self {
        Self {
            source_iata: trip.source_iata.clone(),
            destination_iata: trip.destination_iata.clone(),
            departure_date: trip.departure_date.clone(),
            return_date: trip.return_date.clone(),
        }
    }

    /// Names of required fields that are absent or empty, in
    /// declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.source_iata) {
            missing.push("source_iata");
        }
        if is_blank(&self.destination_iata) {
            missing.push("destination_iata");
        }
        if is_blank(&self.departure_date) {
            missing.push("departure_date");
        }
        if is_blank(&self.return_date) {
            missing.push("return_date");
        }
        missing
    }
}

/// Parameters a hotel search needs, lifted from [`TripParameters`]
#[derive(Debug, Clone, Default)]
pub struct HotelSearchQuery {
    pub hotel_city: Option<String>,
    /// Check-in, YYYY-MM-DD (the trip's departure date)
    pub check_in_date: Option<String>,
    /// Check-out, YYYY-MM-DD (the trip's return date)
    pub check_out_date: Option<String>,
    pub no_of_adults: Option<u32>,
    /// Budget tier used to pick a nightly price band
    pub budget: Option<String>,
}

impl HotelSearchQuery {
    pub fn from_trip(trip: &TripParameters) -> Self {
        Self {
            hotel_city: trip.hotel_city.clone(),
            check_in_date: trip.departure_date.clone(),
            check_out_date: trip.return_date.clone(),
            no_of_adults: trip.no_of_adults,
            budget: trip.budget.clone(),
        }
    }

    /// Names of required fields that are absent or empty, reported
    /// under their trip-parameter names. A zero adult count is treated
    /// as absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.hotel_city) {
            missing.push("hotel_city");
        }
        if is_blank(&self.check_in_date) {
            missing.push("departure_date");
        }
        if is_blank(&self.check_out_date) {
            missing.push("return_date");
        }
        if self.no_of_adults.unwrap_or(0) == 0 {
            missing.push("no_of_adults");
        }
        missing
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().unwrap_or("").is_empty()
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted flight connector for stage tests
    pub struct MockFlightSearch {
        results: Mutex<VecDeque<Result<FlightResults, ConnectorError>>>,
        queries: Mutex<Vec<FlightSearchQuery>>,
    }

    impl MockFlightSearch {
        pub fn new(results: Vec<Result<FlightResults, ConnectorError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn queries(&self) -> Vec<FlightSearchQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FlightSearch for MockFlightSearch {
        async fn search(
            &self,
            query: &FlightSearchQuery,
        ) -> Result<FlightResults, ConnectorError> {
            self.queries.lock().unwrap().push(query.clone());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(FlightResults::default()))
        }
    }

    /// Scripted hotel connector for stage tests
    pub struct MockHotelSearch {
        results: Mutex<VecDeque<Result<HotelResults, ConnectorError>>>,
        queries: Mutex<Vec<HotelSearchQuery>>,
    }

    impl MockHotelSearch {
        pub fn new(results: Vec<Result<HotelResults, ConnectorError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                queries: Mutex::new(Vec::new()),
            }
        }

        pub fn queries(&self) -> Vec<HotelSearchQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HotelSearch for MockHotelSearch {
        async fn search(&self, query: &HotelSearchQuery) -> Result<HotelResults, ConnectorError> {
            self.queries.lock().unwrap().push(query.clone());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(HotelResults::default()))
        }
    }
}

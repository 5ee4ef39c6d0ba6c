//! Flight search stage

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::connectors::{ConnectorError, FlightSearch, FlightSearchQuery};
use crate::domain::{FlightResults, PipelineState, StateDelta};
use crate::stages::Stage;

pub struct FlightStage {
    connector: Arc<dyn FlightSearch>,
}

impl FlightStage {
    pub fn new(connector: Arc<dyn FlightSearch>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl Stage for FlightStage {
    fn name(&self) -> &'static str {
        "flight-search"
    }

    async fn run(&self, state: &PipelineState) -> StateDelta {
        debug!("run: called");
        let query = FlightSearchQuery::from_trip(&state.trip);

        let mut delta = StateDelta::default();
        match self.connector.search(&query).await {
            Ok(mut results) => {
                if let Some(note) = &results.note {
                    delta.notes.push(note.clone());
                } else {
                    results.note = Some("Flight search completed.".to_string());
                }
                debug!(flight_count = results.flights.len(), "run: search finished");
                delta.flight_results = Some(results);
            }
            Err(ConnectorError::MissingParameters { fields }) => {
                let note = format!(
                    "Missing required flight parameters from user_info: {}",
                    fields.join(", ")
                );
                warn!(missing = ?fields, "run: skipping flight search");
                let mut results = FlightResults::empty_with_note(note.clone());
                results.source = query.source_iata.clone();
                results.destination = query.destination_iata.clone();
                delta.flight_results = Some(results);
                delta.notes.push(note);
            }
            Err(e) => {
                let note = format!("Error during flight search: {e}");
                warn!(error = %e, "run: flight search failed");
                delta.flight_results = Some(FlightResults::empty_with_note(note.clone()));
                delta.notes.push(note);
            }
        }
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::mock::MockFlightSearch;
    use crate::domain::{FlightOption, TripParameters};
    use searchwire::SearchError;

    fn state_with_flight_fields() -> PipelineState {
        PipelineState::new(TripParameters {
            source_iata: Some("DEL".to_string()),
            destination_iata: Some("CDG".to_string()),
            departure_date: Some("2025-07-01".to_string()),
            return_date: Some("2025-07-05".to_string()),
            ..Default::default()
        })
    }

    fn one_leg() -> FlightOption {
        FlightOption {
            airline: "Emirates".to_string(),
            departure_time: "2025-07-01 03:00".to_string(),
            arrival_time: "2025-07-01 13:35".to_string(),
            departure_airport: "Indira Gandhi International".to_string(),
            arrival_airport: "Charles de Gaulle".to_string(),
            price: "1180".to_string(),
        }
    }

    #[tokio::test]
    async fn test_run_stores_results_with_default_note() {
        let connector = Arc::new(MockFlightSearch::new(vec![Ok(FlightResults {
            source: Some("DEL".to_string()),
            destination: Some("CDG".to_string()),
            flights: vec![one_leg()],
            note: None,
        })]));
        let stage = FlightStage::new(connector.clone());

        let delta = stage.run(&state_with_flight_fields()).await;

        let results = delta.flight_results.unwrap();
        assert_eq!(results.flights.len(), 1);
        assert_eq!(results.note.as_deref(), Some("Flight search completed."));
        // Connector gave no note, so nothing lands in the diagnostics.
        assert!(delta.notes.is_empty());

        let queries = connector.queries();
        assert_eq!(queries[0].source_iata.as_deref(), Some("DEL"));
        assert_eq!(queries[0].return_date.as_deref(), Some("2025-07-05"));
    }

    #[tokio::test]
    async fn test_run_appends_connector_note() {
        let connector = Arc::new(MockFlightSearch::new(vec![Ok(
            FlightResults::empty_with_note("No flight options found."),
        )]));
        let stage = FlightStage::new(connector);

        let delta = stage.run(&state_with_flight_fields()).await;

        assert_eq!(delta.notes, vec!["No flight options found."]);
        assert_eq!(
            delta.flight_results.unwrap().note.as_deref(),
            Some("No flight options found.")
        );
    }

    #[tokio::test]
    async fn test_run_missing_parameters_names_fields() {
        let connector = Arc::new(MockFlightSearch::new(vec![Err(
            ConnectorError::MissingParameters {
                fields: vec!["source_iata", "departure_date"],
            },
        )]));
        let stage = FlightStage::new(connector);

        let delta = stage.run(&PipelineState::default()).await;

        let expected =
            "Missing required flight parameters from user_info: source_iata, departure_date";
        assert_eq!(delta.notes, vec![expected]);
        let results = delta.flight_results.unwrap();
        assert!(results.flights.is_empty());
        assert_eq!(results.note.as_deref(), Some(expected));
    }

    #[tokio::test]
    async fn test_run_connector_failure_yields_empty_results() {
        let connector = Arc::new(MockFlightSearch::new(vec![Err(ConnectorError::Search(
            SearchError::Api {
                status: 503,
                message: "unavailable".to_string(),
            },
        ))]));
        let stage = FlightStage::new(connector);

        let delta = stage.run(&state_with_flight_fields()).await;

        assert_eq!(delta.notes.len(), 1);
        assert!(delta.notes[0].starts_with("Error during flight search:"));
        assert!(delta.flight_results.unwrap().flights.is_empty());
    }
}

//! Hotel search stage

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::connectors::{ConnectorError, HotelSearch, HotelSearchQuery};
use crate::domain::{HotelResults, PipelineState, StateDelta};
use crate::stages::Stage;

pub struct HotelStage {
    connector: Arc<dyn HotelSearch>,
}

impl HotelStage {
    pub fn new(connector: Arc<dyn HotelSearch>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl Stage for HotelStage {
    fn name(&self) -> &'static str {
        "hotel-search"
    }

    async fn run(&self, state: &PipelineState) -> StateDelta {
        debug!("run: called");
        let query = HotelSearchQuery::from_trip(&state.trip);

        let mut delta = StateDelta::default();
        match self.connector.search(&query).await {
            Ok(results) => {
                if let Some(note) = &results.note {
                    delta.notes.push(note.clone());
                }
                debug!(hotel_count = results.hotels.len(), "run: search finished");
                delta.hotel_results = Some(results);
            }
            Err(ConnectorError::MissingParameters { fields }) => {
                let note = format!(
                    "Missing required hotel parameters from user_info: {}",
                    fields.join(", ")
                );
                warn!(missing = ?fields, "run: skipping hotel search");
                let mut results = HotelResults::empty_with_note(note.clone());
                results.place = query.hotel_city.clone();
                delta.hotel_results = Some(results);
                delta.notes.push(note);
            }
            Err(e) => {
                let note = format!("Hotel search failed: {e}");
                warn!(error = %e, "run: hotel search failed");
                delta.hotel_results = Some(HotelResults::empty_with_note(note.clone()));
                delta.notes.push(note);
            }
        }
        delta
    }
}

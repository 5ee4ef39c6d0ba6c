//! Destination research stage
//!
//! Gathers activities, local transport options, and practical research
//! for the destination. Flight and hotel outcomes are context only;
//! their absence never blocks this stage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{DestinationInfo, PipelineState, StateDelta};
use crate::extract::StructuredExtractor;
use crate::prompts::{DestinationQueryContext, PromptLoader};
use crate::stages::Stage;

pub struct DestinationStage {
    extractor: StructuredExtractor,
    prompts: Arc<PromptLoader>,
}

impl DestinationStage {
    pub fn new(extractor: StructuredExtractor, prompts: Arc<PromptLoader>) -> Self {
        Self { extractor, prompts }
    }

    async fn research(&self, state: &PipelineState) -> eyre::Result<DestinationInfo> {
        let system = self.prompts.destination_system()?;
        let query = self.prompts.destination_query(&build_query_context(state))?;
        debug!(query_len = query.len(), "research: built destination query");

        let info = self
            .extractor
            .extract::<DestinationInfo>(&system, &query, DestinationInfo::schema())
            .await?;
        Ok(info)
    }
}

/// Trip fields plus one-line flight/hotel summaries, with readable
/// placeholders for anything still unknown.
fn build_query_context(state: &PipelineState) -> DestinationQueryContext {
    let trip = &state.trip;
    DestinationQueryContext {
        destination: trip
            .destination
            .clone()
            .filter(|d| !d.is_empty())
            .or_else(|| trip.hotel_city.clone())
            .unwrap_or_default(),
        departure_date: trip.departure_date.clone().unwrap_or_default(),
        return_date: trip.return_date.clone().unwrap_or_default(),
        num_days: trip
            .num_days
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        activity_preferences: trip
            .activity_preferences
            .clone()
            .unwrap_or_else(|| "no specific preferences".to_string()),
        budget: trip.budget.clone().unwrap_or_else(|| "any".to_string()),
        flight_summary: state
            .flight_results
            .as_ref()
            .map(|r| r.summary())
            .unwrap_or_else(|| "No flight info".to_string()),
        hotel_summary: state
            .hotel_results
            .as_ref()
            .map(|r| r.summary())
            .unwrap_or_else(|| "No hotel info".to_string()),
    }
}

#[async_trait]
impl Stage for DestinationStage {
    fn name(&self) -> &'static str {
        "destination-research"
    }

    async fn run(&self, state: &PipelineState) -> StateDelta {
        debug!("run: called");
        match self.research(state).await {
            Ok(info) => {
                debug!(
                    activities = info.activities.len(),
                    travel_options = info.local_travel_options.len(),
                    "run: destination research finished"
                );
                StateDelta {
                    destination_info: Some(Some(info)),
                    ..Default::default()
                }
            }
            Err(e) => {
                warn!(error = %e, "run: destination research failed");
                StateDelta {
                    destination_info: Some(None),
                    notes: vec![format!(
                        "Failed to generate structured destination information: {e}"
                    )],
                    ..Default::default()
                }
            }
        }
    }
}

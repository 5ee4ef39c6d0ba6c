//! Info extraction stage
//!
//! Normalizes the raw trip request into canonical parameters: IATA
//! codes resolved, hotel city populated, children defaulted, day count
//! computed. The only stage allowed to replace the trip slot.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{ExtractedParameters, PipelineState, StateDelta, TripParameters};
use crate::extract::StructuredExtractor;
use crate::prompts::PromptLoader;
use crate::stages::Stage;

pub struct InfoExtractionStage {
    extractor: StructuredExtractor,
    prompts: Arc<PromptLoader>,
}

impl InfoExtractionStage {
    pub fn new(extractor: StructuredExtractor, prompts: Arc<PromptLoader>) -> Self {
        Self { extractor, prompts }
    }

    async fn extract_parameters(&self, trip: &TripParameters) -> eyre::Result<ExtractedParameters> {
        let system = self.prompts.info_extraction_system()?;
        let payload = serde_json::to_string(trip)?;
        let extracted = self
            .extractor
            .extract::<ExtractedParameters>(&system, &payload, ExtractedParameters::schema())
            .await?;
        Ok(extracted)
    }
}

#[async_trait]
impl Stage for InfoExtractionStage {
    fn name(&self) -> &'static str {
        "info-extraction"
    }

    async fn run(&self, state: &PipelineState) -> StateDelta {
        debug!("run: called");

        let extracted = match self.extract_parameters(&state.trip).await {
            Ok(extracted) => extracted,
            Err(e) => {
                warn!(error = %e, "run: extraction failed, keeping original parameters");
                return StateDelta::note(format!("Failed to extract structured information: {e}"));
            }
        };

        let mut trip = state.trip.clone();
        trip.merge_extracted(extracted);

        let mut delta = StateDelta::default();

        // The recomputed day count is authoritative over the model's.
        match trip.computed_num_days() {
            Some(days) => {
                if trip.num_days != Some(days) {
                    warn!(
                        model_days = ?trip.num_days,
                        computed_days = days,
                        "run: day count disagreement, using recomputed value"
                    );
                }
                trip.num_days = Some(days);
            }
            None => {
                trip.num_days = trip.num_days.or(Some(0));
                delta.notes.push(
                    "Could not calculate number of days from provided dates. Using LLM's or default."
                        .to_string(),
                );
            }
        }

        delta
            .notes
            .push("User information successfully extracted and standardized.".to_string());
        delta.trip = Some(trip);
        delta
    }
}

//! Pipeline orchestrator
//!
//! Owns the state and the stage sequence. Stages are awaited one at a
//! time; each returns a patch that is applied before the next starts.
//! Independent runs are isolated: every `run` call builds its own
//! state, so one process may serve concurrent planning requests.

use std::sync::Arc;
use std::time::Duration;

use searchwire::SerpClient;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::connectors::{SerpFlightSearch, SerpHotelSearch};
use crate::domain::{FinalItinerary, PipelineState, TripParameters, TripRequest};
use crate::extract::StructuredExtractor;
use crate::llm;
use crate::prompts::PromptLoader;
use crate::stages::{
    DestinationStage, FlightStage, HotelStage, InfoExtractionStage, ItineraryStage, Stage,
};

/// Errors surfaced by a pipeline run
///
/// Stage-internal failures never reach here; they degrade the document
/// instead. The only failure left is the compiler stage producing no
/// document at all.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Pipeline finished without producing an itinerary")]
    MissingItinerary,
}

/// Stage names of the standard pipeline, in execution order
pub const STANDARD_STAGES: [&str; 5] = [
    "info-extraction",
    "flight-search",
    "hotel-search",
    "destination-research",
    "itinerary-compiler",
];

/// The five-stage planning pipeline
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Wire the standard five stages from configuration
    ///
    /// Clients are constructed once and shared across stages.
    pub fn standard(config: &Config) -> eyre::Result<Self> {
        let llm = llm::create_client(&config.llm)?;

        let serp = Arc::new(
            SerpClient::new(
                config.search.get_api_key()?,
                &config.search.base_url,
                Duration::from_millis(config.search.timeout_ms),
            )?
            .with_currency(&config.search.currency)
            .with_language(&config.search.language),
        );

        let prompts = Arc::new(PromptLoader::new(config.prompts_dir.as_ref()));
        let max_tokens = config.llm.max_tokens;
        let structured_temperature = config.llm.structured_temperature;

        Ok(Self::new(vec![
            Box::new(InfoExtractionStage::new(
                StructuredExtractor::new(llm.clone(), max_tokens, structured_temperature),
                prompts.clone(),
            )),
            Box::new(FlightStage::new(Arc::new(SerpFlightSearch::new(
                serp.clone(),
            )))),
            Box::new(HotelStage::new(Arc::new(SerpHotelSearch::new(serp)))),
            Box::new(DestinationStage::new(
                StructuredExtractor::new(llm.clone(), max_tokens, structured_temperature),
                prompts.clone(),
            )),
            Box::new(ItineraryStage::new(
                llm.clone(),
                StructuredExtractor::new(llm, max_tokens, structured_temperature),
                prompts,
                max_tokens,
                config.llm.general_temperature,
            )),
        ]))
    }

    /// Names of the wired stages, in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over a fresh state and return the compiled
    /// document. Always yields an itinerary when the compiler stage
    /// ran, degraded or not.
    pub async fn run(&self, request: &TripRequest) -> Result<FinalItinerary, PipelineError> {
        let run_id = Uuid::now_v7();
        info!(%run_id, "run: pipeline started");

        let mut state = PipelineState::new(TripParameters::from_request(request));
        for stage in &self.stages {
            debug!(%run_id, stage = stage.name(), "run: stage started");
            let delta = stage.run(&state).await;
            state.apply(delta);
            debug!(
                %run_id,
                stage = stage.name(),
                note_count = state.notes.len(),
                "run: stage finished"
            );
        }

        let itinerary = state
            .final_itinerary
            .ok_or(PipelineError::MissingItinerary)?;
        info!(
            %run_id,
            degraded = itinerary.is_degraded(),
            day_count = itinerary.days.len(),
            "run: pipeline finished"
        );
        Ok(itinerary)
    }
}

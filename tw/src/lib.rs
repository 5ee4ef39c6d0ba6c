//! Tripweaver - LLM travel itinerary pipeline
//!
//! Tripweaver plans a multi-day trip by running a fixed sequence of
//! five reasoning stages over a shared state: extract structured trip
//! parameters from a free-form request, search flights, search hotels,
//! research the destination, and compile everything into a validated
//! itinerary document.
//!
//! # Core Concepts
//!
//! - **Stages Patch, Never Fail**: Each stage returns a state delta;
//!   errors become notes and degraded slots, so a run always ends with
//!   a document
//! - **Schema-Bound Extraction**: Model calls that must yield records
//!   go through the structured extractor and a violation-collecting
//!   schema walker
//! - **Typed Connector Seams**: Flight and hotel search are capability
//!   traits with defensive mapping at the provider boundary
//! - **Per-Run Isolation**: One state per run; independent runs share
//!   only the immutable clients
//!
//! # Modules
//!
//! - [`domain`] - Trip records, pipeline state, itinerary documents
//! - [`llm`] - LLM client trait and Gemini implementation
//! - [`extract`] - Structured output extraction and schema validation
//! - [`connectors`] - Flight/hotel search traits and SerpApi adapters
//! - [`stages`] - The five pipeline stages
//! - [`pipeline`] - Orchestrator wiring and execution
//! - [`prompts`] - Embedded prompt templates and overrides
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod connectors;
pub mod domain;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod stages;

// Re-export commonly used types
pub use config::{Config, LlmConfig, SearchConfig};
pub use connectors::{
    ConnectorError, FlightSearch, FlightSearchQuery, HotelSearch, HotelSearchQuery,
    SerpFlightSearch, SerpHotelSearch,
};
pub use domain::{
    ActivityDetail, DestinationInfo, FinalItinerary, FlightOption, FlightResults, HotelOption,
    HotelResults, ItineraryDay, ItineraryDraft, PipelineState, ResearchDetail, StateDelta,
    TravelOption, TripParameters, TripRequest,
};
pub use extract::{ExtractError, StructuredExtractor, Violation};
pub use llm::{CompletionRequest, CompletionResponse, GeminiClient, LlmClient, LlmError};
pub use pipeline::{Pipeline, PipelineError, STANDARD_STAGES};
pub use stages::{
    DestinationStage, FlightStage, HotelStage, InfoExtractionStage, ItineraryStage, Stage,
};

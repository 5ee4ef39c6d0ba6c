//! Pipeline stages
//!
//! Five sequential steps over the shared [`PipelineState`]: extract
//! trip parameters, search flights, search hotels, research the
//! destination, compile the itinerary. Stages receive a shared
//! reference to the state and hand back a [`StateDelta`] patch; the
//! orchestrator owns the state and applies patches in order.
//!
//! A stage never fails the run. Every error is caught inside `run` and
//! converted into notes and degraded slots in the returned delta.

use async_trait::async_trait;

use crate::domain::{PipelineState, StateDelta};

mod destination;
mod flights;
mod hotels;
mod info;
mod itinerary;

pub use destination::DestinationStage;
pub use flights::FlightStage;
pub use hotels::HotelStage;
pub use info::InfoExtractionStage;
pub use itinerary::ItineraryStage;

/// One step of the planning pipeline
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stable name used in logs and the `stages` listing
    fn name(&self) -> &'static str;

    /// Produce this stage's patch against the current state
    async fn run(&self, state: &PipelineState) -> StateDelta;
}

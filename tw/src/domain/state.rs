//! Pipeline state and the per-stage delta patch

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::itinerary::{DestinationInfo, FinalItinerary};
use super::travel::{FlightResults, HotelResults};
use super::trip::TripParameters;

/// Shared state threaded through the five stages
///
/// Owned and sequentially mutated by the orchestrator only. Stages see
/// a shared reference and hand back a StateDelta; they never mutate in
/// place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineState {
    pub trip: TripParameters,

    pub flight_results: Option<FlightResults>,

    pub hotel_results: Option<HotelResults>,

    /// `None` both before the destination stage runs and after it
    /// records an explicit failure; downstream treats either as "no
    /// destination info available"
    pub destination_info: Option<DestinationInfo>,

    pub final_itinerary: Option<FinalItinerary>,

    /// Append-only diagnostics, surfaced in the final document
    pub notes: Vec<String>,
}

impl PipelineState {
    pub fn new(trip: TripParameters) -> Self {
        debug!("new: called");
        Self {
            trip,
            ..Default::default()
        }
    }

    /// Merge a stage's patch into the state
    ///
    /// Untouched slots stay as they were; notes append in order.
    pub fn apply(&mut self, delta: StateDelta) {
        debug!(note_count = delta.notes.len(), "apply: called");
        if let Some(trip) = delta.trip {
            self.trip = trip;
        }
        if let Some(flights) = delta.flight_results {
            self.flight_results = Some(flights);
        }
        if let Some(hotels) = delta.hotel_results {
            self.hotel_results = Some(hotels);
        }
        if let Some(destination) = delta.destination_info {
            self.destination_info = destination;
        }
        if let Some(itinerary) = delta.final_itinerary {
            self.final_itinerary = Some(itinerary);
        }
        self.notes.extend(delta.notes);
    }
}

/// Patch returned by a stage, merged by the orchestrator
///
/// `None` means "slot not touched". The destination slot is doubly
/// optional: `Some(None)` records an explicit "no destination info"
/// outcome, distinct from not having run at all.
#[derive(Debug, Default)]
pub struct StateDelta {
    pub trip: Option<TripParameters>,
    pub flight_results: Option<FlightResults>,
    pub hotel_results: Option<HotelResults>,
    pub destination_info: Option<Option<DestinationInfo>>,
    pub final_itinerary: Option<FinalItinerary>,
    pub notes: Vec<String>,
}

impl StateDelta {
    /// A delta carrying nothing but one diagnostic note
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            notes: vec![message.into()],
            ..Default::default()
        }
    }

    pub fn with_note(mut self, message: impl Into<String>) -> Self {
        self.notes.push(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_merges_only_touched_slots() {
        let mut state = PipelineState::new(TripParameters::default());
        state.apply(StateDelta {
            flight_results: Some(FlightResults::empty_with_note("No flight options found.")),
            ..Default::default()
        });

        assert!(state.flight_results.is_some());
        assert!(state.hotel_results.is_none());
        assert!(state.final_itinerary.is_none());
    }

    #[test]
    fn test_apply_appends_notes_in_order() {
        let mut state = PipelineState::new(TripParameters::default());
        state.apply(StateDelta::note("first"));
        state.apply(StateDelta::note("second").with_note("third"));

        assert_eq!(state.notes, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_apply_distinguishes_absent_destination_from_untouched() {
        let mut state = PipelineState::new(TripParameters::default());
        state.destination_info = Some(DestinationInfo::default());

        // Untouched slot: existing value survives.
        state.apply(StateDelta::default());
        assert!(state.destination_info.is_some());

        // Explicit absence: value is cleared.
        state.apply(StateDelta {
            destination_info: Some(None),
            ..Default::default()
        });
        assert!(state.destination_info.is_none());
    }

    #[test]
    fn test_apply_replaces_trip_parameters() {
        let mut state = PipelineState::new(TripParameters::default());
        let mut updated = TripParameters::default();
        updated.source_iata = Some("DEL".to_string());

        state.apply(StateDelta {
            trip: Some(updated),
            ..Default::default()
        });

        assert_eq!(state.trip.source_iata.as_deref(), Some("DEL"));
    }
}

//! Domain records shared across the pipeline

mod itinerary;
mod state;
mod travel;
mod trip;

pub use itinerary::{
    ActivityDetail, DestinationInfo, FinalItinerary, ItineraryDay, ItineraryDraft, ResearchDetail,
    TravelOption,
};
pub use state::{PipelineState, StateDelta};
pub use travel::{FlightOption, FlightResults, HotelOption, HotelResults};
pub use trip::{ExtractedParameters, TripParameters, TripRequest};

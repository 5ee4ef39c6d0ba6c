//! Itinerary compiler stage
//!
//! Two sub-phases. First each hotel candidate is augmented with an
//! address, a short description, and perks via a free-text call; a
//! failure for one hotel never blocks the others. Then the full
//! gathered context is handed to the structured extractor to assemble
//! the final document, which is repaired, snapshotted, and re-validated.
//!
//! This stage always produces a final itinerary, degraded if need be.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{
    DestinationInfo, FinalItinerary, HotelOption, ItineraryDraft, PipelineState, StateDelta,
};
use crate::extract::{self, StructuredExtractor};
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompts::{HotelAugmentationContext, ItineraryContext, PromptLoader};
use crate::stages::Stage;

pub struct ItineraryStage {
    /// Direct client for the free-text augmentation calls
    llm: Arc<dyn LlmClient>,
    extractor: StructuredExtractor,
    prompts: Arc<PromptLoader>,
    max_tokens: u32,
    general_temperature: f32,
}

impl ItineraryStage {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        extractor: StructuredExtractor,
        prompts: Arc<PromptLoader>,
        max_tokens: u32,
        general_temperature: f32,
    ) -> Self {
        Self {
            llm,
            extractor,
            prompts,
            max_tokens,
            general_temperature,
        }
    }

    /// Fill address/description/perks on each candidate, one call per
    /// hotel. A failed call keeps that hotel's record untouched.
    async fn augment_hotels(
        &self,
        state: &PipelineState,
        notes: &mut Vec<String>,
    ) -> Vec<HotelOption> {
        let Some(results) = &state.hotel_results else {
            return Vec::new();
        };
        if results.hotels.is_empty() {
            debug!("augment_hotels: no hotel candidates to augment");
            return Vec::new();
        }

        let city = state
            .trip
            .hotel_city
            .clone()
            .or_else(|| results.place.clone())
            .unwrap_or_default();

        let mut hotels = results.hotels.clone();
        for hotel in &mut hotels {
            if let Err(e) = self.augment_hotel(hotel, &city).await {
                warn!(hotel = %hotel.hotel_name, error = %e, "augment_hotels: call failed");
                notes.push(format!(
                    "Error during hotel augmentation for {}: {e}",
                    hotel.hotel_name
                ));
            }
        }
        hotels
    }

    async fn augment_hotel(&self, hotel: &mut HotelOption, city: &str) -> eyre::Result<()> {
        let context = HotelAugmentationContext {
            hotel_name: hotel.hotel_name.clone(),
            hotel_city: city.to_string(),
            hotel_rating: hotel
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            hotel_amenities: hotel.amenities.join(", "),
        };
        let system = self.prompts.hotel_augmentation_system()?;
        let user = self.prompts.hotel_augmentation_user(&context)?;

        let request = CompletionRequest::new(system, vec![Message::user(user)], self.max_tokens)
            .with_temperature(self.general_temperature);
        let response = self.llm.complete(request).await?;

        if let Some(text) = response.content {
            apply_augmentation(hotel, &text);
        }
        Ok(())
    }

    async fn assemble(
        &self,
        state: &PipelineState,
        hotels: &[HotelOption],
        notes: &[String],
    ) -> eyre::Result<ItineraryDraft> {
        let context = build_itinerary_context(state, hotels, notes)?;
        let system = self.prompts.itinerary_system(&context)?;
        let user = self.prompts.itinerary_user()?;

        let draft = self
            .extractor
            .extract::<ItineraryDraft>(&system, &user, ItineraryDraft::schema())
            .await?;
        Ok(draft)
    }
}

/// Everything the assembly prompt needs, pre-serialized
fn build_itinerary_context(
    state: &PipelineState,
    hotels: &[HotelOption],
    notes: &[String],
) -> eyre::Result<ItineraryContext> {
    let flights = state
        .flight_results
        .as_ref()
        .map(|r| r.flights.as_slice())
        .unwrap_or(&[]);
    let empty = DestinationInfo::default();
    let destination = state.destination_info.as_ref().unwrap_or(&empty);

    Ok(ItineraryContext {
        num_days: state.trip.num_days.unwrap_or(0),
        user_info_json: serde_json::to_string(&state.trip)?,
        flights_json: serde_json::to_string(flights)?,
        hotels_json: serde_json::to_string(hotels)?,
        activities_json: serde_json::to_string(&destination.activities)?,
        travel_options_json: serde_json::to_string(&destination.local_travel_options)?,
        research_json: serde_json::to_string(&destination.destination_research)?,
        notes_json: serde_json::to_string(notes)?,
    })
}

/// Parse `Label: value` lines from an augmentation reply. Labels are
/// lowercased and space-to-underscore normalized before matching;
/// colon-less lines and unknown labels are ignored.
fn apply_augmentation(hotel: &mut HotelOption, text: &str) {
    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let key = label.trim().to_lowercase().replace(' ', "_");
        let value = value.trim();
        match key.as_str() {
            "address" => hotel.address = value.to_string(),
            "description" => hotel.description = value.to_string(),
            "perks" => hotel.perks = value.to_string(),
            _ => {}
        }
    }
}

#[async_trait]
impl Stage for ItineraryStage {
    fn name(&self) -> &'static str {
        "itinerary-compiler"
    }

    async fn run(&self, state: &PipelineState) -> StateDelta {
        debug!("run: called");
        let mut delta = StateDelta::default();

        let hotels = self.augment_hotels(state, &mut delta.notes).await;

        // The prompt sees every note accumulated so far, including the
        // augmentation failures just recorded.
        let mut all_notes = state.notes.clone();
        all_notes.extend(delta.notes.iter().cloned());

        let mut draft = match self.assemble(state, &hotels, &all_notes).await {
            Ok(draft) => draft,
            Err(e) => {
                let note = format!("Error during structured itinerary compilation: {e}");
                warn!(error = %e, "run: assembly failed, returning degraded document");
                all_notes.push(note.clone());
                delta.notes.push(note);
                delta.final_itinerary = Some(FinalItinerary::degraded(
                    all_notes,
                    "Partial itinerary due to internal error.",
                ));
                return delta;
            }
        };

        draft.repair_days(&state.trip);

        let mut itinerary = FinalItinerary::from_draft(draft, &state.trip);

        // Re-validate the complete document. A failure here still
        // returns it, flagged as partial.
        if let Ok(value) = serde_json::to_value(&itinerary) {
            let violations = extract::check(&FinalItinerary::schema(), &value);
            if !violations.is_empty() {
                let joined = violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; ");
                let note = format!("Validation failed for final itinerary: {joined}");
                warn!(
                    violation_count = violations.len(),
                    "run: final document failed validation"
                );
                itinerary.notes_and_warnings.push(note.clone());
                itinerary.disclaimer =
                    Some("Partial itinerary generated due to final validation error.".to_string());
                delta.notes.push(note);
            }
        }

        debug!(
            day_count = itinerary.days.len(),
            degraded = itinerary.is_degraded(),
            "run: itinerary compiled"
        );
        delta.final_itinerary = Some(itinerary);
        delta
    }
}

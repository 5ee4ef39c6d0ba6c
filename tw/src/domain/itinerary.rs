//! Itinerary documents: destination info, draft, and final output

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::travel::{FlightOption, HotelOption};
use super::trip::TripParameters;

/// A single activity suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetail {
    pub name: String,
    pub description: String,

    /// "Varies" or "Check locally" when no price is known
    pub ticket_price: String,

    /// "Morning", "Afternoon", "Evening" or "All day"
    pub best_time_to_visit: String,
}

impl ActivityDetail {
    pub(crate) fn item_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "description": { "type": "string" },
                "ticket_price": { "type": "string" },
                "best_time_to_visit": { "type": "string" }
            },
            "required": ["name", "description", "ticket_price", "best_time_to_visit"]
        })
    }
}

/// A local transport option at the destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelOption {
    /// "Subway", "Bus", "Taxi", ...
    pub method: String,
    pub description: String,
}

impl TravelOption {
    pub(crate) fn item_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "method": { "type": "string" },
                "description": { "type": "string" }
            },
            "required": ["method", "description"]
        })
    }
}

/// One researched fact about the destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchDetail {
    pub title: String,
    pub notes: String,
}

impl ResearchDetail {
    pub(crate) fn item_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "notes": { "type": "string" }
            },
            "required": ["title", "notes"]
        })
    }
}

/// One day of the compiled itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// 1-indexed
    pub day: u32,

    /// YYYY-MM-DD
    pub date: String,

    pub city: String,

    pub activities: Vec<ActivityDetail>,
}

impl ItineraryDay {
    pub(crate) fn item_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "day": { "type": "integer" },
                "date": { "type": "string" },
                "city": { "type": "string" },
                "activities": {
                    "type": "array",
                    "items": ActivityDetail::item_schema()
                }
            },
            "required": ["day", "date", "city", "activities"]
        })
    }
}

/// Destination stage output: activities, transport, practical research
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationInfo {
    pub activities: Vec<ActivityDetail>,
    pub local_travel_options: Vec<TravelOption>,
    pub destination_research: Vec<ResearchDetail>,
}

impl DestinationInfo {
    /// Response schema for the destination research call
    pub fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "activities": {
                    "type": "array",
                    "items": ActivityDetail::item_schema()
                },
                "local_travel_options": {
                    "type": "array",
                    "items": TravelOption::item_schema()
                },
                "destination_research": {
                    "type": "array",
                    "items": ResearchDetail::item_schema()
                }
            },
            "required": ["activities", "local_travel_options", "destination_research"]
        })
    }
}

/// Model-assembled itinerary before the trip snapshot is attached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryDraft {
    pub flights: Vec<FlightOption>,
    pub hotels: Vec<HotelOption>,
    pub days: Vec<ItineraryDay>,
    pub travel_options: Vec<TravelOption>,
    pub research: Vec<ResearchDetail>,
    pub notes_and_warnings: Vec<String>,
}

impl ItineraryDraft {
    /// Response schema for the itinerary assembly call
    pub fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "flights": {
                    "type": "array",
                    "items": FlightOption::item_schema()
                },
                "hotels": {
                    "type": "array",
                    "items": HotelOption::item_schema()
                },
                "days": {
                    "type": "array",
                    "items": ItineraryDay::item_schema()
                },
                "travel_options": {
                    "type": "array",
                    "items": TravelOption::item_schema()
                },
                "research": {
                    "type": "array",
                    "items": ResearchDetail::item_schema()
                },
                "notes_and_warnings": {
                    "type": "array",
                    "items": { "type": "string" }
                }
            },
            "required": [
                "flights",
                "hotels",
                "days",
                "travel_options",
                "research",
                "notes_and_warnings"
            ]
        })
    }

    /// Rebuild the day skeleton and redistribute activities
    ///
    /// The day-per-day invariants are requested from the model but not
    /// trusted: afterwards this pass guarantees exactly `num_days`
    /// entries numbered from 1 with ascending dates from the departure
    /// date, every day holding at least one activity whenever the pool
    /// allows it, no day above the even-share bound, and the final day
    /// never empty while activities exist. A draft that already
    /// conforms keeps its per-day grouping.
    pub fn repair_days(&mut self, params: &TripParameters) {
        let Some(num_days) = params.num_days.filter(|n| *n > 0) else {
            debug!("repair_days: no usable day count, leaving draft untouched");
            return;
        };
        let num_days = num_days as usize;

        let start = params
            .departure_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        let fallback_city = params
            .hotel_city
            .clone()
            .or_else(|| params.destination.clone())
            .or_else(|| {
                self.days
                    .iter()
                    .find(|d| !d.city.is_empty())
                    .map(|d| d.city.clone())
            })
            .unwrap_or_default();

        let draft_dates: Vec<String> = self.days.iter().map(|d| d.date.clone()).collect();
        let draft_cities: Vec<String> = self.days.iter().map(|d| d.city.clone()).collect();

        let total: usize = self.days.iter().map(|d| d.activities.len()).sum();
        let cap = if total == 0 { 0 } else { total.div_ceil(num_days) };

        let violates = self.days.len() != num_days
            || (total >= num_days && self.days.iter().any(|d| d.activities.is_empty()))
            || (total > 0 && self.days.last().is_some_and(|d| d.activities.is_empty()))
            || self.days.iter().any(|d| d.activities.len() > cap);

        let buckets: Vec<Vec<ActivityDetail>> = if violates {
            debug!(total, num_days, "repair_days: redistributing activities");
            let pool: Vec<ActivityDetail> =
                self.days.drain(..).flat_map(|d| d.activities).collect();

            // Sequential slices keep the model's chronological ordering.
            let base = total / num_days;
            let extra = total % num_days;
            let mut iter = pool.into_iter();
            let mut buckets: Vec<Vec<ActivityDetail>> = (0..num_days)
                .map(|day| {
                    let take = base + usize::from(day < extra);
                    iter.by_ref().take(take).collect()
                })
                .collect();

            // The return day must not sit empty while activities exist.
            if total > 0 && buckets[num_days - 1].is_empty() {
                let donor = (0..num_days - 1)
                    .rev()
                    .find(|&d| buckets[d].len() > 1)
                    .or_else(|| (0..num_days - 1).rev().find(|&d| !buckets[d].is_empty()));
                if let Some(donor) = donor
                    && let Some(moved) = buckets[donor].pop()
                {
                    buckets[num_days - 1].push(moved);
                }
            }

            buckets
        } else {
            self.days.drain(..).map(|d| d.activities).collect()
        };

        self.days = buckets
            .into_iter()
            .enumerate()
            .map(|(i, activities)| {
                let date = start
                    .map(|s| (s + Days::new(i as u64)).format("%Y-%m-%d").to_string())
                    .or_else(|| draft_dates.get(i).cloned())
                    .unwrap_or_default();
                let city = if fallback_city.is_empty() {
                    draft_cities.get(i).cloned().unwrap_or_default()
                } else {
                    fallback_city.clone()
                };
                ItineraryDay {
                    day: (i + 1) as u32,
                    date,
                    city,
                    activities,
                }
            })
            .collect();
    }
}

/// The final document handed back to the caller
///
/// Always produced, possibly degraded; callers distinguish the two by
/// the presence of the disclaimer and by inspecting the notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalItinerary {
    /// Snapshot of the trip parameters; absent on early-degraded
    /// documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_request_summary: Option<TripParameters>,

    pub flights: Vec<FlightOption>,
    pub hotels: Vec<HotelOption>,
    pub days: Vec<ItineraryDay>,
    pub travel_options: Vec<TravelOption>,
    pub research: Vec<ResearchDetail>,
    pub notes_and_warnings: Vec<String>,

    /// Present only when compilation was partial
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}

impl FinalItinerary {
    /// Degraded terminal document carrying only notes and a disclaimer
    pub fn degraded(notes: Vec<String>, disclaimer: impl Into<String>) -> Self {
        Self {
            notes_and_warnings: notes,
            disclaimer: Some(disclaimer.into()),
            ..Default::default()
        }
    }

    /// Attach the trip snapshot to an assembled draft
    pub fn from_draft(draft: ItineraryDraft, params: &TripParameters) -> Self {
        debug!(day_count = draft.days.len(), "from_draft: called");
        Self {
            user_request_summary: Some(params.clone()),
            flights: draft.flights,
            hotels: draft.hotels,
            days: draft.days,
            travel_options: draft.travel_options,
            research: draft.research,
            notes_and_warnings: draft.notes_and_warnings,
            disclaimer: None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.disclaimer.is_some()
    }

    /// Schema for final document validation
    pub fn schema() -> serde_json::Value {
        let mut schema = ItineraryDraft::schema();
        schema["properties"]["user_request_summary"] = json!({ "type": "object" });
        schema["properties"]["disclaimer"] = json!({ "type": "string", "nullable": true });
        schema["required"]
            .as_array_mut()
            .expect("draft schema has a required list")
            .push(json!("user_request_summary"));
        schema
    }
}

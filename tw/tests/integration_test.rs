//! Integration tests for the tripweaver pipeline
//!
//! These tests run the real five-stage pipeline against scripted LLM
//! and connector backends and verify the end-to-end document shapes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tripweaver::connectors::{
    ConnectorError, FlightSearch, FlightSearchQuery, HotelSearch, HotelSearchQuery,
};
use tripweaver::domain::{FlightOption, FlightResults, HotelOption, HotelResults, TripRequest};
use tripweaver::extract::StructuredExtractor;
use tripweaver::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use tripweaver::pipeline::Pipeline;
use tripweaver::prompts::PromptLoader;
use tripweaver::stages::{
    DestinationStage, FlightStage, HotelStage, InfoExtractionStage, ItineraryStage,
};

// =============================================================================
// Scripted Backends
// =============================================================================

/// LLM backend serving canned replies in call order
struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<CompletionResponse, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    fn new(replies: Vec<Result<CompletionResponse, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("script exhausted".to_string())))
    }
}

/// Flight connector that validates the query like the real backend but
/// serves a canned result instead of calling out
struct CannedFlights(FlightResults);

#[async_trait]
impl FlightSearch for CannedFlights {
    async fn search(&self, query: &FlightSearchQuery) -> Result<FlightResults, ConnectorError> {
        let missing = query.missing_fields();
        if !missing.is_empty() {
            return Err(ConnectorError::MissingParameters { fields: missing });
        }
        Ok(self.0.clone())
    }
}

/// Hotel connector with the same validate-then-serve behavior
struct CannedHotels(HotelResults);

#[async_trait]
impl HotelSearch for CannedHotels {
    async fn search(&self, query: &HotelSearchQuery) -> Result<HotelResults, ConnectorError> {
        let missing = query.missing_fields();
        if !missing.is_empty() {
            return Err(ConnectorError::MissingParameters { fields: missing });
        }
        Ok(self.0.clone())
    }
}

/// Assemble the standard five stages around the scripted backends
fn scripted_pipeline(
    llm: &Arc<ScriptedLlm>,
    flights: FlightResults,
    hotels: HotelResults,
) -> Pipeline {
    let client: Arc<dyn LlmClient> = llm.clone();
    let prompts = Arc::new(PromptLoader::embedded_only());

    Pipeline::new(vec![
        Box::new(InfoExtractionStage::new(
            StructuredExtractor::new(client.clone(), 8192, 0.2),
            prompts.clone(),
        )),
        Box::new(FlightStage::new(Arc::new(CannedFlights(flights)))),
        Box::new(HotelStage::new(Arc::new(CannedHotels(hotels)))),
        Box::new(DestinationStage::new(
            StructuredExtractor::new(client.clone(), 8192, 0.2),
            prompts.clone(),
        )),
        Box::new(ItineraryStage::new(
            client.clone(),
            StructuredExtractor::new(client.clone(), 8192, 0.2),
            prompts,
            8192,
            0.4,
        )),
    ])
}

// =============================================================================
// Fixtures
// =============================================================================

fn full_request() -> TripRequest {
    TripRequest {
        source: Some("India".to_string()),
        destination: Some("France".to_string()),
        departure_date: Some("2025-07-01".to_string()),
        return_date: Some("2025-07-03".to_string()),
        no_of_adults: Some(2),
        budget: Some("standard".to_string()),
        activity_preferences: Some("museums and food".to_string()),
        ..Default::default()
    }
}

fn extraction_reply() -> Result<CompletionResponse, LlmError> {
    Ok(CompletionResponse::text(
        json!({
            "source_iata": "DEL",
            "destination_iata": "CDG",
            "hotel_city": "Paris",
            "departure_date": "2025-07-01",
            "return_date": "2025-07-03",
            "num_days": 3,
            "no_of_adults": 2,
            "no_of_children": 0,
            "budget": "standard",
            "activity_preferences": "museums and food"
        })
        .to_string(),
    ))
}

/// Extraction output when the request carried almost nothing
fn sparse_extraction_reply() -> Result<CompletionResponse, LlmError> {
    Ok(CompletionResponse::text(
        json!({
            "source_iata": null,
            "destination_iata": null,
            "hotel_city": null,
            "departure_date": null,
            "return_date": null,
            "num_days": null,
            "no_of_adults": 2,
            "no_of_children": null,
            "budget": null,
            "activity_preferences": null
        })
        .to_string(),
    ))
}

fn activity_json(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "description": format!("{name} visit"),
        "ticket_price": "Varies",
        "best_time_to_visit": "Morning"
    })
}

fn destination_reply() -> Result<CompletionResponse, LlmError> {
    Ok(CompletionResponse::text(
        json!({
            "activities": [
                activity_json("Louvre Museum"),
                activity_json("Musee d'Orsay"),
                activity_json("Seine river walk"),
                activity_json("Le Marais food tour")
            ],
            "local_travel_options": [
                { "method": "Metro", "description": "Dense network, buy a carnet" }
            ],
            "destination_research": [
                { "title": "Museum pass", "notes": "Skips ticket lines at most museums" }
            ]
        })
        .to_string(),
    ))
}

fn empty_destination_reply() -> Result<CompletionResponse, LlmError> {
    Ok(CompletionResponse::text(
        json!({
            "activities": [],
            "local_travel_options": [],
            "destination_research": []
        })
        .to_string(),
    ))
}

fn augmentation_reply() -> Result<CompletionResponse, LlmError> {
    Ok(CompletionResponse::text(
        "Address: 3 Rue de Rivoli, Paris\n\
         Description: Small hotel a short walk from the Louvre\n\
         Perks: Free breakfast",
    ))
}

fn day_json(day: u32, date: &str, activities: &[&str]) -> serde_json::Value {
    let activities: Vec<serde_json::Value> =
        activities.iter().map(|name| activity_json(name)).collect();
    json!({ "day": day, "date": date, "city": "Paris", "activities": activities })
}

fn assembled_draft_reply() -> Result<CompletionResponse, LlmError> {
    Ok(CompletionResponse::text(
        json!({
            "flights": [{
                "airline": "Air France",
                "departure_time": "2025-07-01 02:10",
                "arrival_time": "2025-07-01 08:30",
                "departure_airport": "Indira Gandhi International Airport",
                "arrival_airport": "Charles de Gaulle Airport",
                "price": "$980"
            }],
            "hotels": [{
                "hotel_name": "Hotel Lutetia",
                "price_per_night": "$310",
                "rating": 4.6,
                "amenities": ["Spa", "Bar"],
                "address": "3 Rue de Rivoli, Paris",
                "description": "Small hotel a short walk from the Louvre",
                "perks": "Free breakfast"
            }],
            "days": [
                day_json(1, "2025-07-01", &["Louvre Museum", "Musee d'Orsay"]),
                day_json(2, "2025-07-02", &["Seine river walk"]),
                day_json(3, "2025-07-03", &["Le Marais food tour"])
            ],
            "travel_options": [
                { "method": "Metro", "description": "Dense network, buy a carnet" }
            ],
            "research": [
                { "title": "Museum pass", "notes": "Skips ticket lines at most museums" }
            ],
            "notes_and_warnings": []
        })
        .to_string(),
    ))
}

fn paris_flights() -> FlightResults {
    FlightResults {
        source: Some("DEL".to_string()),
        destination: Some("CDG".to_string()),
        flights: vec![FlightOption {
            airline: "Air France".to_string(),
            departure_time: "2025-07-01 02:10".to_string(),
            arrival_time: "2025-07-01 08:30".to_string(),
            departure_airport: "Indira Gandhi International Airport".to_string(),
            arrival_airport: "Charles de Gaulle Airport".to_string(),
            price: "$980".to_string(),
        }],
        note: None,
    }
}

fn hotel(name: &str, price: &str) -> HotelOption {
    HotelOption {
        hotel_name: name.to_string(),
        price_per_night: price.to_string(),
        rating: Some(4.6),
        amenities: vec!["Spa".to_string(), "Bar".to_string()],
        address: String::new(),
        description: String::new(),
        perks: String::new(),
    }
}

fn paris_hotels() -> HotelResults {
    HotelResults {
        place: Some("Paris".to_string()),
        hotels: vec![hotel("Hotel Lutetia", "$310"), hotel("Hotel des Arts", "$140")],
        note: None,
    }
}

fn one_paris_hotel() -> HotelResults {
    HotelResults {
        place: Some("Paris".to_string()),
        hotels: vec![hotel("Hotel Lutetia", "$310")],
        note: None,
    }
}

// =============================================================================
// Full Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_pipeline_happy_path_produces_full_document() {
    let llm = ScriptedLlm::new(vec![
        extraction_reply(),
        destination_reply(),
        augmentation_reply(),
        augmentation_reply(),
        assembled_draft_reply(),
    ]);
    let pipeline = scripted_pipeline(&llm, paris_flights(), paris_hotels());

    let doc = pipeline
        .run(&full_request())
        .await
        .expect("pipeline should produce a document");

    assert!(!doc.is_degraded());
    assert!(doc.disclaimer.is_none());

    let summary = doc
        .user_request_summary
        .expect("snapshot should be attached");
    assert_eq!(summary.destination_iata.as_deref(), Some("CDG"));
    assert_eq!(summary.num_days, Some(3));
    // Raw request fields survive extraction untouched.
    assert_eq!(summary.source.as_deref(), Some("India"));
    assert_eq!(summary.destination.as_deref(), Some("France"));

    assert_eq!(doc.days.len(), 3);
    let numbering: Vec<u32> = doc.days.iter().map(|d| d.day).collect();
    assert_eq!(numbering, vec![1, 2, 3]);
    assert_eq!(doc.days[0].date, "2025-07-01");
    assert_eq!(doc.days[2].date, "2025-07-03");
    assert!(doc.days.iter().all(|d| !d.activities.is_empty()));

    assert_eq!(doc.flights.len(), 1);
    assert_eq!(doc.hotels.len(), 1);
    assert_eq!(doc.hotels[0].address, "3 Rue de Rivoli, Paris");

    // Extraction, destination, two augmentations, assembly.
    assert_eq!(llm.requests().len(), 5);
}

#[tokio::test]
async fn test_pipeline_augments_each_hotel_before_assembly() {
    let llm = ScriptedLlm::new(vec![
        extraction_reply(),
        destination_reply(),
        augmentation_reply(),
        augmentation_reply(),
        assembled_draft_reply(),
    ]);
    let pipeline = scripted_pipeline(&llm, paris_flights(), paris_hotels());

    pipeline
        .run(&full_request())
        .await
        .expect("pipeline should produce a document");

    let requests = llm.requests();

    // Calls 2 and 3 are the per-hotel augmentations, in candidate order,
    // free-text at the general temperature.
    assert!(requests[2].messages[0].content.contains("Hotel Lutetia"));
    assert!(requests[3].messages[0].content.contains("Hotel des Arts"));
    assert!(requests[2].response_schema.is_none());
    assert_eq!(requests[2].temperature, Some(0.4));

    // Assembly is schema-constrained at the structured temperature and
    // sees the augmented hotel details.
    let assembly = &requests[4];
    assert_eq!(assembly.temperature, Some(0.2));
    assert!(assembly.response_schema.is_some());
    assert!(assembly.system_prompt.contains("(3 days in total)"));
    assert!(assembly.system_prompt.contains("3 Rue de Rivoli, Paris"));
    assert!(assembly.system_prompt.contains("Louvre Museum"));
}

// =============================================================================
// Degraded Input Tests
// =============================================================================

#[tokio::test]
async fn test_pipeline_zero_results_still_builds_days() {
    let llm = ScriptedLlm::new(vec![
        extraction_reply(),
        Ok(CompletionResponse::text(
            json!({
                "activities": [activity_json("Louvre Museum"), activity_json("Musee d'Orsay")],
                "local_travel_options": [],
                "destination_research": []
            })
            .to_string(),
        )),
        // No hotels means no augmentation calls; assembly is next.
        Ok(CompletionResponse::text(
            json!({
                "flights": [],
                "hotels": [],
                "days": [day_json(1, "2025-07-01", &["Louvre Museum", "Musee d'Orsay"])],
                "travel_options": [],
                "research": [],
                "notes_and_warnings": ["No flight options found.", "No hotel options found."]
            })
            .to_string(),
        )),
    ]);
    let pipeline = scripted_pipeline(
        &llm,
        FlightResults::empty_with_note("No flight options found."),
        HotelResults::empty_with_note("No hotel options found."),
    );

    let doc = pipeline
        .run(&full_request())
        .await
        .expect("empty search results must not abort the pipeline");

    assert!(!doc.is_degraded());
    assert!(doc.flights.is_empty());
    assert!(doc.hotels.is_empty());

    // The day skeleton still spans the whole trip, built purely from
    // destination activities, with the return day never left empty.
    assert_eq!(doc.days.len(), 3);
    assert!(!doc.days[0].activities.is_empty());
    assert!(!doc.days[2].activities.is_empty());

    let notes: Vec<&str> = doc.notes_and_warnings.iter().map(String::as_str).collect();
    assert!(notes.contains(&"No flight options found."));
    assert!(notes.contains(&"No hotel options found."));

    // Diagnostics reach the assembly prompt in pipeline order.
    let assembly = &llm.requests()[2];
    assert!(assembly.system_prompt.contains(
        "[\"User information successfully extracted and standardized.\",\
         \"No flight options found.\",\"No hotel options found.\"]"
    ));
}

#[tokio::test]
async fn test_pipeline_missing_fields_become_notes_not_errors() {
    let llm = ScriptedLlm::new(vec![
        sparse_extraction_reply(),
        empty_destination_reply(),
        Ok(CompletionResponse::text(
            json!({
                "flights": [],
                "hotels": [],
                "days": [],
                "travel_options": [],
                "research": [],
                "notes_and_warnings": ["Not enough information to plan daily activities."]
            })
            .to_string(),
        )),
    ]);
    let pipeline = scripted_pipeline(&llm, paris_flights(), paris_hotels());

    let request = TripRequest {
        source: Some("India".to_string()),
        no_of_adults: Some(2),
        ..Default::default()
    };

    let doc = pipeline
        .run(&request)
        .await
        .expect("missing fields must degrade, never abort");

    assert!(!doc.is_degraded());

    let summary = doc
        .user_request_summary
        .expect("snapshot should be attached");
    assert_eq!(summary.source.as_deref(), Some("India"));
    assert!(summary.destination.is_none());
    assert_eq!(summary.no_of_adults, Some(2));
    // No dates and no model value leaves the day count at the default.
    assert_eq!(summary.num_days, Some(0));

    assert!(doc.flights.is_empty());
    assert!(doc.days.is_empty());

    // Both connectors name every absent field in their notes.
    let assembly = &llm.requests()[2];
    assert!(assembly.system_prompt.contains(
        "Missing required flight parameters from user_info: \
         source_iata, destination_iata, departure_date, return_date"
    ));
    assert!(assembly.system_prompt.contains(
        "Missing required hotel parameters from user_info: \
         hotel_city, departure_date, return_date"
    ));
    assert!(assembly
        .system_prompt
        .contains("Could not calculate number of days from provided dates."));
}

// =============================================================================
// Failure Isolation Tests
// =============================================================================

#[tokio::test]
async fn test_destination_failure_does_not_block_compilation() {
    let llm = ScriptedLlm::new(vec![
        extraction_reply(),
        Err(LlmError::ApiError {
            status: 500,
            message: "backend unavailable".to_string(),
        }),
        augmentation_reply(),
        assembled_draft_reply(),
    ]);
    let pipeline = scripted_pipeline(&llm, paris_flights(), one_paris_hotel());

    let doc = pipeline
        .run(&full_request())
        .await
        .expect("itinerary compilation must survive a destination failure");

    assert!(!doc.is_degraded());
    assert_eq!(doc.days.len(), 3);

    // The failure is recorded and handed to the assembly prompt.
    let assembly = &llm.requests()[3];
    assert!(assembly
        .system_prompt
        .contains("Failed to generate structured destination information:"));
}

#[tokio::test]
async fn test_augmentation_failure_keeps_hotel_record_untouched() {
    let llm = ScriptedLlm::new(vec![
        extraction_reply(),
        destination_reply(),
        Err(LlmError::Timeout(Duration::from_secs(30))),
        assembled_draft_reply(),
    ]);
    let pipeline = scripted_pipeline(&llm, paris_flights(), one_paris_hotel());

    let doc = pipeline
        .run(&full_request())
        .await
        .expect("a failed augmentation must not abort the pipeline");

    assert!(!doc.is_degraded());

    // The hotel reaches assembly exactly as the connector returned it,
    // empty detail fields included, alongside the failure note.
    let assembly = &llm.requests()[3];
    assert!(assembly.system_prompt.contains(r#""hotel_name":"Hotel Lutetia""#));
    assert!(assembly
        .system_prompt
        .contains(r#""address":"","description":"","perks":"""#));
    assert!(assembly
        .system_prompt
        .contains("Error during hotel augmentation for Hotel Lutetia:"));
}

#[tokio::test]
async fn test_assembly_failure_yields_degraded_document() {
    let llm = ScriptedLlm::new(vec![
        extraction_reply(),
        destination_reply(),
        augmentation_reply(),
        Ok(CompletionResponse::text(
            "I could not build the itinerary, sorry.",
        )),
    ]);
    let pipeline = scripted_pipeline(&llm, paris_flights(), one_paris_hotel());

    let doc = pipeline
        .run(&full_request())
        .await
        .expect("a degraded document is still a successful run");

    assert!(doc.is_degraded());
    assert_eq!(
        doc.disclaimer.as_deref(),
        Some("Partial itinerary due to internal error.")
    );
    assert!(doc.user_request_summary.is_none());
    assert!(doc.days.is_empty());

    // Diagnostics accumulated across the run survive into the document.
    assert_eq!(
        doc.notes_and_warnings.first().map(String::as_str),
        Some("User information successfully extracted and standardized.")
    );
    assert!(doc
        .notes_and_warnings
        .last()
        .expect("compilation failure should be recorded")
        .starts_with("Error during structured itinerary compilation:"));
}

//! Prompt loader
//!
//! Loads prompt templates from an override directory or falls back to
//! the embedded defaults, and renders them with Handlebars.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::embedded;

/// Context for rendering the destination query template
#[derive(Debug, Clone, Serialize)]
pub struct DestinationQueryContext {
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub num_days: String,
    pub activity_preferences: String,
    pub budget: String,
    pub flight_summary: String,
    pub hotel_summary: String,
}

/// Context for rendering the per-hotel augmentation payload
#[derive(Debug, Clone, Serialize)]
pub struct HotelAugmentationContext {
    pub hotel_name: String,
    pub hotel_city: String,
    pub hotel_rating: String,
    pub hotel_amenities: String,
}

/// Context for rendering the itinerary assembly system prompt
///
/// The `_json` fields are pre-serialized JSON blobs; escaping is off in
/// the loader so they pass through verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryContext {
    pub num_days: i64,
    pub user_info_json: String,
    pub flights_json: String,
    pub hotels_json: String,
    pub activities_json: String,
    pub travel_options_json: String,
    pub research_json: String,
    pub notes_json: String,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory from config
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader with an optional override directory
    pub fn new(override_dir: Option<impl AsRef<Path>>) -> Self {
        let mut hbs = Handlebars::new();
        // Templates carry JSON payloads; HTML escaping would corrupt them.
        hbs.register_escape_fn(handlebars::no_escape);

        let override_dir = override_dir
            .map(|d| d.as_ref().to_path_buf())
            .filter(|d| d.exists());

        Self { hbs, override_dir }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        Self::new(None::<PathBuf>)
    }

    /// Load a template by name
    ///
    /// Checks the override directory for `{name}.pmt` first, then the
    /// embedded fallback.
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(format!("{name}.pmt"));
            if path.exists() {
                debug!("load_template: using override {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt override {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(name, "load_template: using embedded template");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {name}"))
    }

    /// Render a template with the given context
    fn render<C: Serialize>(&self, name: &str, context: &C) -> Result<String> {
        let template = self.load_template(name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {name}: {e}"))
    }

    pub fn info_extraction_system(&self) -> Result<String> {
        self.load_template("info-extraction")
    }

    pub fn destination_system(&self) -> Result<String> {
        self.load_template("destination")
    }

    pub fn destination_query(&self, context: &DestinationQueryContext) -> Result<String> {
        self.render("destination-query", context)
    }

    pub fn hotel_augmentation_system(&self) -> Result<String> {
        self.load_template("hotel-augmentation-system")
    }

    pub fn hotel_augmentation_user(&self, context: &HotelAugmentationContext) -> Result<String> {
        self.render("hotel-augmentation-user", context)
    }

    pub fn itinerary_system(&self, context: &ItineraryContext) -> Result<String> {
        self.render("itinerary", context)
    }

    pub fn itinerary_user(&self) -> Result<String> {
        self.load_template("itinerary-user")
    }
}

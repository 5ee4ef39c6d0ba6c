//! Prompt template system
//!
//! Embedded Handlebars templates for every model call, with an optional
//! per-deployment override directory:
//! 1. `{prompts-dir}/{name}.pmt` (user override)
//! 2. Embedded fallback in code

pub mod embedded;
mod loader;

pub use loader::{DestinationQueryContext, HotelAugmentationContext, ItineraryContext, PromptLoader};

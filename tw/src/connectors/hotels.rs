//! Hotel search against the Google Hotels engine

use std::sync::Arc;

use async_trait::async_trait;
use searchwire::{HotelQuery, HotelResponse, PriceBand, SerpClient};
use tracing::{debug, warn};

use crate::connectors::{ConnectorError, HotelSearch, HotelSearchQuery};
use crate::domain::{HotelOption, HotelResults};

/// At most this many candidates are kept; later augmentation makes one
/// model call per candidate.
const MAX_CANDIDATES: usize = 2;
const MAX_AMENITIES: usize = 5;

/// Hotel connector backed by SerpApi
pub struct SerpHotelSearch {
    client: Arc<SerpClient>,
}

impl SerpHotelSearch {
    pub fn new(client: Arc<SerpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HotelSearch for SerpHotelSearch {
    async fn search(&self, query: &HotelSearchQuery) -> Result<HotelResults, ConnectorError> {
        let missing = query.missing_fields();
        if !missing.is_empty() {
            return Err(ConnectorError::MissingParameters { fields: missing });
        }

        let place = query.hotel_city.clone().unwrap_or_default();
        debug!(%place, budget = ?query.budget, "search: querying hotels");

        let mut wire = HotelQuery::new(
            &place,
            query.check_in_date.clone().unwrap_or_default(),
            query.check_out_date.clone().unwrap_or_default(),
            query.no_of_adults.unwrap_or(0),
        );
        if let Some(tier) = query.budget.as_deref() {
            match PriceBand::for_tier(tier) {
                Some(band) => wire = wire.with_price_band(band),
                None => warn!(%tier, "search: unrecognized budget tier, searching without a price band"),
            }
        }

        let response = self.client.google_hotels(&wire).await?;
        Ok(map_response(&place, &response))
    }
}

/// Keep the leading candidates with display-ready prices. Detail
/// fields stay empty for the itinerary compiler to fill.
fn map_response(place: &str, response: &HotelResponse) -> HotelResults {
    let hotels: Vec<HotelOption> = response
        .offers()
        .iter()
        .take(MAX_CANDIDATES)
        .map(|offer| HotelOption {
            hotel_name: offer.name.clone().unwrap_or_else(|| "N/A".to_string()),
            price_per_night: offer
                .nightly_price()
                .map(price_display)
                .unwrap_or_else(|| "N/A".to_string()),
            rating: offer.best_rating(),
            amenities: offer.amenities.iter().take(MAX_AMENITIES).cloned().collect(),
            address: String::new(),
            description: String::new(),
            perks: String::new(),
        })
        .collect();

    let note = if hotels.is_empty() {
        debug!(%place, "map_response: no hotel options");
        Some("No hotel options found.".to_string())
    } else {
        None
    };

    HotelResults {
        place: Some(place.to_string()),
        hotels,
        note,
    }
}

/// Bare numeric rates get a `$` prefix; preformatted strings pass
/// through untouched.
fn price_display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => format!("${n}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_from(value: serde_json::Value) -> HotelResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_map_response_caps_candidates_at_two() {
        let response = response_from(json!({
            "properties": [
                {
                    "name": "Hotel Le Six",
                    "rate_per_night": { "lowest": 210 },
                    "overall_rating": 4.4,
                    "amenities": ["Wi-Fi", "Bar", "Gym", "Spa", "Parking", "Pool", "Sauna"]
                },
                {
                    "name": "Le Marais Rest",
                    "price": "$185",
                    "rating": 4.1,
                    "amenities": ["Wi-Fi"]
                },
                { "name": "Third Hotel Never Kept" }
            ]
        }));

        let results = map_response("Paris", &response);

        assert_eq!(results.place.as_deref(), Some("Paris"));
        assert_eq!(results.hotels.len(), 2);
        assert!(results.note.is_none());

        let first = &results.hotels[0];
        assert_eq!(first.hotel_name, "Hotel Le Six");
        assert_eq!(first.price_per_night, "$210");
        assert_eq!(first.rating, Some(4.4));
        assert_eq!(first.amenities.len(), MAX_AMENITIES);
        assert_eq!(first.amenities[4], "Parking");

        let second = &results.hotels[1];
        assert_eq!(second.price_per_night, "$185");
        assert_eq!(second.rating, Some(4.1));
    }

    #[test]
    fn test_map_response_empty() {
        let results = map_response("Nowhere", &response_from(json!({})));

        assert!(results.hotels.is_empty());
        assert_eq!(results.note.as_deref(), Some("No hotel options found."));
        assert_eq!(results.place.as_deref(), Some("Nowhere"));
    }

    #[test]
    fn test_map_response_placeholder_defaults() {
        let results = map_response("Kyoto", &response_from(json!({ "properties": [ {} ] })));
        let hotel = &results.hotels[0];

        assert_eq!(hotel.hotel_name, "N/A");
        assert_eq!(hotel.price_per_night, "N/A");
        assert_eq!(hotel.rating, None);
        assert!(hotel.amenities.is_empty());
        assert!(hotel.address.is_empty());
        assert!(hotel.description.is_empty());
        assert!(hotel.perks.is_empty());
    }

    #[test]
    fn test_map_response_falls_back_to_ads() {
        let response = response_from(json!({
            "ads": [
                { "name": "Sponsored Stay", "price": 96, "rating": 3.9 }
            ]
        }));

        let results = map_response("Goa", &response);
        assert_eq!(results.hotels.len(), 1);
        assert_eq!(results.hotels[0].hotel_name, "Sponsored Stay");
        assert_eq!(results.hotels[0].price_per_night, "$96");
    }

    #[test]
    fn test_price_display_prefixes_numbers_only() {
        assert_eq!(price_display(&json!(210)), "$210");
        assert_eq!(price_display(&json!(99.5)), "$99.5");
        assert_eq!(price_display(&json!("₹7,800")), "₹7,800");
    }
}

//! Google Hotels query and response types

use serde::Deserialize;
use tracing::debug;

/// Hotel search parameters
#[derive(Debug, Clone)]
pub struct HotelQuery {
    /// City or location to search (e.g. "Sydney")
    pub place: String,
    /// Check-in date, YYYY-MM-DD
    pub check_in_date: String,
    /// Check-out date, YYYY-MM-DD
    pub check_out_date: String,
    /// Number of adult guests
    pub adults: u32,
    /// Optional nightly price filter
    pub price_band: Option<PriceBand>,
}

impl HotelQuery {
    /// Build a query without a price filter
    pub fn new(
        place: impl Into<String>,
        check_in_date: impl Into<String>,
        check_out_date: impl Into<String>,
        adults: u32,
    ) -> Self {
        Self {
            place: place.into(),
            check_in_date: check_in_date.into(),
            check_out_date: check_out_date.into(),
            adults,
            price_band: None,
        }
    }

    /// Attach a nightly price filter
    pub fn with_price_band(mut self, band: PriceBand) -> Self {
        self.price_band = Some(band);
        self
    }

    /// Engine-specific query parameters
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("engine", "google_hotels".to_string()),
            ("q", self.place.clone()),
            ("check_in_date", self.check_in_date.clone()),
            ("check_out_date", self.check_out_date.clone()),
            ("adults", self.adults.to_string()),
        ];

        if let Some(band) = self.price_band {
            debug!(min = band.min, max = band.max, "params: applying price filter");
            params.push(("min_price", band.min.to_string()));
            params.push(("max_price", band.max.to_string()));
        }

        params
    }
}

/// Nightly price range in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub min: u32,
    pub max: u32,
}

impl PriceBand {
    pub const ECONOMY: PriceBand = PriceBand { min: 50, max: 175 };
    pub const STANDARD: PriceBand = PriceBand { min: 176, max: 300 };
    pub const LUXURY: PriceBand = PriceBand { min: 301, max: 10000 };

    /// Map a budget tier label to its price band.
    ///
    /// Matching is case-insensitive; unrecognized tiers return `None` so
    /// callers can warn and search unfiltered.
    pub fn for_tier(tier: &str) -> Option<PriceBand> {
        match tier.trim().to_lowercase().as_str() {
            "economy" => Some(Self::ECONOMY),
            "standard" => Some(Self::STANDARD),
            "luxury" => Some(Self::LUXURY),
            _ => None,
        }
    }
}

/// The slice of a `google_hotels` response we consume
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelResponse {
    #[serde(default)]
    pub properties: Vec<HotelOffer>,
    #[serde(default)]
    pub ads: Vec<HotelOffer>,
}

impl HotelResponse {
    /// Organic properties when present, otherwise the ads block
    pub fn offers(&self) -> &[HotelOffer] {
        if self.properties.is_empty() {
            &self.ads
        } else {
            &self.properties
        }
    }
}

/// One hotel result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotelOffer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub rate_per_night: RatePerNight,
    /// Ads entries carry a flat `price` instead of `rate_per_night`
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub overall_rating: Option<f64>,
    /// Ads entries carry `rating` instead of `overall_rating`
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl HotelOffer {
    /// Nightly price: lowest listed rate, falling back to the flat price
    pub fn nightly_price(&self) -> Option<&serde_json::Value> {
        self.rate_per_night.lowest.as_ref().or(self.price.as_ref())
    }

    /// Rating: overall rating, falling back to the ads-style rating
    pub fn best_rating(&self) -> Option<f64> {
        self.overall_rating.or(self.rating)
    }
}

/// Nightly rate block on an organic property
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatePerNight {
    #[serde(default)]
    pub lowest: Option<serde_json::Value>,
}

//! Request DTOs
//!
//! Query strings and bodies accepted by the API, with their normalisation rules.

use serde::Deserialize;

/// Lowest and highest accepted rating value.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Parses a `page` parameter. Anything missing, unparsable or below 1 becomes page 1.
pub fn normalize_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Query string for `GET /api/recipes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Kept as text so a malformed value falls back to page 1 instead of rejecting the request
    #[serde(default)]
    pub page: Option<String>,
}

impl ListingParams {
    pub fn brand(&self) -> Option<&str> {
        non_empty(&self.brand)
    }

    pub fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }

    pub fn page(&self) -> u32 {
        normalize_page(self.page.as_deref())
    }
}

/// Query string for brand and category pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageParams {
    pub fn page(&self) -> u32 {
        normalize_page(self.page.as_deref())
    }
}

/// Query string for `GET /api/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchParams {
    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Body for `POST /api/recipes/:brand_slug/:slug/rating`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    pub user_id: String,
    pub value: u8,
}

impl RatingRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.user_id.trim().is_empty() {
            return Some("userId cannot be empty".to_string());
        }
        if !RATING_RANGE.contains(&self.value) {
            return Some(format!(
                "Rating must be between {} and {}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            ));
        }
        None
    }
}

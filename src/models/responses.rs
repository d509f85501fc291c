//! Response DTOs
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

use super::recipe::RatingSummary;
use super::views::{
    BrandSummary, CategorySummary, HomepageData, ListingPage, RecipeDetail, SearchResults,
    SectionPage, SiteStats,
};

/// Response body for `GET /api/home`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    #[serde(flatten)]
    pub home: HomepageData,
    pub counts: SiteStats,
}

/// Response body for `GET /api/brands`.
#[derive(Debug, Clone, Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<BrandSummary>,
    pub counts: SiteStats,
}

/// Response body for `GET /api/categories`.
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub counts: SiteStats,
}

/// Response body for `GET /api/recipes`.
///
/// `brands` and `categories` carry the names offered as filter options.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[serde(flatten)]
    pub listing: ListingPage,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub selected_brand: String,
    pub selected_category: String,
    pub counts: SiteStats,
}

/// Response body for brand and category pages.
#[derive(Debug, Clone, Serialize)]
pub struct SectionResponse {
    #[serde(flatten)]
    pub section: SectionPage,
    pub counts: SiteStats,
}

/// Response body for `GET /api/recipes/:brand_slug/:slug`.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeResponse {
    #[serde(flatten)]
    pub detail: RecipeDetail,
    pub counts: SiteStats,
}

/// Response body for `GET /api/search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub results: SearchResults,
    pub counts: SiteStats,
}

/// Response body for a successful rating submission.
#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub message: String,
    pub rating: RatingSummary,
}

impl RatingResponse {
    pub fn new(rating: RatingSummary) -> Self {
        Self {
            message: "Rating submitted successfully".to_string(),
            rating,
        }
    }
}

/// Plain confirmation body, used by the cache clear endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn cache_cleared() -> Self {
        Self::new("Cache cleared successfully")
    }
}

/// Response body for `GET /admin/cache-stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_cleared_message() {
        let json = serde_json::to_value(MessageResponse::cache_cleared()).unwrap();
        assert_eq!(json["message"], "Cache cleared successfully");
    }

    #[test]
    fn test_cache_stats_response_hit_rate() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();

        let resp = CacheStatsResponse::from(stats);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["hits"], 3);
        assert_eq!(json["misses"], 1);
        assert!((resp.hit_rate - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}

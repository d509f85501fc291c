//! Recipe documents, formatted query results and the API's request/response DTOs.

pub mod recipe;
pub mod requests;
pub mod responses;
pub mod views;

// Re-export commonly used types
pub use recipe::{Rating, RatingSummary, Recipe, UserRating, DEFAULT_RATING};
pub use requests::{ListingParams, PageParams, RatingRequest, SearchParams};
pub use responses::{
    BrandsResponse, CacheStatsResponse, CategoriesResponse, ErrorResponse, HealthResponse,
    HomeResponse, ListingResponse, MessageResponse, RatingResponse, RecipeResponse,
    SearchResponse, SectionResponse,
};
pub use views::{
    BrandSummary, CategorySummary, HomepageData, ListingPage, RecipeCard, RecipeDetail,
    SearchResults, SectionPage, SiteStats,
};

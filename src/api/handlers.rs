//! API Handlers
//!
//! HTTP handlers over the catalog's cache-aside queries.
//!
//! Read endpoints degrade instead of failing: site counts fall back to fixed values and
//! lists come back empty when the recipe store cannot be reached. Only recipe detail and
//! rating submission report store failures to the client.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tokio::sync::RwLock;
use tracing::warn;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    BrandsResponse, CacheStatsResponse, CategoriesResponse, HealthResponse, HomeResponse,
    HomepageData, ListingPage, ListingParams, ListingResponse, MessageResponse, PageParams,
    RatingRequest, RatingResponse, RecipeResponse, SearchParams, SearchResponse, SearchResults,
    SectionPage, SectionResponse, SiteStats,
};
use crate::repository::{RecipeRepository, StoreResult};
use crate::service::{format, CatalogService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside queries over the recipe store
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// Builds the page cache and catalog from configuration.
    pub fn from_config(config: &Config, repository: Arc<dyn RecipeRepository>) -> Self {
        let cache = Arc::new(RwLock::new(TtlCache::new(config.default_ttl_minutes)));
        Self::new(CatalogService::new(cache, repository, config.ttl))
    }
}

fn or_degraded<T>(result: StoreResult<T>, what: &str, degraded: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|err| {
        warn!(error = %err, "serving empty {}", what);
        degraded()
    })
}

/// Handler for GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<SiteStats> {
    Json(state.catalog.site_stats_or_fallback().await)
}

/// Handler for GET /api/home
pub async fn home_handler(State(state): State<AppState>) -> Json<HomeResponse> {
    let (home, counts) = tokio::join!(
        state.catalog.homepage(),
        state.catalog.site_stats_or_fallback()
    );

    Json(HomeResponse {
        home: or_degraded(home, "homepage", || HomepageData {
            featured_recipes: Vec::new(),
            recent_recipes: Vec::new(),
        }),
        counts,
    })
}

/// Handler for GET /api/brands
pub async fn brands_handler(State(state): State<AppState>) -> Json<BrandsResponse> {
    let (brands, counts) = tokio::join!(
        state.catalog.brands(),
        state.catalog.site_stats_or_fallback()
    );

    Json(BrandsResponse {
        brands: or_degraded(brands, "brand list", Vec::new),
        counts,
    })
}

/// Handler for GET /api/categories
pub async fn categories_handler(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let (categories, counts) = tokio::join!(
        state.catalog.categories(),
        state.catalog.site_stats_or_fallback()
    );

    Json(CategoriesResponse {
        categories: or_degraded(categories, "category list", Vec::new),
        counts,
    })
}

/// Handler for GET /api/recipes
///
/// The listing and each filter option list are cached separately.
pub async fn listing_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Json<ListingResponse> {
    let page = params.page();
    let (listing, brands, categories, counts) = tokio::join!(
        state.catalog.listing(params.brand(), params.category(), page),
        state.catalog.brands(),
        state.catalog.categories(),
        state.catalog.site_stats_or_fallback()
    );

    Json(ListingResponse {
        listing: or_degraded(listing, "listing", || ListingPage::empty(page)),
        brands: or_degraded(brands, "brand options", Vec::new)
            .into_iter()
            .map(|b| b.name)
            .collect(),
        categories: or_degraded(categories, "category options", Vec::new)
            .into_iter()
            .map(|c| c.name)
            .collect(),
        selected_brand: params.brand().unwrap_or_default().to_string(),
        selected_category: params.category().unwrap_or_default().to_string(),
        counts,
    })
}

/// Handler for GET /api/brands/:slug
pub async fn brand_page_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Json<SectionResponse> {
    let page = params.page();
    let (section, counts) = tokio::join!(
        state.catalog.brand_page(&slug, page),
        state.catalog.site_stats_or_fallback()
    );

    Json(SectionResponse {
        section: or_degraded(section, "brand page", || SectionPage {
            name: format::display_name(&slug),
            listing: ListingPage::empty(page),
        }),
        counts,
    })
}

/// Handler for GET /api/categories/:slug
pub async fn category_page_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Json<SectionResponse> {
    let page = params.page();
    let (section, counts) = tokio::join!(
        state.catalog.category_page(&slug, page),
        state.catalog.site_stats_or_fallback()
    );

    Json(SectionResponse {
        section: or_degraded(section, "category page", || SectionPage {
            name: format::display_name(&slug),
            listing: ListingPage::empty(page),
        }),
        counts,
    })
}

/// Handler for GET /api/recipes/:brand_slug/:slug
pub async fn recipe_handler(
    State(state): State<AppState>,
    Path((brand_slug, slug)): Path<(String, String)>,
) -> Result<Json<RecipeResponse>> {
    let (detail, counts) = tokio::join!(
        state.catalog.recipe(&brand_slug, &slug),
        state.catalog.site_stats_or_fallback()
    );

    let detail = detail?.ok_or_else(|| {
        AppError::NotFound(format!("Recipe '{}/{}' not found", brand_slug, slug))
    })?;

    Ok(Json(RecipeResponse { detail, counts }))
}

/// Handler for GET /api/search
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let query = params.query();
    let (results, counts) = tokio::join!(
        state.catalog.search(query),
        state.catalog.site_stats_or_fallback()
    );

    Json(SearchResponse {
        results: or_degraded(results, "search results", || {
            SearchResults::empty(query.trim())
        }),
        counts,
    })
}

/// Handler for POST /api/recipes/:brand_slug/:slug/rating
///
/// A recorded rating clears the whole page cache.
pub async fn rating_handler(
    State(state): State<AppState>,
    Path((brand_slug, slug)): Path<(String, String)>,
    Json(req): Json<RatingRequest>,
) -> Result<Json<RatingResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let summary = state
        .catalog
        .submit_rating(&brand_slug, &slug, req.user_id.trim(), req.value)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Recipe '{}/{}' not found", brand_slug, slug)))?;

    Ok(Json(RatingResponse::new(summary)))
}

/// Handler for GET|POST /admin/clear-cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.catalog.clear_cache().await;
    Json(MessageResponse::cache_cleared())
}

/// Handler for GET /admin/cache-stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(state.catalog.cache_stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

//! API Routes
//!
//! Configures the Axum router with the recipe API and cache administration endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    brand_page_handler, brands_handler, cache_stats_handler, categories_handler,
    category_page_handler, clear_cache_handler, health_handler, home_handler, listing_handler,
    rating_handler, recipe_handler, search_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/home", get(home_handler))
        .route("/api/brands", get(brands_handler))
        .route("/api/brands/:slug", get(brand_page_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/categories/:slug", get(category_page_handler))
        .route("/api/recipes", get(listing_handler))
        .route("/api/recipes/:brand_slug/:slug", get(recipe_handler))
        .route("/api/recipes/:brand_slug/:slug/rating", post(rating_handler))
        .route("/api/search", get(search_handler))
        .route(
            "/admin/clear-cache",
            get(clear_cache_handler).post(clear_cache_handler),
        )
        .route("/admin/cache-stats", get(cache_stats_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::repository::MemoryRecipeRepository;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let repo = Arc::new(MemoryRecipeRepository::new(Vec::new()));
        create_router(AppState::from_config(&Config::default(), repo))
    }

    async fn status_of(request: Request<Body>) -> StatusCode {
        create_test_app().oneshot(request).await.unwrap().status()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of(get_request("/health")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_read_endpoints_on_empty_store() {
        for uri in [
            "/api/stats",
            "/api/home",
            "/api/brands",
            "/api/categories",
            "/api/recipes?page=2",
            "/api/brands/taco-bell",
            "/api/categories/drink?page=abc",
            "/api/search?q=taco",
            "/admin/cache-stats",
        ] {
            assert_eq!(status_of(get_request(uri)).await, StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_recipe_not_found() {
        assert_eq!(
            status_of(get_request("/api/recipes/taco-bell/nope")).await,
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_clear_cache_accepts_get_and_post() {
        assert_eq!(status_of(get_request("/admin/clear-cache")).await, StatusCode::OK);

        let post = Request::builder()
            .method("POST")
            .uri("/admin/clear-cache")
            .body(Body::empty())
            .unwrap();
        assert_eq!(status_of(post).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rating_rejects_out_of_range() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/recipes/taco-bell/baja-blast/rating")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"userId":"u1","value":0}"#))
            .unwrap();

        assert_eq!(status_of(request).await, StatusCode::BAD_REQUEST);
    }
}

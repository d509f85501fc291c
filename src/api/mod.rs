//! API Module
//!
//! HTTP handlers and routing for the recipe API.
//!
//! # Endpoints
//! - `GET /api/stats`, `/api/home`, `/api/brands`, `/api/categories` - Site-wide pages
//! - `GET /api/recipes` - Paginated listing with brand/category filters
//! - `GET /api/brands/:slug`, `/api/categories/:slug` - Section pages
//! - `GET /api/recipes/:brand_slug/:slug` - Recipe detail
//! - `POST /api/recipes/:brand_slug/:slug/rating` - Submit a rating
//! - `GET /api/search?q=` - Full-text search
//! - `GET|POST /admin/clear-cache`, `GET /admin/cache-stats` - Cache administration
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

//! Recipe Cache - recipe content API with an in-process TTL page cache
//!
//! Every read endpoint is served through cache-aside queries: results computed from the
//! recipe store are kept for an endpoint-specific number of minutes and expire lazily.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use api::{create_router, AppState};
pub use cache::TtlCache;
pub use config::{Config, TtlPolicy};
pub use repository::{MemoryRecipeRepository, RecipeRepository};
pub use service::CatalogService;

//! Recipe Repository
//!
//! The document store the page cache sits in front of. Every cached query is computed
//! from one of these operations on a miss.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{RatingSummary, Recipe, SiteStats};

pub use memory::{slugify, MemoryRecipeRepository};

// == Store Error ==
/// Failure reported by a repository operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store was reached but the query failed
    #[error("Query failed: {0}")]
    Query(String),
}

/// Convenience Result type for repository operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Query Shapes ==
/// Filter for paginated listings. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub brand_slug: Option<String>,
    pub food_type_slug: Option<String>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.brand_slug
            .as_deref()
            .map_or(true, |slug| recipe.brand_slug == slug)
            && self
                .food_type_slug
                .as_deref()
                .map_or(true, |slug| recipe.food_type_slug == slug)
    }
}

/// Featured and most recent recipes, fetched together.
#[derive(Debug, Clone, Default)]
pub struct HomepageFacets {
    pub featured: Vec<Recipe>,
    pub recent: Vec<Recipe>,
}

/// A page of recipes and the total number matching the filter.
#[derive(Debug, Clone, Default)]
pub struct RecipePage {
    pub recipes: Vec<Recipe>,
    pub total: u64,
}

/// A group-by result: distinct name, a representative slug and how many recipes share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub name: String,
    pub slug: String,
    pub count: u64,
}

// == Repository Trait ==
/// Query, aggregate and update operations over the recipe collection.
///
/// Implementations must be thread-safe. Where a call returns both a page and a count,
/// implementations compute both in a single round trip.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Total recipes, distinct brands and distinct food types in one aggregation.
    async fn site_counts(&self) -> StoreResult<SiteStats>;

    /// Up to `featured_limit` featured recipes and the `recent_limit` newest recipes.
    async fn homepage(&self, featured_limit: usize, recent_limit: usize)
        -> StoreResult<HomepageFacets>;

    /// Recipe counts per brand, empty names excluded, largest first.
    async fn brand_counts(&self) -> StoreResult<Vec<GroupCount>>;

    /// Recipe counts per food type, empty names excluded, largest first.
    async fn category_counts(&self) -> StoreResult<Vec<GroupCount>>;

    /// Newest-first page of recipes matching `filter`, plus the filter's total.
    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        skip: usize,
        limit: usize,
    ) -> StoreResult<RecipePage>;

    /// Looks a recipe up by its URL slugs.
    async fn find_recipe(&self, brand_slug: &str, slug: &str) -> StoreResult<Option<Recipe>>;

    /// Other recipes from `brand`, excluding `exclude_id`.
    async fn related_recipes(
        &self,
        brand: &str,
        exclude_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<Recipe>>;

    /// Full-text search, best match first.
    async fn text_search(&self, query: &str, limit: usize) -> StoreResult<Vec<Recipe>>;

    /// Records a user's rating and returns the recipe's new aggregate.
    ///
    /// Returns `Ok(None)` if no recipe has these slugs.
    async fn record_rating(
        &self,
        brand_slug: &str,
        slug: &str,
        user_id: &str,
        value: u8,
    ) -> StoreResult<Option<RatingSummary>>;
}

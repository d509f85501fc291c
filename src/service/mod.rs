//! Catalog Service
//!
//! Cache-aside query functions. Each one derives a key, returns the cached value on a hit,
//! and on a miss computes the value from the repository, formats it, stores it with the
//! endpoint's TTL and returns it.
//!
//! The cache lock is released while the repository is queried, so two requests that miss
//! on the same key both compute and both write. The last write wins; both values are
//! equivalent.

mod cached;
pub mod format;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{keys, CacheStats};
use crate::config::TtlPolicy;
use crate::models::{
    BrandSummary, CategorySummary, HomepageData, ListingPage, RatingSummary, RecipeDetail,
    SearchResults, SectionPage, SiteStats,
};
use crate::repository::{RecipeFilter, RecipeRepository, StoreResult};

pub use cached::{CachedPage, Cacheable, PageCache};

// == Query Limits ==
pub const PAGE_SIZE: usize = 24;
pub const FEATURED_LIMIT: usize = 6;
pub const RECENT_LIMIT: usize = 8;
pub const RELATED_LIMIT: usize = 5;
pub const SEARCH_LIMIT: usize = 50;

/// Shared handle to the page cache.
pub type SharedCache = Arc<RwLock<PageCache>>;

// == Catalog Service ==
#[derive(Clone)]
pub struct CatalogService {
    cache: SharedCache,
    repository: Arc<dyn RecipeRepository>,
    ttl: TtlPolicy,
}

impl CatalogService {
    pub fn new(cache: SharedCache, repository: Arc<dyn RecipeRepository>, ttl: TtlPolicy) -> Self {
        Self {
            cache,
            repository,
            ttl,
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn ttl(&self) -> &TtlPolicy {
        &self.ttl
    }

    // == Cache-Aside Helpers ==
    async fn lookup<T: Cacheable>(&self, key: &str) -> Option<T> {
        let value = self.cache.write().await.get_with(key, T::from_cached);
        if value.is_some() {
            debug!(key = %key, "cache hit");
        }
        value
    }

    async fn store<T: Cacheable>(&self, key: String, value: T, ttl_minutes: u64) {
        self.cache
            .write()
            .await
            .set(key, value.into_cached(), Some(ttl_minutes));
    }

    /// Runs `compute` on a miss and caches its result. Errors are returned, never cached.
    async fn cached<T, F, Fut>(&self, key: String, ttl_minutes: u64, compute: F) -> StoreResult<T>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        if let Some(hit) = self.lookup::<T>(&key).await {
            return Ok(hit);
        }

        info!(key = %key, "cache miss, querying store");
        let value = compute().await?;
        self.store(key, value.clone(), ttl_minutes).await;
        Ok(value)
    }

    // == Site Stats ==
    /// Total recipes, brands and categories.
    pub async fn site_stats(&self) -> StoreResult<SiteStats> {
        self.cached(keys::SITE_STATS.to_string(), self.ttl.stats, || {
            self.repository.site_counts()
        })
        .await
    }

    /// [`Self::site_stats`], or fixed plausible counts if the store fails.
    pub async fn site_stats_or_fallback(&self) -> SiteStats {
        match self.site_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                warn!(error = %err, "serving fallback site stats");
                SiteStats::FALLBACK
            }
        }
    }

    // == Homepage ==
    pub async fn homepage(&self) -> StoreResult<HomepageData> {
        self.cached(keys::HOMEPAGE.to_string(), self.ttl.homepage, || async {
            let facets = self
                .repository
                .homepage(FEATURED_LIMIT, RECENT_LIMIT)
                .await?;
            Ok(HomepageData {
                featured_recipes: format::recipe_cards(&facets.featured),
                recent_recipes: format::recipe_cards(&facets.recent),
            })
        })
        .await
    }

    // == Brand & Category Lists ==
    pub async fn brands(&self) -> StoreResult<Vec<BrandSummary>> {
        self.cached(keys::BRANDS_LIST.to_string(), self.ttl.lists, || async {
            Ok(format::brand_summaries(self.repository.brand_counts().await?))
        })
        .await
    }

    pub async fn categories(&self) -> StoreResult<Vec<CategorySummary>> {
        self.cached(keys::CATEGORIES_LIST.to_string(), self.ttl.lists, || async {
            Ok(format::category_summaries(
                self.repository.category_counts().await?,
            ))
        })
        .await
    }

    // == Listings ==
    /// A page of recipes, optionally filtered by brand slug and/or category slug.
    ///
    /// Page numbers below 1 are read as page 1, for the key as well as the query.
    pub async fn listing(
        &self,
        brand: Option<&str>,
        category: Option<&str>,
        page: u32,
    ) -> StoreResult<ListingPage> {
        let page = page.max(1);
        let brand = brand.filter(|b| !b.is_empty());
        let category = category.filter(|c| !c.is_empty());
        let filter = RecipeFilter {
            brand_slug: brand.map(str::to_string),
            food_type_slug: category.map(str::to_string),
        };

        self.cached(keys::listing(brand, category, page), self.ttl.listing, || {
            self.fetch_page(filter, page)
        })
        .await
    }

    /// A page of one brand's recipes.
    pub async fn brand_page(&self, brand_slug: &str, page: u32) -> StoreResult<SectionPage> {
        let page = page.max(1);
        let filter = RecipeFilter {
            brand_slug: Some(brand_slug.to_string()),
            food_type_slug: None,
        };

        self.cached(keys::brand_page(brand_slug, page), self.ttl.section, || async {
            Ok(SectionPage {
                name: format::display_name(brand_slug),
                listing: self.fetch_page(filter, page).await?,
            })
        })
        .await
    }

    /// A page of one category's recipes.
    pub async fn category_page(&self, category_slug: &str, page: u32) -> StoreResult<SectionPage> {
        let page = page.max(1);
        let filter = RecipeFilter {
            brand_slug: None,
            food_type_slug: Some(category_slug.to_string()),
        };

        self.cached(keys::category_page(category_slug, page), self.ttl.section, || async {
            Ok(SectionPage {
                name: format::display_name(category_slug),
                listing: self.fetch_page(filter, page).await?,
            })
        })
        .await
    }

    async fn fetch_page(&self, filter: RecipeFilter, page: u32) -> StoreResult<ListingPage> {
        let skip = page.saturating_sub(1) as usize * PAGE_SIZE;
        let result = self.repository.list_recipes(&filter, skip, PAGE_SIZE).await?;

        Ok(ListingPage {
            recipes: format::recipe_cards(&result.recipes),
            total_recipes: result.total,
            total_pages: format::total_pages(result.total, PAGE_SIZE),
            current_page: page,
        })
    }

    // == Recipe Detail ==
    /// A recipe with its rendered content and related recipes.
    ///
    /// `Ok(None)` when no recipe has these slugs. Not-found is not cached.
    pub async fn recipe(&self, brand_slug: &str, slug: &str) -> StoreResult<Option<RecipeDetail>> {
        let key = keys::recipe(brand_slug, slug);
        if let Some(hit) = self.lookup::<RecipeDetail>(&key).await {
            return Ok(Some(hit));
        }

        info!(key = %key, "cache miss, querying store");
        let Some(recipe) = self.repository.find_recipe(brand_slug, slug).await? else {
            return Ok(None);
        };

        let related = self
            .repository
            .related_recipes(&recipe.brand, &recipe.id, RELATED_LIMIT)
            .await?;

        let detail = RecipeDetail {
            display_title: format::display_title(&recipe.title),
            description: format::page_description(&recipe),
            url: recipe.url(),
            parsed_content: format::parsed_content(&recipe),
            related_recipes: format::recipe_cards(&related),
            recipe,
        };

        self.store(key, detail.clone(), self.ttl.recipe).await;
        Ok(Some(detail))
    }

    // == Search ==
    /// Up to [`SEARCH_LIMIT`] best matches. A blank query returns nothing and is not cached.
    pub async fn search(&self, query: &str) -> StoreResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::empty(""));
        }

        self.cached(keys::search(query, SEARCH_LIMIT), self.ttl.search, || async {
            let recipes = self.repository.text_search(query, SEARCH_LIMIT).await?;
            let cards = format::recipe_cards(&recipes);
            Ok(SearchResults {
                query: query.to_string(),
                total_results: cards.len(),
                recipes: cards,
            })
        })
        .await
    }

    // == Ratings ==
    /// Records a rating and, once the store accepts it, clears the whole cache.
    ///
    /// Any listing, search or detail page may embed the rating, so every cached entry is
    /// treated as affected. `Ok(None)` when the recipe does not exist; nothing is cleared.
    pub async fn submit_rating(
        &self,
        brand_slug: &str,
        slug: &str,
        user_id: &str,
        value: u8,
    ) -> StoreResult<Option<RatingSummary>> {
        let summary = self
            .repository
            .record_rating(brand_slug, slug, user_id, value)
            .await?;

        if summary.is_some() {
            self.clear_cache().await;
            info!(brand_slug, slug, "rating recorded, page cache cleared");
        }
        Ok(summary)
    }

    // == Administration ==
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.write().await;
        let dropped = cache.len();
        cache.clear();
        info!(entries = dropped, "page cache cleared");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}

//! In-memory recipe repository.
//!
//! Backs development runs and tests. Counts every operation it serves and can be
//! switched off to behave like an unreachable database.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{
    GroupCount, HomepageFacets, RecipeFilter, RecipePage, RecipeRepository, StoreError,
    StoreResult,
};
use crate::models::{RatingSummary, Recipe, SiteStats};

/// URL slug for a display name: lowercase ASCII alphanumerics joined by single dashes.
/// Apostrophes are dropped rather than turned into separators.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch == '\'' || ch == '\u{2019}' {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

// == Memory Repository ==
#[derive(Debug, Default)]
pub struct MemoryRecipeRepository {
    recipes: RwLock<Vec<Recipe>>,
    operations: AtomicU64,
    unavailable: AtomicBool,
}

impl MemoryRecipeRepository {
    /// Creates a repository holding `recipes`, filling in missing ids and slugs.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        let recipes = recipes
            .into_iter()
            .enumerate()
            .map(|(index, recipe)| normalize(recipe, index))
            .collect();

        Self {
            recipes: RwLock::new(recipes),
            ..Self::default()
        }
    }

    /// Parses a JSON array of recipe documents.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Ok(Self::new(recipes))
    }

    /// Adds a recipe directly, bypassing the operation counter.
    pub fn insert(&self, recipe: Recipe) {
        if let Ok(mut recipes) = self.recipes.write() {
            let index = recipes.len();
            recipes.push(normalize(recipe, index));
        }
    }

    /// Number of operations served or refused so far.
    pub fn operation_count(&self) -> u64 {
        self.operations.load(Ordering::SeqCst)
    }

    /// Makes every following operation succeed (`true`) or fail as unreachable (`false`).
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.recipes.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn begin(&self) -> StoreResult<()> {
        self.operations.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "recipe store is not reachable".to_string(),
            ));
        }
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Recipe>>> {
        self.begin()?;
        self.recipes
            .read()
            .map_err(|_| StoreError::Query("recipe collection lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Recipe>>> {
        self.begin()?;
        self.recipes
            .write()
            .map_err(|_| StoreError::Query("recipe collection lock poisoned".to_string()))
    }
}

fn normalize(mut recipe: Recipe, index: usize) -> Recipe {
    if recipe.id.is_empty() {
        recipe.id = format!("recipe-{}", index + 1);
    }
    if recipe.slug.is_empty() {
        recipe.slug = slugify(&recipe.title);
    }
    if recipe.brand_slug.is_empty() {
        recipe.brand_slug = slugify(&recipe.brand);
    }
    if recipe.food_type_slug.is_empty() {
        recipe.food_type_slug = slugify(&recipe.food_type);
    }
    recipe
}

fn newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn group_by<'a>(
    recipes: impl Iterator<Item = (&'a str, &'a str)>,
) -> Vec<GroupCount> {
    let mut groups: BTreeMap<&str, (&str, u64)> = BTreeMap::new();
    for (name, slug) in recipes.filter(|(name, _)| !name.is_empty()) {
        groups.entry(name).or_insert((slug, 0)).1 += 1;
    }

    let mut counts: Vec<GroupCount> = groups
        .into_iter()
        .map(|(name, (slug, count))| GroupCount {
            name: name.to_string(),
            slug: slug.to_string(),
            count,
        })
        .collect();
    // BTreeMap order makes the tie-break alphabetical
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn search_score(recipe: &Recipe, terms: &[String]) -> usize {
    let haystack = format!(
        "{} {} {} {}",
        recipe.title,
        recipe.description.as_deref().unwrap_or_default(),
        recipe.brand,
        recipe.food_type
    )
    .to_lowercase();

    terms.iter().filter(|term| haystack.contains(term.as_str())).count()
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn site_counts(&self) -> StoreResult<SiteStats> {
        let recipes = self.read()?;
        let brands: HashSet<&str> = recipes.iter().map(|r| r.brand.as_str()).collect();
        let categories: HashSet<&str> = recipes.iter().map(|r| r.food_type.as_str()).collect();

        Ok(SiteStats {
            total_recipes: recipes.len() as u64,
            total_brands: brands.len() as u64,
            total_categories: categories.len() as u64,
        })
    }

    async fn homepage(
        &self,
        featured_limit: usize,
        recent_limit: usize,
    ) -> StoreResult<HomepageFacets> {
        let recipes = self.read()?;

        let featured = recipes
            .iter()
            .filter(|r| r.featured)
            .take(featured_limit)
            .cloned()
            .collect();

        let mut recent: Vec<Recipe> = recipes.clone();
        newest_first(&mut recent);
        recent.truncate(recent_limit);

        Ok(HomepageFacets { featured, recent })
    }

    async fn brand_counts(&self) -> StoreResult<Vec<GroupCount>> {
        let recipes = self.read()?;
        Ok(group_by(
            recipes.iter().map(|r| (r.brand.as_str(), r.brand_slug.as_str())),
        ))
    }

    async fn category_counts(&self) -> StoreResult<Vec<GroupCount>> {
        let recipes = self.read()?;
        Ok(group_by(
            recipes
                .iter()
                .map(|r| (r.food_type.as_str(), r.food_type_slug.as_str())),
        ))
    }

    async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        skip: usize,
        limit: usize,
    ) -> StoreResult<RecipePage> {
        let recipes = self.read()?;

        let mut matching: Vec<Recipe> = recipes.iter().filter(|r| filter.matches(r)).cloned().collect();
        let total = matching.len() as u64;
        newest_first(&mut matching);

        Ok(RecipePage {
            recipes: matching.into_iter().skip(skip).take(limit).collect(),
            total,
        })
    }

    async fn find_recipe(&self, brand_slug: &str, slug: &str) -> StoreResult<Option<Recipe>> {
        let recipes = self.read()?;
        Ok(recipes
            .iter()
            .find(|r| r.brand_slug == brand_slug && r.slug == slug)
            .cloned())
    }

    async fn related_recipes(
        &self,
        brand: &str,
        exclude_id: &str,
        limit: usize,
    ) -> StoreResult<Vec<Recipe>> {
        let recipes = self.read()?;
        Ok(recipes
            .iter()
            .filter(|r| r.brand == brand && r.id != exclude_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn text_search(&self, query: &str, limit: usize) -> StoreResult<Vec<Recipe>> {
        let recipes = self.read()?;
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        let mut scored: Vec<(usize, &Recipe)> = recipes
            .iter()
            .map(|r| (search_score(r, &terms), r))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then_with(|| b.created_at.cmp(&a.created_at)));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn record_rating(
        &self,
        brand_slug: &str,
        slug: &str,
        user_id: &str,
        value: u8,
    ) -> StoreResult<Option<RatingSummary>> {
        let mut recipes = self.write()?;

        Ok(recipes
            .iter_mut()
            .find(|r| r.brand_slug == brand_slug && r.slug == slug)
            .map(|recipe| {
                recipe.rating.submit(user_id, value, Utc::now());
                recipe.rating.summary()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn recipe(title: &str, brand: &str, food_type: &str, age_days: i64) -> Recipe {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut recipe: Recipe = serde_json::from_value(serde_json::json!({
            "title": title,
            "brand": brand,
            "foodType": food_type,
        }))
        .unwrap();
        recipe.created_at = base - Duration::days(age_days);
        recipe
    }

    fn sample_repo() -> MemoryRecipeRepository {
        let mut featured = recipe("Crunchwrap Supreme", "Taco Bell", "Entree", 3);
        featured.featured = true;
        MemoryRecipeRepository::new(vec![
            featured,
            recipe("Baja Blast", "Taco Bell", "Drink", 1),
            recipe("Big Mac Sauce", "McDonald's", "Sauce", 2),
            recipe("Frosty", "Wendy's", "Dessert", 0),
        ])
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Taco Bell"), "taco-bell");
        assert_eq!(slugify("McDonald's"), "mcdonalds");
        assert_eq!(slugify("  Mac & Cheese!! "), "mac-cheese");
    }

    #[test]
    fn test_new_fills_slugs_and_ids() {
        let repo = sample_repo();
        let recipes = repo.recipes.read().unwrap();

        assert_eq!(recipes[0].id, "recipe-1");
        assert_eq!(recipes[0].slug, "crunchwrap-supreme");
        assert_eq!(recipes[0].brand_slug, "taco-bell");
        assert_eq!(recipes[2].food_type_slug, "sauce");
    }

    #[tokio::test]
    async fn test_site_counts() {
        let stats = sample_repo().site_counts().await.unwrap();
        assert_eq!(stats.total_recipes, 4);
        assert_eq!(stats.total_brands, 3);
        assert_eq!(stats.total_categories, 4);
    }

    #[tokio::test]
    async fn test_list_recipes_pages_newest_first() {
        let repo = sample_repo();

        let page = repo
            .list_recipes(&RecipeFilter::default(), 1, 2)
            .await
            .unwrap();

        assert_eq!(page.total, 4);
        let titles: Vec<&str> = page.recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Baja Blast", "Big Mac Sauce"]);
    }

    #[tokio::test]
    async fn test_brand_counts_sorted_by_count() {
        let counts = sample_repo().brand_counts().await.unwrap();

        assert_eq!(counts[0].name, "Taco Bell");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[0].slug, "taco-bell");
        // ties alphabetical
        assert_eq!(counts[1].name, "McDonald's");
        assert_eq!(counts[2].name, "Wendy's");
    }

    #[tokio::test]
    async fn test_text_search_ranks_by_terms() {
        let repo = sample_repo();

        let results = repo.text_search("taco crunchwrap", 10).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Crunchwrap Supreme");
        assert_eq!(results[1].title, "Baja Blast");
    }

    #[tokio::test]
    async fn test_record_rating() {
        let repo = sample_repo();

        let summary = repo
            .record_rating("taco-bell", "baja-blast", "u1", 5)
            .await
            .unwrap();
        assert_eq!(summary, Some(RatingSummary { value: 5.0, count: 1 }));

        let missing = repo.record_rating("nope", "nope", "u1", 5).await.unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_and_counts() {
        let repo = sample_repo();
        repo.set_available(false);

        let result = repo.site_counts().await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(repo.operation_count(), 1);

        repo.set_available(true);
        assert!(repo.site_counts().await.is_ok());
        assert_eq!(repo.operation_count(), 2);
    }
}

//! Recipe document as held by the backing store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rating value a recipe shows before anyone has rated it.
pub const DEFAULT_RATING: f64 = 4.5;

/// A single recipe document.
///
/// Seed files use the same camelCase field names. Slugs may be left out of seed
/// data and are derived from `title`, `brand` and `foodType` on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub brand: String,
    #[serde(default)]
    pub brand_slug: String,
    #[serde(default)]
    pub food_type: String,
    #[serde(default)]
    pub food_type_slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_alt: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub content_markdown: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// Public path of the recipe page.
    pub fn url(&self) -> String {
        format!("/recipes/{}/{}", self.brand_slug, self.slug)
    }
}

/// Aggregate rating plus the individual submissions it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub value: f64,
    pub count: u32,
    #[serde(default, skip_serializing)]
    pub user_ratings: Vec<UserRating>,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            value: DEFAULT_RATING,
            count: 0,
            user_ratings: Vec::new(),
        }
    }
}

impl Rating {
    /// Records a submission and recomputes the average.
    ///
    /// A user rating twice replaces their earlier submission.
    pub fn submit(&mut self, user_id: &str, value: u8, at: DateTime<Utc>) {
        self.user_ratings.retain(|r| r.user_id != user_id);
        self.user_ratings.push(UserRating {
            user_id: user_id.to_string(),
            value,
            date: at,
        });

        let sum: u32 = self.user_ratings.iter().map(|r| u32::from(r.value)).sum();
        self.count = self.user_ratings.len() as u32;
        self.value = f64::from(sum) / f64::from(self.count);
    }

    pub fn summary(&self) -> RatingSummary {
        RatingSummary {
            value: self.value,
            count: self.count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRating {
    pub user_id: String,
    pub value: u8,
    pub date: DateTime<Utc>,
}

/// Rating as shown on recipe pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub value: f64,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_from_minimal_json() {
        let json = r#"{"title": "Big Mac Sauce", "brand": "McDonald's"}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();

        assert_eq!(recipe.title, "Big Mac Sauce");
        assert!(recipe.slug.is_empty());
        assert_eq!(recipe.rating.value, DEFAULT_RATING);
        assert_eq!(recipe.rating.count, 0);
        assert!(!recipe.featured);
    }

    #[test]
    fn test_rating_average() {
        let mut rating = Rating::default();
        let now = Utc::now();

        rating.submit("u1", 5, now);
        rating.submit("u2", 2, now);

        assert_eq!(rating.count, 2);
        assert_eq!(rating.value, 3.5);
    }

    #[test]
    fn test_rating_resubmission_replaces() {
        let mut rating = Rating::default();
        let now = Utc::now();

        rating.submit("u1", 1, now);
        rating.submit("u1", 4, now);

        assert_eq!(rating.summary(), RatingSummary { value: 4.0, count: 1 });
    }

    #[test]
    fn test_user_ratings_not_serialized() {
        let mut rating = Rating::default();
        rating.submit("secret-user", 3, Utc::now());

        let json = serde_json::to_string(&rating).unwrap();
        assert!(!json.contains("secret-user"));
    }
}

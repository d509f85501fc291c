//! Cache Key Module
//!
//! Builds the fingerprints that address cached query results.
//!
//! Composite keys join their parts with `:`. Every caller-supplied part is escaped so it can
//! never contain `:` or the bare `*` used for "no filter", which keeps two different queries
//! from ever sharing a key.

use std::borrow::Cow;

// == Singleton Keys ==
pub const SITE_STATS: &str = "site_stats";
pub const HOMEPAGE: &str = "homepage_data";
pub const BRANDS_LIST: &str = "brands_list";
pub const CATEGORIES_LIST: &str = "categories_list";

/// Placeholder for an absent filter.
const UNFILTERED: &str = "*";

// == Escaping ==
/// Escapes `%`, `:` and `*` in a key component.
pub fn escape_component(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', ':', '*']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            ':' => escaped.push_str("%3A"),
            '*' => escaped.push_str("%2A"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

fn filter_component(filter: Option<&str>) -> Cow<'_, str> {
    match filter {
        Some(value) if !value.is_empty() => escape_component(value),
        _ => Cow::Borrowed(UNFILTERED),
    }
}

// == Composite Keys ==
/// Paginated listing filtered by brand slug and/or category slug.
pub fn listing(brand: Option<&str>, category: Option<&str>, page: u32) -> String {
    format!(
        "recipes:{}:{}:{}",
        filter_component(brand),
        filter_component(category),
        page
    )
}

/// One page of a single brand's recipes.
pub fn brand_page(brand_slug: &str, page: u32) -> String {
    format!("brand:{}:{}", escape_component(brand_slug), page)
}

/// One page of a single category's recipes.
pub fn category_page(category_slug: &str, page: u32) -> String {
    format!("category:{}:{}", escape_component(category_slug), page)
}

/// A recipe's detail view.
pub fn recipe(brand_slug: &str, slug: &str) -> String {
    format!(
        "recipe:{}:{}",
        escape_component(brand_slug),
        escape_component(slug)
    )
}

/// Search results. Surrounding whitespace in the query does not change the key.
pub fn search(query: &str, limit: usize) -> String {
    format!("search:{}:{}", escape_component(query.trim()), limit)
}

//! What the page cache holds.
//!
//! Each cached query result is one variant of [`CachedPage`]. [`Cacheable`] moves a
//! typed result in and out of it so the cache-aside helpers stay generic.

use crate::cache::TtlCache;
use crate::models::{
    BrandSummary, CategorySummary, HomepageData, ListingPage, RecipeDetail, SearchResults,
    SectionPage, SiteStats,
};

/// The cache instance shared by all query functions.
pub type PageCache = TtlCache<CachedPage>;

#[derive(Debug, Clone, PartialEq)]
pub enum CachedPage {
    Stats(SiteStats),
    Homepage(HomepageData),
    Brands(Vec<BrandSummary>),
    Categories(Vec<CategorySummary>),
    Listing(ListingPage),
    Section(SectionPage),
    Recipe(Box<RecipeDetail>),
    Search(SearchResults),
}

/// A query result that can be stored in the [`PageCache`].
pub trait Cacheable: Clone + Sized {
    fn into_cached(self) -> CachedPage;

    /// Returns `None` if the cached value is a different kind of result.
    fn from_cached(page: CachedPage) -> Option<Self>;
}

macro_rules! cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedPage {
                CachedPage::$variant(self)
            }

            fn from_cached(page: CachedPage) -> Option<Self> {
                match page {
                    CachedPage::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

cacheable!(SiteStats, Stats);
cacheable!(HomepageData, Homepage);
cacheable!(Vec<BrandSummary>, Brands);
cacheable!(Vec<CategorySummary>, Categories);
cacheable!(ListingPage, Listing);
cacheable!(SectionPage, Section);
cacheable!(SearchResults, Search);

impl Cacheable for RecipeDetail {
    fn into_cached(self) -> CachedPage {
        CachedPage::Recipe(Box::new(self))
    }

    fn from_cached(page: CachedPage) -> Option<Self> {
        match page {
            CachedPage::Recipe(detail) => Some(*detail),
            _ => None,
        }
    }
}

//! Configuration Module
//!
//! Handles loading server and cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// == TTL Policy ==
/// Freshness window, in minutes, for each kind of cached query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtlPolicy {
    /// Site-wide counts
    pub stats: u64,
    /// Featured + recent recipes
    pub homepage: u64,
    /// Brand and category lists
    pub lists: u64,
    /// Filtered, paginated listings
    pub listing: u64,
    /// Per-brand and per-category pages
    pub section: u64,
    /// A recipe with its related recipes
    pub recipe: u64,
    /// Search results
    pub search: u64,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            stats: 1440,
            homepage: 1440,
            lists: 1440,
            listing: 240,
            section: 480,
            recipe: 1440,
            search: 240,
        }
    }
}

impl TtlPolicy {
    /// Reads per-endpoint overrides, keeping the default for any variable not set.
    ///
    /// # Environment Variables
    /// `STATS_TTL_MINUTES`, `HOMEPAGE_TTL_MINUTES`, `LISTS_TTL_MINUTES`,
    /// `LISTING_TTL_MINUTES`, `SECTION_TTL_MINUTES`, `RECIPE_TTL_MINUTES`,
    /// `SEARCH_TTL_MINUTES`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            stats: env_or("STATS_TTL_MINUTES", defaults.stats),
            homepage: env_or("HOMEPAGE_TTL_MINUTES", defaults.homepage),
            lists: env_or("LISTS_TTL_MINUTES", defaults.lists),
            listing: env_or("LISTING_TTL_MINUTES", defaults.listing),
            section: env_or("SECTION_TTL_MINUTES", defaults.section),
            recipe: env_or("RECIPE_TTL_MINUTES", defaults.recipe),
            search: env_or("SEARCH_TTL_MINUTES", defaults.search),
        }
    }
}

// == Config ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in minutes for cache writes that do not name one
    pub default_ttl_minutes: u64,
    /// Per-endpoint TTLs
    pub ttl: TtlPolicy,
    /// JSON file of recipe documents loaded into the in-memory store at startup
    pub recipes_path: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEFAULT_TTL_MINUTES` - TTL for writes without one (default: 30)
    /// - `RECIPES_PATH` - Seed file for the recipe store (default: none)
    /// - per-endpoint TTLs, see [`TtlPolicy::from_env`]
    pub fn from_env() -> Self {
        Self {
            server_port: env_or("SERVER_PORT", 3000),
            default_ttl_minutes: env_or("DEFAULT_TTL_MINUTES", 30),
            ttl: TtlPolicy::from_env(),
            recipes_path: env::var("RECIPES_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            default_ttl_minutes: 30,
            ttl: TtlPolicy::default(),
            recipes_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.default_ttl_minutes, 30);
        assert!(config.recipes_path.is_none());
        assert_eq!(config.ttl, TtlPolicy::default());
    }

    #[test]
    fn test_ttl_policy_defaults() {
        let ttl = TtlPolicy::default();
        assert_eq!(ttl.stats, 1440);
        assert_eq!(ttl.listing, 240);
        assert_eq!(ttl.section, 480);
        assert_eq!(ttl.search, 240);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("RECIPE_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("RECIPE_CACHE_TEST_GARBAGE", 7u64), 7);
        env::remove_var("RECIPE_CACHE_TEST_GARBAGE");
    }

    #[test]
    fn test_env_or_reads_value() {
        env::set_var("RECIPE_CACHE_TEST_PORT", "8080");
        assert_eq!(env_or("RECIPE_CACHE_TEST_PORT", 3000u16), 8080);
        env::remove_var("RECIPE_CACHE_TEST_PORT");
    }
}

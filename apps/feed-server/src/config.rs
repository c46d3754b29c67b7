//! Application configuration loaded from environment variables.

use std::env;

use agora_core::SortMode;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Ordering used when a feed request names none.
    pub default_sort: SortMode,
    /// Upper bound on posts returned by one feed request.
    pub feed_max_limit: usize,
    /// Fill the in-memory store with sample posts at startup.
    pub seed_demo_posts: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            default_sort: SortMode::Hot,
            feed_max_limit: 100,
            seed_demo_posts: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            default_sort: env::var("DEFAULT_SORT")
                .ok()
                .map(|s| Self::parse_sort(&s, defaults.default_sort))
                .unwrap_or(defaults.default_sort),
            feed_max_limit: env::var("FEED_MAX_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.feed_max_limit),
            seed_demo_posts: env::var("SEED_DEMO_POSTS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.seed_demo_posts),
        }
    }

    fn parse_sort(value: &str, fallback: SortMode) -> SortMode {
        value.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, fallback = %fallback, "Invalid DEFAULT_SORT, using fallback");
            fallback
        })
    }
}

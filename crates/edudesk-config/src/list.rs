//! List view settings.
//!
//! The entries-per-page selector only offers `page_sizes`; any other size is
//! rejected by the list query. Typing in the search box waits for
//! `search_debounce_ms` of quiet before a request is made.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use edudesk_config::ListConfig;
//!
//! let config = ListConfig::default();
//! assert_eq!(config.default_page_size, 10);
//! assert!(config.is_allowed_page_size(50));
//! assert!(!config.is_allowed_page_size(7));
//! assert_eq!(config.search_debounce(), Duration::from_millis(500));
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_PAGE_SIZES: [u32; 4] = [10, 25, 50, 100];

/// List view settings.
///
/// # Environment Variables
///
/// - `EDUDESK_PAGE_SIZES`: Comma separated entries-per-page choices (default: `10,25,50,100`)
/// - `EDUDESK_DEFAULT_PAGE_SIZE`: Initial page size, must be one of the choices (default: `10`)
/// - `EDUDESK_SEARCH_DEBOUNCE_MS`: Quiet period before a search fires (default: `500`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    pub page_sizes: Vec<u32>,
    pub default_page_size: u32,
    pub search_debounce_ms: u64,
}

impl ListConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let page_sizes: Vec<u32> = env::var("EDUDESK_PAGE_SIZES")
            .map(|s| {
                s.split(',')
                    .filter_map(|v| v.trim().parse::<u32>().ok())
                    .filter(|v| *v > 0)
                    .collect()
            })
            .unwrap_or_default();
        let page_sizes = if page_sizes.is_empty() {
            defaults.page_sizes
        } else {
            page_sizes
        };

        let default_page_size = env::var("EDUDESK_DEFAULT_PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|size| page_sizes.contains(size))
            .unwrap_or(page_sizes[0]);

        Self {
            page_sizes,
            default_page_size,
            search_debounce_ms: env::var("EDUDESK_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.search_debounce_ms),
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn is_allowed_page_size(&self, size: u32) -> bool {
        self.page_sizes.contains(&size)
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZES[0],
            search_debounce_ms: 500,
        }
    }
}

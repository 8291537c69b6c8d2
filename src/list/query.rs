//! Pagination, sort, search, and filter state of one list view.

use std::collections::BTreeMap;
use std::fmt;

use edudesk_config::ListConfig;
use edudesk_core::pagination::clamp_page;
use edudesk_core::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-facing list controls, translated into request parameters.
///
/// Every change except [`set_page`](Self::set_page) puts the view back on
/// page 1. Sort is kept across [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    sort_field: String,
    sort_order: SortOrder,
    search: String,
    filters: BTreeMap<String, String>,
    page_sizes: Vec<u32>,
}

impl ListQuery {
    pub fn new(default_sort: &str, config: &ListConfig) -> Self {
        Self {
            page: 1,
            page_size: config.default_page_size,
            sort_field: default_sort.to_string(),
            sort_order: SortOrder::default(),
            search: String::new(),
            filters: BTreeMap::new(),
            page_sizes: config.page_sizes.clone(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_sizes(&self) -> &[u32] {
        &self.page_sizes
    }

    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Jump to a page. Nothing else changes.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, size: u32) -> ClientResult<()> {
        if !self.page_sizes.contains(&size) {
            return Err(ClientError::Validation(format!(
                "page size {size} is not one of {:?}",
                self.page_sizes
            )));
        }
        self.page_size = size;
        self.page = 1;
        Ok(())
    }

    /// Set one filter; an empty value removes it.
    pub fn set_filter(&mut self, name: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.filters.remove(name);
        } else {
            self.filters.insert(name.to_string(), value.to_string());
        }
        self.page = 1;
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_string();
        self.page = 1;
    }

    /// Same field flips the order, a new field starts descending.
    pub fn sort_by(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_field = field.to_string();
            self.sort_order = SortOrder::Desc;
        }
        self.page = 1;
    }

    /// Clear search and filters and go back to page 1.
    pub fn reset(&mut self) {
        self.search.clear();
        self.filters.clear();
        self.page = 1;
    }

    /// Pull the page back into range once the server reports the total.
    ///
    /// Returns whether the page changed.
    pub fn clamp_to(&mut self, total_pages: u32) -> bool {
        let clamped = clamp_page(self.page, total_pages);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Query parameters for the list request.
    ///
    /// A branch scope, when given, is sent as the `branch_id` filter and takes
    /// precedence over a user-set one.
    pub fn to_params(&self, branch_scope: Option<i64>) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.page_size.to_string()),
            ("search".to_string(), self.search.clone()),
        ];
        for (name, value) in &self.filters {
            if branch_scope.is_some() && name == "branch_id" {
                continue;
            }
            params.push((name.clone(), value.clone()));
        }
        if let Some(branch) = branch_scope {
            params.push(("branch_id".to_string(), branch.to_string()));
        }
        params.push(("sort_field".to_string(), self.sort_field.clone()));
        params.push(("sort_order".to_string(), self.sort_order.to_string()));
        params
    }
}

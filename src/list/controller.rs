use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use edudesk_auth::SessionStore;
use edudesk_config::ListConfig;
use edudesk_core::pagination::pagination_window;
use edudesk_core::{ClientError, ClientResult};
use tracing::{debug, info, instrument, warn};

use super::debounce::SearchDebouncer;
use super::query::ListQuery;
use crate::resource::{Resource, ResourceApi};

/// Something that reloads after a drawer saves.
#[async_trait]
pub trait RefreshListener: Send + Sync {
    async fn on_refresh(&self);
}

/// What the list view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub rows: Vec<T>,
    pub total_pages: u32,
    pub total_count: u64,
    pub loading: bool,
    /// Message of the last failed fetch; cleared by the next success.
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            total_pages: 0,
            total_count: 0,
            loading: false,
            error: None,
        }
    }
}

struct Inner<T> {
    query: ListQuery,
    state: ListState<T>,
    /// Sequence number of the latest issued fetch.
    issued: u64,
}

/// Drives one list view: owns the query, issues fetches, reconciles responses.
///
/// Each fetch is tagged with an increasing sequence number. A response that is
/// not for the latest fetch is discarded, so the last request issued wins
/// regardless of arrival order.
pub struct ListController<R: Resource> {
    api: ResourceApi<R>,
    session: SessionStore,
    inner: Arc<Mutex<Inner<R::Record>>>,
    debouncer: Arc<SearchDebouncer>,
}

impl<R: Resource> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            inner: Arc::clone(&self.inner),
            debouncer: Arc::clone(&self.debouncer),
        }
    }
}

impl<R: Resource> ListController<R> {
    pub fn new(api: ResourceApi<R>, session: SessionStore, config: &ListConfig) -> Self {
        Self {
            api,
            session,
            inner: Arc::new(Mutex::new(Inner {
                query: ListQuery::new(R::DEFAULT_SORT, config),
                state: ListState::default(),
                issued: 0,
            })),
            debouncer: Arc::new(SearchDebouncer::new(config.search_debounce())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R::Record>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn query(&self) -> ListQuery {
        self.lock().query.clone()
    }

    pub fn state(&self) -> ListState<R::Record> {
        self.lock().state.clone()
    }

    /// Page buttons for the current page and server-reported total.
    pub fn window(&self) -> Vec<u32> {
        let inner = self.lock();
        pagination_window(inner.query.page(), inner.state.total_pages)
    }

    pub fn can_add(&self) -> bool {
        self.session.has_permission(R::ADD)
    }

    pub fn can_edit(&self) -> bool {
        self.session.has_permission(R::EDIT)
    }

    pub fn can_delete(&self) -> bool {
        self.session.has_permission(R::DELETE)
    }

    /// Fetch the current query. Failures clear the rows and are kept in
    /// [`ListState::error`] until the next successful fetch.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn refresh(&self) -> ClientResult<()> {
        self.session.require(R::VIEW)?;

        // One follow-up fetch when the page fell past the end, e.g. after
        // deleting the last row of the last page.
        for _ in 0..2 {
            let (seq, params) = {
                let mut inner = self.lock();
                inner.issued += 1;
                inner.state.loading = true;
                (inner.issued, inner.query.to_params(self.session.branch_scope()))
            };

            let result = self.api.list(params).await;

            let mut inner = self.lock();
            if seq != inner.issued {
                debug!(seq, latest = inner.issued, "Discarding stale list response");
                return Ok(());
            }
            inner.state.loading = false;

            match result {
                Ok(page) => {
                    let past_end = page.results.is_empty()
                        && page.total_pages > 0
                        && inner.query.page() > page.total_pages;
                    inner.state.rows = page.results;
                    inner.state.total_pages = page.total_pages;
                    inner.state.total_count = page.total_count;
                    inner.state.error = None;
                    if past_end && inner.query.clamp_to(page.total_pages) {
                        continue;
                    }
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "List fetch failed");
                    inner.state.rows.clear();
                    inner.state.total_pages = 0;
                    inner.state.total_count = 0;
                    inner.state.error = Some(e.to_string());
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Apply several query changes without fetching; call
    /// [`refresh`](Self::refresh) afterwards.
    pub fn edit_query(
        &self,
        edit: impl FnOnce(&mut ListQuery) -> ClientResult<()>,
    ) -> ClientResult<()> {
        let mut inner = self.lock();
        let mut next = inner.query.clone();
        edit(&mut next)?;
        inner.query = next;
        Ok(())
    }

    /// Refetch after a failure.
    pub async fn retry(&self) -> ClientResult<()> {
        self.refresh().await
    }

    pub async fn set_page(&self, page: u32) -> ClientResult<()> {
        self.lock().query.set_page(page);
        self.refresh().await
    }

    pub async fn set_page_size(&self, size: u32) -> ClientResult<()> {
        self.lock().query.set_page_size(size)?;
        self.refresh().await
    }

    pub async fn set_filter(&self, name: &str, value: &str) -> ClientResult<()> {
        self.lock().query.set_filter(name, value);
        self.refresh().await
    }

    pub async fn sort_by(&self, field: &str) -> ClientResult<()> {
        self.lock().query.sort_by(field);
        self.refresh().await
    }

    pub async fn reset(&self) -> ClientResult<()> {
        self.debouncer.cancel();
        self.lock().query.reset();
        self.refresh().await
    }

    /// Debounced search. The query only changes, and the fetch only fires,
    /// once no further search has arrived for the quiet period.
    pub fn search(&self, text: &str) {
        let controller = self.clone();
        let text = text.to_string();
        self.debouncer.schedule(async move {
            controller.lock().query.set_search(&text);
            if let Err(e) = controller.refresh().await {
                warn!(error = %e, "Search fetch failed");
            }
        });
    }

    /// Apply a search immediately, skipping the quiet period.
    pub async fn search_now(&self, text: &str) -> ClientResult<()> {
        self.debouncer.cancel();
        self.lock().query.set_search(text);
        self.refresh().await
    }

    /// Delete a row and refetch. Refuses unless the caller confirmed.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete_row(&self, id: i64, confirmed: bool) -> ClientResult<()> {
        self.session.require(R::DELETE)?;
        if !confirmed {
            return Err(ClientError::InvalidState(format!(
                "deleting {} {id} needs confirmation",
                R::NAME
            )));
        }
        self.api.delete(id).await?;
        info!(id, "Deleted {}", R::NAME);
        self.refresh().await
    }
}

#[async_trait]
impl<R: Resource> RefreshListener for ListController<R> {
    async fn on_refresh(&self) {
        if let Err(e) = self.refresh().await {
            warn!(resource = R::PATH, error = %e, "Refresh after save failed");
        }
    }
}

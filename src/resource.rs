//! The per-entity binding every list and drawer is generic over.
//!
//! A [`Resource`] names the record and draft types of one entity, its REST
//! paths, its permission tokens, and which draft fields are multi-valued or
//! labeled references. [`ResourceApi`] issues the REST calls for it.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use edudesk_auth::Route;
use edudesk_core::{ClientResult, Page};
use edudesk_models::SelectOption;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};
use validator::Validate;

use crate::api::{ApiRequest, Transport};

/// Page size used when a resource feeds another resource's dropdown.
pub const OPTIONS_PAGE_SIZE: u32 = 100;

/// A labeled foreign key in a draft: logical name plus its two wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceField {
    pub name: &'static str,
    pub id_key: &'static str,
    pub label_key: &'static str,
}

impl ReferenceField {
    pub const fn new(name: &'static str, id_key: &'static str, label_key: &'static str) -> Self {
        Self {
            name,
            id_key,
            label_key,
        }
    }
}

pub trait Resource: Send + Sync + 'static {
    /// Entity as returned by the API.
    type Record: DeserializeOwned + Serialize + Clone + Debug + Send + Sync;
    /// Editable fields; `Default` is the create template.
    type Draft: DeserializeOwned + Serialize + Validate + Default + Clone + Debug + Send + Sync;

    /// Singular display name, e.g. `lead`.
    const NAME: &'static str;
    /// Collection path without slashes, e.g. `leads`.
    const PATH: &'static str;
    /// Segment under [`Self::PATH`] that accepts creates.
    const CREATE_SEGMENT: &'static str = "create";
    const ROUTE: Route;

    const VIEW: &'static str;
    const ADD: &'static str;
    const EDIT: &'static str;
    const DELETE: &'static str;

    const DEFAULT_SORT: &'static str = "created_at";
    /// Structured filters the list endpoint understands.
    const FILTERS: &'static [&'static str] = &[];
    /// Draft fields edited through toggle.
    const MULTI_VALUE_FIELDS: &'static [&'static str] = &[];
    /// Draft fields holding an `(id, label)` pair.
    const REFERENCES: &'static [ReferenceField] = &[];

    fn id(record: &Self::Record) -> i64;

    /// Draft populated from a fetched record.
    fn hydrate(record: Self::Record) -> Self::Draft;

    /// Option shown when this resource feeds a dropdown.
    fn option(record: &Self::Record) -> SelectOption;

    /// Choices offered for a draft field, empty when free-form.
    fn field_options(_field: &str) -> Vec<SelectOption> {
        Vec::new()
    }

    fn template() -> Self::Draft {
        Self::Draft::default()
    }

    fn list_path() -> String {
        format!("{}/", Self::PATH)
    }

    fn detail_path(id: i64) -> String {
        format!("{}/{id}/", Self::PATH)
    }

    fn create_path() -> String {
        format!("{}/{}/", Self::PATH, Self::CREATE_SEGMENT)
    }

    fn delete_path(id: i64) -> String {
        format!("{}/{id}/delete/", Self::PATH)
    }

    fn reference(name: &str) -> Option<&'static ReferenceField> {
        Self::REFERENCES.iter().find(|r| r.name == name)
    }

    fn is_multi_value(field: &str) -> bool {
        Self::MULTI_VALUE_FIELDS.contains(&field)
    }
}

/// REST calls for one resource.
pub struct ResourceApi<R: Resource> {
    transport: Arc<dyn Transport>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn list(&self, params: Vec<(String, String)>) -> ClientResult<Page<R::Record>> {
        let body = self
            .transport
            .send(ApiRequest::get(R::list_path()).with_query(params))
            .await?;
        let page: Page<R::Record> = serde_json::from_value(body)?;
        debug!(
            rows = page.results.len(),
            total_count = page.total_count,
            "Fetched page"
        );
        Ok(page)
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn get(&self, id: i64) -> ClientResult<R::Record> {
        let body = self.transport.send(ApiRequest::get(R::detail_path(id))).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Create from a draft. Returns whatever the server echoes back.
    #[instrument(skip(self, draft), fields(resource = R::PATH))]
    pub async fn create(&self, draft: &R::Draft) -> ClientResult<Value> {
        let body = serde_json::to_value(draft)?;
        self.transport
            .send(ApiRequest::post(R::create_path(), body))
            .await
    }

    /// Replace an existing record.
    #[instrument(skip(self, draft), fields(resource = R::PATH))]
    pub async fn update(&self, id: i64, draft: &R::Draft) -> ClientResult<Value> {
        let body = serde_json::to_value(draft)?;
        self.transport
            .send(ApiRequest::put(R::detail_path(id), body))
            .await
    }

    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.transport
            .send(ApiRequest::delete(R::delete_path(id)))
            .await?;
        Ok(())
    }

    /// First page of records as dropdown options.
    pub async fn options(&self) -> ClientResult<Vec<SelectOption>> {
        let params = vec![
            ("page".to_string(), "1".to_string()),
            ("size".to_string(), OPTIONS_PAGE_SIZE.to_string()),
        ];
        let page = self.list(params).await?;
        Ok(page.results.iter().map(R::option).collect())
    }
}

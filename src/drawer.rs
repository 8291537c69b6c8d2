//! Create/edit form controller.
//!
//! ```text
//! Closed ──open(None)──────────────────────────▶ Editing
//! Closed ──open(Some(id))──▶ Loading ──ok──────▶ Editing
//!                               └──err──▶ LoadFailed ──retry──▶ Loading
//! Editing ──submit──▶ Submitting ──ok──▶ (refresh listener) ──▶ Closed
//!                         └──err──▶ Editing (draft kept)
//! ```
//!
//! `close()` is available from every state and drops the draft.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use edudesk_auth::SessionStore;
use edudesk_core::multi_value::MultiValue;
use edudesk_core::{ClientError, ClientResult};
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::list::RefreshListener;
use crate::resource::{Resource, ResourceApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Loading,
    Editing,
    Submitting,
    /// The detail fetch failed; `retry()` or `close()`.
    LoadFailed(String),
}

struct Inner<D> {
    state: DrawerState,
    target: Option<i64>,
    draft: Option<D>,
    /// Message of the last failed submit, shown inline while editing.
    error: Option<String>,
    /// Bumped on every open and close so a late detail response for a
    /// previous target is dropped.
    generation: u64,
}

pub struct DrawerController<R: Resource> {
    api: ResourceApi<R>,
    session: SessionStore,
    listener: Option<Arc<dyn RefreshListener>>,
    inner: Arc<Mutex<Inner<R::Draft>>>,
}

impl<R: Resource> Clone for DrawerController<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            listener: self.listener.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> DrawerController<R> {
    pub fn new(api: ResourceApi<R>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            listener: None,
            inner: Arc::new(Mutex::new(Inner {
                state: DrawerState::Closed,
                target: None,
                draft: None,
                error: None,
                generation: 0,
            })),
        }
    }

    /// Notify `listener` after every successful submit.
    pub fn with_listener(mut self, listener: Arc<dyn RefreshListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner<R::Draft>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> DrawerState {
        self.lock().state.clone()
    }

    pub fn is_open(&self) -> bool {
        self.state() != DrawerState::Closed
    }

    /// Id being edited; `None` in create mode or when closed.
    pub fn target(&self) -> Option<i64> {
        self.lock().target
    }

    pub fn draft(&self) -> Option<R::Draft> {
        self.lock().draft.clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Token the submit control is gated on: add in create mode, edit otherwise.
    pub fn submit_permission(&self) -> &'static str {
        if self.target().is_some() { R::EDIT } else { R::ADD }
    }

    /// Whether to render the submit control. When false the form is read-only.
    pub fn can_submit(&self) -> bool {
        self.session.has_permission(self.submit_permission())
    }

    /// Open for create (`None`) or edit (`Some(id)`).
    ///
    /// Any previous draft is discarded. In create mode the draft is the
    /// template, with the session's branch filled in when the draft has one.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn open(&self, id: Option<i64>) -> ClientResult<()> {
        let generation = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.target = id;
            inner.draft = None;
            inner.error = None;
            match id {
                None => {
                    inner.draft = Some(self.create_template());
                    inner.state = DrawerState::Editing;
                    debug!("Drawer opened for create");
                    return Ok(());
                }
                Some(_) => inner.state = DrawerState::Loading,
            }
            inner.generation
        };

        let Some(id) = id else {
            return Ok(());
        };
        self.load(id, generation).await
    }

    async fn load(&self, id: i64, generation: u64) -> ClientResult<()> {
        let result = self.api.get(id).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            debug!(id, "Dropping detail response for a closed drawer");
            return Ok(());
        }
        match result {
            Ok(record) => {
                inner.draft = Some(R::hydrate(record));
                inner.state = DrawerState::Editing;
                debug!(id, "Drawer loaded");
                Ok(())
            }
            Err(e) => {
                warn!(id, error = %e, "Failed to load {}", R::NAME);
                inner.state = DrawerState::LoadFailed(e.to_string());
                Err(e)
            }
        }
    }

    /// Refetch after a failed load.
    pub async fn retry(&self) -> ClientResult<()> {
        let (id, generation) = {
            let mut inner = self.lock();
            let (DrawerState::LoadFailed(_), Some(id)) = (&inner.state, inner.target) else {
                return Err(ClientError::InvalidState(
                    "retry is only available after a failed load".to_string(),
                ));
            };
            inner.generation += 1;
            inner.state = DrawerState::Loading;
            (id, inner.generation)
        };
        self.load(id, generation).await
    }

    pub fn close(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = DrawerState::Closed;
        inner.target = None;
        inner.draft = None;
        inner.error = None;
    }

    /// Edit the typed draft.
    pub fn update(&self, edit: impl FnOnce(&mut R::Draft)) -> ClientResult<()> {
        let mut inner = self.lock();
        let draft = editable(&mut inner)?;
        edit(draft);
        Ok(())
    }

    /// Replace one field by its wire name.
    pub fn set_field(&self, name: &str, value: Value) -> ClientResult<()> {
        self.patch(|fields| {
            let slot = fields
                .get_mut(name)
                .ok_or_else(|| unknown_field::<R>(name))?;
            *slot = value;
            Ok(())
        })
    }

    /// Toggle one label in a multi-valued field.
    pub fn toggle_field(&self, name: &str, label: &str) -> ClientResult<()> {
        if !R::is_multi_value(name) {
            return Err(ClientError::Validation(format!(
                "{name} is not a multi-valued {} field",
                R::NAME
            )));
        }
        self.patch(|fields| {
            let slot = fields
                .get_mut(name)
                .ok_or_else(|| unknown_field::<R>(name))?;
            let mut values: MultiValue = serde_json::from_value(slot.take())?;
            values.toggle(label);
            *slot = serde_json::to_value(&values)?;
            Ok(())
        })
    }

    /// Select `(id, label)` for a reference field. Both halves change together.
    pub fn select(&self, field: &str, id: i64, label: &str) -> ClientResult<()> {
        let reference = R::reference(field).ok_or_else(|| {
            ClientError::Validation(format!("{field} is not a {} reference field", R::NAME))
        })?;
        self.patch(|fields| {
            fields.insert(reference.id_key.to_string(), json!(id));
            fields.insert(reference.label_key.to_string(), json!(label));
            Ok(())
        })
    }

    /// Create or update, then notify the listener and close.
    ///
    /// Without the submit permission no request is issued. On failure the
    /// drawer returns to editing with the draft intact.
    #[instrument(skip(self), fields(resource = R::PATH))]
    pub async fn submit(&self) -> ClientResult<()> {
        let token = self.submit_permission();
        let (target, draft) = {
            let mut inner = self.lock();
            if inner.state != DrawerState::Editing {
                return Err(ClientError::InvalidState(format!(
                    "cannot submit while {:?}",
                    inner.state
                )));
            }
            self.session.require(token)?;
            let draft = editable(&mut inner)?.clone();
            if let Err(errors) = draft.validate() {
                let message = errors.to_string();
                inner.error = Some(message.clone());
                return Err(ClientError::Validation(message));
            }
            inner.state = DrawerState::Submitting;
            inner.error = None;
            (inner.target, draft)
        };

        let result = match target {
            Some(id) => self.api.update(id, &draft).await,
            None => self.api.create(&draft).await,
        };

        if let Err(e) = result {
            warn!(error = %e, "Failed to save {}", R::NAME);
            let mut inner = self.lock();
            inner.state = DrawerState::Editing;
            inner.error = Some(e.to_string());
            return Err(e);
        }

        info!(id = ?target, "Saved {}", R::NAME);
        if let Some(listener) = &self.listener {
            listener.on_refresh().await;
        }
        self.close();
        Ok(())
    }

    fn create_template(&self) -> R::Draft {
        let template = R::template();
        let Some(branch) = self.session.branch_scope() else {
            return template;
        };
        let Ok(Value::Object(mut fields)) = serde_json::to_value(&template) else {
            return template;
        };
        if !matches!(fields.get("branch_id"), Some(Value::Null)) {
            return template;
        }
        fields.insert("branch_id".to_string(), json!(branch));
        serde_json::from_value(Value::Object(fields)).unwrap_or(template)
    }

    /// Edit the draft through its wire form, so fields can be addressed by name.
    fn patch(
        &self,
        edit: impl FnOnce(&mut Map<String, Value>) -> ClientResult<()>,
    ) -> ClientResult<()> {
        let mut inner = self.lock();
        let draft = editable(&mut inner)?;
        let Value::Object(mut fields) = serde_json::to_value(&*draft)? else {
            return Err(ClientError::InvalidState(format!(
                "{} draft is not an object",
                R::NAME
            )));
        };
        edit(&mut fields)?;
        *draft = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        Ok(())
    }
}

fn editable<D>(inner: &mut Inner<D>) -> ClientResult<&mut D> {
    if inner.state != DrawerState::Editing {
        return Err(ClientError::InvalidState(format!(
            "drawer is not editable while {:?}",
            inner.state
        )));
    }
    inner
        .draft
        .as_mut()
        .ok_or_else(|| ClientError::InvalidState("drawer has no draft".to_string()))
}

fn unknown_field<R: Resource>(name: &str) -> ClientError {
    ClientError::Validation(format!("{} has no field {name}", R::NAME))
}

//! # Edudesk
//!
//! Client core for the Edudesk education back office: leads, students,
//! admissions, batches, courses, staff, payroll, certificates, and feedback
//! forms, each managed through a paginated list and a create/edit drawer
//! against a remote REST API.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── api/          # Transport trait, reqwest client, login
//! ├── resource.rs   # Resource trait and its REST calls
//! ├── list/         # List query state, fetching controller, search debounce
//! ├── drawer.rs     # Create/edit form controller
//! ├── widgets.rs    # Dismissable overlays and multi-selects
//! └── modules/      # One Resource binding per page
//! ```
//!
//! Session identity, permission checks and route guards live in
//! `edudesk-auth`; records and drafts in `edudesk-models`.
//!
//! ## Flow
//!
//! A page is guarded by [`edudesk_auth::Route::guard`], mounts a
//! [`list::ListController`], and opens a [`drawer::DrawerController`] for create
//! or edit. A successful submit notifies the list, which refetches.
//!
//! ```ignore
//! use std::sync::Arc;
//! use edudesk::api::ApiClient;
//! use edudesk::drawer::DrawerController;
//! use edudesk::list::ListController;
//! use edudesk::modules::Courses;
//! use edudesk::resource::ResourceApi;
//!
//! let transport = Arc::new(ApiClient::new(ApiConfig::from_env())?);
//! let api = ResourceApi::<Courses>::new(transport);
//! let list = Arc::new(ListController::new(api.clone(), session.clone(), &ListConfig::default()));
//! list.refresh().await?;
//!
//! let drawer = DrawerController::new(api, session).with_listener(list.clone());
//! drawer.open(None).await?;
//! drawer.set_field("name", "Rust for Beginners".into())?;
//! drawer.submit().await?;
//! ```

pub mod api;
pub mod drawer;
pub mod list;
pub mod modules;
pub mod resource;
pub mod widgets;

pub use api::{ApiClient, ApiRequest, AuthService, Method, Transport};
pub use drawer::{DrawerController, DrawerState};
pub use list::{ListController, ListQuery, ListState, RefreshListener, SearchDebouncer, SortOrder};
pub use modules::ResourceKind;
pub use resource::{ReferenceField, Resource, ResourceApi};

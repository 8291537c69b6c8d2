//! # Edudesk Auth
//!
//! Session identity, permission checks, and route guards for the Edudesk client.
//!
//! - [`identity`]: The locally cached user record
//! - [`session`]: Persisted session store and its storage backends
//! - [`predicate`]: The permission predicate consulted before every gated action
//! - [`guard`]: Route table and navigation guard
//!
//! There is no token exchange: logging in stores the identity the server
//! returns, logging out removes it.
//!
//! # Example
//!
//! ```ignore
//! use edudesk_auth::{SessionStore, guard::{Route, RouteDecision}};
//! use edudesk_config::SessionConfig;
//!
//! let session = SessionStore::from_config(&SessionConfig::from_env());
//!
//! if session.has_permission("edit course") {
//!     // show the edit button
//! }
//!
//! match Route::Courses.guard(&session) {
//!     RouteDecision::Render => { /* mount the page */ }
//!     RouteDecision::Redirect(to) => println!("redirect to {}", to.path()),
//! }
//! ```

pub mod guard;
pub mod identity;
pub mod predicate;
pub mod session;

// Re-export commonly used types at crate root
pub use guard::{Route, RouteDecision};
pub use identity::Identity;
pub use predicate::PermissionPolicy;
pub use session::{FileStorage, MemoryStorage, SessionStorage, SessionStore};

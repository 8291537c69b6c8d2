//! # Edudesk Core
//!
//! Core types, errors, and codecs shared by the Edudesk crates.
//!
//! - [`errors`]: Client error type and HTTP status mapping
//! - [`multi_value`]: Delimited string ⇄ label list conversion for tag-like fields
//! - [`pagination`]: List response envelope and the page-button window
//! - [`permissions`]: Permission token constants and groups
//! - [`serde`]: Lenient deserialization helpers for API records
//!
//! # Example
//!
//! ```
//! use edudesk_core::multi_value::MultiValue;
//! use edudesk_core::pagination::pagination_window;
//!
//! let mut sources = MultiValue::from_wire("Web, Referral");
//! sources.toggle("Web");
//! assert_eq!(sources.to_wire(), "Referral");
//!
//! assert_eq!(pagination_window(7, 20), vec![5, 6, 7, 8, 9]);
//! ```

pub mod errors;
pub mod multi_value;
pub mod pagination;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{ClientError, ClientResult};
pub use multi_value::MultiValue;
pub use pagination::{Page, pagination_window};

//! # Edudesk CLI
//!
//! Command handlers behind the `edudesk` binary.
//!
//! Every resource command goes through the same route guard the pages use,
//! then drives the list controller or drawer controller from the `edudesk`
//! crate exactly as a page would.
//!
//! ## Usage
//!
//! ```ignore
//! use edudesk_cli::commands::{self, Context, ListArgs};
//! use edudesk::modules::Courses;
//!
//! let output = commands::list::<Courses>(&ctx, &ListArgs::default()).await?;
//! println!("{} courses", output.state.total_count);
//! ```

pub mod args;
pub mod commands;

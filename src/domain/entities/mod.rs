//! Core domain entities representing the business data model.
//!
//! - [`Link`] - A stored short code to target URL mapping with click counters
//! - [`NewLink`] - Input for creating a link

pub mod link;

pub use link::{Link, NewLink};

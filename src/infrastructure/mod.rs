//! Infrastructure layer: database access and store lifecycle.
//!
//! - [`database`] - Connection pool construction, migrations and shutdown
//! - [`persistence`] - Repository implementations over PostgreSQL

pub mod database;
pub mod persistence;

//! Application layer services implementing business logic.
//!
//! Services consume repository traits, enforce validation and business rules,
//! and map storage outcomes to the [`crate::error::AppError`] taxonomy.
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, deletion
//!   and click counting

pub mod services;

//! Fiscal invoice emission service.
//!
//! Invoices are registered as `PENDING_EMISSION`, then emitted through an
//! external provider that assigns the official invoice number.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;

//! Storefront Module
//!
//! Product reviews plus the contact and newsletter forms. Records are kept
//! by the storage collaborator.

pub mod handlers;

pub use handlers::routes;

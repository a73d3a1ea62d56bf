//! Product Catalog Module
//!
//! - Domain models (products, price buckets, sort options, filter state)
//! - The query engine that filters and orders a product list
//! - Facets and related-product helpers
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod query;

pub use handlers::routes;

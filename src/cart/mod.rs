//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (line items, totals, inputs, responses)
//! - The aggregator that keeps lines merged and within stock
//! - Helpers (cart ids, formatting)
//! - REST API handlers

pub mod aggregator;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Cart, CartLineItem, CartPolicy, CartTotals, LineKey};

//! Storefront Library
//!
//! This library provides the core functionality for a clothing storefront:
//! catalog filtering and sorting, cart aggregation with stock limits, and
//! the HTTP service around them.

// Domain modules
pub mod cart;
pub mod catalog;
pub mod storefront;

// Infrastructure
pub mod config;
pub mod error;
pub mod extract;
pub mod logger;
pub mod money;
pub mod router;
pub mod state;
pub mod storage;

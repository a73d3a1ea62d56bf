//! Shopping Cart Helpers
//!
//! Cart session ids and formatting.

use super::models::CartLineItem;
use uuid::Uuid;

/// Returns the provided `cart_id` or creates a new UUID string when `None`.
///
/// This guarantees that every cart operation works with a non-empty identifier.
pub fn get_or_create_cart_id(cart_id: Option<String>) -> String {
    cart_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Produces a human-readable one-line summary for a list of cart lines.
///
/// Example output: `"2x Modern Fitted Blazer (M, Black), 1x Embroidered Silk Saree (Standard, Red)"`.
pub fn format_item_summary(items: &[CartLineItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {} ({}, {})", i.quantity, i.product.name, i.size, i.color))
        .collect::<Vec<_>>()
        .join(", ")
}

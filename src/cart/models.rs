//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain. The cart logic itself lives in `aggregator`.

use crate::catalog::models::{Product, ProductId};
use crate::error::StoreError;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Returns the default quantity (1) for cart additions
fn default_quantity() -> i64 {
    1
}

/// Narrows a quantity from a request body to a line quantity.
///
/// Anything that is not a positive `u32` is [`StoreError::QuantityOutOfRange`].
pub fn requested_quantity(requested: i64) -> Result<u32, StoreError> {
    u32::try_from(requested)
        .ok()
        .filter(|quantity| *quantity > 0)
        .ok_or(StoreError::QuantityOutOfRange { requested })
}

/// Identity of a cart line: one product in one size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl LineKey {
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

/// Represents one line in the shopping cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Snapshot of the product at the time it was added
    pub product: Product,

    /// Always between 1 and `product.stock`
    pub quantity: u32,

    pub size: String,
    pub color: String,
}

impl CartLineItem {
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id, self.size.clone(), self.color.clone())
    }

    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id && self.size == key.size && self.color == key.color
    }

    pub fn unit_price(&self) -> Money {
        self.product.effective_price()
    }

    pub fn line_total(&self) -> Money {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// An ordered list of cart lines, at most one per [`LineKey`].
///
/// Serializes as a flat JSON array of lines. Deserializing goes through
/// [`Cart::from_lines`], so a reloaded cart is merged and stock-checked again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    pub(crate) items: Vec<CartLineItem>,
}

impl TryFrom<Vec<CartLineItem>> for Cart {
    type Error = StoreError;

    fn try_from(lines: Vec<CartLineItem>) -> Result<Self, Self::Error> {
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// Pricing rules applied when totalling a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPolicy {
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,
    pub flat_shipping_fee: Money,
    /// Flat tax rate, e.g. `0.08`. `None` means tax is not charged.
    pub tax_rate: Option<Decimal>,
}

impl Default for CartPolicy {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Decimal::from(100),
            flat_shipping_fee: Decimal::from(10),
            tax_rate: None,
        }
    }
}

/// Derived figures shown in the cart summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Requests & Responses
// =============================================================================

/// Body of `POST /api/cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    /// Optional cart identifier; a new cart is opened when absent
    pub cart_id: Option<String>,
    pub product_id: ProductId,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: i64,

    pub size: String,
    pub color: String,
}

/// Body of `PATCH /api/cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityInput {
    pub cart_id: String,
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

impl UpdateQuantityInput {
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.size.clone(), self.color.clone())
    }
}

/// Body of `DELETE /api/cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemInput {
    pub cart_id: String,
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl RemoveItemInput {
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.size.clone(), self.color.clone())
    }
}

/// Body of `POST /api/cart/sync`: a cart reloaded from client storage
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncCartInput {
    pub cart_id: Option<String>,
    pub items: Vec<CartLineItem>,
}

/// Input for checkout
#[derive(Debug, Deserialize)]
pub struct CheckoutInput {
    /// Optional cart identifier
    #[serde(rename = "cartId")]
    pub cart_id: Option<String>,
}

/// Cart state returned by every cart endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart_id: String,
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

/// Response for checkout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub status: String,
    pub cart_id: String,
    pub checked_out: bool,
    pub summary: String,
    pub totals: CartTotals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_quantity_range() {
        assert_eq!(requested_quantity(3), Ok(3));
        assert_eq!(
            requested_quantity(0),
            Err(StoreError::QuantityOutOfRange { requested: 0 })
        );
        assert_eq!(
            requested_quantity(-1),
            Err(StoreError::QuantityOutOfRange { requested: -1 })
        );
        assert!(requested_quantity(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_add_item_input_defaults_quantity() {
        let input: AddItemInput = serde_json::from_value(serde_json::json!({
            "productId": 3, "size": "M", "color": "Black"
        }))
        .unwrap();
        assert_eq!(input.quantity, 1);
        assert_eq!(input.cart_id, None);
    }
}

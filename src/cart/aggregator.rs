//! Cart Aggregator
//!
//! Mutations validate first and only then touch the cart, so a rejected
//! call always leaves the cart exactly as it was.

use super::models::{Cart, CartLineItem, CartPolicy, CartTotals, LineKey};
use crate::catalog::models::Product;
use crate::error::{StoreError, StoreResult};
use crate::money::{round_money, Money};
use rust_decimal::Decimal;

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from persisted lines, merging duplicate keys and
    /// re-checking each line's product data and stock.
    pub fn from_lines(lines: Vec<CartLineItem>) -> StoreResult<Self> {
        let mut cart = Cart::new();
        for line in lines {
            cart.add_item(&line.product, line.quantity, &line.size, &line.color)?;
        }
        Ok(cart)
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Adds `quantity` of a product variant, merging into an existing line
    /// with the same key. Returns the line's new quantity.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
        size: &str,
        color: &str,
    ) -> StoreResult<u32> {
        if quantity == 0 {
            return Err(StoreError::QuantityOutOfRange { requested: 0 });
        }
        // Prices are capped here, so line totals cannot overflow.
        product.validate()?;

        let key = LineKey::new(product.id, size, color);
        let position = self.items.iter().position(|line| line.matches(&key));
        let existing = position.map_or(0, |i| self.items[i].quantity);

        let requested = u64::from(existing) + u64::from(quantity);
        if requested > u64::from(product.stock) {
            return Err(StoreError::QuantityExceedsStock {
                product_id: product.id,
                requested,
                available: product.stock,
            });
        }
        // Bounded by `product.stock`, so it fits.
        let merged = requested as u32;

        match position {
            Some(i) => {
                let line = &mut self.items[i];
                line.quantity = merged;
                line.product = product.clone();
            }
            None => self.items.push(CartLineItem {
                product: product.clone(),
                quantity: merged,
                size: size.to_string(),
                color: color.to_string(),
            }),
        }

        tracing::debug!(product_id = product.id, size, color, quantity = merged, "cart line updated");
        Ok(merged)
    }

    /// Removes the line with the given key.
    pub fn remove_item(&mut self, key: &LineKey) -> StoreResult<CartLineItem> {
        let position = self
            .items
            .iter()
            .position(|line| line.matches(key))
            .ok_or_else(|| Self::missing_line(key))?;
        Ok(self.items.remove(position))
    }

    /// Sets a line's quantity, clamped down to the product's stock.
    ///
    /// Zero is rejected: removal is [`Cart::remove_item`]. Returns the
    /// quantity actually applied.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> StoreResult<u32> {
        if quantity == 0 {
            return Err(StoreError::QuantityOutOfRange { requested: 0 });
        }
        let line = self
            .items
            .iter_mut()
            .find(|line| line.matches(key))
            .ok_or_else(|| Self::missing_line(key))?;

        let stock = line.product.stock;
        if stock == 0 {
            return Err(StoreError::QuantityExceedsStock {
                product_id: key.product_id,
                requested: u64::from(quantity),
                available: 0,
            });
        }

        line.quantity = quantity.min(stock);
        Ok(line.quantity)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Computes the cart summary. An empty cart totals to zero everywhere.
    pub fn totals(&self, policy: &CartPolicy) -> CartTotals {
        if self.items.is_empty() {
            return CartTotals::default();
        }

        let subtotal = self.subtotal();
        let shipping = if subtotal > policy.free_shipping_threshold {
            Decimal::ZERO
        } else {
            policy.flat_shipping_fee
        };
        let tax = policy
            .tax_rate
            .map_or(Decimal::ZERO, |rate| round_money(subtotal * rate));

        CartTotals {
            item_count: self.item_count(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    fn missing_line(key: &LineKey) -> StoreError {
        StoreError::not_found(
            "cart line",
            format!("{}/{}/{}", key.product_id, key.size, key.color),
        )
    }
}

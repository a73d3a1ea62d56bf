//! Application State
//!
//! Cart sessions plus the storage collaborator, shared across handlers.

use crate::cart::models::{Cart, CartPolicy, CartView};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::storage::{MemStorage, Storage};
use dashmap::DashMap;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing cart sessions and the product source
pub struct AppState {
    /// In-memory storage for carts, keyed by cart_id.
    /// DashMap allows concurrent access without external Mutexes.
    pub carts: DashMap<String, Cart>,

    /// Products, reviews and form submissions.
    pub storage: Arc<dyn Storage>,

    pub config: StoreConfig,
}

impl AppState {
    /// Builds state backed by in-memory storage, seeded when configured.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let storage = if config.seed_demo {
            MemStorage::with_demo_products()?
        } else {
            MemStorage::new()
        };
        Ok(Self::with_storage(config, Arc::new(storage)))
    }

    pub fn with_storage(config: StoreConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            carts: DashMap::new(),
            storage,
            config,
        }
    }

    pub fn policy(&self) -> &CartPolicy {
        &self.config.policy
    }

    /// Snapshot of a cart session with its totals.
    pub fn cart_view(&self, cart_id: &str) -> StoreResult<CartView> {
        let cart = self
            .carts
            .get(cart_id)
            .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
        Ok(self.view_of(cart_id, &cart))
    }

    pub fn view_of(&self, cart_id: &str, cart: &Cart) -> CartView {
        CartView {
            cart_id: cart_id.to_string(),
            items: cart.items().to_vec(),
            totals: cart.totals(self.policy()),
        }
    }
}

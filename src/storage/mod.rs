//! Storage Collaborator
//!
//! The catalog and cart logic only see products through the [`Storage`]
//! contract. [`MemStorage`] is the in-process implementation used by the
//! server and the tests.

pub mod fixtures;
pub mod memory;
pub mod models;

use crate::catalog::models::{Product, ProductId};
use crate::error::StoreResult;

pub use memory::MemStorage;
pub use models::{
    ContactForm, ContactMessage, NewsletterForm, NewsletterSubscription, ProductListFilter,
    Review, ReviewForm,
};

/// Product source and form sinks backing the storefront.
pub trait Storage: Send + Sync {
    /// Products in id order, narrowed by `filter`.
    fn list_products(&self, filter: &ProductListFilter) -> StoreResult<Vec<Product>>;

    fn get_product(&self, id: ProductId) -> StoreResult<Product>;

    /// Stores a product under a freshly assigned id; the incoming id is ignored.
    fn create_product(&self, product: Product) -> StoreResult<Product>;

    fn product_reviews(&self, product_id: ProductId) -> StoreResult<Vec<Review>>;

    /// Records a review and refreshes the product's rating and review count.
    fn create_review(&self, product_id: ProductId, form: ReviewForm) -> StoreResult<Review>;

    fn create_contact_message(&self, form: ContactForm) -> StoreResult<ContactMessage>;

    /// Subscribing an address twice returns the original subscription.
    fn subscribe_newsletter(&self, form: NewsletterForm) -> StoreResult<NewsletterSubscription>;
}

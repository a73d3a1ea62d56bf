//! In-memory storage backed by `DashMap`, with auto-incrementing ids.

use super::models::*;
use super::Storage;
use crate::catalog::models::{Product, ProductId};
use crate::catalog::query::matches_search;
use crate::error::{StoreError, StoreResult};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Id sequence starting at 1.
#[derive(Debug)]
struct Sequence(AtomicU64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Process-local storage. All maps allow concurrent access without
/// external locks.
#[derive(Debug)]
pub struct MemStorage {
    products: DashMap<ProductId, Product>,
    reviews: DashMap<u64, Review>,
    contact_messages: DashMap<u64, ContactMessage>,
    /// Keyed by lower-cased email so re-subscribing is idempotent.
    subscriptions: DashMap<String, NewsletterSubscription>,

    product_ids: Sequence,
    review_ids: Sequence,
    message_ids: Sequence,
    subscription_ids: Sequence,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            products: DashMap::new(),
            reviews: DashMap::new(),
            contact_messages: DashMap::new(),
            subscriptions: DashMap::new(),
            product_ids: Sequence::new(),
            review_ids: Sequence::new(),
            message_ids: Sequence::new(),
            subscription_ids: Sequence::new(),
        }
    }

    /// Storage pre-loaded with the demo catalog.
    pub fn with_demo_products() -> StoreResult<Self> {
        let storage = Self::new();
        for product in super::fixtures::demo_products() {
            storage.create_product(product)?;
        }
        tracing::info!(products = storage.products.len(), "seeded demo catalog");
        Ok(storage)
    }

    pub fn contact_message_count(&self) -> usize {
        self.contact_messages.len()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn all_products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.iter().map(|e| e.value().clone()).collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

impl Storage for MemStorage {
    fn list_products(&self, filter: &ProductListFilter) -> StoreResult<Vec<Product>> {
        let mut products = self.all_products();

        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let category = filter
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        if let Some(term) = search {
            let needle = term.to_lowercase();
            products.retain(|p| matches_search(p, &needle));
        } else if let Some(category) = category {
            if category == "new-arrivals" {
                products.retain(|p| p.is_new);
            } else {
                products.retain(|p| p.has_category(category));
            }
        } else if filter.featured {
            products.retain(|p| p.is_featured);
        } else if filter.new_arrivals {
            products.retain(|p| p.is_new);
        }

        Ok(products)
    }

    fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        self.products
            .get(&id)
            .map(|p| p.value().clone())
            .ok_or_else(|| StoreError::not_found("product", id))
    }

    fn create_product(&self, mut product: Product) -> StoreResult<Product> {
        product.validate()?;
        product.id = self.product_ids.next();
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    fn product_reviews(&self, product_id: ProductId) -> StoreResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .map(|r| r.value().clone())
            .collect();
        reviews.sort_by_key(|r| r.id);
        Ok(reviews)
    }

    fn create_review(&self, product_id: ProductId, form: ReviewForm) -> StoreResult<Review> {
        // The product guard is held until the refreshed rating is written, so
        // concurrent reviews of one product apply one at a time.
        let mut product = self
            .products
            .get_mut(&product_id)
            .ok_or_else(|| StoreError::not_found("product", product_id))?;
        form.validate()?;

        let review = Review {
            id: self.review_ids.next(),
            product_id,
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            rating: form.rating,
            comment: form.comment.trim().to_string(),
            created_at: Utc::now(),
        };
        self.reviews.insert(review.id, review.clone());

        let (count, sum) = self
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .fold((0u32, 0.0f64), |(count, sum), r| {
                (count + 1, sum + f64::from(r.rating))
            });
        let mean = sum / f64::from(count);
        product.rating = Some(mean);
        product.reviews = Some(count);

        tracing::debug!(product_id, rating = mean, reviews = count, "product rating refreshed");
        Ok(review)
    }

    fn create_contact_message(&self, form: ContactForm) -> StoreResult<ContactMessage> {
        form.validate()?;
        let message = ContactMessage {
            id: self.message_ids.next(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            subject: form.subject.trim().to_string(),
            message: form.message.trim().to_string(),
            created_at: Utc::now(),
        };
        self.contact_messages.insert(message.id, message.clone());
        Ok(message)
    }

    fn subscribe_newsletter(&self, form: NewsletterForm) -> StoreResult<NewsletterSubscription> {
        form.validate()?;
        let email = form.email.trim().to_lowercase();

        let subscription = self
            .subscriptions
            .entry(email.clone())
            .or_insert_with(|| NewsletterSubscription {
                id: self.subscription_ids.next(),
                email,
                created_at: Utc::now(),
            })
            .clone();
        Ok(subscription)
    }
}

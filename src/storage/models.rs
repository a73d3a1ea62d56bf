//! Records and submission forms owned by the storage collaborator.

use crate::catalog::models::ProductId;
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Narrowing applied by [`super::Storage::list_products`].
///
/// Only one criterion is honoured, in the order search, category,
/// featured, new arrivals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub featured: bool,
    pub new_arrivals: bool,
}

impl ProductListFilter {
    pub fn featured() -> Self {
        Self {
            featured: true,
            ..Default::default()
        }
    }

    pub fn new_arrivals() -> Self {
        Self {
            new_arrivals: true,
            ..Default::default()
        }
    }
}

fn require_text(value: &str, field: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_email(value: &str) -> StoreResult<()> {
    let valid = value
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(StoreError::validation(format!("invalid email address {value:?}")));
    }
    Ok(())
}

// =============================================================================
// Reviews
// =============================================================================

/// Review submitted from the product page.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewForm {
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewForm {
    pub fn validate(&self) -> StoreResult<()> {
        require_text(&self.name, "name")?;
        require_email(&self.email)?;
        if !(1..=5).contains(&self.rating) {
            return Err(StoreError::validation(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        require_text(&self.comment, "comment")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub product_id: ProductId,
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Contact & Newsletter
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> StoreResult<()> {
        require_text(&self.name, "name")?;
        require_email(&self.email)?;
        require_text(&self.subject, "subject")?;
        require_text(&self.message, "message")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsletterForm {
    pub email: String,
}

impl NewsletterForm {
    pub fn validate(&self) -> StoreResult<()> {
        require_email(&self.email)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub id: u64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, email: &str) -> ReviewForm {
        ReviewForm {
            name: "Asha".into(),
            email: email.into(),
            rating,
            comment: "Lovely fabric".into(),
        }
    }

    #[test]
    fn test_review_validation() {
        assert!(review(5, "asha@example.com").validate().is_ok());
        assert!(review(0, "asha@example.com").validate().is_err());
        assert!(review(6, "asha@example.com").validate().is_err());
        assert!(review(4, "not-an-email").validate().is_err());
        assert!(review(4, "@example.com").validate().is_err());
    }

    #[test]
    fn test_contact_requires_all_fields() {
        let form = ContactForm {
            name: "Ravi".into(),
            email: "ravi@example.com".into(),
            subject: "  ".into(),
            message: "Where is my order?".into(),
        };
        assert!(matches!(form.validate(), Err(StoreError::Validation(_))));
    }
}

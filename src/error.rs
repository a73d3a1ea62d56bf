//! Storefront error taxonomy
//!
//! Every condition here is local and recoverable: catalog queries report
//! them instead of reordering silently, and cart mutations leave the cart
//! untouched when they fail.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors raised by the catalog, the cart and the storage collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Malformed input: filter specs, product data, form payloads.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Unknown `sortBy` key.
    #[error("invalid sort option: {0:?}")]
    InvalidSortOption(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("requested quantity {requested} of product {product_id} exceeds available stock {available}")]
    QuantityExceedsStock {
        product_id: u64,
        requested: u64,
        available: u32,
    },

    #[error("quantity must be a positive count, got {requested}")]
    QuantityOutOfRange { requested: i64 },
}

/// Convenience alias used across the crate.
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvalidSortOption(_) => "invalid_sort_option",
            Self::NotFound { .. } => "not_found",
            Self::QuantityExceedsStock { .. } => "quantity_exceeds_stock",
            Self::QuantityOutOfRange { .. } => "quantity_out_of_range",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidSortOption(_) | Self::QuantityOutOfRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::QuantityExceedsStock { .. } => StatusCode::CONFLICT,
        }
    }
}

/// Unreadable JSON bodies are input errors like any other.
impl From<JsonRejection> for StoreError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        tracing::warn!(code = self.code(), status = %status, "request rejected: {}", self);

        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            StoreError::InvalidSortOption("cheapest".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            StoreError::not_found("product", 42).http_status(),
            StatusCode::NOT_FOUND
        );
        let stock = StoreError::QuantityExceedsStock {
            product_id: 3,
            requested: 31,
            available: 30,
        };
        assert_eq!(stock.http_status(), StatusCode::CONFLICT);
        assert_eq!(stock.code(), "quantity_exceeds_stock");
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("cart", "abc");
        assert_eq!(err.to_string(), "cart abc not found");
    }
}

//! REST API handlers for product reviews and the contact/newsletter forms

use crate::catalog::models::ProductId;
use crate::error::StoreResult;
use crate::extract::StoreJson;
use crate::state::SharedState;
use crate::storage::{ContactForm, NewsletterForm, Review, ReviewForm};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

/// Acknowledgement returned by the form endpoints.
#[derive(Debug, Serialize)]
pub struct Submission {
    pub success: bool,
    pub message: String,
}

impl Submission {
    fn accepted(message: &str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::CREATED,
            Json(Self {
                success: true,
                message: message.to_string(),
            }),
        )
    }
}

/// Creates routes for reviews and storefront forms
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/products/:id/reviews",
            get(list_reviews).post(create_review),
        )
        .route("/api/contact", post(contact))
        .route("/api/newsletter", post(newsletter))
}

/// Endpoint: GET /api/products/:id/reviews
async fn list_reviews(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> StoreResult<Json<Vec<Review>>> {
    state.storage.get_product(id)?;
    Ok(Json(state.storage.product_reviews(id)?))
}

/// Endpoint: POST /api/products/:id/reviews
async fn create_review(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
    StoreJson(form): StoreJson<ReviewForm>,
) -> StoreResult<(StatusCode, Json<Review>)> {
    let review = state.storage.create_review(id, form)?;
    tracing::info!(product_id = id, rating = review.rating, "review recorded");
    Ok((StatusCode::CREATED, Json(review)))
}

/// Endpoint: POST /api/contact
async fn contact(
    State(state): State<SharedState>,
    StoreJson(form): StoreJson<ContactForm>,
) -> StoreResult<(StatusCode, Json<Submission>)> {
    let message = state.storage.create_contact_message(form)?;
    tracing::info!(id = message.id, subject = %message.subject, "contact message received");
    Ok(Submission::accepted("Contact message sent successfully"))
}

/// Endpoint: POST /api/newsletter
async fn newsletter(
    State(state): State<SharedState>,
    StoreJson(form): StoreJson<NewsletterForm>,
) -> StoreResult<(StatusCode, Json<Submission>)> {
    let subscription = state.storage.subscribe_newsletter(form)?;
    tracing::debug!(id = subscription.id, "newsletter subscription");
    Ok(Submission::accepted("Successfully subscribed to newsletter"))
}

//! Request extractors

use crate::error::StoreError;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

/// `Json` body extractor whose rejection is a [`StoreError`], so malformed
/// bodies get the same JSON error envelope as every other failure.
#[derive(Debug)]
pub struct StoreJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for StoreJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = StoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

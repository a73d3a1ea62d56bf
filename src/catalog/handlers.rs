//! REST API handlers for the product catalog

use super::helpers::{facets, related_products, CatalogFacets, RELATED_PRODUCTS_LIMIT};
use super::models::{FilterRequest, FilterSpec, Product, ProductId, ProductQueryParams};
use super::query::query_owned;
use crate::error::StoreResult;
use crate::extract::StoreJson;
use crate::state::{AppState, SharedState};
use crate::storage::ProductListFilter;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for catalog browsing
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/query", post(query_products))
        .route("/api/products/featured", get(featured_products))
        .route("/api/products/new-arrivals", get(new_arrivals))
        .route("/api/products/facets", get(catalog_facets))
        .route("/api/products/:id", get(get_product))
        .route("/api/products/:id/related", get(get_related))
}

fn catalog(state: &AppState) -> StoreResult<Vec<Product>> {
    state.storage.list_products(&ProductListFilter::default())
}

/// Endpoint: GET /api/products
async fn list_products(
    State(state): State<SharedState>,
    Query(params): Query<ProductQueryParams>,
) -> StoreResult<Json<Vec<Product>>> {
    let spec = FilterSpec::try_from(params)?;
    let products = catalog(&state)?;
    Ok(Json(query_owned(&products, &spec)?))
}

/// Endpoint: POST /api/products/query
/// Same as the list endpoint, with the filter state sent as JSON.
async fn query_products(
    State(state): State<SharedState>,
    StoreJson(request): StoreJson<FilterRequest>,
) -> StoreResult<Json<Vec<Product>>> {
    let spec = FilterSpec::try_from(request)?;
    let products = catalog(&state)?;
    Ok(Json(query_owned(&products, &spec)?))
}

/// Endpoint: GET /api/products/featured
async fn featured_products(State(state): State<SharedState>) -> StoreResult<Json<Vec<Product>>> {
    Ok(Json(state.storage.list_products(&ProductListFilter::featured())?))
}

/// Endpoint: GET /api/products/new-arrivals
async fn new_arrivals(State(state): State<SharedState>) -> StoreResult<Json<Vec<Product>>> {
    Ok(Json(
        state.storage.list_products(&ProductListFilter::new_arrivals())?,
    ))
}

/// Endpoint: GET /api/products/facets
async fn catalog_facets(State(state): State<SharedState>) -> StoreResult<Json<CatalogFacets>> {
    Ok(Json(facets(&catalog(&state)?)))
}

/// Endpoint: GET /api/products/:id
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> StoreResult<Json<Product>> {
    Ok(Json(state.storage.get_product(id)?))
}

/// Endpoint: GET /api/products/:id/related
async fn get_related(
    State(state): State<SharedState>,
    Path(id): Path<ProductId>,
) -> StoreResult<Json<Vec<Product>>> {
    let product = state.storage.get_product(id)?;
    let products = catalog(&state)?;
    let related = related_products(&products, &product, RELATED_PRODUCTS_LIMIT)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(related))
}

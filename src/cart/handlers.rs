//! REST API handlers for shopping cart operations
//!
//! Cart sessions live in [`AppState::carts`]; products are always resolved
//! through the storage collaborator so prices and stock are authoritative.

use super::{helpers::*, models::*};
use crate::error::{StoreError, StoreResult};
use crate::extract::StoreJson;
use crate::state::{AppState, SharedState};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/cart/:cart_id", get(get_cart))
        .route(
            "/api/cart/items",
            post(add_item).patch(update_quantity).delete(remove_item),
        )
        .route("/api/cart/sync", post(sync_cart))
        .route("/api/cart/checkout", post(checkout))
}

/// Endpoint: GET /api/cart/:cart_id
async fn get_cart(
    State(state): State<SharedState>,
    Path(cart_id): Path<String>,
) -> StoreResult<Json<CartView>> {
    Ok(Json(state.cart_view(&cart_id)?))
}

/// Endpoint: POST /api/cart/items
/// Adds a product variant, opening a new cart when no id is given.
async fn add_item(
    State(state): State<SharedState>,
    StoreJson(input): StoreJson<AddItemInput>,
) -> StoreResult<Json<CartView>> {
    let quantity = requested_quantity(input.quantity)?;
    let product = state.storage.get_product(input.product_id)?;
    let cart_id = get_or_create_cart_id(input.cart_id);

    let mut cart = state.carts.entry(cart_id.clone()).or_default();
    if let Err(err) = cart.add_item(&product, quantity, &input.size, &input.color) {
        let abandoned = cart.is_empty();
        drop(cart);
        if abandoned {
            state.carts.remove_if(&cart_id, |_, c| c.is_empty());
        }
        return Err(err);
    }

    Ok(Json(state.view_of(&cart_id, &cart)))
}

/// Endpoint: PATCH /api/cart/items
async fn update_quantity(
    State(state): State<SharedState>,
    StoreJson(input): StoreJson<UpdateQuantityInput>,
) -> StoreResult<Json<CartView>> {
    let quantity = requested_quantity(input.quantity)?;
    let key = input.key();
    with_cart(&state, &input.cart_id, |cart| {
        cart.set_quantity(&key, quantity).map(|_| ())
    })
}

/// Endpoint: DELETE /api/cart/items
async fn remove_item(
    State(state): State<SharedState>,
    StoreJson(input): StoreJson<RemoveItemInput>,
) -> StoreResult<Json<CartView>> {
    let key = input.key();
    with_cart(&state, &input.cart_id, |cart| {
        cart.remove_item(&key).map(|_| ())
    })
}

/// Endpoint: POST /api/cart/sync
/// Replaces the session cart with one persisted by the client.
async fn sync_cart(
    State(state): State<SharedState>,
    StoreJson(payload): StoreJson<SyncCartInput>,
) -> StoreResult<Json<CartView>> {
    let mut lines = payload.items;
    for line in &mut lines {
        line.product = state.storage.get_product(line.product.id)?;
    }
    let cart = Cart::from_lines(lines)?;
    let cart_id = get_or_create_cart_id(payload.cart_id);

    let view = state.view_of(&cart_id, &cart);
    state.carts.insert(cart_id, cart);
    Ok(Json(view))
}

/// Endpoint: POST /api/cart/checkout
/// Closes the cart session and reports the final totals.
async fn checkout(
    State(state): State<SharedState>,
    StoreJson(payload): StoreJson<CheckoutInput>,
) -> Json<CheckoutResponse> {
    let cart_id = get_or_create_cart_id(payload.cart_id);

    let (summary, totals) = match state.carts.remove(&cart_id) {
        Some((_, cart)) if !cart.is_empty() => {
            let summary = format_item_summary(cart.items());
            let totals = cart.totals(state.policy());
            tracing::info!(%cart_id, total = %totals.total, "checkout: {}", summary);
            (summary, totals)
        }
        _ => ("Cart is empty.".to_string(), CartTotals::default()),
    };

    Json(CheckoutResponse {
        status: "checked_out".to_string(),
        cart_id,
        checked_out: true,
        summary,
        totals,
    })
}

/// Applies `mutate` to an existing cart and returns its new view.
fn with_cart<F>(state: &AppState, cart_id: &str, mutate: F) -> StoreResult<Json<CartView>>
where
    F: FnOnce(&mut Cart) -> StoreResult<()>,
{
    let mut cart = state
        .carts
        .get_mut(cart_id)
        .ok_or_else(|| StoreError::not_found("cart", cart_id))?;
    mutate(&mut cart)?;
    Ok(Json(state.view_of(cart_id, &cart)))
}

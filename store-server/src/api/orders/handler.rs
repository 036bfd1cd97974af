//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderStatus, OrderStatusUpdate};
use crate::db::repository::OrderRepository;
use crate::shipping::ShippingClient;
use shared::{AppError, AppResult, ErrorCode};

/// GET /api/orders - the authenticated user's orders
pub async fn list_own(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_user(&user.id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/all - every order (admin)
pub async fn list_all(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    user.require_admin()?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all().await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - one order (owner or admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = fetch_order(&repo, &id).await?;

    let owned = order.user.as_deref() == Some(user.id.as_str());
    if !owned && !user.is_admin() {
        // Do not reveal other users' order ids
        return Err(order_not_found(&id));
    }
    Ok(Json(order))
}

/// PUT /api/orders/{id}/status - admin status transition
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    user.require_admin()?;
    let repo = OrderRepository::new(state.db.clone());
    let order = fetch_order(&repo, &id).await?;

    if !order.status.can_transition_to(payload.status) {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("from", order.status.to_string())
            .with_detail("to", payload.status.to_string()));
    }

    let updated = repo.update_status(&id, payload.status).await?;
    tracing::info!(order = %updated.order_number, status = %payload.status, "Order status updated");
    Ok(Json(updated))
}

/// POST /api/orders/{id}/ship - quote a rate, create a label, mark shipped (admin)
pub async fn ship(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    user.require_admin()?;
    let repo = OrderRepository::new(state.db.clone());
    let order = fetch_order(&repo, &id).await?;

    if order.shipping.tracking_id.is_some() {
        return Err(AppError::new(ErrorCode::OrderAlreadyShipped));
    }
    if !order.status.can_transition_to(OrderStatus::Shipped) {
        return Err(AppError::new(ErrorCode::InvalidStatusTransition)
            .with_detail("from", order.status.to_string())
            .with_detail("to", OrderStatus::Shipped.to_string()));
    }

    let total_items: i64 = order.items.iter().map(|item| item.quantity).sum();
    let weight = ShippingClient::estimate_weight_grams(total_items);

    let quote = state
        .shipping
        .rate_quote(&order.shipping.address.pincode, weight)
        .await?;
    let label = state
        .shipping
        .create_label(&order.order_number, &order.shipping.address)
        .await?;

    let updated = repo
        .record_shipment(
            &id,
            &quote.courier,
            &label.tracking_id,
            &label.label_url,
            quote.rate,
        )
        .await?;

    tracing::info!(
        order = %updated.order_number,
        courier = %quote.courier,
        tracking = %label.tracking_id,
        "Shipping label created"
    );
    Ok(Json(updated))
}

async fn fetch_order(repo: &OrderRepository, id: &str) -> AppResult<Order> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| order_not_found(id))
}

fn order_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
}

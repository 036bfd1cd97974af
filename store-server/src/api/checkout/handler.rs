//! Checkout API Handlers

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::MaybeUser;
use crate::checkout::points_earned;
use crate::core::ServerState;
use crate::db::models::{
    Address, Order, OrderStatus, PaymentMethod, ShippingInfo, User,
};
use crate::db::repository::{
    CartRepository, OrderRepository, ProductRepository, SettingsRepository, UserRepository,
};
use crate::payment::verify_order_payment;
use crate::utils::time::now_millis;
use crate::utils::validation::{MAX_EMAIL_LEN, validate_required_text};
use shared::checkout::{
    AmountBreakdown, CalculateAmountRequest, GatewayOrder, PaymentConfirmation,
    VerifyPaymentRequest,
};
use shared::{AppError, AppResult, ErrorCode};

/// POST /api/checkout/calculate-amount - reconciliation preview
///
/// Runs the full server-side recalculation without creating anything.
pub async fn calculate_amount(
    State(state): State<ServerState>,
    maybe_user: MaybeUser,
    Json(payload): Json<CalculateAmountRequest>,
) -> AppResult<Json<AmountBreakdown>> {
    let user = load_user(&state, &maybe_user).await?;
    let reconciled = state.calculator().reconcile(&payload, user.as_ref()).await?;
    Ok(Json(reconciled.breakdown))
}

/// Order creation payload
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(flatten)]
    pub cart: CalculateAmountRequest,
    pub payment_method: PaymentMethod,
    /// Required for guest checkout
    #[serde(default)]
    pub email: Option<String>,
    pub shipping_address: Address,
}

/// Order creation response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub order_number: String,
    pub status: OrderStatus,
    pub breakdown: AmountBreakdown,
    /// Present for gateway payments; absent for COD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<GatewayOrder>,
}

/// POST /api/checkout/order/create - unified guest/auth order creation
pub async fn create_order(
    State(state): State<ServerState>,
    maybe_user: MaybeUser,
    headers: HeaderMap,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    let user = load_user(&state, &maybe_user).await?;

    // Resolve the buyer's email; guests must supply one and are rate-limited
    let email = match &user {
        Some(user) => user.email.clone(),
        None => {
            let email = payload
                .email
                .as_deref()
                .map(|e| e.trim().to_lowercase())
                .unwrap_or_default();
            validate_required_text(&email, "email", MAX_EMAIL_LEN)?;
            state
                .guest_limiter
                .check(&client_ip(&headers), &email)
                .await?;
            email
        }
    };

    // Re-derive every amount from ground truth
    let reconciled = state
        .calculator()
        .reconcile(&payload.cart, user.as_ref())
        .await?;
    let breakdown = reconciled.breakdown.clone();

    let order_number = generate_order_number();

    // Gateway order first: it is inert until paid, so a later failure leaves
    // nothing to unwind
    let gateway = match payload.payment_method {
        PaymentMethod::Razorpay => Some(
            state
                .razorpay
                .create_order(breakdown.total, &order_number)
                .await?,
        ),
        PaymentMethod::Cod => None,
    };

    // Redeem points before touching stock; the conditional update re-checks
    // the balance
    let points_used = payload.cart.points_used.unwrap_or(0);
    if points_used > 0 {
        let users = UserRepository::new(state.db.clone());
        let user = user
            .as_ref()
            .ok_or_else(|| AppError::new(ErrorCode::PointsUnavailable))?;
        users
            .deduct_points(&user.id_str(), points_used)
            .await
            .map_err(|e| match e {
                crate::db::repository::RepoError::Validation(_) => {
                    AppError::new(ErrorCode::PointsInsufficient)
                        .with_detail("requested", points_used)
                }
                other => other.into(),
            })?;
    }

    // Conditional per-size decrement; refund redeemed points if it fails
    let products = ProductRepository::new(state.db.clone());
    if let Err(e) = products.decrement_stock(&reconciled.stock_lines).await {
        if points_used > 0
            && let Some(user) = user.as_ref()
        {
            let users = UserRepository::new(state.db.clone());
            if let Err(refund_err) = users.credit_points(&user.id_str(), points_used).await {
                tracing::error!(
                    user = %user.id_str(),
                    points = points_used,
                    error = %refund_err,
                    "Failed to refund points after stock failure"
                );
            }
        }
        return Err(e.into());
    }

    let status = match payload.payment_method {
        PaymentMethod::Razorpay => OrderStatus::Pending,
        PaymentMethod::Cod => OrderStatus::Processing,
    };

    let now = now_millis();
    let order = Order {
        id: None,
        order_number: order_number.clone(),
        user: user.as_ref().map(|u| u.id_str()),
        email,
        items: reconciled.items,
        subtotal: breakdown.subtotal,
        shipping_cost: breakdown.shipping_cost,
        quantity_discount: breakdown.quantity_discount,
        coupon_discount: breakdown.coupon_discount,
        reward_discount: breakdown.reward_discount,
        amount: breakdown.total,
        coupon_code: payload.cart.coupon_code.clone(),
        status,
        payment_method: payload.payment_method,
        gateway_order_id: gateway.as_ref().map(|g| g.gateway_order_id.clone()),
        payment_id: None,
        points_used,
        points_earned: 0,
        shipping: ShippingInfo {
            address: payload.shipping_address,
            courier: None,
            tracking_id: None,
            label_url: None,
            rate: None,
        },
        created_at: now,
        updated_at: now,
    };

    let orders = OrderRepository::new(state.db.clone());
    let order = orders.create(order).await?;

    // The cart is spent once the order exists
    if let Some(user) = user.as_ref() {
        let cart = CartRepository::new(state.db.clone());
        if let Err(e) = cart.clear_user(&user.id_str()).await {
            tracing::warn!(user = %user.id_str(), error = %e, "Failed to clear cart after order");
        }
    }

    let order_id = order.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(
        order = %order_number,
        amount = breakdown.total,
        method = ?payload.payment_method,
        "Order created"
    );

    Ok(Json(CreateOrderResponse {
        order_id,
        order_number,
        status: order.status,
        breakdown,
        gateway,
    }))
}

/// POST /api/checkout/payment/verify - post-payment signature verification
pub async fn verify_payment(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyPaymentRequest>,
) -> AppResult<Json<PaymentConfirmation>> {
    let orders = OrderRepository::new(state.db.clone());
    let order = orders
        .find_by_gateway_order_id(&payload.order_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("No order for gateway order {}", payload.order_id),
            )
        })?;

    if !order.status.is_payable() {
        return Err(match order.status {
            OrderStatus::Processing | OrderStatus::Shipped | OrderStatus::Delivered => {
                AppError::new(ErrorCode::OrderAlreadyPaid)
            }
            _ => AppError::new(ErrorCode::OrderNotPayable),
        });
    }

    let order_id = order.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let valid = verify_order_payment(
        state.razorpay.signing_secret(),
        &payload.order_id,
        &payload.payment_id,
        &payload.signature,
    );
    if !valid {
        tracing::warn!(order = %order.order_number, "Payment signature mismatch");
        orders
            .update_status(&order_id, OrderStatus::PaymentFailed)
            .await?;
        return Err(AppError::new(ErrorCode::SignatureMismatch));
    }

    // Fetch the payment from the gateway; in mock mode synthesize it from
    // the stored order
    let (payment_amount, payment_status, payment_method) = if state.razorpay.is_mock() {
        (order.amount * 100, "captured".to_string(), "mock".to_string())
    } else {
        let payment = state.razorpay.fetch_payment(&payload.payment_id).await?;
        if payment.status != "captured" && payment.status != "authorized" {
            tracing::warn!(
                order = %order.order_number,
                status = %payment.status,
                "Gateway reports unpaid payment"
            );
            orders
                .update_status(&order_id, OrderStatus::PaymentFailed)
                .await?;
            return Err(AppError::new(ErrorCode::PaymentFailed)
                .with_detail("gateway_status", payment.status));
        }
        (payment.amount, payment.status, payment.method)
    };

    // Credit reward points to registered buyers
    let settings = SettingsRepository::new(state.db.clone()).get().await?;
    let earned = match &order.user {
        Some(user_ref) => {
            let earned = points_earned(order.amount, settings.reward_earn_divisor);
            if earned > 0 {
                let users = UserRepository::new(state.db.clone());
                if let Err(e) = users.credit_points(user_ref, earned).await {
                    tracing::error!(user = %user_ref, error = %e, "Failed to credit points");
                }
            }
            earned
        }
        None => 0,
    };

    orders
        .record_payment(&order_id, &payload.payment_id, earned)
        .await?;

    tracing::info!(order = %order.order_number, payment = %payload.payment_id, "Payment verified");

    Ok(Json(PaymentConfirmation {
        payment_id: payload.payment_id,
        status: payment_status,
        amount: payment_amount,
        method: payment_method,
        points_earned: earned,
    }))
}

/// Load the full user record behind an optional auth context
async fn load_user(state: &ServerState, maybe_user: &MaybeUser) -> AppResult<Option<User>> {
    match &maybe_user.0 {
        Some(current) => {
            let repo = UserRepository::new(state.db.clone());
            let user = repo
                .find_by_id(&current.id)
                .await?
                .ok_or_else(|| AppError::not_found("User"))?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

/// Best-effort client IP for guest rate limiting (behind the load balancer)
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn generate_order_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ORD-{}", suffix[..8].to_uppercase())
}

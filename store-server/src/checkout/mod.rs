//! Amount reconciliation engine
//!
//! The client proposes a total; the server re-derives it from ground truth
//! (database prices, configured tiers, coupon records, reward balances)
//! before any gateway order is created. A client total that disagrees is
//! logged, never trusted.
//!
//! Order of operations, preserved exactly:
//! 1. line prices from the database (custom lines from configured fees)
//! 2. subtotal
//! 3. flat shipping below the free-shipping threshold
//! 4. quantity discount: tier result computed against the subtotal, then
//!    proportionally rescaled onto the shipping-inclusive base
//! 5. coupon discount against the subtotal only
//! 6. reward-point discount for authenticated users
//! 7. total, floored at zero

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use shared::checkout::{AmountBreakdown, CalculateAmountRequest, CheckoutLine};
use shared::{AppError, AppResult, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{Coupon, DiscountType, OrderItem, Size, StoreSettings, User};
use crate::db::repository::product::StockLine;
use crate::db::repository::{CouponRepository, ProductRepository, SettingsRepository};
use crate::pricing::{self, CLIENT_TOTAL_TOLERANCE, percent_of, round_units, to_decimal};
use crate::utils::time::now_millis;
use crate::utils::validation::validate_quantity;

/// A fully reconciled cart, ready to become an order
#[derive(Debug, Clone)]
pub struct ReconciledCart {
    pub breakdown: AmountBreakdown,
    /// Validated line snapshots with server-derived prices
    pub items: Vec<OrderItem>,
    /// Stock decrements the order will apply (custom lines carry none)
    pub stock_lines: Vec<StockLine>,
}

/// Server-side amount calculator
#[derive(Clone)]
pub struct AmountCalculator {
    products: ProductRepository,
    coupons: CouponRepository,
    settings: SettingsRepository,
}

impl AmountCalculator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            coupons: CouponRepository::new(db.clone()),
            settings: SettingsRepository::new(db),
        }
    }

    /// Re-derive the cart total from ground truth
    ///
    /// Aborts on the first missing or inactive product, naming it. The
    /// calculation is side-effect-free and yields identical output for an
    /// unchanged cart and unchanged settings.
    pub async fn reconcile(
        &self,
        request: &CalculateAmountRequest,
        user: Option<&User>,
    ) -> AppResult<ReconciledCart> {
        if request.items.is_empty() {
            return Err(AppError::new(ErrorCode::CartEmpty));
        }

        let settings = self
            .settings
            .get()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        // 1-2. Validate lines against the database and sum the subtotal
        let mut items = Vec::with_capacity(request.items.len());
        let mut stock_lines = Vec::new();
        let mut subtotal: i64 = 0;
        let mut total_quantity: i64 = 0;

        for line in &request.items {
            let item = self.resolve_line(line, &settings).await?;
            subtotal += item.price * item.quantity;
            total_quantity += item.quantity;
            if let Some(product_ref) = &item.product {
                let size = item.size.parse::<Size>().map_err(|_| {
                    AppError::validation(format!("invalid size: {}", item.size))
                })?;
                stock_lines.push(StockLine {
                    product_key: product_ref
                        .strip_prefix("product:")
                        .unwrap_or(product_ref)
                        .to_string(),
                    size,
                    quantity: item.quantity,
                });
            }
            items.push(item);
        }

        // 3. Flat shipping below the free-shipping threshold
        let shipping_cost = if subtotal < settings.free_shipping_threshold {
            settings.shipping_flat_fee
        } else {
            0
        };

        // 4. Quantity discount: tier result on the subtotal, rescaled onto
        //    the shipping-inclusive base
        let tier = pricing::evaluate(&settings.discount_tiers, subtotal, total_quantity);
        let quantity_discount =
            rescale_onto_base(tier.discount, subtotal, subtotal + shipping_cost);

        // 5. Coupon discount against the subtotal only
        let coupon_discount = match &request.coupon_code {
            Some(code) => {
                let coupon = self
                    .coupons
                    .find_by_code(code)
                    .await
                    .map_err(|e| AppError::database(e.to_string()))?
                    .ok_or_else(|| {
                        AppError::new(ErrorCode::CouponNotFound).with_detail("code", code.clone())
                    })?;
                coupon_discount(&coupon, subtotal, now_millis())?
            }
            None => 0,
        };

        // 6. Reward-point discount, authenticated users only
        let points_used = request.points_used.unwrap_or(0);
        let reward_discount = reward_discount(points_used, user, settings.reward_redeem_rate)?;

        // 7. Final total, floored at zero
        let total =
            (subtotal + shipping_cost - quantity_discount - coupon_discount - reward_discount)
                .max(0);

        // 8. Discrepancy against the client total is observability only
        if let Some(client_total) = request.client_total
            && (client_total - total).abs() > CLIENT_TOTAL_TOLERANCE
        {
            tracing::warn!(
                client_total,
                server_total = total,
                subtotal,
                "Client-proposed total disagrees with server calculation"
            );
        }

        Ok(ReconciledCart {
            breakdown: AmountBreakdown {
                subtotal,
                shipping_cost,
                quantity_discount,
                coupon_discount,
                reward_discount,
                total,
                total_quantity,
                applied_tier: tier.applied,
                next_tier: tier.next,
            },
            items,
            stock_lines,
        })
    }

    /// Resolve one checkout line into a priced order item
    async fn resolve_line(
        &self,
        line: &CheckoutLine,
        settings: &StoreSettings,
    ) -> AppResult<OrderItem> {
        validate_quantity(line.quantity)?;

        if line.is_custom() {
            let customization = line.customization.as_ref().ok_or_else(|| {
                AppError::validation("custom items require customization details")
            })?;
            let price = custom_item_price(settings, &customization.placements)?;
            return Ok(OrderItem {
                product: None,
                name: "Custom print".to_string(),
                price,
                size: line.size.clone(),
                color: line.color.clone(),
                quantity: line.quantity,
                is_custom: true,
                customization: Some(customization.clone()),
            });
        }

        let product = self
            .products
            .find_by_id(&line.product)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::ProductNotFound,
                    format!("Product {} not found", line.product),
                )
                .with_detail("product", line.product.clone())
            })?;

        if !product.is_active {
            return Err(AppError::with_message(
                ErrorCode::ProductInactive,
                format!("Product {} is no longer available", product.name),
            )
            .with_detail("product", product.name.clone()));
        }

        Ok(OrderItem {
            product: product.id.as_ref().map(|t| t.to_string()),
            name: product.name.clone(),
            price: product.price,
            size: line.size.clone(),
            color: line.color.clone(),
            quantity: line.quantity,
            is_custom: false,
            customization: None,
        })
    }
}

/// Rescale a subtotal-based discount onto the shipping-inclusive base
///
/// Tiers are defined against the subtotal but applied against
/// `subtotal + shipping`; the rescale keeps shipping from being
/// double-counted. Intermediate rounding is deliberate: the rescale starts
/// from the already-rounded tier result, and collapsing the two steps into
/// one shifts totals by a few currency units.
fn rescale_onto_base(tier_discount: i64, subtotal: i64, base: i64) -> i64 {
    if tier_discount <= 0 || subtotal <= 0 || base == subtotal {
        return tier_discount;
    }
    round_units(to_decimal(tier_discount) * to_decimal(base) / to_decimal(subtotal)).min(base)
}

/// Compute a coupon's discount against the cart subtotal
///
/// Validated against the subtotal only, never the post-discount amount.
pub fn coupon_discount(coupon: &Coupon, subtotal: i64, now_ms: i64) -> AppResult<i64> {
    if !coupon.is_active {
        return Err(AppError::new(ErrorCode::CouponInactive).with_detail("code", coupon.code.clone()));
    }
    if let Some(valid_until) = coupon.valid_until
        && valid_until < now_ms
    {
        return Err(AppError::new(ErrorCode::CouponExpired).with_detail("code", coupon.code.clone()));
    }
    if subtotal < coupon.minimum_purchase {
        return Err(AppError::new(ErrorCode::CouponBelowMinimum)
            .with_detail("code", coupon.code.clone())
            .with_detail("minimum_purchase", coupon.minimum_purchase));
    }

    let computed = match coupon.discount_type {
        DiscountType::Percentage => round_units(percent_of(
            to_decimal(subtotal),
            to_decimal(coupon.discount_value),
        )),
        DiscountType::Fixed => coupon.discount_value,
    };

    let capped = match coupon.max_discount {
        Some(max) => computed.min(max),
        None => computed,
    };
    Ok(capped.min(subtotal).max(0))
}

/// Compute the reward-point discount
///
/// `points * redeem_rate` currency units, only when the authenticated user's
/// balance covers the redemption; guests cannot redeem.
pub fn reward_discount(points_used: i64, user: Option<&User>, redeem_rate: f64) -> AppResult<i64> {
    if points_used <= 0 {
        return Ok(0);
    }
    let user = user.ok_or_else(|| AppError::new(ErrorCode::PointsUnavailable))?;
    if user.points_balance < points_used {
        return Err(AppError::new(ErrorCode::PointsInsufficient)
            .with_detail("requested", points_used)
            .with_detail("balance", user.points_balance));
    }

    let rate = Decimal::from_f64(redeem_rate).unwrap_or_default();
    Ok(round_units(to_decimal(points_used) * rate))
}

/// Points earned for a paid amount: one per `earn_divisor` currency units
pub fn points_earned(amount: i64, earn_divisor: i64) -> i64 {
    if earn_divisor <= 0 {
        return 0;
    }
    amount / earn_divisor
}

/// Price a made-to-order custom item from the configured base and fees
pub fn custom_item_price(settings: &StoreSettings, placements: &[String]) -> AppResult<i64> {
    let mut price = settings.custom_base_price;
    for placement in placements {
        let fee = settings
            .custom_placement_fees
            .get(placement.as_str())
            .ok_or_else(|| {
                AppError::validation(format!("unknown print placement: {placement}"))
            })?;
        price += fee;
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Role;

    fn coupon(discount_type: DiscountType, value: i64) -> Coupon {
        Coupon {
            id: None,
            code: "FLAT100".to_string(),
            discount_type,
            discount_value: value,
            minimum_purchase: 500,
            max_discount: None,
            valid_until: None,
            is_active: true,
            created_at: 0,
        }
    }

    fn user_with_points(points_balance: i64) -> User {
        User {
            id: None,
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: String::new(),
            role: Role::Customer,
            points_balance,
            is_active: true,
            created_at: 0,
        }
    }

    #[test]
    fn test_fixed_coupon() {
        // FLAT100 on subtotal 1500 → 100
        let c = coupon(DiscountType::Fixed, 100);
        assert_eq!(coupon_discount(&c, 1500, 0).unwrap(), 100);
    }

    #[test]
    fn test_percentage_coupon() {
        let c = coupon(DiscountType::Percentage, 10);
        assert_eq!(coupon_discount(&c, 1500, 0).unwrap(), 150);
    }

    #[test]
    fn test_coupon_below_minimum() {
        let c = coupon(DiscountType::Fixed, 100);
        let err = coupon_discount(&c, 499, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponBelowMinimum);
    }

    #[test]
    fn test_coupon_max_discount_cap() {
        let mut c = coupon(DiscountType::Percentage, 50);
        c.max_discount = Some(200);
        assert_eq!(coupon_discount(&c, 1000, 0).unwrap(), 200);
    }

    #[test]
    fn test_coupon_never_exceeds_subtotal() {
        let c = coupon(DiscountType::Fixed, 5000);
        assert_eq!(coupon_discount(&c, 600, 0).unwrap(), 600);
    }

    #[test]
    fn test_coupon_expired() {
        let mut c = coupon(DiscountType::Fixed, 100);
        c.valid_until = Some(1000);
        let err = coupon_discount(&c, 1500, 2000).unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponExpired);

        // Still valid at the boundary
        assert!(coupon_discount(&c, 1500, 1000).is_ok());
    }

    #[test]
    fn test_coupon_inactive() {
        let mut c = coupon(DiscountType::Fixed, 100);
        c.is_active = false;
        let err = coupon_discount(&c, 1500, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponInactive);
    }

    #[test]
    fn test_reward_discount_half_unit_rate() {
        let user = user_with_points(200);
        assert_eq!(reward_discount(100, Some(&user), 0.5).unwrap(), 50);
        assert_eq!(reward_discount(0, Some(&user), 0.5).unwrap(), 0);
    }

    #[test]
    fn test_reward_discount_requires_balance() {
        let user = user_with_points(50);
        let err = reward_discount(100, Some(&user), 0.5).unwrap_err();
        assert_eq!(err.code, ErrorCode::PointsInsufficient);
    }

    #[test]
    fn test_reward_discount_guest_rejected() {
        let err = reward_discount(10, None, 0.5).unwrap_err();
        assert_eq!(err.code, ErrorCode::PointsUnavailable);
    }

    #[test]
    fn test_points_earned() {
        assert_eq!(points_earned(1350, 100), 13);
        assert_eq!(points_earned(99, 100), 0);
        assert_eq!(points_earned(1000, 0), 0);
    }

    #[test]
    fn test_rescale_identity_without_shipping() {
        assert_eq!(rescale_onto_base(150, 1500, 1500), 150);
        assert_eq!(rescale_onto_base(0, 1500, 1600), 0);
    }

    #[test]
    fn test_rescale_onto_shipping_inclusive_base() {
        // Tier gave 10% of 900 = 90; base is 1000 with shipping → 100
        assert_eq!(rescale_onto_base(90, 900, 1000), 100);
    }

    #[test]
    fn test_custom_item_price() {
        let settings = StoreSettings::default();
        let price =
            custom_item_price(&settings, &["front".to_string(), "back".to_string()]).unwrap();
        assert_eq!(price, settings.custom_base_price + 150 + 200);

        let err = custom_item_price(&settings, &["collar".to_string()]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}

//! Checkout reconciliation and stock integration tests
//!
//! Runs against a throwaway embedded database; settings stay at their
//! defaults (free shipping at 1000, flat fee 100, tiers 3→10% and 5→20%,
//! redeem rate 0.5).

use store_server::checkout::AmountCalculator;
use store_server::db::DbService;
use store_server::db::models::{Product, ProductCreate, Role, Size, SizeStock, User};
use store_server::db::repository::product::StockLine;
use store_server::db::repository::{
    CouponRepository, ProductRepository, RepoError, UserRepository,
};
use store_server::db::models::{CouponCreate, DiscountType};
use shared::ErrorCode;
use shared::checkout::{CalculateAmountRequest, CheckoutLine};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(&tmp.path().join("test.db")).await.unwrap();
    (tmp, service.db)
}

async fn seed_product(db: &Surreal<Db>, name: &str, price: i64, stock_m: i64) -> Product {
    let repo = ProductRepository::new(db.clone());
    repo.create(ProductCreate {
        name: name.to_string(),
        description: None,
        price,
        mrp: None,
        category: "category:tees".to_string(),
        product_type: None,
        size_stock: Some(SizeStock {
            m: stock_m,
            ..Default::default()
        }),
        images: None,
        tags: None,
        custom_tags: None,
        gender: None,
        size_chart: None,
    })
    .await
    .unwrap()
}

fn line(product: &Product, quantity: i64) -> CheckoutLine {
    CheckoutLine {
        product: product.id.as_ref().unwrap().to_string(),
        size: "M".to_string(),
        color: None,
        quantity,
        customization: None,
    }
}

fn request(items: Vec<CheckoutLine>) -> CalculateAmountRequest {
    CalculateAmountRequest {
        items,
        coupon_code: None,
        points_used: None,
        client_total: None,
    }
}

#[tokio::test]
async fn reconcile_below_tier_with_free_shipping() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Oversized Tee", 500, 10).await;

    let calc = AmountCalculator::new(db.clone());
    let result = calc.reconcile(&request(vec![line(&tee, 2)]), None).await.unwrap();

    // subtotal 1000, qty 2 below the 3-tier, subtotal at the threshold
    let b = &result.breakdown;
    assert_eq!(b.subtotal, 1000);
    assert_eq!(b.shipping_cost, 0);
    assert_eq!(b.quantity_discount, 0);
    assert_eq!(b.total, 1000);
    assert!(b.applied_tier.is_none());
    assert_eq!(b.next_tier.as_ref().unwrap().min_quantity, 3);
}

#[tokio::test]
async fn reconcile_applies_quantity_tier() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Oversized Tee", 500, 10).await;

    let calc = AmountCalculator::new(db.clone());
    let result = calc.reconcile(&request(vec![line(&tee, 3)]), None).await.unwrap();

    let b = &result.breakdown;
    assert_eq!(b.subtotal, 1500);
    assert_eq!(b.quantity_discount, 150);
    assert_eq!(b.shipping_cost, 0);
    assert_eq!(b.total, 1350);
    assert_eq!(b.applied_tier.as_ref().unwrap().discount_percent, 10);
    assert_eq!(b.next_tier.as_ref().unwrap().min_quantity, 5);
}

#[tokio::test]
async fn reconcile_stacks_coupon_additively() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Oversized Tee", 500, 10).await;
    CouponRepository::new(db.clone())
        .create(CouponCreate {
            code: "FLAT100".to_string(),
            discount_type: DiscountType::Fixed,
            discount_value: 100,
            minimum_purchase: Some(500),
            max_discount: None,
            valid_until: None,
        })
        .await
        .unwrap();

    let mut req = request(vec![line(&tee, 3)]);
    req.coupon_code = Some("FLAT100".to_string());

    let calc = AmountCalculator::new(db.clone());
    let b = calc.reconcile(&req, None).await.unwrap().breakdown;

    assert_eq!(b.coupon_discount, 100);
    assert_eq!(b.total, 1250);
}

#[tokio::test]
async fn reconcile_rescales_tier_onto_shipping_base() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Basics Tee", 300, 10).await;

    let calc = AmountCalculator::new(db.clone());
    let b = calc
        .reconcile(&request(vec![line(&tee, 3)]), None)
        .await
        .unwrap()
        .breakdown;

    // subtotal 900 below threshold → flat fee 100; tier gives 90 on the
    // subtotal, rescaled onto 1000 → 100
    assert_eq!(b.subtotal, 900);
    assert_eq!(b.shipping_cost, 100);
    assert_eq!(b.quantity_discount, 100);
    assert_eq!(b.total, 900);
}

#[tokio::test]
async fn reconcile_rejects_missing_product() {
    let (_tmp, db) = test_db().await;
    let calc = AmountCalculator::new(db.clone());

    let req = request(vec![CheckoutLine {
        product: "product:doesnotexist".to_string(),
        size: "M".to_string(),
        color: None,
        quantity: 1,
        customization: None,
    }]);
    let err = calc.reconcile(&req, None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNotFound);
    assert!(err.message.contains("doesnotexist"));
}

#[tokio::test]
async fn reconcile_rejects_inactive_product() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Retired Tee", 500, 10).await;
    let repo = ProductRepository::new(db.clone());
    let id = tee.id.as_ref().unwrap().to_string();
    repo.delete(&id).await.unwrap();

    let calc = AmountCalculator::new(db.clone());
    let err = calc.reconcile(&request(vec![line(&tee, 1)]), None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductInactive);
    assert!(err.message.contains("Retired Tee"));
}

#[tokio::test]
async fn reconcile_is_idempotent() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Oversized Tee", 500, 10).await;
    let calc = AmountCalculator::new(db.clone());

    let req = request(vec![line(&tee, 3)]);
    let first = calc.reconcile(&req, None).await.unwrap().breakdown;
    let second = calc.reconcile(&req, None).await.unwrap().breakdown;
    assert_eq!(first, second);
}

#[tokio::test]
async fn reconcile_applies_reward_points_for_users() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Oversized Tee", 500, 10).await;

    let users = UserRepository::new(db.clone());
    let user = users
        .create(User {
            id: None,
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "x".to_string(),
            role: Role::Customer,
            points_balance: 200,
            is_active: true,
            created_at: 0,
        })
        .await
        .unwrap();

    let mut req = request(vec![line(&tee, 2)]);
    req.points_used = Some(100);

    let calc = AmountCalculator::new(db.clone());
    let b = calc.reconcile(&req, Some(&user)).await.unwrap().breakdown;

    // 100 points at 0.5 units each
    assert_eq!(b.reward_discount, 50);
    assert_eq!(b.total, 950);

    // Guests cannot redeem
    let err = calc.reconcile(&req, None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PointsUnavailable);
}

#[tokio::test]
async fn reconcile_total_never_negative() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Cheap Tee", 100, 10).await;
    CouponRepository::new(db.clone())
        .create(CouponCreate {
            code: "BIG".to_string(),
            discount_type: DiscountType::Fixed,
            discount_value: 100_000,
            minimum_purchase: None,
            max_discount: None,
            valid_until: None,
        })
        .await
        .unwrap();

    let mut req = request(vec![line(&tee, 1)]);
    req.coupon_code = Some("BIG".to_string());

    let calc = AmountCalculator::new(db.clone());
    let b = calc.reconcile(&req, None).await.unwrap().breakdown;
    assert!(b.total >= 0);
    // Coupon clamps at the subtotal
    assert_eq!(b.coupon_discount, b.subtotal);
}

#[tokio::test]
async fn stock_decrement_is_conditional() {
    let (_tmp, db) = test_db().await;
    let tee = seed_product(&db, "Last Unit Tee", 500, 1).await;
    let key = tee.id.as_ref().unwrap().id.to_string();

    let repo = ProductRepository::new(db.clone());
    let lines = vec![StockLine {
        product_key: key.clone(),
        size: Size::M,
        quantity: 1,
    }];

    repo.decrement_stock(&lines).await.unwrap();

    // The second checkout of the same last unit must fail
    let err = repo.decrement_stock(&lines).await.unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));

    let after = repo.find_by_id(&key).await.unwrap().unwrap();
    assert_eq!(after.size_stock.m, 0);
}

#[tokio::test]
async fn stock_decrement_is_all_or_nothing() {
    let (_tmp, db) = test_db().await;
    let plenty = seed_product(&db, "Plenty Tee", 500, 10).await;
    let scarce = seed_product(&db, "Scarce Tee", 500, 1).await;
    let plenty_key = plenty.id.as_ref().unwrap().id.to_string();
    let scarce_key = scarce.id.as_ref().unwrap().id.to_string();

    let repo = ProductRepository::new(db.clone());
    let lines = vec![
        StockLine {
            product_key: plenty_key.clone(),
            size: Size::M,
            quantity: 2,
        },
        StockLine {
            product_key: scarce_key,
            size: Size::M,
            quantity: 5,
        },
    ];

    let err = repo.decrement_stock(&lines).await.unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));

    // The first line's decrement was rolled back with the transaction
    let plenty_after = repo.find_by_id(&plenty_key).await.unwrap().unwrap();
    assert_eq!(plenty_after.size_stock.m, 10);
}

#[tokio::test]
async fn points_deduction_is_conditional() {
    let (_tmp, db) = test_db().await;
    let users = UserRepository::new(db.clone());
    let user = users
        .create(User {
            id: None,
            username: "jane".to_string(),
            email: "jane2@example.com".to_string(),
            password_hash: "x".to_string(),
            role: Role::Customer,
            points_balance: 60,
            is_active: true,
            created_at: 0,
        })
        .await
        .unwrap();
    let id = user.id_str();

    let after = users.deduct_points(&id, 50).await.unwrap();
    assert_eq!(after.points_balance, 10);

    // Balance no longer covers a second redemption
    assert!(users.deduct_points(&id, 50).await.is_err());
    let current = users.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(current.points_balance, 10);
}

//! Order Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Order, OrderStatus};
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

// "order" is a SurrealQL keyword, so orders live in their own table name
const ORDER_TABLE: &str = "store_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = strip_table_prefix(ORDER_TABLE, id).to_string();
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
        Ok(order)
    }

    /// Orders belonging to a user, newest first
    pub async fn find_by_user(&self, user: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM store_order WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// All orders, newest first (admin)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM store_order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find the order a gateway order id belongs to
    pub async fn find_by_gateway_order_id(&self, gateway_order_id: &str) -> RepoResult<Option<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM store_order WHERE gateway_order_id = $gid")
            .bind(("gid", gateway_order_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    pub async fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let key = strip_table_prefix(ORDER_TABLE, id).to_string();
        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, key))
            .merge(serde_json::json!({ "status": status, "updated_at": now_millis() }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Record a verified payment and move the order forward
    pub async fn record_payment(
        &self,
        id: &str,
        payment_id: &str,
        points_earned: i64,
    ) -> RepoResult<Order> {
        let key = strip_table_prefix(ORDER_TABLE, id).to_string();
        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, key))
            .merge(serde_json::json!({
                "status": OrderStatus::Processing,
                "payment_id": payment_id,
                "points_earned": points_earned,
                "updated_at": now_millis(),
            }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Attach shipping-partner results and mark the order shipped
    pub async fn record_shipment(
        &self,
        id: &str,
        courier: &str,
        tracking_id: &str,
        label_url: &str,
        rate: i64,
    ) -> RepoResult<Order> {
        let key = strip_table_prefix(ORDER_TABLE, id).to_string();
        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, key))
            .merge(serde_json::json!({
                "status": OrderStatus::Shipped,
                "shipping": {
                    "courier": courier,
                    "tracking_id": tracking_id,
                    "label_url": label_url,
                    "rate": rate,
                },
                "updated_at": now_millis(),
            }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}

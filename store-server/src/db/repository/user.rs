//! User Repository

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::User;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, user: User) -> RepoResult<User> {
        let created: Option<User> = self.base.db().create(USER_TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let key = strip_table_prefix(USER_TABLE, id).to_string();
        let user: Option<User> = self.base.db().select((USER_TABLE, key)).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email")
            .bind(("email", email.trim().to_lowercase()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    /// Deduct reward points, failing when the balance does not cover them
    ///
    /// The deduction is conditional on the current balance, so a stale read
    /// cannot push the balance negative.
    pub async fn deduct_points(&self, id: &str, points: i64) -> RepoResult<User> {
        if points <= 0 {
            return Err(RepoError::Validation("points must be positive".into()));
        }
        let key = strip_table_prefix(USER_TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE type::thing('user', $id) \
                 SET points_balance -= $points \
                 WHERE points_balance >= $points RETURN AFTER",
            )
            .bind(("id", key))
            .bind(("points", points))
            .await?;
        let users: Vec<User> = result.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Validation("insufficient reward points".into()))
    }

    /// Credit earned reward points
    pub async fn credit_points(&self, id: &str, points: i64) -> RepoResult<User> {
        let key = strip_table_prefix(USER_TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query("UPDATE type::thing('user', $id) SET points_balance += $points RETURN AFTER")
            .bind(("id", key))
            .bind(("points", points))
            .await?;
        let users: Vec<User> = result.take(0)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }
}

//! Category and ProductType Repositories

use super::{BaseRepository, RepoError, RepoResult, merge_value, strip_table_prefix};
use crate::db::models::{
    Category, CategoryCreate, CategoryUpdate, ProductType, ProductTypeCreate, ProductTypeUpdate,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CATEGORY_TABLE: &str = "category";
const PRODUCT_TYPE_TABLE: &str = "product_type";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active categories
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let key = strip_table_prefix(CATEGORY_TABLE, id).to_string();
        let category: Option<Category> = self.base.db().select((CATEGORY_TABLE, key)).await?;
        Ok(category)
    }

    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let category = Category {
            id: None,
            name: data.name,
            description: data.description,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };
        let created: Option<Category> = self
            .base
            .db()
            .create(CATEGORY_TABLE)
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let key = strip_table_prefix(CATEGORY_TABLE, id).to_string();
        let updated: Option<Category> = self
            .base
            .db()
            .update((CATEGORY_TABLE, key))
            .merge(merge_value(&data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category; fails while products still reference it
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(CATEGORY_TABLE, id).to_string();
        let reference = format!("category:{key}");

        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM product WHERE category = $cat AND is_active = true GROUP ALL")
            .bind(("cat", reference))
            .await?;
        #[derive(serde::Deserialize)]
        struct Count {
            count: i64,
        }
        let counts: Vec<Count> = result.take(0)?;
        if counts.first().map(|c| c.count).unwrap_or(0) > 0 {
            return Err(RepoError::Validation(
                "category has associated products".into(),
            ));
        }

        let deleted: Option<Category> = self.base.db().delete((CATEGORY_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Category {} not found", id)));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct ProductTypeRepository {
    base: BaseRepository,
}

impl ProductTypeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<ProductType>> {
        let types: Vec<ProductType> = self
            .base
            .db()
            .query("SELECT * FROM product_type WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(types)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProductType>> {
        let key = strip_table_prefix(PRODUCT_TYPE_TABLE, id).to_string();
        let product_type: Option<ProductType> =
            self.base.db().select((PRODUCT_TYPE_TABLE, key)).await?;
        Ok(product_type)
    }

    pub async fn create(&self, data: ProductTypeCreate) -> RepoResult<ProductType> {
        let product_type = ProductType {
            id: None,
            name: data.name,
            description: data.description,
            is_active: true,
        };
        let created: Option<ProductType> = self
            .base
            .db()
            .create(PRODUCT_TYPE_TABLE)
            .content(product_type)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product type".to_string()))
    }

    pub async fn update(&self, id: &str, data: ProductTypeUpdate) -> RepoResult<ProductType> {
        let key = strip_table_prefix(PRODUCT_TYPE_TABLE, id).to_string();
        let updated: Option<ProductType> = self
            .base
            .db()
            .update((PRODUCT_TYPE_TABLE, key))
            .merge(merge_value(&data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product type {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(PRODUCT_TYPE_TABLE, id).to_string();
        let deleted: Option<ProductType> =
            self.base.db().delete((PRODUCT_TYPE_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!(
                "Product type {} not found",
                id
            )));
        }
        Ok(())
    }
}

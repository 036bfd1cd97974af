//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, merge_value, strip_table_prefix};
use crate::db::models::{
    Product, ProductCreate, ProductUpdate, Size, normalize_primary_image,
};
use crate::utils::time::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

/// Catalog listing filters
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub gender: Option<String>,
    pub tag: Option<String>,
}

/// One line of an atomic stock decrement
#[derive(Debug, Clone)]
pub struct StockLine {
    /// Bare product key (no table prefix)
    pub product_key: String,
    pub size: Size,
    pub quantity: i64,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active products, optionally filtered
    pub async fn find_all(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        let mut sql = String::from("SELECT * FROM product WHERE is_active = true");
        if filter.category.is_some() {
            sql.push_str(" AND category = $category");
        }
        if filter.gender.is_some() {
            sql.push_str(" AND gender = $gender");
        }
        if filter.tag.is_some() {
            sql.push_str(" AND ($tag IN tags OR $tag IN custom_tags)");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(category) = filter.category.clone() {
            query = query.bind(("category", category));
        }
        if let Some(gender) = filter.gender.clone() {
            query = query.bind(("gender", gender));
        }
        if let Some(tag) = filter.tag.clone() {
            query = query.bind(("tag", tag));
        }

        let products: Vec<Product> = query.await?.take(0)?;
        Ok(products)
    }

    /// Find products by category (active only)
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<Product>> {
        let filter = ProductFilter {
            category: Some(format!(
                "category:{}",
                strip_table_prefix("category", category_id)
            )),
            ..Default::default()
        };
        self.find_all(&filter).await
    }

    /// Find product by id, active or not
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, key)).await?;
        Ok(product)
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.price < 0 {
            return Err(RepoError::Validation("price must be non-negative".into()));
        }

        let mut images = data.images.unwrap_or_default();
        normalize_primary_image(&mut images);

        let now = now_millis();
        let product = Product {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            mrp: data.mrp.unwrap_or(data.price),
            category: data.category,
            product_type: data.product_type,
            size_stock: data.size_stock.unwrap_or_default(),
            images,
            tags: data.tags.unwrap_or_default(),
            custom_tags: data.custom_tags.unwrap_or_default(),
            gender: data.gender.unwrap_or_else(|| "unisex".to_string()),
            size_chart: data.size_chart,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();

        let mut data = data;
        if let Some(ref mut images) = data.images {
            normalize_primary_image(images);
        }

        let mut merge = merge_value(&data);
        if let Some(map) = merge.as_object_mut() {
            map.insert("updated_at".to_string(), now_millis().into());
        }

        let updated: Option<Product> = self
            .base
            .db()
            .update((PRODUCT_TABLE, key))
            .merge(merge)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft-delete a product (checkout rejects inactive products)
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let updated: Option<Product> = self
            .base
            .db()
            .update((PRODUCT_TABLE, key))
            .merge(serde_json::json!({ "is_active": false, "updated_at": now_millis() }))
            .await?;
        if updated.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }

    /// Atomically decrement per-size stock for every line, all-or-nothing
    ///
    /// Each line's decrement is conditional on sufficient remaining stock;
    /// the first line that fails aborts the whole transaction, so two
    /// concurrent checkouts cannot both take the last unit.
    pub async fn decrement_stock(&self, lines: &[StockLine]) -> RepoResult<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for (i, line) in lines.iter().enumerate() {
            let field = line.size.field();
            sql.push_str(&format!(
                "LET $r{i} = (UPDATE type::thing('product', $id{i}) \
                 SET size_stock.{field} -= $q{i}, updated_at = $now \
                 WHERE size_stock.{field} >= $q{i} AND is_active = true RETURN AFTER);\n"
            ));
            sql.push_str(&format!(
                "IF array::len($r{i}) == 0 {{ THROW 'insufficient stock for ' + $id{i} }};\n"
            ));
        }
        sql.push_str("COMMIT TRANSACTION;");

        let mut query = self.base.db().query(sql).bind(("now", now_millis()));
        for (i, line) in lines.iter().enumerate() {
            query = query
                .bind((format!("id{i}"), line.product_key.clone()))
                .bind((format!("q{i}"), line.quantity));
        }

        match query.await.and_then(|r| r.check()) {
            Ok(_) => Ok(()),
            Err(e) => {
                let text = e.to_string();
                if text.contains("insufficient stock") {
                    // Surface which product ran dry
                    let key = lines
                        .iter()
                        .map(|l| l.product_key.as_str())
                        .find(|k| text.contains(*k))
                        .unwrap_or("")
                        .to_string();
                    Err(RepoError::InsufficientStock(key))
                } else {
                    Err(RepoError::Database(text))
                }
            }
        }
    }
}

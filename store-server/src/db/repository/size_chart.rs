//! Size Chart Repository

use super::{BaseRepository, RepoError, RepoResult, merge_value, strip_table_prefix};
use crate::db::models::{SizeChart, SizeChartCreate, SizeChartUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SIZE_CHART_TABLE: &str = "size_chart";

#[derive(Clone)]
pub struct SizeChartRepository {
    base: BaseRepository,
}

impl SizeChartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<SizeChart>> {
        let charts: Vec<SizeChart> = self
            .base
            .db()
            .query("SELECT * FROM size_chart ORDER BY name")
            .await?
            .take(0)?;
        Ok(charts)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<SizeChart>> {
        let key = strip_table_prefix(SIZE_CHART_TABLE, id).to_string();
        let chart: Option<SizeChart> = self.base.db().select((SIZE_CHART_TABLE, key)).await?;
        Ok(chart)
    }

    pub async fn create(&self, data: SizeChartCreate) -> RepoResult<SizeChart> {
        let chart = SizeChart {
            id: None,
            name: data.name,
            headers: data.headers,
            rows: data.rows,
        };
        let created: Option<SizeChart> = self
            .base
            .db()
            .create(SIZE_CHART_TABLE)
            .content(chart)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create size chart".to_string()))
    }

    pub async fn update(&self, id: &str, data: SizeChartUpdate) -> RepoResult<SizeChart> {
        let key = strip_table_prefix(SIZE_CHART_TABLE, id).to_string();
        let updated: Option<SizeChart> = self
            .base
            .db()
            .update((SIZE_CHART_TABLE, key))
            .merge(merge_value(&data))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Size chart {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(SIZE_CHART_TABLE, id).to_string();
        let deleted: Option<SizeChart> = self.base.db().delete((SIZE_CHART_TABLE, key)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Size chart {} not found", id)));
        }
        Ok(())
    }
}

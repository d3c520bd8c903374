use async_trait::async_trait;
use sqlx::query_as;
use uuid::Uuid;

use crate::application::repos::{CategoriesRepo, RepoError};
use crate::domain::entities::CategoryRecord;

use super::PostgresRepositories;
use super::map_sqlx_error;
use super::types::CategoryRow;

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_ordered_by_name(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = query_as::<_, CategoryRow>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
        let row = query_as::<_, CategoryRow>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(CategoryRecord::from))
    }
}

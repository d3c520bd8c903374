use async_trait::async_trait;
use sqlx::{QueryBuilder, query, query_as};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::{Page, PageRequest};
use crate::application::repos::{
    CreatePostParams, PostQueryFilter, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::{CategoryRecord, PostOverviewRecord, PostRecord};

use super::PostgresRepositories;
use super::map_sqlx_error;
use super::types::{CategoryRow, PostOverviewRow, PostRow};

fn apply_title_filter(qb: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &PostQueryFilter) {
    if let Some(search) = filter.title_search.as_ref() {
        qb.push(" AND p.title ILIKE ");
        qb.push_bind(format!("%{}%", search));
    }
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_overviews(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Page<PostOverviewRecord>, RepoError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM posts p WHERE 1=1 ");
        apply_title_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let mut qb = QueryBuilder::new(
            "SELECT p.id, p.title, p.body, u.display_name AS author_name, p.created_at \
             FROM posts p INNER JOIN users u ON u.id = p.author_id WHERE 1=1 ",
        );
        apply_title_filter(&mut qb, filter);
        qb.push(" ORDER BY p.created_at DESC, p.id DESC LIMIT ");
        qb.push_bind(page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let rows = qb
            .build_query_as::<PostOverviewRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        let items = rows.into_iter().map(PostOverviewRecord::from).collect();
        Ok(Page::new(items, page, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let row = query_as::<_, PostRow>(
            "SELECT id, title, body, author_id, created_at, updated_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn categories_for_post(&self, post_id: Uuid) -> Result<Vec<CategoryRecord>, RepoError> {
        let rows = query_as::<_, CategoryRow>(
            "SELECT c.id, c.name FROM categories c \
             INNER JOIN post_categories pc ON pc.category_id = c.id \
             WHERE pc.post_id = $1 ORDER BY c.name",
        )
        .bind(post_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let CreatePostParams {
            title,
            body,
            author_id,
            category_id,
        } = params;

        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        let row = query_as::<_, PostRow>(
            "INSERT INTO posts (id, title, body, author_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $5) \
             RETURNING id, title, body, author_id, created_at, updated_at",
        )
        .bind(id)
        .bind(title)
        .bind(body)
        .bind(author_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        query("INSERT INTO post_categories (post_id, category_id) VALUES ($1, $2)")
            .bind(id)
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let UpdatePostParams {
            id,
            title,
            body,
            category_id,
        } = params;

        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        let now = OffsetDateTime::now_utc();
        let row = query_as::<_, PostRow>(
            "UPDATE posts SET title = $2, body = $3, updated_at = $4 WHERE id = $1 \
             RETURNING id, title, body, author_id, created_at, updated_at",
        )
        .bind(id)
        .bind(title)
        .bind(body)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepoError::NotFound)?;

        query("DELETE FROM post_categories WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        query("INSERT INTO post_categories (post_id, category_id) VALUES ($1, $2)")
            .bind(id)
            .bind(category_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(PostRecord::from(row))
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let result = query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

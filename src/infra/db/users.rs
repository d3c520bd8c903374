use async_trait::async_trait;
use sqlx::{query, query_as};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{RepoError, UsersRepo};
use crate::domain::entities::{UserCredentialRecord, UserRecord};

use super::PostgresRepositories;
use super::map_sqlx_error;
use super::types::{UserCredentialRow, UserRow};

impl PostgresRepositories {
    /// Provisioning entry point used by the `user add` CLI command.
    pub async fn insert_user(
        &self,
        username: &str,
        display_name: &str,
        salt: &str,
        password_digest: &[u8],
    ) -> Result<UserRecord, RepoError> {
        let id = Uuid::new_v4();
        let now = OffsetDateTime::now_utc();
        query(
            "INSERT INTO users (id, username, display_name, salt, password_digest, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(username)
        .bind(display_name)
        .bind(salt)
        .bind(password_digest)
        .bind(now)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(UserRecord {
            id,
            username: username.to_string(),
            display_name: display_name.to_string(),
        })
    }
}

#[async_trait]
impl UsersRepo for PostgresRepositories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        let row =
            query_as::<_, UserRow>("SELECT id, username, display_name FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentialRecord>, RepoError> {
        let row = query_as::<_, UserCredentialRow>(
            "SELECT id, username, display_name, salt, password_digest \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UserCredentialRecord::from))
    }
}

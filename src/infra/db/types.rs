//! Row types bridging Postgres results to domain records.

use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::{
    CategoryRecord, PostOverviewRecord, PostRecord, SessionRecord, UserCredentialRecord,
    UserRecord,
};

#[derive(Debug, FromRow)]
pub(super) struct PostRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct PostOverviewRow {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub created_at: OffsetDateTime,
}

impl From<PostOverviewRow> for PostOverviewRecord {
    fn from(row: PostOverviewRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            author_name: row.author_name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            display_name: row.display_name,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct UserCredentialRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub salt: String,
    pub password_digest: Vec<u8>,
}

impl From<UserCredentialRow> for UserCredentialRecord {
    fn from(row: UserCredentialRow) -> Self {
        Self {
            user: UserRecord {
                id: row.id,
                username: row.username,
                display_name: row.display_name,
            },
            salt: row.salt,
            password_digest: row.password_digest,
        }
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub secret_digest: Vec<u8>,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            secret_digest: row.secret_digest,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::pagination::{Page, PageRequest};
use crate::domain::entities::{
    CategoryRecord, PostOverviewRecord, PostRecord, SessionRecord, UserCredentialRecord,
    UserRecord,
};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Filter applied to post listings. An empty (or absent) title search matches
/// every post; `search` with an empty query is deliberately a browse-all.
#[derive(Debug, Clone, Default)]
pub struct PostQueryFilter {
    pub title_search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub category_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub category_id: Uuid,
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Posts joined with their author, newest first.
    async fn list_overviews(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Page<PostOverviewRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;

    async fn categories_for_post(&self, post_id: Uuid) -> Result<Vec<CategoryRecord>, RepoError>;
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    /// Inserts the post and attaches its initial category atomically.
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    /// Overwrites title and body and replaces the category assignment.
    /// Returns `RepoError::NotFound` when the post does not exist.
    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError>;

    /// Returns `RepoError::NotFound` when the post does not exist.
    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    /// All categories ordered by name, for form option lists.
    async fn list_ordered_by_name(&self) -> Result<Vec<CategoryRecord>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError>;
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError>;

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentialRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct NewSessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub secret_digest: Vec<u8>,
    pub expires_at: OffsetDateTime,
}

#[async_trait]
pub trait SessionsRepo: Send + Sync {
    async fn insert_session(&self, session: NewSessionRecord) -> Result<(), RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SessionRecord>, RepoError>;

    async fn delete_session(&self, id: Uuid) -> Result<(), RepoError>;

    /// Removes sessions past their expiry; returns the number deleted.
    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, RepoError>;
}

/// Liveness probe over whatever backs the repositories.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}

//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Listing projection: a post joined with its author's display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostOverviewRecord {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
}

/// A user together with the material needed to verify a login attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCredentialRecord {
    pub user: UserRecord,
    pub salt: String,
    pub password_digest: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub secret_digest: Vec<u8>,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

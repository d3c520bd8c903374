//! Session authentication in the hashed-secret style: the browser holds an
//! opaque token, the database holds only a SHA-256 digest of its secret half.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::application::repos::{NewSessionRecord, RepoError, SessionsRepo, UsersRepo};
use crate::domain::entities::UserRecord;

const TOKEN_PREFIX: &str = "fs";
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Error)]
pub enum SessionAuthError {
    #[error("missing session token")]
    Missing,
    #[error("invalid session token")]
    Invalid,
    #[error("expired session token")]
    Expired,
}

#[derive(Debug, Clone)]
pub struct SessionIssued {
    pub token: String,
    pub user: UserRecord,
    pub expires_at: OffsetDateTime,
}

struct ParsedToken {
    session_id: Uuid,
    secret: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UsersRepo>,
    sessions: Arc<dyn SessionsRepo>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UsersRepo>,
        sessions: Arc<dyn SessionsRepo>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
        }
    }

    /// Verifies the credentials and issues a fresh session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionIssued, AuthError> {
        let credentials = self
            .users
            .find_credentials(username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let attempt = credential_digest(&credentials.salt, password);
        if credentials.password_digest.ct_eq(&attempt).unwrap_u8() == 0 {
            return Err(AuthError::InvalidCredentials);
        }

        let session_id = Uuid::new_v4();
        let secret = generate_secret();
        let token = format!("{TOKEN_PREFIX}_{}_{secret}", session_id.simple());
        let now = OffsetDateTime::now_utc();
        let expires_at = now + self.session_ttl;

        self.sessions
            .insert_session(NewSessionRecord {
                id: session_id,
                user_id: credentials.user.id,
                secret_digest: hash_secret(&secret),
                expires_at,
            })
            .await?;

        Ok(SessionIssued {
            token,
            user: credentials.user,
            expires_at,
        })
    }

    /// Resolves a session token to its user, rejecting expired sessions.
    pub async fn authenticate(&self, token: &str) -> Result<UserRecord, SessionAuthError> {
        let parsed = parse_token(token).ok_or(SessionAuthError::Invalid)?;
        let session = self
            .sessions
            .find_by_id(parsed.session_id)
            .await
            .map_err(|_| SessionAuthError::Invalid)?
            .ok_or(SessionAuthError::Invalid)?;

        if session.expires_at <= OffsetDateTime::now_utc() {
            return Err(SessionAuthError::Expired);
        }

        let hashed_input = hash_secret(&parsed.secret);
        if session.secret_digest.ct_eq(&hashed_input).unwrap_u8() == 0 {
            return Err(SessionAuthError::Invalid);
        }

        self.users
            .find_by_id(session.user_id)
            .await
            .map_err(|_| SessionAuthError::Invalid)?
            .ok_or(SessionAuthError::Invalid)
    }

    /// Revokes the session named by the token. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parsed) = parse_token(token) {
            match self.sessions.delete_session(parsed.session_id).await {
                Ok(()) | Err(RepoError::NotFound) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    /// Housekeeping hook for startup: drops sessions past their expiry.
    pub async fn purge_expired(&self) -> Result<u64, AuthError> {
        Ok(self
            .sessions
            .purge_expired(OffsetDateTime::now_utc())
            .await?)
    }
}

/// Digest stored for a user password: SHA-256 over `salt:password`.
pub fn credential_digest(salt: &str, password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

fn hash_secret(secret: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.finalize().to_vec()
}

fn generate_secret() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn parse_token(token: &str) -> Option<ParsedToken> {
    let mut parts = token.splitn(3, '_');
    let prefix = parts.next()?;
    if prefix != TOKEN_PREFIX {
        return None;
    }
    let session_id = Uuid::try_parse(parts.next()?).ok()?;
    let secret = parts.next()?;
    if secret.len() < MIN_SECRET_LEN {
        return None;
    }
    Some(ParsedToken {
        session_id,
        secret: secret.to_string(),
    })
}

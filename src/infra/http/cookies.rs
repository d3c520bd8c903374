//! Cookie plumbing for the session token and the one-shot flash message.
//!
//! The flash cookie carries a small JSON payload, base64url-encoded so it
//! survives cookie value restrictions. Whoever renders it clears it.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use time::Duration;

pub const SESSION_COOKIE: &str = "foglio_session";
pub const FLASH_COOKIE: &str = "foglio_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn css_class(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Reads a single cookie value out of the request `Cookie` header(s).
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(name) {
                return parts.next().map(str::to_string);
            }
        }
    }
    None
}

pub fn session_cookie(token: &str, max_age: Duration) -> Option<HeaderValue> {
    let value = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age.whole_seconds()
    );
    HeaderValue::from_str(&value).ok()
}

pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("foglio_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

pub fn flash_cookie(flash: &Flash) -> Option<HeaderValue> {
    let payload = serde_json::to_vec(flash).ok()?;
    let encoded = URL_SAFE_NO_PAD.encode(payload);
    let value = format!("{FLASH_COOKIE}={encoded}; Path=/; HttpOnly; SameSite=Lax");
    HeaderValue::from_str(&value).ok()
}

pub fn clear_flash_cookie() -> HeaderValue {
    HeaderValue::from_static("foglio_flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Decodes the flash cookie from an incoming request, if present and intact.
/// Malformed payloads are treated as absent.
pub fn take_flash(headers: &HeaderMap) -> Option<Flash> {
    let raw = cookie_value(headers, FLASH_COOKIE)?;
    let payload = URL_SAFE_NO_PAD.decode(raw.as_bytes()).ok()?;
    serde_json::from_slice(&payload).ok()
}

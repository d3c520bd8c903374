use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use metrics::{counter, histogram};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;
use crate::domain::entities::UserRecord;

use super::cookies::{self, SESSION_COOKIE};
use super::state::AppState;

/// Per-request correlation data, attached before any handler runs.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub request_id: Uuid,
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    request.extensions_mut().insert(RequestContext {
        request_id: Uuid::new_v4(),
    });
    next.run(request).await
}

/// The authenticated user, inserted by [`require_session`] for handlers
/// behind the login wall.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

/// Redirects anonymous or stale-session requests to the login form. A
/// rejected token also gets its cookie cleared so the browser stops
/// resending it.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = cookies::cookie_value(request.headers(), SESSION_COOKIE);
    let Some(token) = token else {
        return Redirect::to("/login").into_response();
    };

    match state.auth.authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Err(err) => {
            info!(error = %err, "session rejected");
            let mut response = Redirect::to("/login").into_response();
            response
                .headers_mut()
                .append(SET_COOKIE, cookies::clear_session_cookie());
            response
        }
    }
}

/// Records request metrics and logs every response, pulling diagnostic
/// detail from the [`ErrorReport`] extension when a handler attached one.
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id);

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = response.status();

    counter!("foglio_http_request_total").increment(1);
    histogram!("foglio_http_request_ms").record(elapsed_ms);
    if status.is_client_error() || status.is_server_error() {
        counter!("foglio_http_request_error_total").increment(1);
    }

    let detail = response
        .extensions()
        .get::<ErrorReport>()
        .map(|report| (report.source, report.messages.join(": ")));

    if status.is_server_error() {
        let (source, messages) = detail.unwrap_or(("", String::new()));
        error!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed_ms,
            ?request_id,
            source,
            messages,
            "request failed"
        );
    } else if status.is_client_error() {
        let (source, messages) = detail.unwrap_or(("", String::new()));
        warn!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed_ms,
            ?request_id,
            source,
            messages,
            "request rejected"
        );
    } else {
        info!(
            %method,
            %path,
            status = status.as_u16(),
            elapsed_ms,
            ?request_id,
            "request completed"
        );
    }

    response
}

//! HTTP surface: router assembly, middleware, and resource handlers.

mod auth;
pub mod cookies;
pub mod middleware;
mod posts;
mod state;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};

use crate::application::error::HttpError;
use crate::application::repos::RepoError;
use crate::infra::assets::serve_static;

pub use middleware::{CurrentUser, RequestContext};
pub use state::AppState;

use cookies::Flash;

/// Builds the full application router. Every post route sits behind the
/// session wall; login, logout, assets, and the health probe stay open.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/", get(posts::posts_index))
        .route("/posts", get(posts::posts_index).post(posts::post_create))
        .route("/posts/new", get(posts::post_new))
        .route("/posts/search", get(posts::posts_search))
        .route(
            "/posts/{id}",
            get(posts::post_show)
                .put(posts::post_update)
                .patch(posts::post_update)
                .delete(posts::post_delete),
        )
        .route(
            "/posts/{id}/edit",
            get(posts::post_edit).post(posts::post_update),
        )
        .route("/posts/{id}/delete", post(posts::post_delete))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ));

    Router::new()
        .merge(protected)
        .route("/login", get(auth::login_form).post(auth::login_submit))
        .route("/logout", post(auth::logout))
        .route("/_health/db", get(db_health))
        .route("/static/{*path}", get(serve_static))
        .with_state(state)
        .layer(from_fn(middleware::log_responses))
        .layer(from_fn(middleware::set_request_context))
}

async fn db_health(State(state): State<AppState>) -> Response {
    match state.health.ping().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => repo_error_to_http("infra::http::db_health", err).into_response(),
    }
}

/// 303 redirect carrying a one-shot flash cookie for the next page.
fn redirect_with_flash(location: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(location).into_response();
    if let Some(cookie) = cookies::flash_cookie(&flash) {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}

pub(crate) fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    let (status, public_message) = match &err {
        RepoError::NotFound => (StatusCode::NOT_FOUND, "Resource not found"),
        RepoError::Duplicate { .. } => (StatusCode::CONFLICT, "Resource already exists"),
        RepoError::InvalidInput { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "Request could not be processed")
        }
        RepoError::Integrity { .. } => (StatusCode::CONFLICT, "Request conflicts with stored data"),
        RepoError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "Database timed out"),
        RepoError::Persistence(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "Service temporarily unavailable")
        }
    };
    HttpError::from_error(source, status, public_message, &err)
}

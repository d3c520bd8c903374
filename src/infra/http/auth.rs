//! Login and logout handlers.

use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::application::auth::AuthError;
use crate::application::error::ErrorReport;
use crate::presentation::views::{LayoutContext, LoginContext, LoginTemplate, render_template_response};

use super::cookies::{self, SESSION_COOKIE};
use super::repo_error_to_http;
use super::state::AppState;

const BAD_CREDENTIALS: &str = "These credentials do not match our records.";

#[derive(Debug, Default, Deserialize)]
pub(super) struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub(super) async fn login_form() -> Response {
    let content = LoginContext {
        username_value: String::new(),
        error: None,
    };
    let view = LayoutContext::new(content);
    render_template_response(LoginTemplate { view }, StatusCode::OK)
}

pub(super) async fn login_submit(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth.login(&form.username, &form.password).await {
        Ok(issued) => {
            let mut response = Redirect::to("/").into_response();
            let max_age = issued.expires_at - OffsetDateTime::now_utc();
            if let Some(cookie) = cookies::session_cookie(&issued.token, max_age) {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
            response
        }
        Err(AuthError::InvalidCredentials) => {
            let content = LoginContext {
                username_value: form.username,
                error: Some(BAD_CREDENTIALS.to_string()),
            };
            let view = LayoutContext::new(content);
            let mut response =
                render_template_response(LoginTemplate { view }, StatusCode::UNPROCESSABLE_ENTITY);
            ErrorReport::from_message(
                "infra::http::auth::login_submit",
                StatusCode::UNPROCESSABLE_ENTITY,
                "login rejected: invalid credentials",
            )
            .attach(&mut response);
            response
        }
        Err(AuthError::Repo(err)) => {
            repo_error_to_http("infra::http::auth::login_submit", err).into_response()
        }
    }
}

pub(super) async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookies::cookie_value(&headers, SESSION_COOKIE) {
        match state.auth.logout(&token).await {
            Ok(()) | Err(AuthError::InvalidCredentials) => {}
            Err(AuthError::Repo(err)) => {
                return repo_error_to_http("infra::http::auth::logout", err).into_response();
            }
        }
    }

    let mut response = Redirect::to("/login").into_response();
    response
        .headers_mut()
        .append(SET_COOKIE, cookies::clear_session_cookie());
    response
}

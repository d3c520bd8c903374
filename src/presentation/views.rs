use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::{OffsetDateTime, macros::format_description};

use crate::application::error::{ErrorReport, HttpError};
use crate::domain::entities::PostOverviewRecord;

const SNIPPET_MAX_CHARS: usize = 180;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response(user_name: Option<String>) -> Response {
    let content = ErrorPageView::not_found();
    let view = LayoutContext::new(content).with_user(user_name);
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct BrandView {
    pub title: String,
    pub href: String,
}

impl Default for BrandView {
    fn default() -> Self {
        Self {
            title: "Foglio".to_string(),
            href: "/".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct FlashView {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub brand: BrandView,
    pub user_name: Option<String>,
    pub flash: Option<FlashView>,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(content: T) -> Self {
        Self {
            brand: BrandView::default(),
            user_name: None,
            flash: None,
            content,
        }
    }

    pub fn with_user(mut self, user_name: Option<String>) -> Self {
        self.user_name = user_name;
        self
    }

    pub fn with_flash(mut self, flash: Option<FlashView>) -> Self {
        self.flash = flash;
        self
    }
}

#[derive(Clone)]
pub struct PostCard {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub author_name: String,
    pub published: String,
}

impl From<PostOverviewRecord> for PostCard {
    fn from(record: PostOverviewRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            snippet: excerpt(&record.body),
            author_name: record.author_name,
            published: format_timestamp(record.created_at),
        }
    }
}

pub struct PostListContext {
    pub heading: String,
    pub posts: Vec<PostCard>,
    pub has_results: bool,
    pub query: Option<String>,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<PostListContext>,
}

pub struct PostDetailContext {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub published: String,
    pub categories: Vec<String>,
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub view: LayoutContext<PostDetailContext>,
}

#[derive(Clone)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

pub struct PostFormContext {
    pub heading: String,
    pub action: String,
    pub submit_label: String,
    pub cancel_href: String,
    pub title_value: String,
    pub body_value: String,
    pub categories: Vec<CategoryOption>,
    pub title_error: Option<String>,
    pub category_error: Option<String>,
    pub body_error: Option<String>,
}

#[derive(Template)]
#[template(path = "post_form.html")]
pub struct PostFormTemplate {
    pub view: LayoutContext<PostFormContext>,
}

pub struct LoginContext {
    pub username_value: String,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub view: LayoutContext<LoginContext>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page Not Found".to_string(),
            message: "The post you requested does not exist. It may have been deleted."
                .to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

/// Listing snippet: the first part of the body, cut at a char boundary.
pub fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= SNIPPET_MAX_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();
    format!("{}…", cut.trim_end())
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    at.format(&format).unwrap_or_else(|_| at.to_string())
}

//! Handlers for the post resource: listing, search, detail, and the
//! create/edit/delete lifecycle.

use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::REFERER, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::error::HttpError;
use crate::application::pagination::{Page, PageRequest};
use crate::application::posts::{FieldErrors, PostForm, PostServiceError};
use crate::domain::entities::{CategoryRecord, PostOverviewRecord, UserRecord};
use crate::presentation::views::{
    CategoryOption, FlashView, IndexTemplate, LayoutContext, PostCard, PostDetailContext,
    PostFormContext, PostFormTemplate, PostListContext, PostTemplate, format_timestamp,
    render_not_found_response, render_template_response,
};

use super::cookies::{self, Flash};
use super::repo_error_to_http;
use super::state::AppState;
use super::{CurrentUser, redirect_with_flash};

#[derive(Debug, Default, Deserialize)]
pub(super) struct ListQuery {
    page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchQuery {
    q: Option<String>,
    page: Option<u32>,
}

pub(super) async fn posts_index(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let request = PageRequest::new(query.page.unwrap_or(1), state.per_page);
    match state.posts.list(request).await {
        Ok(page) => listing_response(&user, &headers, page, None),
        Err(err) => service_error("infra::http::posts::posts_index", &user, err),
    }
}

pub(super) async fn posts_search(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Response {
    let request = PageRequest::new(query.page.unwrap_or(1), state.per_page);
    let text = query.q.unwrap_or_default();
    match state.posts.search(&text, request).await {
        Ok(page) => listing_response(&user, &headers, page, Some(text)),
        Err(err) => service_error("infra::http::posts::posts_search", &user, err),
    }
}

pub(super) async fn post_show(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let detail = match state.posts.load(id).await {
        Ok(detail) => detail,
        Err(err) => return service_error("infra::http::posts::post_show", &user, err),
    };

    let author_name = detail
        .author
        .map(|author| author.display_name)
        .unwrap_or_else(|| "Unknown author".to_string());
    let content = PostDetailContext {
        id: detail.post.id.to_string(),
        title: detail.post.title,
        body: detail.post.body,
        author_name,
        published: format_timestamp(detail.post.created_at),
        categories: detail
            .categories
            .into_iter()
            .map(|category| category.name)
            .collect(),
    };

    let flash = cookies::take_flash(&headers);
    let view = LayoutContext::new(content)
        .with_user(Some(user.display_name))
        .with_flash(flash.as_ref().map(flash_view));
    let mut response = render_template_response(PostTemplate { view }, StatusCode::OK);
    if flash.is_some() {
        response
            .headers_mut()
            .append(SET_COOKIE, cookies::clear_flash_cookie());
    }
    response
}

pub(super) async fn post_new(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Response {
    let categories = match state.posts.category_options().await {
        Ok(categories) => categories,
        Err(err) => return service_error("infra::http::posts::post_new", &user, err),
    };

    let content = create_form_context(&PostForm::default(), &FieldErrors::default(), categories);
    let view = LayoutContext::new(content).with_user(Some(user.display_name));
    render_template_response(PostFormTemplate { view }, StatusCode::OK)
}

pub(super) async fn post_create(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Form(form): Form<PostForm>,
) -> Response {
    match state.posts.create(&user, form.clone()).await {
        Ok(_) => redirect_with_flash("/posts", Flash::success("Post created successfully!")),
        Err(PostServiceError::Validation(errors)) => {
            let categories = match state.posts.category_options().await {
                Ok(categories) => categories,
                Err(err) => return service_error("infra::http::posts::post_create", &user, err),
            };
            let content = create_form_context(&form, &errors, categories);
            let view = LayoutContext::new(content).with_user(Some(user.display_name));
            render_template_response(PostFormTemplate { view }, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(err) => service_error("infra::http::posts::post_create", &user, err),
    }
}

pub(super) async fn post_edit(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Response {
    let detail = match state.posts.load(id).await {
        Ok(detail) => detail,
        Err(err) => return service_error("infra::http::posts::post_edit", &user, err),
    };
    let categories = match state.posts.category_options().await {
        Ok(categories) => categories,
        Err(err) => return service_error("infra::http::posts::post_edit", &user, err),
    };

    let form = PostForm {
        title: detail.post.title,
        category: detail
            .categories
            .first()
            .map(|category| category.id.to_string())
            .unwrap_or_default(),
        body: detail.post.body,
    };
    let content = edit_form_context(id, &form, &FieldErrors::default(), categories);
    let view = LayoutContext::new(content).with_user(Some(user.display_name));
    render_template_response(PostFormTemplate { view }, StatusCode::OK)
}

pub(super) async fn post_update(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Form(form): Form<PostForm>,
) -> Response {
    match state.posts.update(id, form.clone()).await {
        Ok(_) => redirect_with_flash("/", Flash::success("Post updated successfully!")),
        Err(PostServiceError::Validation(errors)) => {
            let categories = match state.posts.category_options().await {
                Ok(categories) => categories,
                Err(err) => return service_error("infra::http::posts::post_update", &user, err),
            };
            let content = edit_form_context(id, &form, &errors, categories);
            let view = LayoutContext::new(content).with_user(Some(user.display_name));
            render_template_response(PostFormTemplate { view }, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(err) => service_error("infra::http::posts::post_update", &user, err),
    }
}

pub(super) async fn post_delete(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    match state.posts.delete(id).await {
        Ok(_) => {
            let target = headers
                .get(REFERER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("/posts");
            redirect_with_flash(target, Flash::success("Post deleted successfully!"))
        }
        Err(err) => service_error("infra::http::posts::post_delete", &user, err),
    }
}

fn listing_response(
    user: &UserRecord,
    headers: &HeaderMap,
    page: Page<PostOverviewRecord>,
    query: Option<String>,
) -> Response {
    let heading = if query.is_some() {
        "Search results"
    } else {
        "Latest posts"
    };
    let cards = page.map(PostCard::from);
    let content = PostListContext {
        heading: heading.to_string(),
        has_results: cards.has_results(),
        query,
        prev_page: cards.prev_page(),
        next_page: cards.next_page(),
        page: cards.page,
        total_pages: cards.total_pages(),
        posts: cards.items,
    };

    let flash = cookies::take_flash(headers);
    let view = LayoutContext::new(content)
        .with_user(Some(user.display_name.clone()))
        .with_flash(flash.as_ref().map(flash_view));
    let mut response = render_template_response(IndexTemplate { view }, StatusCode::OK);
    if flash.is_some() {
        response
            .headers_mut()
            .append(SET_COOKIE, cookies::clear_flash_cookie());
    }
    response
}

fn flash_view(flash: &Flash) -> FlashView {
    FlashView {
        kind: flash.kind.css_class(),
        message: flash.message.clone(),
    }
}

fn create_form_context(
    form: &PostForm,
    errors: &FieldErrors,
    categories: Vec<CategoryRecord>,
) -> PostFormContext {
    form_context(
        "New post",
        "/posts".to_string(),
        "Publish",
        "/posts".to_string(),
        form,
        errors,
        categories,
    )
}

fn edit_form_context(
    id: Uuid,
    form: &PostForm,
    errors: &FieldErrors,
    categories: Vec<CategoryRecord>,
) -> PostFormContext {
    form_context(
        "Edit post",
        format!("/posts/{id}/edit"),
        "Save changes",
        format!("/posts/{id}"),
        form,
        errors,
        categories,
    )
}

fn form_context(
    heading: &str,
    action: String,
    submit_label: &str,
    cancel_href: String,
    form: &PostForm,
    errors: &FieldErrors,
    categories: Vec<CategoryRecord>,
) -> PostFormContext {
    let selected = form.category.trim().to_string();
    PostFormContext {
        heading: heading.to_string(),
        action,
        submit_label: submit_label.to_string(),
        cancel_href,
        title_value: form.title.clone(),
        body_value: form.body.clone(),
        categories: categories
            .into_iter()
            .map(|category| CategoryOption {
                selected: category.id.to_string() == selected,
                id: category.id.to_string(),
                name: category.name,
            })
            .collect(),
        title_error: errors.get("title").map(str::to_string),
        category_error: errors.get("category").map(str::to_string),
        body_error: errors.get("body").map(str::to_string),
    }
}

fn service_error(source: &'static str, user: &UserRecord, err: PostServiceError) -> Response {
    match err {
        PostServiceError::NotFound => render_not_found_response(Some(user.display_name.clone())),
        PostServiceError::Repo(repo) => repo_error_to_http(source, repo).into_response(),
        // Validation failures are handled inline by the form handlers; any
        // other path reaching here is a handler wiring bug.
        PostServiceError::Validation(_) => HttpError::new(
            source,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Request could not be processed",
            "validation error escaped its form handler",
        )
        .into_response(),
    }
}

//! End-to-end router tests over in-memory repositories.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{
    Request, StatusCode,
    header::{CONTENT_TYPE, COOKIE, LOCATION, REFERER, SET_COOKIE},
};
use http_body_util::BodyExt;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use foglio::application::auth::{AuthService, credential_digest};
use foglio::application::pagination::{Page, PageRequest};
use foglio::application::posts::PostService;
use foglio::application::repos::{
    CategoriesRepo, CreatePostParams, HealthCheck, NewSessionRecord, PostQueryFilter, PostsRepo,
    PostsWriteRepo, RepoError, SessionsRepo, UpdatePostParams, UsersRepo,
};
use foglio::domain::entities::{
    CategoryRecord, PostOverviewRecord, PostRecord, SessionRecord, UserCredentialRecord, UserRecord,
};
use foglio::infra::http::{AppState, build_router};

const USERNAME: &str = "ada";
const PASSWORD: &str = "correct-horse-battery";

#[derive(Default)]
struct MemoryRepositories {
    posts: Mutex<Vec<PostRecord>>,
    post_categories: Mutex<HashMap<Uuid, Uuid>>,
    categories: Mutex<Vec<CategoryRecord>>,
    users: Mutex<Vec<UserCredentialRecord>>,
    sessions: Mutex<Vec<SessionRecord>>,
}

impl MemoryRepositories {
    fn add_category(&self, name: &str) -> CategoryRecord {
        let category = CategoryRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.categories.lock().unwrap().push(category.clone());
        category
    }

    fn add_user(&self, username: &str, display_name: &str, password: &str) -> UserRecord {
        let user = UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            display_name: display_name.to_string(),
        };
        let salt = Uuid::new_v4().simple().to_string();
        let digest = credential_digest(&salt, password);
        self.users.lock().unwrap().push(UserCredentialRecord {
            user: user.clone(),
            salt,
            password_digest: digest,
        });
        user
    }

    fn category_of(&self, post_id: Uuid) -> Option<Uuid> {
        self.post_categories.lock().unwrap().get(&post_id).copied()
    }
}

#[async_trait]
impl PostsRepo for MemoryRepositories {
    async fn list_overviews(
        &self,
        filter: &PostQueryFilter,
        page: PageRequest,
    ) -> Result<Page<PostOverviewRecord>, RepoError> {
        let posts = self.posts.lock().unwrap();
        let users = self.users.lock().unwrap();

        let needle = filter
            .title_search
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        let mut matched: Vec<(usize, &PostRecord)> = posts
            .iter()
            .enumerate()
            .filter(|(_, post)| needle.is_empty() || post.title.to_lowercase().contains(&needle))
            .collect();
        // Newest first; insertion order breaks timestamp ties.
        matched.sort_by(|(a_idx, a), (b_idx, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b_idx.cmp(a_idx))
        });

        let total = matched.len() as u64;
        let start = usize::try_from(page.offset()).unwrap();
        let items = matched
            .into_iter()
            .skip(start)
            .take(usize::try_from(page.limit()).unwrap())
            .map(|(_, post)| PostOverviewRecord {
                id: post.id,
                title: post.title.clone(),
                body: post.body.clone(),
                author_name: users
                    .iter()
                    .find(|candidate| candidate.user.id == post.author_id)
                    .map(|candidate| candidate.user.display_name.clone())
                    .unwrap_or_default(),
                created_at: post.created_at,
            })
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }

    async fn categories_for_post(&self, post_id: Uuid) -> Result<Vec<CategoryRecord>, RepoError> {
        let assignment = self.category_of(post_id);
        let categories = self.categories.lock().unwrap();
        Ok(assignment
            .and_then(|id| categories.iter().find(|category| category.id == id))
            .cloned()
            .into_iter()
            .collect())
    }
}

#[async_trait]
impl PostsWriteRepo for MemoryRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let now = OffsetDateTime::now_utc();
        let post = PostRecord {
            id: Uuid::new_v4(),
            title: params.title,
            body: params.body,
            author_id: params.author_id,
            created_at: now,
            updated_at: now,
        };
        self.post_categories
            .lock()
            .unwrap()
            .insert(post.id, params.category_id);
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|post| post.id == params.id)
            .ok_or(RepoError::NotFound)?;
        post.title = params.title;
        post.body = params.body;
        post.updated_at = OffsetDateTime::now_utc();
        self.post_categories
            .lock()
            .unwrap()
            .insert(post.id, params.category_id);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        self.post_categories.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CategoriesRepo for MemoryRepositories {
    async fn list_ordered_by_name(&self) -> Result<Vec<CategoryRecord>, RepoError> {
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryRecord>, RepoError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|category| category.id == id)
            .cloned())
    }
}

#[async_trait]
impl UsersRepo for MemoryRepositories {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|candidate| candidate.user.id == id)
            .map(|candidate| candidate.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentialRecord>, RepoError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|candidate| candidate.user.username == username)
            .cloned())
    }
}

#[async_trait]
impl SessionsRepo for MemoryRepositories {
    async fn insert_session(&self, session: NewSessionRecord) -> Result<(), RepoError> {
        self.sessions.lock().unwrap().push(SessionRecord {
            id: session.id,
            user_id: session.user_id,
            secret_digest: session.secret_digest,
            expires_at: session.expires_at,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SessionRecord>, RepoError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|session| session.id == id)
            .cloned())
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), RepoError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|session| session.id != id);
        if sessions.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn purge_expired(&self, now: OffsetDateTime) -> Result<u64, RepoError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|session| session.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}

#[async_trait]
impl HealthCheck for MemoryRepositories {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }
}

struct TestApp {
    router: Router,
    repos: Arc<MemoryRepositories>,
    general: CategoryRecord,
    engineering: CategoryRecord,
    author: UserRecord,
}

fn test_app() -> TestApp {
    let repos = Arc::new(MemoryRepositories::default());
    let general = repos.add_category("General");
    let engineering = repos.add_category("Engineering");
    let author = repos.add_user(USERNAME, "Ada Lovelace", PASSWORD);

    let posts = Arc::new(PostService::new(
        repos.clone(),
        repos.clone(),
        repos.clone(),
        repos.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        repos.clone(),
        repos.clone(),
        time::Duration::hours(1),
    ));
    let state = AppState {
        posts,
        auth,
        health: repos.clone(),
        per_page: 10,
    };

    TestApp {
        router: build_router(state),
        repos,
        general,
        engineering,
        author,
    }
}

async fn send(router: &Router, request: Request<Body>) -> axum::response::Response {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body is utf-8")
}

fn form_request(method: &str, uri: &str, session: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(COOKIE, session.to_string())
        .body(Body::from(body))
        .expect("request builds")
}

fn get_request(uri: &str, session: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(COOKIE, session.to_string())
        .body(Body::empty())
        .expect("request builds")
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect carries Location")
        .to_str()
        .expect("location is ascii")
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| value.to_str().expect("cookie is ascii").to_string())
        .collect()
}

/// Logs in and returns a `Cookie` header value for the session.
async fn login(router: &Router) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={USERNAME}&password={PASSWORD}"
        )))
        .expect("request builds");
    let response = send(router, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let cookie = set_cookies(&response)
        .into_iter()
        .find(|value| value.starts_with("foglio_session="))
        .expect("login sets a session cookie");
    cookie
        .split(';')
        .next()
        .expect("cookie has a value")
        .to_string()
}

async fn create_post(app: &TestApp, session: &str, title: &str, body: &str, category: Uuid) {
    let response = send(
        &app.router,
        form_request(
            "POST",
            "/posts",
            session,
            format!("title={title}&category={category}&body={body}"),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn anonymous_requests_are_redirected_to_login() {
    let app = test_app();

    for uri in ["/", "/posts", "/posts/new", "/posts/search?q=x"] {
        let response = send(
            &app.router,
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login");
    }
}

#[tokio::test]
async fn wrong_password_rerenders_the_login_form() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={USERNAME}&password=nope")))
        .expect("request builds");

    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("These credentials do not match our records."));
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = test_app();
    let session = login(&app.router).await;

    let response = send(
        &app.router,
        form_request("POST", "/logout", &session, String::new()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = send(&app.router, get_request("/posts", &session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn create_persists_the_post_and_redirects_to_the_listing() {
    let app = test_app();
    let session = login(&app.router).await;

    let response = send(
        &app.router,
        form_request(
            "POST",
            "/posts",
            &session,
            format!(
                "title=Hello+World&category={}&body=First+post+body",
                app.general.id
            ),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts");
    assert!(
        set_cookies(&response)
            .iter()
            .any(|value| value.starts_with("foglio_flash=")),
        "redirect carries a flash cookie"
    );

    let posts = app.repos.posts.lock().unwrap().clone();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello World");
    assert_eq!(posts[0].body, "First post body");
    assert_eq!(posts[0].author_id, app.author.id);
    assert_eq!(app.repos.category_of(posts[0].id), Some(app.general.id));
}

#[tokio::test]
async fn flash_message_shows_once_on_the_listing() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Hello", "Body", app.general.id).await;

    let flash = foglio::infra::http::cookies::flash_cookie(
        &foglio::infra::http::cookies::Flash::success("Post created successfully!"),
    )
    .expect("flash encodes");
    let flash_pair = flash
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let request = get_request("/posts", &format!("{session}; {flash_pair}"));
    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        set_cookies(&response)
            .iter()
            .any(|value| value.starts_with("foglio_flash=;") || value.contains("Max-Age=0")),
        "flash cookie is cleared after rendering"
    );
    let body = body_string(response).await;
    assert!(body.contains("Post created successfully!"));
}

#[tokio::test]
async fn create_with_missing_title_rerenders_the_form_with_errors() {
    let app = test_app();
    let session = login(&app.router).await;

    let response = send(
        &app.router,
        form_request(
            "POST",
            "/posts",
            &session,
            format!("title=&category={}&body=Some+body", app.general.id),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("The title field is required."));
    assert!(body.contains("Some body"), "entered values are kept");
    assert!(app.repos.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_form_fields_are_rejected() {
    let app = test_app();
    let session = login(&app.router).await;

    let response = send(
        &app.router,
        form_request(
            "POST",
            "/posts",
            &session,
            format!(
                "title=T&category={}&body=B&admin=true",
                app.general.id
            ),
        ),
    )
    .await;

    assert!(response.status().is_client_error());
    assert!(app.repos.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_overwrites_fields_and_redirects_home() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Before", "Old+body", app.general.id).await;
    let id = app.repos.posts.lock().unwrap()[0].id;

    let response = send(
        &app.router,
        form_request(
            "POST",
            &format!("/posts/{id}/edit"),
            &session,
            format!(
                "title=After&category={}&body=New+body",
                app.engineering.id
            ),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let posts = app.repos.posts.lock().unwrap().clone();
    assert_eq!(posts[0].title, "After");
    assert_eq!(posts[0].body, "New body");
    assert_eq!(posts[0].author_id, app.author.id, "author never changes");
    assert_eq!(app.repos.category_of(id), Some(app.engineering.id));
}

#[tokio::test]
async fn update_with_missing_body_changes_nothing() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Keep", "Kept+body", app.general.id).await;
    let id = app.repos.posts.lock().unwrap()[0].id;

    let response = send(
        &app.router,
        form_request(
            "PUT",
            &format!("/posts/{id}"),
            &session,
            format!("title=Changed&category={}&body=", app.general.id),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("The body field is required."));

    let posts = app.repos.posts.lock().unwrap().clone();
    assert_eq!(posts[0].title, "Keep");
    assert_eq!(posts[0].body, "Kept body");
}

#[tokio::test]
async fn update_of_unknown_post_is_not_found() {
    let app = test_app();
    let session = login(&app.router).await;

    let response = send(
        &app.router,
        form_request(
            "PUT",
            &format!("/posts/{}", Uuid::new_v4()),
            &session,
            format!("title=T&category={}&body=B", app.general.id),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_redirects_back_and_removes_the_post() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Doomed", "Body", app.general.id).await;
    let id = app.repos.posts.lock().unwrap()[0].id;

    let mut request = form_request(
        "POST",
        &format!("/posts/{id}/delete"),
        &session,
        String::new(),
    );
    request
        .headers_mut()
        .insert(REFERER, "/posts?page=2".parse().unwrap());

    let response = send(&app.router, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts?page=2");
    assert!(app.repos.posts.lock().unwrap().is_empty());

    let response = send(&app.router, get_request(&format!("/posts/{id}"), &session)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_without_referer_falls_back_to_the_listing() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Doomed", "Body", app.general.id).await;
    let id = app.repos.posts.lock().unwrap()[0].id;

    let response = send(
        &app.router,
        form_request(
            "DELETE",
            &format!("/posts/{id}"),
            &session,
            String::new(),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts");
}

#[tokio::test]
async fn delete_of_unknown_post_is_not_found() {
    let app = test_app();
    let session = login(&app.router).await;

    let response = send(
        &app.router,
        form_request(
            "POST",
            &format!("/posts/{}/delete", Uuid::new_v4()),
            &session,
            String::new(),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_title_substrings_case_insensitively() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Alpha+Hello", "Body", app.general.id).await;
    create_post(&app, &session, "Unrelated", "Body", app.general.id).await;
    create_post(&app, &session, "Beta+HELLO", "Body", app.general.id).await;

    let response = send(&app.router, get_request("/posts/search?q=hello", &session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;

    assert!(body.contains("Alpha Hello"));
    assert!(body.contains("Beta HELLO"));
    assert!(!body.contains("Unrelated"));

    let beta = body.find("Beta HELLO").unwrap();
    let alpha = body.find("Alpha Hello").unwrap();
    assert!(beta < alpha, "newest match comes first");
}

#[tokio::test]
async fn empty_search_query_lists_every_post() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "One", "Body", app.general.id).await;
    create_post(&app, &session, "Two", "Body", app.general.id).await;

    let response = send(&app.router, get_request("/posts/search?q=", &session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("One"));
    assert!(body.contains("Two"));
}

#[tokio::test]
async fn listing_pages_are_capped_at_ten_posts() {
    let app = test_app();
    let session = login(&app.router).await;
    for index in 0..11 {
        create_post(&app, &session, &format!("Post+{index}"), "Body", app.general.id).await;
    }

    let response = send(&app.router, get_request("/posts", &session)).await;
    let body = body_string(response).await;
    assert_eq!(body.matches("class=\"card\"").count(), 10);
    assert!(body.contains("Page 1 of 2"));

    let response = send(&app.router, get_request("/posts?page=2", &session)).await;
    let body = body_string(response).await;
    assert_eq!(body.matches("class=\"card\"").count(), 1);
}

#[tokio::test]
async fn create_form_lists_categories_ordered_by_name() {
    let app = test_app();
    let session = login(&app.router).await;

    let response = send(&app.router, get_request("/posts/new", &session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;

    let engineering = body.find("Engineering").expect("category listed");
    let general = body.find(">General<").expect("category listed");
    assert!(engineering < general);
}

#[tokio::test]
async fn edit_form_is_prefilled_with_current_values() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Editable", "Current+body", app.general.id).await;
    let id = app.repos.posts.lock().unwrap()[0].id;

    let response = send(
        &app.router,
        get_request(&format!("/posts/{id}/edit"), &session),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Editable"));
    assert!(body.contains("Current body"));
    assert!(body.contains("selected"));
}

#[tokio::test]
async fn detail_page_shows_author_and_category() {
    let app = test_app();
    let session = login(&app.router).await;
    create_post(&app, &session, "Readable", "Full+body+text", app.engineering.id).await;
    let id = app.repos.posts.lock().unwrap()[0].id;

    let response = send(&app.router, get_request(&format!("/posts/{id}"), &session)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Readable"));
    assert!(body.contains("Full body text"));
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("Engineering"));
}

#[tokio::test]
async fn health_probe_answers_without_a_session() {
    let app = test_app();
    let response = send(
        &app.router,
        Request::builder()
            .uri("/_health/db")
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn bundled_stylesheet_is_served() {
    let app = test_app();
    let response = send(
        &app.router,
        Request::builder()
            .uri("/static/style.css")
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/css"))
    );
}

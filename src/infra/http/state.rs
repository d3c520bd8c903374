use std::sync::Arc;

use crate::application::auth::AuthService;
use crate::application::posts::PostService;
use crate::application::repos::HealthCheck;

/// Shared handler state: application services injected at startup.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub auth: Arc<AuthService>,
    pub health: Arc<dyn HealthCheck>,
    pub per_page: u32,
}

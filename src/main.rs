use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, warn};
use uuid::Uuid;

use foglio::application::auth::{AuthService, credential_digest};
use foglio::application::error::AppError;
use foglio::application::posts::PostService;
use foglio::application::repos::RepoError;
use foglio::config::{self, CliArgs, Command, Settings, UserAddArgs, UserCommand};
use foglio::infra::db::PostgresRepositories;
use foglio::infra::error::InfraError;
use foglio::infra::http::{AppState, build_router};
use foglio::infra::telemetry;

#[tokio::main]
async fn main() {
    let (cli, settings) = match config::load_with_cli() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = telemetry::init(&settings.logging) {
        eprintln!("telemetry error: {err}");
        std::process::exit(2);
    }

    if let Err(err) = run(cli, settings).await {
        report_application_error(&err);
        std::process::exit(1);
    }
}

async fn run(cli: CliArgs, settings: Settings) -> Result<(), AppError> {
    match cli.command {
        Some(Command::Serve(_)) | None => run_serve(settings).await,
        Some(Command::User(user)) => match user.command {
            UserCommand::Add(args) => run_user_add(settings, args).await,
        },
    }
}

fn report_application_error(err: &AppError) {
    error!(error = %err, "fatal application error");
    let mut source = err.source();
    while let Some(inner) = source {
        error!(cause = %inner, "caused by");
        source = inner.source();
    }
}

async fn init_repositories(settings: &Settings) -> Result<Arc<PostgresRepositories>, AppError> {
    let url = settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| InfraError::configuration("database.url is not configured"))?;

    let pool = PostgresRepositories::connect(url, settings.database.max_connections.get())
        .await
        .map_err(|err| InfraError::database(format!("failed to connect: {err}")))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| InfraError::database(format!("failed to run migrations: {err}")))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_services(
    repos: Arc<PostgresRepositories>,
    settings: &Settings,
) -> (Arc<PostService>, Arc<AuthService>) {
    let posts = Arc::new(PostService::new(
        repos.clone(),
        repos.clone(),
        repos.clone(),
        repos.clone(),
    ));
    let auth = Arc::new(AuthService::new(
        repos.clone(),
        repos,
        settings.auth.session_ttl,
    ));
    (posts, auth)
}

async fn run_serve(settings: Settings) -> Result<(), AppError> {
    let repos = init_repositories(&settings).await?;
    let (posts, auth) = build_services(repos.clone(), &settings);

    match auth.purge_expired().await {
        Ok(purged) if purged > 0 => info!(purged, "dropped expired sessions"),
        Ok(_) => {}
        Err(err) => return Err(AppError::unexpected(format!("session purge failed: {err}"))),
    }

    let state = AppState {
        posts,
        auth,
        health: repos,
        per_page: settings.pagination.per_page.get(),
    };
    let router = build_router(state);

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::Io)?;
    info!(
        addr = %settings.server.addr,
        graceful_shutdown_secs = settings.server.graceful_shutdown.as_secs(),
        "listening"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    tokio::select! {
        result = server => {
            result.map_err(InfraError::Io)?;
            info!("server stopped");
        }
        () = shutdown_deadline(shutdown_rx, settings.server.graceful_shutdown) => {
            warn!(
                window_secs = settings.server.graceful_shutdown.as_secs(),
                "graceful shutdown window elapsed; dropping open connections"
            );
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    } else {
        info!("shutdown signal received");
    }
}

/// Resolves one graceful-shutdown window after the signal fires. Pends
/// forever when the sender is dropped without signalling, which is the
/// server finishing on its own.
async fn shutdown_deadline(mut signalled: watch::Receiver<bool>, window: Duration) {
    if signalled.changed().await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(window).await;
}

async fn run_user_add(settings: Settings, args: UserAddArgs) -> Result<(), AppError> {
    let repos = init_repositories(&settings).await?;

    let username = args.username.trim();
    if username.is_empty() {
        return Err(AppError::validation("username must not be empty"));
    }
    if args.password.len() < 8 {
        return Err(AppError::validation(
            "password must be at least 8 characters",
        ));
    }

    let display_name = args
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(username);

    let salt = Uuid::new_v4().simple().to_string();
    let digest = credential_digest(&salt, &args.password);

    let user = repos
        .insert_user(username, display_name, &salt, &digest)
        .await
        .map_err(|err| match err {
            RepoError::Duplicate { .. } => {
                AppError::validation(format!("username `{username}` is already taken"))
            }
            other => AppError::unexpected(format!("failed to create user: {other}")),
        })?;

    info!(username = %user.username, id = %user.id, "user created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn shutdown_deadline_only_starts_after_the_signal() {
        let (tx, rx) = watch::channel(false);
        let deadline = tokio::spawn(shutdown_deadline(rx, Duration::from_secs(30)));

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(!deadline.is_finished(), "deadline must wait for the signal");

        tx.send(true).expect("receiver alive");
        deadline.await.expect("deadline resolves after the window");
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_deadline_pends_when_the_server_exits_on_its_own() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let deadline = tokio::spawn(shutdown_deadline(rx, Duration::from_secs(30)));

        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(!deadline.is_finished());
        deadline.abort();
    }
}

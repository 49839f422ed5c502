use std::net::SocketAddr;
use std::sync::Arc;

use api::auth::middleware::log_request;
use api::routes::routes;
use api::services::notifier::SmtpOtpNotifier;
use api::state::AppState;
use axum::{Router, middleware::from_fn};
use common::config;
use db::models::user::{self, Role};
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;

#[tokio::main]
async fn main() {
    let _log_guard = init_logging(&config::log_file());

    let db = db::connect().await;
    bootstrap_org_owner(&db).await;

    let app_state = AppState::new(db, Arc::new(SmtpOtpNotifier));

    let cors = CorsLayer::very_permissive();

    let app = Router::new()
        .nest("/api/", routes(app_state))
        .layer(from_fn(log_request))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(log_file: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_thread_ids(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config::log_to_stdout() {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}

/// First-run convenience: if no org owner exists yet, provision one from
/// the configured bootstrap credentials so the instance can be logged into.
async fn bootstrap_org_owner(db: &db::DatabaseConnection) {
    match user::Model::exists_with_role(db, Role::OrgOwner).await {
        Ok(true) => {}
        Ok(false) => {
            let email = config::bootstrap_owner_email();
            let password = config::bootstrap_owner_password();
            match user::Model::create(
                db,
                &email,
                "System Admin",
                Some(&password),
                Role::OrgOwner,
                None,
                None,
                None,
            )
            .await
            {
                Ok(owner) => {
                    tracing::info!(email = %owner.email, "bootstrapped org owner account")
                }
                Err(e) => tracing::error!(error = %e, "failed to bootstrap org owner"),
            }
        }
        Err(e) => tracing::error!(error = %e, "failed to check for org owner"),
    }
}

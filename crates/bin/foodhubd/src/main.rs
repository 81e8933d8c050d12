//! # foodhubd: foodhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository and credentials implementations (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Ensure the configured administrator account exists
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use foodhub_adapter_auth_jwt::{BcryptHasher, JwtConfig, JwtTokenIssuer};
use foodhub_adapter_http_axum::state::AppState;
use foodhub_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteCommentRepository, SqliteFoodRepository,
    SqliteFoodTypeRepository, SqliteUserRepository,
};
use foodhub_app::services::{AuthService, ResourceService};
use foodhub_domain::permission::{AllowAny, IsAdminUser, IsCreator};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid logging filter")?,
        )
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await
    .context("failed to initialise database")?;
    let pool = db.pool().clone();

    // Repositories
    let food_type_repo = SqliteFoodTypeRepository::new(pool.clone());
    let food_repo = SqliteFoodRepository::new(pool.clone());
    let comment_repo = SqliteCommentRepository::new(pool.clone());
    let user_repo = SqliteUserRepository::new(pool);

    // Credentials
    let tokens = JwtTokenIssuer::new(&JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        access_ttl: config.auth.access_ttl(),
        refresh_ttl: config.auth.refresh_ttl(),
    });

    // Services
    let auth_service = Arc::new(AuthService::new(user_repo, BcryptHasher::default(), tokens));
    if let Some((username, password)) = config.admin_credentials() {
        auth_service
            .ensure_admin(username, password)
            .await
            .context("failed to ensure admin account")?;
    }

    // HTTP
    let state = AppState::from_arcs(
        Arc::new(ResourceService::new(food_type_repo, AllowAny)),
        Arc::new(ResourceService::new(food_repo, IsAdminUser)),
        Arc::new(ResourceService::new(comment_repo, IsCreator)),
        auth_service,
    );
    let app = foodhub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(address = %bind_addr, "foodhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("foodhubd stopped");
    Ok(())
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("received ctrl-c, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

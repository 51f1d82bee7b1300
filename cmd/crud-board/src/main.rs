//! The crud-board server binary.
//!
//! Assembles the Postgres adapters behind the domain ports, wires the
//! services into the axum router and serves until ctrl-c.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::AppState;
use auth_adapters::Argon2PasswordHasher;
use secrecy::ExposeSecret;
use services::{
    AuthService, CommentCommandService, CommentQueryService, PostCommandService, PostQueryService,
};
use storage_adapters::postgres::{self, PgCommentRepo, PgPostRepo, PgUserRepo};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configs::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let pool = postgres::connect(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;
    postgres::run_migrations(&pool)
        .await
        .context("running migrations")?;

    let users = Arc::new(PgUserRepo::new(pool.clone()));
    let posts = Arc::new(PgPostRepo::new(pool.clone()));
    let comments = Arc::new(PgCommentRepo::new(pool));
    let hasher = Arc::new(Argon2PasswordHasher::default());

    let state = AppState {
        auth: AuthService::new(users, hasher),
        post_queries: PostQueryService::new(posts.clone()),
        post_commands: PostCommandService::new(posts.clone()),
        comment_queries: CommentQueryService::new(comments.clone()),
        comment_commands: CommentCommandService::new(posts, comments),
    };

    let app = api_adapters::router(state);
    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .context("binding listener")?;
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "crud-board listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install ctrl-c handler");
    }
}

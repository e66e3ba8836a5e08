use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::PostgresStore;

use snippetbox_auth::PasswordHasher;
use snippetbox_web::app::{build_app, services::AppServices};
use snippetbox_web::config::Config;

/// How often expired sessions are purged from the store.
const SESSION_SWEEP_INTERVAL: tokio::time::Duration = tokio::time::Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the flags and process env still apply.
    dotenvy::dotenv().ok();
    let config = Config::parse();
    snippetbox_observability::init(config.log_format);
    snippetbox_observability::install_panic_hook();

    let pool = snippetbox_infra::db::connect(&config.dsn, config.max_db_connections)
        .await
        .context("connecting to database")?;
    snippetbox_infra::schema::migrate(&pool)
        .await
        .context("creating application tables")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("creating session table")?;

    let sweeper = tokio::spawn({
        let store = session_store.clone();
        async move {
            if let Err(e) = store.continuously_delete_expired(SESSION_SWEEP_INTERVAL).await {
                tracing::error!(error = %e, "expired session sweep stopped");
            }
        }
    });

    let hasher = PasswordHasher::new(config.bcrypt_cost);
    let services = AppServices::postgres(pool, hasher, config.settings())
        .context("loading templates")?;
    let app = build_app(Arc::new(services), session_store);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "starting server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("serving http")?;

    sweeper.abort();
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "listening for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

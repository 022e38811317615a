mod config;
mod entities;
mod handlers;
mod models;
mod repositories;
mod routes;
mod seeders;
mod services;
mod utils;

#[cfg(test)]
mod test_support;

use config::{AppState, Config};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use std::net::SocketAddr;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blogly=debug,tower_http=info,sea_orm=warn")),
        )
        .init();

    let cfg = Config::init();
    tracing::info!("🚀 Starting Blogly...");

    // 1. Database Connection
    let mut opts = ConnectOptions::new(cfg.database_url.clone());
    opts.max_connections(cfg.db_max_connections)
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("🔥 Failed to connect to Database!");
    tracing::info!("✅ Database Connected!");

    // 2. Schema
    Migrator::up(&db, None)
        .await
        .expect("🔥 Failed to run migrations!");

    // 3. Demo Data
    if cfg.seed_demo_data {
        if let Err(e) = seeders::run_seeders(&db).await {
            tracing::error!("❌ Seeding failed: {}", e);
        }
    }

    // 4. Router
    let state = AppState { db: db.clone() };
    let app = routes::create_routes().with_state(state);

    // 5. Start Server
    let addr_str = format!("{}:{}", cfg.server_host, cfg.server_port);
    let addr: SocketAddr = addr_str.parse().expect("Invalid address");

    tracing::info!("🎯 Server ready! Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("🔥 Failed to bind address!");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", e);
    }

    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close database pool: {}", e);
    }
    tracing::info!("👋 Shut down cleanly");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("Received SIGTERM, shutting down"),
    }
}

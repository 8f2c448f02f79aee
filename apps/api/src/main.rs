mod config;
mod db;
mod errors;
mod models;
mod recommendation;
mod resume;
mod routes;
mod scoring_client;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::resume::FileResumeReader;
use crate::routes::build_router;
use crate::scoring_client::ScoringClient;
use crate::state::AppState;
use crate::store::postgres::{PgJobStore, PgUserStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing required env vars
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let scoring = ScoringClient::new(config.scoring.clone())?;
    info!(
        "Scoring client initialized (url: {}, timeout: {:?})",
        config.scoring.base_url, config.scoring.timeout
    );
    info!("Resolving resumes under {}", config.upload_root.display());

    let state = AppState {
        users: Arc::new(PgUserStore::new(db.clone())),
        jobs: Arc::new(PgJobStore::new(db)),
        scoring,
        resumes: Arc::new(FileResumeReader),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins to the web frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

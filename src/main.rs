use std::sync::Arc;

use axum::http::Request;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use hookfeed::{AppState, Config, InMemoryEventStore, PgEventStore, SharedEventStore, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    let store: SharedEventStore = match &config.database_url {
        Some(url) => Arc::new(
            PgEventStore::connect(url, &config.collection, config.max_connections).await?,
        ),
        None => {
            warn!("No DATABASE_URL configured - events are kept in memory only");
            Arc::new(InMemoryEventStore::new())
        }
    };

    let app = router(Arc::new(AppState::new(store)))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        );

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Webhook feed starting on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

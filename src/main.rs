use std::net::SocketAddr;

use mimalloc::MiMalloc;
use spokes::cache::QueryCache;
use spokes::config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spokes=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let pool = spokes::db::create_pool(
        &config.database_url,
        config.database_max_connections,
        config.connect_timeout(),
    )
    .await?;

    let state = spokes::AppState {
        db: pool,
        cache: QueryCache::new(config.cache_ttl()),
        config: config.clone(),
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(host = %addr, "Starting spokes analytics API");

    let app = spokes::routes::api_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

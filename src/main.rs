use rochambeau::ServerError;
use rochambeau::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();

    if let Err(err) = run(config).await {
        tracing::error!(%err, "Server failed");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), ServerError> {
    let pool = rochambeau::connect_database(&config.database_url).await?;
    let app = rochambeau::app_with_config(pool, config.match_settings());
    let addr = config.addr();

    tracing::info!(
        max_rounds = config.max_rounds,
        "Starting server on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

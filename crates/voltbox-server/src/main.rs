use tracing_subscriber::EnvFilter;

use voltbox_server::{start, Config, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();

    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut server = start(ServerConfig::new(config.listen_addr)).await?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupt received, shutting down"),
        _ = server.stopped() => {}
    }
    server.shutdown().await;

    Ok(())
}

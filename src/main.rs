use farm_ops::{AppState, Config, load_data, router};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&config.data_path).await;
    info!(
        tasks = data.tasks.len(),
        stock_items = data.stock_items.len(),
        flocks = data.flocks.len(),
        "loaded state from {}",
        config.data_path.display()
    );
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, data);
    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use task_tracker::application::task_service::TaskServiceImpl;
use task_tracker::config::{Config, StorageBackend};
use task_tracker::domain::storage::TaskStorage;
use task_tracker::http::routing::{self, tasks};
use task_tracker::infrastructure::{document_storage::DocumentTaskStorage, memory_storage::MemoryTaskStorage};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; tasks are lost on restart");
            serve(&config, MemoryTaskStorage::new()).await
        }
        StorageBackend::Document => {
            tracing::info!(database_url = %config.database_url, "using document storage");
            let storage = DocumentTaskStorage::connect(&config.database_url).await?;
            serve(&config, storage).await
        }
    }
}

async fn serve<S: TaskStorage + Clone>(config: &Config, storage: S) -> anyhow::Result<()> {
    storage.init().await?;
    let service = TaskServiceImpl::new(storage);
    let router = routing::app(tasks::router(tasks::AppState { service }));

    let addr = config.bind_addr;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}

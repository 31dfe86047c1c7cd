use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use faq_server::{
    api,
    config::{Config, StoreBackend},
    object_store::LocalStore,
    storage::Database,
    store::{FaqStore, MemoryStore, RedbStore, UnavailableStore},
    AppState,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    match log_format.to_lowercase().as_str() {
        "gcp" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_stackdriver::layer())
                .init();
        }
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_span_list(false),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    info!(version = env!("CARGO_PKG_VERSION"), "faq-server starting");

    let config = Config::load()?;
    let image_prefix = config.images.path_prefix.clone();

    // A persistent store that fails to open is logged, not fatal: the server
    // still listens and answers store calls with 500s.
    let store: Arc<dyn FaqStore> = match config.storage.backend {
        StoreBackend::Persistent => match Database::open(&config.storage.data_dir) {
            Ok(db) => {
                info!("Database opened at: {}", config.storage.data_dir);
                Arc::new(RedbStore::new(db, image_prefix))
            }
            Err(e) => {
                error!(error = %e, data_dir = %config.storage.data_dir, "Couldn't open database");
                Arc::new(UnavailableStore::new(e.to_string()))
            }
        },
        StoreBackend::Memory => {
            info!("Using in-memory store; records are lost on restart");
            Arc::new(MemoryStore::new(image_prefix))
        }
    };

    let images = LocalStore::new(&config.images.dir)?;
    info!("Storing uploaded images in: {}", config.images.dir);

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        images: Arc::new(images),
    });

    let app = api::create_router(Arc::clone(&state));
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server is listening on: {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}

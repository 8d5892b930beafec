// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::application::complaint_service::ComplaintService;
use crate::application::dashboard_service::DashboardService;
use crate::application::store_handle::StoreHandle;
use crate::infrastructure::config::{load_gateway_config, GatewayConfig};
use crate::infrastructure::supabase_repository::SupabaseRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::{build_router, cors_layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_gateway_config()?;

    // Create store handle (infrastructure layer)
    let store = connect_store(&config)?;

    // Create services (application layer)
    let timeout = config.store_timeout();
    let state = Arc::new(AppState {
        complaint_service: ComplaintService::new(store.clone(), timeout),
        dashboard_service: DashboardService::new(store, timeout, config.critical_zone_limit),
    });

    // Build router (presentation layer)
    let router = build_router(state, cors_layer(&config.allowed_origin)?);

    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!(
        "Starting complaint-gateway on {}, allowing origin {}",
        config.bind_address,
        config.allowed_origin
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

fn connect_store(config: &GatewayConfig) -> anyhow::Result<StoreHandle> {
    match config.supabase() {
        Some(settings) => {
            tracing::info!("Complaint store configured at {}", settings.url);
            let repository = SupabaseRepository::new(settings.url, settings.key, config.store_timeout())?;
            Ok(StoreHandle::connected(Arc::new(repository)))
        }
        None => {
            tracing::warn!(
                "SUPABASE_URL or SUPABASE_KEY not set, complaint logging and dashboard stats are disabled"
            );
            Ok(StoreHandle::Unconfigured)
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
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
}

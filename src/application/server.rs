use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::application::routes::app_router;
use crate::application::state::{AppState, AppStateConfig};
use crate::domain::routing::{MetadataPolicy, SessionResolution};
use crate::infrastructure::database::Database;

pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub public_url: Option<String>,
    pub metadata_policy: MetadataPolicy,
    pub session_resolution: SessionResolution,
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    if config.session_resolution == SessionResolution::Disabled
        && config.metadata_policy == MetadataPolicy::SessionEndpoint
    {
        anyhow::bail!(
            "metadata policy `{}` advertises the session route and needs session resolution enabled",
            config.metadata_policy
        );
    }

    if let Some(public_url) = &config.public_url {
        url::Url::parse(public_url).context("invalid OGSHARE_PUBLIC_URL")?;
    }

    let state_config = AppStateConfig {
        public_url: config.public_url.clone(),
        metadata_policy: config.metadata_policy,
    };

    let mut state = match config.session_resolution {
        SessionResolution::Enabled => {
            let database = Database::connect(&config.database_url)
                .await
                .context("failed to connect to database")?;
            AppState::from_database(&database, state_config)
        }
        SessionResolution::Disabled => AppState::with_session_repo(None, state_config),
    };
    state.default_host = config.bind_address.to_string();

    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_address))?;

    let app = app_router(state);

    info!(
        address = %config.bind_address,
        database = %config.database_url,
        metadata_policy = %config.metadata_policy,
        session_resolution = %config.session_resolution,
        "starting HTTP server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server shutdown complete");

    Ok(())
}

#[allow(clippy::expect_used)] // Startup: panicking is appropriate if signal handlers fail
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

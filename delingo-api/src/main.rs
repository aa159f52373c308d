//! Delingo API Main Entry Point
//!
//! Serves the forum HTTP API: threads, posts, comments, search and votes.

use delingo_api::config::{LogFormat, create_cors_layer};
use delingo_api::server::{self, auth::TokenVerifier, state::AppState};
use delingo_api::{Dependencies, Settings, StartupError};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "delingo_api=info,delingo_ledger=info,delingo_repository=info,tower_http=info",
        )
    });

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
                .init();
        }
    }

    info!(
        service_name = "delingo-api",
        service_version = env!("CARGO_PKG_VERSION"),
        log_format = ?format,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Load environment variables from .env file
    dotenv().ok();

    let settings = Settings::from_env()?;

    init_tracing(settings.log_format);

    info!("Starting Delingo API");

    let dependencies = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let state = AppState::new(
        dependencies,
        TokenVerifier::new(settings.jwt_secret.as_bytes()),
    );
    let cors = create_cors_layer(&settings.cors_allowed_origins)?;
    let app = server::create_app(state, cors);

    server::run_server(app, settings.server_addr()).await
}

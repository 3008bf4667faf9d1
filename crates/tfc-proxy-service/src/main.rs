//! # TFC Discord Proxy Service
//!
//! Binary entry point for the proxy.
//!
//! This executable:
//! - Loads configuration from files and the environment
//! - Initializes logging
//! - Starts the HTTP server from tfc-proxy-api
//!
//! Exit codes: `1` bind failure, `2` server failure, `3` configuration error.

use tfc_proxy_api::{start_server, ProxyConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "tfc_proxy_service=info,tfc_proxy_api=info,tfc_proxy_core=info,tower_http=info";

#[tokio::main]
async fn main() {
    // The log format is itself configurable, so configuration is read before
    // the subscriber exists and any failure is reported right after.
    let loaded = ProxyConfig::load();
    init_tracing(loaded.as_ref().map(|c| c.log_json).unwrap_or(false));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting TFC Discord proxy"
    );

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Configuration is invalid; aborting");
            std::process::exit(3);
        }
    };

    if let Err(e) = start_server(config).await {
        error!("Failed to start server: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(log_json: bool) {
    let json_layer = log_json.then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!log_json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(json_layer)
        .with(text_layer)
        .init();
}

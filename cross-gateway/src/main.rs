//! cross-gateway - HTTP gateway that fans one post out to social networks

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cross_gateway::app::build_app;
use libcrosscast::logging::{self, LogFormat, LoggingConfig};
use libcrosscast::{Credentials, Dispatcher};

#[derive(Parser, Debug)]
#[command(name = "cross-gateway")]
#[command(version)]
#[command(about = "HTTP gateway that fans one post out to multiple social networks")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "CROSSCAST_ADDR", default_value = "0.0.0.0:8000")]
    addr: String,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.verbose {
        LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        logging::init_default();
    }

    let credentials = Credentials::from_env();
    let dispatcher = Arc::new(Dispatcher::from_credentials(&credentials));
    let app = build_app(dispatcher);

    let listener = tokio::net::TcpListener::bind(&cli.addr).await?;
    info!("cross-gateway listening on {}", cli.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("cross-gateway stopped");
    Ok(())
}

/// Resolve when SIGINT or SIGTERM arrives; in-flight dispatches finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

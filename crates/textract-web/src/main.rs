use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use textract_core::config_file;
use textract_mupdf::MupdfBackend;
use textract_web::{AppState, Overrides, Settings};

/// PDF text extraction service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for per-request scratch files
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Read settings from this TOML file instead of the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("textract_web=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => config_file::load_from_path(path).ok_or_else(|| {
            anyhow::anyhow!("could not read config file {}", path.display())
        })?,
        None => config_file::load_config(),
    };
    let overrides = Overrides {
        port: args.port,
        upload_dir: args.upload_dir,
    };
    let settings = Settings::from_environment(&file_config, &overrides);

    textract_web::prepare_upload_dir(&settings.upload_dir)?;
    tracing::info!(
        upload_dir = %settings.upload_dir.display(),
        origins = ?settings.allowed_origins,
        max_upload_mb = settings.max_upload_mb,
        "settings resolved"
    );

    let state = Arc::new(AppState::new(
        Arc::new(MupdfBackend::new()),
        settings.upload_dir.clone(),
    ));
    let app = textract_web::router(state, &settings);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}

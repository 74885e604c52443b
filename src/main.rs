use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use the library instead of redeclaring modules
use hls2srt_player::{
    config::Config,
    services::StreamStateManager,
    sources::HttpManifestFetcher,
    utils::url::UrlUtils,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "hls2srt-player")]
#[command(version)]
#[command(about = "HLS stream inspection and playback control service")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Initial HLS master playlist URL (overrides config file and HLS_URL)
    #[arg(short = 'u', long, value_name = "URL")]
    hls_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("hls2srt_player={},tower_http=trace", cli.log_level)
    } else {
        format!("hls2srt_player={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hls2srt-player v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(hls_url) = cli.hls_url {
        config.stream.default_hls_url = hls_url;
    }

    info!(
        "Default stream: {}",
        UrlUtils::obfuscate_credentials(&config.stream.default_hls_url)
    );

    let fetcher = Arc::new(HttpManifestFetcher::with_timeout(config.stream.fetch_timeout)?);
    let stream_state = StreamStateManager::new(fetcher, &config.stream);

    let web_server = WebServer::new(config, stream_state)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );

    let cancellation_token = CancellationToken::new();
    tokio::spawn(cancel_on_shutdown_signal(cancellation_token.clone()));

    web_server.serve_with_cancellation(cancellation_token).await?;
    info!("Shutdown complete");
    Ok(())
}

async fn cancel_on_shutdown_signal(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down gracefully"),
                    _ = sigint.recv() => info!("Received SIGINT (Ctrl+C), shutting down gracefully"),
                }
            }
            _ => {
                error!("Failed to install signal handlers, falling back to Ctrl+C");
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        info!("Received Ctrl+C, shutting down gracefully");
    }

    token.cancel();
}

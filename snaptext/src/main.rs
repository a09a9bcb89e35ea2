use clap::Parser;
use snaptext::api::{AppState, create_router};
use snaptext::config::Config;
use snaptext::ocr::OcrProvider;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snaptext")]
#[command(about = "Turn an uploaded image into an HTML page of its recognized text")]
struct Args {
    /// Address to bind, overriding SNAPTEXT_HOST
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding SNAPTEXT_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snaptext=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!("Initializing OCR provider: {}", config.ocr.provider);
    let ocr = OcrProvider::new(&config.ocr);
    if !ocr.is_available() {
        warn!("OCR is unavailable; uploads will be rejected until a credential is configured");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config, ocr));

    info!("Starting snaptext on http://{addr}");
    info!("Upload endpoint: POST http://{addr}/process-image");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

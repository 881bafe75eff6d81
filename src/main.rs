//! angka-kredit HTTP service for credit computation and reports.

use std::net::SocketAddr;

use angka_kredit::api::{AppState, create_router};
use angka_kredit::config::ConfigLoader;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "angka-kredit", version, about = "Angka Kredit credit and report service")]
struct Cli {
    /// Directory holding ranks.yaml, ratings.yaml, job_levels.yaml and promotion.yaml
    #[arg(long, default_value = "./config/angka_kredit")]
    config_dir: String,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "angka_kredit=info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = ConfigLoader::load(&cli.config_dir)?;
    info!(
        config_dir = %cli.config_dir,
        ranks = config.tables().ranks().len(),
        "Credit tables loaded"
    );

    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("angka-kredit listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

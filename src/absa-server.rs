use anyhow::Result;
use clap::Parser;
use rust_absa::pipelines::absa::AbsaPipeline;
use rust_absa::pipelines::runner::AbsaRunner;
use rust_absa::server::{build_router, AppState};
use rust_absa::AbsaConfig;
use std::path::PathBuf;
use tracing::{error, info};

/// Web form for aspect-based sentiment analysis of Polish restaurant reviews
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON configuration file (default: user config directory, then built-in defaults)
    #[arg(short, long, env = "ABSA_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the configuration
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();
    let mut config = AbsaConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    let pipeline_config = config.clone();
    let (_handle, runner) =
        match AbsaRunner::spawn(move || AbsaPipeline::from_config(&pipeline_config)) {
            Ok(runner) => runner,
            Err(e) => {
                error!("Failed to load the ABSA pipeline: {}", e);
                return Err(e.into());
            }
        };

    let app = build_router(AppState::new(runner));
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Listening on http://{}", config.server.bind);

    axum::serve(listener, app).await?;

    Ok(())
}

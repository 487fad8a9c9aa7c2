use anyhow::Result;
use clap::Parser;
use job_assistant::cli::{handle_command, Cli};
use job_assistant::AppConfig;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_assistant=info,rocket=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load()?;
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Model: {}", config.llm.model);

    handle_command(cli, config).await
}

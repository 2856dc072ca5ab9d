use std::process;

use streamflix::{config::Config, Application};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let app = Application::from_config(&config)?;

    let summary = app.run().await?;
    tracing::info!(
        popular = summary.popular.len(),
        now_playing = summary.now_playing.len(),
        matches = summary.matches.len(),
        "Run complete"
    );

    Ok(())
}

/// Logs go to stderr so they never mix with the rendered catalogs
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("streamflix=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

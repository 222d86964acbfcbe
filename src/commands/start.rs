use anyhow::Result;
use colored::Colorize;
use plan_advisor::{config, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// Loads configuration and runs the server until a shutdown signal arrives.
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting plan advisor...".green());

    let cfg = config::load_config(config_path)?;
    info!(
        "Starting plan advisor with config {}",
        config_path.display()
    );

    server::start_server(cfg).await?;

    Ok(())
}

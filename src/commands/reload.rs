use anyhow::Result;
use colored::Colorize;
use plan_advisor::{client::AdminClient, config};
use std::path::Path;
use tracing::info;

/// Execute the reload command
///
/// Calls the running server's reload endpoint, which re-reads the plan
/// CSV without restarting. Without `--url` the configured address is used.
pub async fn execute(config_path: &Path, url: Option<String>) -> Result<()> {
    let base_url = match url {
        Some(url) => url,
        None => {
            let cfg = config::load_config(config_path)?;
            server_url(&cfg.server.host, cfg.server.port)
        }
    };

    let client = AdminClient::new(base_url);
    println!(
        "{} {}",
        "Reloading plan catalog".yellow(),
        format!("({})", client.base_url()).cyan()
    );
    info!("Requesting catalog reload from {}", client.base_url());

    let summary = client.reload_catalog().await?;

    println!("{}", format!("  {}", summary.message).green());
    println!("  Plans loaded: {}", summary.plans.to_string().bold());
    Ok(())
}

/// Address to reach a server bound to `host`; wildcard binds are reached on loopback
fn server_url(host: &str, port: u16) -> String {
    let host = match host {
        "0.0.0.0" | "::" => "127.0.0.1",
        other => other,
    };
    format!("http://{}:{}", host, port)
}

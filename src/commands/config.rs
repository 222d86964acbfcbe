use anyhow::Result;
use colored::Colorize;
use plan_advisor::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after defaults, file and
/// environment overrides are merged
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    print_summary(&cfg, config_path);

    info!("Configuration validation successful");
    Ok(())
}

fn print_summary(cfg: &Config, config_path: &Path) {
    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "(defaults)".to_string()
    };

    println!("{}", "Summary:".bold());
    println!("  {}: {}", "Config file".cyan(), source);
    println!("  {}: {}:{}", "Server".cyan(), cfg.server.host, cfg.server.port);
    println!(
        "  {}: {} (refresh every {}s)",
        "Catalog".cyan(),
        cfg.catalog.path.display(),
        cfg.catalog.refresh_interval_seconds
    );
    if !cfg.catalog.path.exists() {
        println!("    {}", "warning: catalog file does not exist yet".yellow());
    }
    println!("  {}: {}", "Feedback".cyan(), cfg.feedback.path.display());
    println!(
        "  {}: {} (index {})",
        "Static files".cyan(),
        cfg.web.static_dir.display(),
        cfg.web.index_file
    );
    println!(
        "  {}: {}",
        "Metrics".cyan(),
        if cfg.metrics.enabled {
            cfg.metrics.endpoint.green()
        } else {
            "disabled".red()
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_renders_as_toml() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(rendered.contains("[catalog]"));
        assert!(rendered.contains("refresh_interval_seconds = 300"));
        assert!(rendered.contains("index_file = \"planB.html\""));
    }
}

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use plan_advisor::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    let config_path = args.config.as_path();
    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(config_path).await?;
        }
        cli::Commands::Reload { url } => {
            commands::reload::execute(config_path, url).await?;
        }
        cli::Commands::Check { file } => {
            commands::check::execute(config_path, file)?;
        }
        cli::Commands::Recommend {
            price,
            data,
            carrier,
            message,
        } => {
            commands::recommend::execute(config_path, price, data, carrier, message)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(config_path)?,
            cli::ConfigCommands::Validate => commands::config::validate(config_path)?,
        },
        cli::Commands::Version => {
            println!("Plan Advisor v{}", env!("CARGO_PKG_VERSION"));
            println!("Rust {}", env!("CARGO_PKG_RUST_VERSION"));
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plan-advisor", version, about = "Canadian phone plan catalog and recommendations")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server (default)
    Start,

    /// Ask a running server to reload its plan catalog
    Reload {
        /// Base URL of the running server (defaults to the configured address)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Parse the plan catalog and print a summary
    Check {
        /// CSV file to check instead of the configured catalog
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Recommend plans from the catalog without starting the server
    Recommend {
        /// Current monthly price in dollars
        #[arg(short, long)]
        price: Option<f64>,

        /// Current data allowance in GB
        #[arg(short, long)]
        data: Option<f64>,

        /// Current carrier (excluded from results)
        #[arg(long)]
        carrier: Option<String>,

        /// Free-text description to extract details from instead
        #[arg(short, long, conflicts_with_all = ["price", "data", "carrier"])]
        message: Option<String>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_start() {
        let cli = Cli {
            config: PathBuf::from("config.toml"),
            command: None,
        };

        assert!(matches!(cli.get_command(), Commands::Start));
    }

    #[test]
    fn test_cli_parsing_reload_with_url() {
        let args = vec!["plan-advisor", "reload", "--url", "http://localhost:9000"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Reload { url } => {
                assert_eq!(url.as_deref(), Some("http://localhost:9000"));
            }
            _ => panic!("Expected Reload command"),
        }
    }

    #[test]
    fn test_cli_parsing_recommend() {
        let args = vec![
            "plan-advisor", "recommend", "--price", "55", "--data", "8", "--carrier", "Rogers",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.get_command() {
            Commands::Recommend { price, data, carrier, message } => {
                assert_eq!(price, Some(55.0));
                assert_eq!(data, Some(8.0));
                assert_eq!(carrier.as_deref(), Some("Rogers"));
                assert!(message.is_none());
            }
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_recommend_message_conflicts_with_details() {
        let args = vec!["plan-advisor", "recommend", "--price", "55", "--message", "hi"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_parsing_config_show_with_global_config() {
        let args = vec!["plan-advisor", "config", "show", "--config", "other.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.get_command() {
            Commands::Config { action } => {
                assert!(matches!(action, ConfigCommands::Show));
            }
            _ => panic!("Expected Config command"),
        }
    }
}

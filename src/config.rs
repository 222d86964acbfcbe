use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub feedback: FeedbackConfig,
    pub web: WebConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// CSV file produced by the scrapers
    pub path: PathBuf,
    pub refresh_interval_seconds: u64,
}

impl CatalogConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedbackConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebConfig {
    pub static_dir: PathBuf,
    pub index_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            catalog: CatalogConfig {
                path: PathBuf::from("byop_plans.csv"),
                refresh_interval_seconds: 300,
            },
            feedback: FeedbackConfig {
                path: PathBuf::from("feedback/feedback.csv"),
            },
            web: WebConfig {
                static_dir: PathBuf::from("static"),
                index_file: "planB.html".to_string(),
            },
            metrics: MetricsConfig {
                enabled: true,
                endpoint: "/metrics".to_string(),
            },
        }
    }
}

/// Load configuration from defaults, an optional TOML file and
/// `PLAN_ADVISOR__*` environment variables, in increasing precedence
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let defaults = config::Config::try_from(&Config::default())?;

    let config = config::Config::builder()
        .add_source(defaults)
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PLAN_ADVISOR").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    if cfg.catalog.path.as_os_str().is_empty() {
        anyhow::bail!("Catalog path cannot be empty");
    }

    if cfg.catalog.refresh_interval_seconds == 0 {
        anyhow::bail!("Catalog refresh interval must be at least one second");
    }

    if cfg.feedback.path.as_os_str().is_empty() {
        anyhow::bail!("Feedback path cannot be empty");
    }

    if cfg.web.index_file.is_empty() {
        anyhow::bail!("Index file name cannot be empty");
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!(
            "Metrics endpoint '{}' must start with '/'",
            cfg.metrics.endpoint
        );
    }

    Ok(())
}

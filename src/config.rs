use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_CONFIG_PATH: &str = "billing.toml";
pub const ENV_PREFIX: &str = "NOTIFY_BILLING";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub prices_path: PathBuf,
    pub logs_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

/// Load configuration: defaults, then the TOML file (if present), then
/// `NOTIFY_BILLING_<SECTION>__<KEY>` environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("input.prices_path", "data/notification_prices.json")?
        .set_default("input.logs_path", "data/notification_logs.json")?
        .set_default("output.format", "table")?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.input.prices_path.as_os_str().is_empty() {
        anyhow::bail!("input.prices_path cannot be empty");
    }

    if cfg.input.logs_path.as_os_str().is_empty() {
        anyhow::bail!("input.logs_path cannot be empty");
    }

    if let Err(e) = EnvFilter::try_new(&cfg.logging.level) {
        anyhow::bail!("Invalid logging.level '{}': {}", cfg.logging.level, e);
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use notification_billing::config::{OutputFormat, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notify-billing", version, about = "Notification billing report")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the per-company cost report (default)
    Report {
        /// Price list JSON file (overrides input.prices_path)
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Notification log JSON file (overrides input.logs_path)
        #[arg(long)]
        logs: Option<PathBuf>,

        /// Output format (overrides output.format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the configured price table
    Prices {
        /// Price list JSON file (overrides input.prices_path)
        #[arg(long)]
        prices: Option<PathBuf>,
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
    /// Get the command to execute, defaulting to Report if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Report {
            prices: None,
            logs: None,
            format: None,
        })
    }
}

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use notification_billing::{config, init_tracing};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Logging settings live in the config file, so load it before tracing starts
    let cfg = config::load_config(&args.config)?;
    init_tracing(&cfg.logging);

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Report {
            prices,
            logs,
            format,
        } => {
            commands::report::execute(&cfg, prices, logs, format)?;
        }
        cli::Commands::Prices { prices } => {
            commands::prices::execute(&cfg, prices)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg)?,
        },
        cli::Commands::Version => {
            println!("Notification Billing v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

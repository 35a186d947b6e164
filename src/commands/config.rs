use anyhow::Result;
use colored::Colorize;
use notification_billing::config::Config;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration (defaults, file and environment merged)
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying effective configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// The configuration itself was validated while loading; this also checks
/// that the input files are present.
pub fn validate(cfg: &Config) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  Prices: {} ({})",
        cfg.input.prices_path.display(),
        file_status(&cfg.input.prices_path)
    );
    println!(
        "  Logs: {} ({})",
        cfg.input.logs_path.display(),
        file_status(&cfg.input.logs_path)
    );
    println!("  Output Format: {:?}", cfg.output.format);
    println!("  Log Level: {}", cfg.logging.level);

    info!("Configuration validation successful");
    Ok(())
}

fn file_status(path: &Path) -> colored::ColoredString {
    if path.is_file() {
        "found".green()
    } else {
        "missing".red()
    }
}

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use notification_billing::config::{Config, OutputFormat};
use notification_billing::CompanyCost;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::info;

/// Execute the report command
///
/// Reads the price list and notification log, runs the billing pipeline and
/// prints the per-company costs.
pub fn execute(
    cfg: &Config,
    prices: Option<PathBuf>,
    logs: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let prices_path = prices.unwrap_or_else(|| cfg.input.prices_path.clone());
    let logs_path = logs.unwrap_or_else(|| cfg.input.logs_path.clone());

    let pricing_json = read_input(&prices_path)?;
    let logs_json = read_input(&logs_path)?;

    let report = notification_billing::call(pricing_json, logs_json)?;

    match format.unwrap_or(cfg.output.format) {
        OutputFormat::Json => println!("{}", render_json(&report)?),
        OutputFormat::Table => {
            if report.is_empty() {
                println!("{}", "No notifications to bill".yellow());
            } else {
                println!("{}", render_table(&report)?);
            }
        }
    }

    Ok(())
}

/// Read one input file into memory
pub fn read_input(path: &Path) -> Result<String> {
    info!("Reading {}", path.display());
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render_json(report: &[CompanyCost]) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn render_table(report: &[CompanyCost]) -> Result<Table> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("COMPANY").fg(Color::Cyan),
        Cell::new("NOTIFICATIONS").fg(Color::Cyan),
        Cell::new("COST").fg(Color::Cyan),
    ]);

    for row in report {
        table.add_row(vec![
            Cell::new(&row.company),
            Cell::new(row.notification_count),
            Cell::new(format!("${}", row.cost)),
        ]);
    }

    let total_count: usize = report.iter().map(|row| row.notification_count).sum();
    let total_cost = report
        .iter()
        .try_fold(Decimal::ZERO, |total, row| total.checked_add(row.cost))
        .context("Total cost overflowed")?;
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(total_count).add_attribute(Attribute::Bold),
        Cell::new(format!("${}", total_cost)).add_attribute(Attribute::Bold),
    ]);

    Ok(table)
}

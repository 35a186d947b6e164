use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use notification_billing::config::Config;
use notification_billing::PriceTable;
use std::path::PathBuf;

use super::report::read_input;

/// Execute the prices command
///
/// Prints every configured notification type with its per-country unit price
pub fn execute(cfg: &Config, prices: Option<PathBuf>) -> Result<()> {
    let prices_path = prices.unwrap_or_else(|| cfg.input.prices_path.clone());
    let price_table = PriceTable::from_json(&read_input(&prices_path)?)?;

    println!("{}", render_prices(&price_table));
    Ok(())
}

fn render_prices(price_table: &PriceTable) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("TYPE").fg(Color::Cyan),
        Cell::new("COUNTRY").fg(Color::Cyan),
        Cell::new("UNIT PRICE").fg(Color::Cyan),
    ]);

    for entry in price_table.entries() {
        for (country, price) in &entry.prices {
            table.add_row(vec![
                Cell::new(&entry.notification_type),
                Cell::new(country),
                Cell::new(format!("${}", price)),
            ]);
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prices_lists_every_pair() {
        let table = PriceTable::from_json(
            r#"[
                {"notification_type": "sms", "prices": {"au": 0.5, "nz": 0.45}},
                {"notification_type": "email", "prices": {"UK": 0.12}}
            ]"#,
        )
        .unwrap();

        let rendered = render_prices(&table).to_string();
        assert!(rendered.contains("$0.45"));
        assert!(rendered.contains("NZ"));
        assert!(rendered.contains("email"));
        assert!(rendered.contains("$0.12"));
    }
}

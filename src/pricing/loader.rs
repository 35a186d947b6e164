use crate::error::{BillingError, Result};
use crate::input::RawInput;
use crate::notification::normalize_country;
use crate::pricing::models::PriceEntry;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

/// Parse raw pricing input into an ordered list of price entries
///
/// Expected shape:
/// `[{"notification_type": "sms", "prices": {"AU": 0.5, ...}}, ...]`
pub fn parse_pricing(input: RawInput) -> Result<Vec<PriceEntry>> {
    let value = match input {
        RawInput::Json(text) => serde_json::from_str(&text).map_err(|e| {
            BillingError::config(format!("Invalid JSON in pricing data: {}", e))
        })?,
        RawInput::Structured(value @ (Value::Array(_) | Value::Object(_))) => value,
        RawInput::Structured(_) => {
            return Err(BillingError::config("Invalid pricing data format"));
        }
    };

    let items = match value {
        Value::Array(items) => items,
        _ => return Err(BillingError::config("Pricing data must be an array")),
    };

    let entries = items
        .iter()
        .map(parse_entry)
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} pricing entries", entries.len());
    Ok(entries)
}

fn parse_entry(item: &Value) -> Result<PriceEntry> {
    let type_name = item
        .get("notification_type")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| BillingError::config("Missing notification_type"))?;

    let prices = item
        .get("prices")
        .and_then(Value::as_object)
        .ok_or_else(|| BillingError::config(format!("Missing prices for {}", type_name)))?;

    // Keys are visited in document order, so of "au" and "AU" the later one wins
    let mut entry = PriceEntry::new(type_name);
    for (country, raw_price) in prices {
        let code = normalize_country(country);
        let price = parse_price(raw_price).ok_or_else(|| {
            BillingError::config(format!(
                "Invalid price for {} in {}: {}",
                type_name, code, raw_price
            ))
        })?;
        entry.prices.insert(code, price);
    }

    Ok(entry)
}

/// Convert a JSON number to an exact decimal
///
/// Goes through the number's shortest text form so `0.45` stays `0.45`
/// instead of picking up binary floating point noise.
fn parse_price(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_text() {
        let entries = parse_pricing(RawInput::from(
            r#"[{"notification_type": "sms", "prices": {"AU": 0.5, "NZ": 0.45}}]"#,
        ))
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].notification_type, "sms");
        assert_eq!(entries[0].prices["NZ"], Decimal::new(45, 2));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_pricing(RawInput::from("invalid json")).unwrap_err();
        assert_eq!(err.kind(), "config_error");
        assert!(err.message().starts_with("Invalid JSON in pricing data: "));
    }

    #[test]
    fn test_parsed_object_must_be_array() {
        let err = parse_pricing(RawInput::from(r#"{"sms": {}}"#)).unwrap_err();
        assert_eq!(err, BillingError::config("Pricing data must be an array"));

        let err = parse_pricing(RawInput::from("42")).unwrap_err();
        assert_eq!(err, BillingError::config("Pricing data must be an array"));
    }

    #[test]
    fn test_structured_scalar_is_invalid_format() {
        let err = parse_pricing(RawInput::from(json!(42))).unwrap_err();
        assert_eq!(err, BillingError::config("Invalid pricing data format"));
    }

    #[test]
    fn test_missing_notification_type() {
        let err = parse_pricing(RawInput::from(json!([{"prices": {"AU": 0.5}}]))).unwrap_err();
        assert_eq!(err, BillingError::config("Missing notification_type"));

        let err = parse_pricing(RawInput::from(json!([{"notification_type": "", "prices": {}}])))
            .unwrap_err();
        assert_eq!(err, BillingError::config("Missing notification_type"));
    }

    #[test]
    fn test_missing_prices() {
        let err = parse_pricing(RawInput::from(json!([{"notification_type": "sms"}]))).unwrap_err();
        assert_eq!(err, BillingError::config("Missing prices for sms"));

        let err = parse_pricing(RawInput::from(json!([{"notification_type": "sms", "prices": [1]}])))
            .unwrap_err();
        assert_eq!(err, BillingError::config("Missing prices for sms"));
    }

    #[test]
    fn test_non_numeric_price() {
        let err = parse_pricing(RawInput::from(json!([
            {"notification_type": "sms", "prices": {"au": "cheap"}}
        ])))
        .unwrap_err();
        assert_eq!(err, BillingError::config("Invalid price for sms in AU: \"cheap\""));
    }

    #[test]
    fn test_case_variant_country_keys_last_one_wins() {
        let entries = parse_pricing(RawInput::from(
            r#"[{"notification_type": "sms", "prices": {"au": 0.60, "AU": 0.50}}]"#,
        ))
        .unwrap();
        assert_eq!(entries[0].prices.len(), 1);
        assert_eq!(entries[0].prices["AU"], Decimal::new(50, 2));

        let entries = parse_pricing(RawInput::from(
            r#"[{"notification_type": "sms", "prices": {"AU": 0.50, "au": 0.60}}]"#,
        ))
        .unwrap();
        assert_eq!(entries[0].prices["AU"], Decimal::new(60, 2));
    }

    #[test]
    fn test_integer_and_fractional_prices() {
        assert_eq!(parse_price(&json!(2)), Some(Decimal::new(2, 0)));
        assert_eq!(parse_price(&json!(1.5e-3)), Some(Decimal::new(15, 4)));
    }
}

use crate::error::{BillingError, Result};
use crate::input::RawInput;
use crate::notification::Notification;
use crate::pricing::models::CompanyCost;
use crate::pricing::table::PriceTable;
use crate::summary::CompanySummary;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

/// Calculator turning raw price and log input into per-company costs
///
/// All parsing and validation happens in [`CostCalculator::new`]; a
/// constructed calculator only holds valid state.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    price_table: PriceTable,
    notifications: Vec<Notification>,
}

impl CostCalculator {
    /// Parse the price list and every log entry
    ///
    /// Fails on the first invalid entry; there is no partial result.
    pub fn new(pricing: impl Into<RawInput>, logs: impl Into<RawInput>) -> Result<Self> {
        let price_table = PriceTable::new(pricing)?;
        let notifications = parse_notifications(logs.into())?;

        debug!(
            "Loaded {} notifications against {} priced types",
            notifications.len(),
            price_table.len()
        );

        Ok(Self {
            price_table,
            notifications,
        })
    }

    /// Build from already validated parts
    pub fn from_parts(price_table: PriceTable, notifications: Vec<Notification>) -> Self {
        Self {
            price_table,
            notifications,
        }
    }

    /// Compute the cost report, sorted by company name
    ///
    /// Depends only on the constructed state, so repeated calls agree.
    pub fn run(&self) -> Result<Vec<CompanyCost>> {
        let mut summaries = self.group_by_company()?;

        for summary in &mut summaries {
            summary.calculate_cost(&self.price_table)?;
        }

        summaries.retain(|summary| !summary.is_empty());
        summaries.sort_by(|a, b| a.company_name().cmp(b.company_name()));

        info!(
            "Calculated costs for {} companies from {} notifications",
            summaries.len(),
            self.notifications.len()
        );

        Ok(summaries.iter().map(CompanySummary::to_record).collect())
    }

    pub fn price_table(&self) -> &PriceTable {
        &self.price_table
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Group notifications into summaries in first-seen company order
    fn group_by_company(&self) -> Result<Vec<CompanySummary>> {
        let mut summaries: Vec<CompanySummary> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for notification in &self.notifications {
            let slot = match index.get(notification.company()) {
                Some(&slot) => slot,
                None => {
                    summaries.push(CompanySummary::new(notification.company())?);
                    index.insert(notification.company(), summaries.len() - 1);
                    summaries.len() - 1
                }
            };
            summaries[slot].add_notification(notification.clone());
        }

        Ok(summaries)
    }
}

fn parse_notifications(input: RawInput) -> Result<Vec<Notification>> {
    let value = input.into_value(|e| {
        BillingError::config(format!("Invalid JSON in notification logs: {}", e))
    })?;

    let entries = match value {
        Value::Array(entries) => entries,
        _ => return Err(BillingError::config("Invalid notification logs format")),
    };

    entries.iter().map(Notification::from_value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn pricing() -> Value {
        json!([
            {"notification_type": "sms", "prices": {"AU": 0.50, "NZ": 0.45, "UK": 0.40}},
            {"notification_type": "email", "prices": {"AU": 0.10, "NZ": 0.08, "UK": 0.12}}
        ])
    }

    fn record(company: &str, count: usize, cost: Decimal) -> CompanyCost {
        CompanyCost {
            company: company.to_string(),
            notification_count: count,
            cost,
        }
    }

    #[test]
    fn test_single_company() {
        let logs = json!([
            {"company": "Apple", "type": "sms", "country": "AU"},
            {"company": "Apple", "type": "email", "country": "NZ"}
        ]);

        let result = CostCalculator::new(pricing(), logs).unwrap().run().unwrap();
        assert_eq!(result, vec![record("Apple", 2, Decimal::new(58, 2))]);
    }

    #[test]
    fn test_multiple_companies_sorted() {
        let logs = json!([
            {"company": "Google", "type": "sms", "country": "UK"},
            {"company": "Apple", "type": "sms", "country": "AU"},
            {"company": "Apple", "type": "sms", "country": "AU"},
            {"company": "Apple", "type": "email", "country": "NZ"}
        ]);

        let result = CostCalculator::new(pricing(), logs).unwrap().run().unwrap();
        assert_eq!(
            result,
            vec![
                record("Apple", 3, Decimal::new(108, 2)),
                record("Google", 1, Decimal::new(40, 2)),
            ]
        );
    }

    #[test]
    fn test_sort_is_case_sensitive() {
        let logs = json!([
            {"company": "apple", "type": "sms", "country": "AU"},
            {"company": "Zebra", "type": "sms", "country": "AU"}
        ]);

        let result = CostCalculator::new(pricing(), logs).unwrap().run().unwrap();
        let names: Vec<_> = result.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "apple"]);
    }

    #[test]
    fn test_company_names_are_trimmed_before_grouping() {
        let logs = json!([
            {"company": " Apple", "type": "sms", "country": "AU"},
            {"company": "Apple ", "type": "sms", "country": "AU"}
        ]);

        let result = CostCalculator::new(pricing(), logs).unwrap().run().unwrap();
        assert_eq!(result, vec![record("Apple", 2, Decimal::new(100, 2))]);
    }

    #[test]
    fn test_empty_logs() {
        let result = CostCalculator::new(pricing(), json!([])).unwrap().run().unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_logs_as_json_text() {
        let logs = r#"[{"company": "Apple", "type": "SMS", "country": "au"}]"#;
        let result = CostCalculator::new(pricing(), logs).unwrap().run().unwrap();
        assert_eq!(result, vec![record("Apple", 1, Decimal::new(50, 2))]);
    }

    #[test]
    fn test_invalid_logs_json() {
        let err = CostCalculator::new(pricing(), "not json").unwrap_err();
        assert_eq!(err.kind(), "config_error");
        assert!(err
            .message()
            .starts_with("Invalid JSON in notification logs: "));
    }

    #[test]
    fn test_logs_must_be_array() {
        let err = CostCalculator::new(pricing(), json!({"company": "Apple"})).unwrap_err();
        assert_eq!(err, BillingError::config("Invalid notification logs format"));
    }

    #[test]
    fn test_invalid_record_aborts_construction() {
        let logs = json!([
            {"company": "Apple", "type": "sms", "country": "AU"},
            {"company": "Apple", "type": "push", "country": "AU"},
            {"company": "", "type": "sms", "country": "AU"}
        ]);

        let err = CostCalculator::new(pricing(), logs).unwrap_err();
        assert_eq!(err, BillingError::validation("Invalid type: 'push'"));
    }

    #[test]
    fn test_pricing_errors_checked_before_logs() {
        let err = CostCalculator::new(json!([]), "not json").unwrap_err();
        assert_eq!(err, BillingError::config("No pricing data found"));
    }

    #[test]
    fn test_missing_price_fails_run() {
        let pricing = json!([{"notification_type": "sms", "prices": {"AU": 0.5}}]);
        let logs = json!([{"company": "Apple", "type": "email", "country": "AU"}]);

        let calculator = CostCalculator::new(pricing, logs).unwrap();
        let err = calculator.run().unwrap_err();
        assert_eq!(err, BillingError::pricing("Unknown notification type: email"));
    }

    #[test]
    fn test_run_is_repeatable() {
        let logs = json!([
            {"company": "Apple", "type": "sms", "country": "AU"},
            {"company": "Google", "type": "email", "country": "UK"}
        ]);

        let calculator = CostCalculator::new(pricing(), logs).unwrap();
        assert_eq!(calculator.run().unwrap(), calculator.run().unwrap());
    }

    #[test]
    fn test_every_notification_counted_once() {
        let logs = json!([
            {"company": "A", "type": "sms", "country": "AU"},
            {"company": "B", "type": "sms", "country": "NZ"},
            {"company": "A", "type": "email", "country": "UK"},
            {"company": "C", "type": "email", "country": "AU"},
            {"company": "B", "type": "sms", "country": "UK"}
        ]);

        let calculator = CostCalculator::new(pricing(), logs).unwrap();
        let result = calculator.run().unwrap();
        let total: usize = result.iter().map(|r| r.notification_count).sum();
        assert_eq!(total, calculator.notifications().len());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_from_parts() {
        let table = PriceTable::from_value(pricing()).unwrap();
        let notifications = vec![Notification::new("Apple", "email", "UK").unwrap()];

        let result = CostCalculator::from_parts(table, notifications).run().unwrap();
        assert_eq!(result, vec![record("Apple", 1, Decimal::new(12, 2))]);
    }
}

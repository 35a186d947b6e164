use crate::error::{BillingError, Result};
use crate::input::RawInput;
use crate::notification::{normalize_country, normalize_type, Notification};
use crate::pricing::loader::parse_pricing;
use crate::pricing::models::PriceEntry;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Validated lookup from notification type and country to a unit price
///
/// Types keep their first-insertion order; a later entry for the same type
/// replaces the earlier prices. Country keys are stored uppercase.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    entries: Vec<PriceEntry>,
}

impl PriceTable {
    /// Build from raw JSON text or structured data
    pub fn new(input: impl Into<RawInput>) -> Result<Self> {
        Self::from_entries(parse_pricing(input.into())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(json)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Self::new(value)
    }

    /// Build from typed entries, folding duplicates last-write-wins
    pub fn from_entries(entries: impl IntoIterator<Item = PriceEntry>) -> Result<Self> {
        let mut folded: Vec<PriceEntry> = Vec::new();

        for entry in entries {
            if entry.notification_type.is_empty() {
                return Err(BillingError::config("Missing notification_type"));
            }

            let mut prices = BTreeMap::new();
            for (country, price) in entry.prices {
                let code = normalize_country(&country);
                if price < Decimal::ZERO {
                    return Err(BillingError::config(format!(
                        "Invalid price for {} in {}: {}",
                        entry.notification_type, code, price
                    )));
                }
                prices.insert(code, price);
            }

            match folded
                .iter_mut()
                .find(|existing| existing.notification_type == entry.notification_type)
            {
                Some(existing) => existing.prices = prices,
                None => folded.push(PriceEntry {
                    notification_type: entry.notification_type,
                    prices,
                }),
            }
        }

        if folded.is_empty() {
            return Err(BillingError::config("No pricing data found"));
        }

        debug!("Built price table with {} notification types", folded.len());
        Ok(Self { entries: folded })
    }

    /// Unit price for a type/country pair (case-insensitive)
    ///
    /// Errors quote the caller's original spelling.
    pub fn cost_for(&self, notification_type: &str, country: &str) -> Result<Decimal> {
        let prices = self.prices_for(notification_type)?;
        prices
            .get(&normalize_country(country))
            .copied()
            .ok_or_else(|| BillingError::pricing(format!("Unknown country: {}", country)))
    }

    /// Unit price for a single notification
    pub fn cost_of(&self, notification: &Notification) -> Result<Decimal> {
        self.cost_for(
            notification.notification_type().as_str(),
            notification.country().as_str(),
        )
    }

    /// Configured notification types in first-insertion order
    pub fn available_types(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.notification_type.as_str())
            .collect()
    }

    /// Country codes priced for a notification type, ascending
    pub fn available_countries_for(&self, notification_type: &str) -> Result<Vec<&str>> {
        Ok(self
            .prices_for(notification_type)?
            .keys()
            .map(String::as_str)
            .collect())
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn prices_for(&self, notification_type: &str) -> Result<&BTreeMap<String, Decimal>> {
        let key = normalize_type(notification_type);
        self.entries
            .iter()
            .find(|entry| entry.notification_type == key)
            .map(|entry| &entry.prices)
            .ok_or_else(|| {
                BillingError::pricing(format!(
                    "Unknown notification type: {}",
                    notification_type
                ))
            })
    }
}

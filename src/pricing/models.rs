use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prices for one notification type, keyed by country code
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEntry {
    pub notification_type: String,
    pub prices: BTreeMap<String, Decimal>,
}

impl PriceEntry {
    pub fn new(notification_type: impl Into<String>) -> Self {
        Self {
            notification_type: notification_type.into(),
            prices: BTreeMap::new(),
        }
    }

    /// Add a country price (builder style)
    pub fn with_price(mut self, country: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(country.into(), price);
        self
    }
}

/// Billing result for one company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCost {
    pub company: String,
    pub notification_count: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

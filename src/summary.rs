use crate::error::{BillingError, Result};
use crate::notification::{normalize_country, normalize_type, Notification};
use crate::pricing::{CompanyCost, PriceTable};
use rust_decimal::Decimal;

/// All notifications sent on behalf of one company
///
/// `notifications` is the raw accumulated input; `total_cost` is derived state
/// written only by [`CompanySummary::calculate_cost`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySummary {
    company_name: String,
    notifications: Vec<Notification>,
    total_cost: Decimal,
}

impl CompanySummary {
    pub fn new(company_name: impl AsRef<str>) -> Result<Self> {
        let company_name = company_name.as_ref().trim().to_string();
        if company_name.is_empty() {
            return Err(BillingError::validation("Company name cannot be empty"));
        }

        Ok(Self {
            company_name,
            notifications: Vec::new(),
            total_cost: Decimal::ZERO,
        })
    }

    /// Append a notification
    ///
    /// Routing by company is the caller's job; no check is made here.
    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Price every notification and store the sum as `total_cost`
    ///
    /// Overwrites any earlier total. On error the previous total is kept.
    pub fn calculate_cost(&mut self, price_table: &PriceTable) -> Result<Decimal> {
        self.total_cost = self.priced_with(price_table)?;
        Ok(self.total_cost)
    }

    /// Sum of unit prices without touching the stored total
    pub fn priced_with(&self, price_table: &PriceTable) -> Result<Decimal> {
        self.notifications
            .iter()
            .try_fold(Decimal::ZERO, |total, notification| -> Result<Decimal> {
                total
                    .checked_add(price_table.cost_of(notification)?)
                    .ok_or_else(|| {
                        BillingError::pricing(format!("Cost overflow for {}", self.company_name))
                    })
            })
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }

    pub fn count_by_type(&self, notification_type: &str) -> usize {
        let wanted = normalize_type(notification_type);
        self.notifications
            .iter()
            .filter(|n| n.notification_type().as_str() == wanted)
            .count()
    }

    pub fn count_by_country(&self, country: &str) -> usize {
        let wanted = normalize_country(country);
        self.notifications
            .iter()
            .filter(|n| n.country().as_str() == wanted)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn to_record(&self) -> CompanyCost {
        CompanyCost {
            company: self.company_name.clone(),
            notification_count: self.notification_count(),
            cost: self.total_cost,
        }
    }
}

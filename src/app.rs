//! Entry point wrapping the billing pipeline
//!
//! Hosts call [`call`] (or build a [`BillingApp`]) with raw price and log
//! data and get back either the full report or the first error.

use crate::error::Result;
use crate::input::RawInput;
use crate::pricing::{CompanyCost, CostCalculator};
use tracing::error;

/// Run the pipeline once over the given inputs
pub fn call(pricing: impl Into<RawInput>, logs: impl Into<RawInput>) -> Result<Vec<CompanyCost>> {
    BillingApp::new(pricing, logs).call()
}

/// Holds raw inputs until [`BillingApp::call`] runs the pipeline
#[derive(Debug, Clone)]
pub struct BillingApp {
    pricing: RawInput,
    logs: RawInput,
}

impl BillingApp {
    pub fn new(pricing: impl Into<RawInput>, logs: impl Into<RawInput>) -> Self {
        Self {
            pricing: pricing.into(),
            logs: logs.into(),
        }
    }

    /// Build the calculator and compute the report
    ///
    /// Errors are logged once and returned unchanged.
    pub fn call(&self) -> Result<Vec<CompanyCost>> {
        CostCalculator::new(self.pricing.clone(), self.logs.clone())
            .and_then(|calculator| calculator.run())
            .inspect_err(|e| {
                error!(kind = e.kind(), "Error processing notification data: {}", e);
            })
    }
}

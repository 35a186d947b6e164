pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod notification;
pub mod pricing;
pub mod summary;

pub use app::{call, BillingApp};
pub use error::{BillingError, Result};
pub use input::RawInput;
pub use notification::{Country, Notification, NotificationType};
pub use pricing::{CompanyCost, CostCalculator, PriceEntry, PriceTable};
pub use summary::CompanySummary;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so a
/// JSON report on stdout stays clean.
///
/// Note: This function can only be called once.
pub fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        config::LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        config::LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}

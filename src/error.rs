use thiserror::Error;

/// Billing pipeline error types
///
/// `Display` renders only the message so callers see e.g. `Invalid type: 'push'`.
/// Use [`BillingError::kind`] to tell the categories apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// Malformed or missing price/log configuration
    #[error("{0}")]
    Config(String),
    /// A notification or company name failed domain constraints
    #[error("{0}")]
    Validation(String),
    /// A notification references a type or country the price table lacks
    #[error("{0}")]
    Pricing(String),
}

pub type Result<T> = std::result::Result<T, BillingError>;

impl BillingError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn pricing(msg: impl Into<String>) -> Self {
        Self::Pricing(msg.into())
    }

    /// Stable machine-readable name of the error category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Validation(_) => "validation_error",
            Self::Pricing(_) => "pricing_error",
        }
    }

    /// The bare message without category
    pub fn message(&self) -> &str {
        match self {
            Self::Config(msg) | Self::Validation(msg) | Self::Pricing(msg) => msg,
        }
    }
}

use crate::error::{BillingError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Supported notification channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Sms,
    Email,
}

impl NotificationType {
    pub const ALL: [NotificationType; 2] = [Self::Sms, Self::Email];

    /// Normalized (lowercase) spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Email => "email",
        }
    }

    /// Parse an already normalized name
    fn from_normalized(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported destination countries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Au,
    Nz,
    Uk,
}

impl Country {
    pub const ALL: [Country; 3] = [Self::Au, Self::Nz, Self::Uk];

    /// Normalized (uppercase) country code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Au => "AU",
            Self::Nz => "NZ",
            Self::Uk => "UK",
        }
    }

    fn from_normalized(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn normalize_type(notification_type: &str) -> String {
    notification_type.trim().to_lowercase()
}

pub(crate) fn normalize_country(country: &str) -> String {
    country.trim().to_uppercase()
}

/// A single billable notification event
///
/// Always holds a trimmed, non-empty company and a known type/country;
/// construction fails instead of producing a partially valid record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    company: String,
    #[serde(rename = "type")]
    notification_type: NotificationType,
    country: Country,
}

impl Notification {
    /// Create a validated notification
    ///
    /// The company is trimmed, the type lowercased and the country uppercased
    /// before validation. Checks run in order company, type, country.
    pub fn new(
        company: impl AsRef<str>,
        notification_type: impl AsRef<str>,
        country: impl AsRef<str>,
    ) -> Result<Self> {
        let company = company.as_ref().trim().to_string();
        let type_name = normalize_type(notification_type.as_ref());
        let country_code = normalize_country(country.as_ref());

        if company.is_empty() {
            return Err(BillingError::validation(format!(
                "Invalid company: '{}'",
                company
            )));
        }

        let notification_type = NotificationType::from_normalized(&type_name).ok_or_else(|| {
            BillingError::validation(format!("Invalid type: '{}'", type_name))
        })?;

        let country = Country::from_normalized(&country_code).ok_or_else(|| {
            BillingError::validation(format!("Invalid country: '{}'", country_code))
        })?;

        Ok(Self {
            company,
            notification_type,
            country,
        })
    }

    /// Build from an untyped key-value map
    ///
    /// Each field is looked up by its plain key (`"company"`) first and then by
    /// its symbolic spelling (`":company"`). Null counts as absent. Non-string
    /// scalars are coerced to their JSON text and absent fields become `""`.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        Self::new(
            lookup_field(map, "company"),
            lookup_field(map, "type"),
            lookup_field(map, "country"),
        )
    }

    /// Build from one raw log entry, which must be a JSON object
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(BillingError::validation(format!(
                "Invalid notification log entry: {}",
                other
            ))),
        }
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn notification_type(&self) -> NotificationType {
        self.notification_type
    }

    pub fn country(&self) -> Country {
        self.country
    }

    /// Case-insensitive match on type and country
    pub fn matches(&self, notification_type: &str, country: &str) -> bool {
        self.notification_type.as_str() == normalize_type(notification_type)
            && self.country.as_str() == normalize_country(country)
    }
}

fn lookup_field(map: &Map<String, Value>, key: &str) -> String {
    let symbolic = format!(":{}", key);
    map.get(key)
        .filter(|v| !v.is_null())
        .or_else(|| map.get(&symbolic).filter(|v| !v.is_null()))
        .map(coerce_to_string)
        .unwrap_or_default()
}

fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

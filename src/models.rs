use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_TRAVEL_TIME;
use crate::error::{Error, Result};

// ============================================================================
// Itinerary Form
// ============================================================================

/// One of the four keys of the itinerary form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FromCity,
    ToCity,
    TravelDate,
    TravelTime,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::FromCity,
        FormField::ToCity,
        FormField::TravelDate,
        FormField::TravelTime,
    ];

    /// Key used in the request payload
    pub fn key(self) -> &'static str {
        match self {
            FormField::FromCity => "from_city",
            FormField::ToCity => "to_city",
            FormField::TravelDate => "travel_date",
            FormField::TravelTime => "travel_time",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FormField::TravelTime)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "from_city" | "from" => Ok(FormField::FromCity),
            "to_city" | "to" => Ok(FormField::ToCity),
            "travel_date" | "date" => Ok(FormField::TravelDate),
            "travel_time" | "time" => Ok(FormField::TravelTime),
            _ => Err(Error::UnknownField(s.to_string())),
        }
    }
}

/// User-entered itinerary, serialized verbatim as the prediction request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub from_city: String,
    pub to_city: String,
    pub travel_date: String,
    pub travel_time: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            from_city: String::new(),
            to_city: String::new(),
            travel_date: String::new(),
            travel_time: DEFAULT_TRAVEL_TIME.to_string(),
        }
    }
}

impl FormState {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FromCity => &self.from_city,
            FormField::ToCity => &self.to_city,
            FormField::TravelDate => &self.travel_date,
            FormField::TravelTime => &self.travel_time,
        }
    }

    /// Replaces the value of a single field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::FromCity => &mut self.from_city,
            FormField::ToCity => &mut self.to_city,
            FormField::TravelDate => &mut self.travel_date,
            FormField::TravelTime => &mut self.travel_time,
        };
        *slot = value.into();
    }

    /// Checks the same constraints the date and time input widgets enforce.
    /// Cities are only checked for presence.
    pub fn validate(&self) -> Result<()> {
        for field in FormField::ALL {
            if field.is_required() && self.get(field).trim().is_empty() {
                return Err(Error::MissingField(field));
            }
        }

        // chrono accepts unpadded fields, the widgets only emit padded ones
        let date = self.travel_date.trim();
        if !has_shape(date, "dddd-dd-dd")
            || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err()
        {
            return Err(Error::InvalidDate(self.travel_date.clone()));
        }

        let time = self.travel_time.trim();
        let valid_time = (has_shape(time, "dd:dd")
            && NaiveTime::parse_from_str(time, "%H:%M").is_ok())
            || (has_shape(time, "dd:dd:dd")
                && NaiveTime::parse_from_str(time, "%H:%M:%S").is_ok());
        if !time.is_empty() && !valid_time {
            return Err(Error::InvalidTime(self.travel_time.clone()));
        }

        Ok(())
    }
}

/// Matches `value` against a pattern where `d` is any ASCII digit
fn has_shape(value: &str, pattern: &str) -> bool {
    value.len() == pattern.len()
        && value.bytes().zip(pattern.bytes()).all(|(v, p)| match p {
            b'd' => v.is_ascii_digit(),
            _ => v == p,
        })
}

// ============================================================================
// Prediction Service Models
// ============================================================================

/// Styling category derived from the severity code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityClass {
    Safe,
    Moderate,
    Danger,
    Extreme,
    Unknown,
}

impl SeverityClass {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => SeverityClass::Safe,
            Some(2) => SeverityClass::Moderate,
            Some(3) => SeverityClass::Danger,
            Some(4) => SeverityClass::Extreme,
            _ => SeverityClass::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityClass::Safe => "safe",
            SeverityClass::Moderate => "moderate",
            SeverityClass::Danger => "danger",
            SeverityClass::Extreme => "extreme",
            SeverityClass::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SeverityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route safety prediction as returned by the service.
///
/// No schema is enforced: every field is optional, and a field with an
/// unexpected JSON type decodes as missing instead of rejecting the response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "severity_code")]
    pub severity: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub distance_miles: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub estimated_duration_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather_from: Option<WeatherSummary>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather_to: Option<WeatherSummary>,
    /// Set by the service when it rejects the itinerary
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub feature_input: Option<BTreeMap<String, Value>>,
}

impl PredictionResult {
    /// Decodes a response body. Only a body that is not JSON at all is an
    /// error. `null` decodes to no result; any other JSON that is not an
    /// object yields an empty result.
    pub fn from_slice(body: &[u8]) -> Result<Option<Self>> {
        let value: Value = serde_json::from_slice(body)?;
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => Ok(Some(serde_json::from_value(value)?)),
            _ => Ok(Some(Self::default())),
        }
    }

    pub fn severity_class(&self) -> SeverityClass {
        SeverityClass::from_code(self.severity)
    }
}

/// Current conditions at one end of the route
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeatherSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub weather_main: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather_desc: Option<String>,
    #[serde(rename = "temp_F", default, deserialize_with = "lenient")]
    pub temp_f: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub pressure_in: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind_mph: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub visibility_mi: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub precip_in: Option<f64>,
}

/// Body of the service root endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn severity_code<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    Ok(code)
}

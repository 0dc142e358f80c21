//! Customer and device fields editable through the task form.

use super::{ParseDeviceTypeError, ParseUrgencyError, TaskDomainError};
use chrono::NaiveDate;
use std::fmt;

/// Storage medium brought in for recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// Hard disk drive.
    Hdd,
    /// Solid-state drive.
    Ssd,
    /// RAID array.
    Raid,
    /// USB flash drive.
    Usb,
    /// SD or other memory card.
    Sd,
    /// Anything else.
    Other,
}

impl DeviceType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hdd => "hdd",
            Self::Ssd => "ssd",
            Self::Raid => "raid",
            Self::Usb => "usb",
            Self::Sd => "sd",
            Self::Other => "other",
        }
    }

    /// Reads a backend value; unknown devices fall back to [`Self::Other`].
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        let value = raw.map(str::trim).filter(|value| !value.is_empty())?;
        Some(Self::try_from(value).unwrap_or(Self::Other))
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DeviceType {
    type Error = ParseDeviceTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hdd" => Ok(Self::Hdd),
            "ssd" => Ok(Self::Ssd),
            "raid" => Ok(Self::Raid),
            "usb" => Ok(Self::Usb),
            "sd" => Ok(Self::Sd),
            "other" => Ok(Self::Other),
            _ => Err(ParseDeviceTypeError(value.to_owned())),
        }
    }
}

/// How soon the customer needs the case handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Urgency {
    /// No rush.
    Low,
    /// Normal turnaround.
    #[default]
    Medium,
    /// Expedited.
    High,
    /// Drop everything.
    Critical,
}

impl Urgency {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Reads a raw value; missing or unknown urgency means `medium`.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.and_then(|value| Self::try_from(value).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Urgency {
    type Error = ParseUrgencyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseUrgencyError(value.to_owned())),
        }
    }
}

/// Non-negative quoted price for a case.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Creates a validated price.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPrice`] for negative, NaN or
    /// infinite amounts.
    pub fn new(amount: f64) -> Result<Self, TaskDomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(TaskDomainError::InvalidPrice(amount.to_string()));
        }
        Ok(Self(amount.abs()))
    }

    /// Parses free-form input; anything unusable reads as no price.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(|amount| Self::new(amount).ok())
    }

    /// Returns the numeric amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads a date from a `YYYY-MM-DD` value or the date part of a datetime.
#[must_use]
pub fn parse_date_lenient(input: &str) -> Option<NaiveDate> {
    let date_part = input.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Form-editable fields of a task.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskFields {
    /// Customer name.
    pub name: String,
    /// Customer phone number.
    pub phone: Option<String>,
    /// Customer email address.
    pub email: Option<String>,
    /// Device brought in.
    pub device_type: Option<DeviceType>,
    /// What the customer reported.
    pub problem_description: String,
    /// Turnaround urgency.
    pub urgency: Urgency,
    /// Quoted price.
    pub price: Option<Price>,
    /// Date work started.
    pub started_at: Option<NaiveDate>,
    /// Date work finished.
    pub completed_at: Option<NaiveDate>,
    /// Raw values that did not match a known variant.
    pub unrecognized: UnrecognizedValues,
}

/// Device type and urgency values read from a record but not understood.
///
/// The typed field holds the fallback (`other`, `medium`) while the raw text
/// is written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnrecognizedValues {
    /// Raw device type.
    pub device_type: Option<String>,
    /// Raw urgency.
    pub urgency: Option<String>,
}

impl UnrecognizedValues {
    /// Captures the raw values that [`DeviceType::from_raw`] and
    /// [`Urgency::from_raw`] would replace with a fallback.
    #[must_use]
    pub fn capture(device_type: Option<&str>, urgency: Option<&str>) -> Self {
        Self {
            device_type: unrecognized(device_type, |value| DeviceType::try_from(value).is_ok()),
            urgency: unrecognized(urgency, |value| Urgency::try_from(value).is_ok()),
        }
    }
}

fn unrecognized(raw: Option<&str>, known: impl Fn(&str) -> bool) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && !known(value))
        .map(str::to_owned)
}

impl TaskFields {
    /// Creates fields with a customer name and everything else defaulted.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the device type.
    #[must_use]
    pub const fn with_device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    /// Sets the urgency.
    #[must_use]
    pub const fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Returns the device type as it should be stored.
    #[must_use]
    pub fn device_type_value(&self) -> Option<&str> {
        self.unrecognized
            .device_type
            .as_deref()
            .or_else(|| self.device_type.map(DeviceType::as_str))
    }

    /// Returns the urgency as it should be stored.
    #[must_use]
    pub fn urgency_value(&self) -> &str {
        self.unrecognized
            .urgency
            .as_deref()
            .unwrap_or_else(|| self.urgency.as_str())
    }

    /// Carries over the raw values of `original` for every field left at
    /// its fallback.
    #[must_use]
    pub fn keeping_unrecognized(mut self, original: &Self) -> Self {
        if self.device_type == original.device_type {
            self.unrecognized
                .device_type
                .clone_from(&original.unrecognized.device_type);
        }
        if self.urgency == original.urgency {
            self.unrecognized
                .urgency
                .clone_from(&original.unrecognized.urgency);
        }
        self
    }
}

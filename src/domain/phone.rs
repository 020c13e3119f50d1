//! PhoneNumber value object and the mobile-number locales it understands.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static ID_ID_MOBILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\+?62|0)8(1[123456789]|2[1238]|3[1238]|5[12356789]|7[78]|9[56789]|8[123456789])([\s?|\d]{5,11})$",
    )
    .expect("Failed to compile id-ID mobile regex")
});

static EN_US_MOBILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((\+1|1)?( |-)?)?(\([2-9][0-9]{2}\)|[2-9][0-9]{2})( |-)?([2-9][0-9]{2}( |-)?[0-9]{4})$",
    )
    .expect("Failed to compile en-US mobile regex")
});

static EN_GB_MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+?44|0)7\d{9}$").expect("Failed to compile en-GB mobile regex"));

/// Region whose mobile-number format a phone must follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhoneLocale {
    /// Indonesian mobile numbers (`08…`, `+628…`, `628…`).
    #[default]
    IdId,
    /// North American numbers with an optional `+1` prefix.
    EnUs,
    /// United Kingdom mobile numbers (`07…`, `+447…`).
    EnGb,
    /// Any string of digits and common punctuation.
    Any,
}

impl PhoneLocale {
    /// The locale tag as used in configuration (`id-ID`, `en-US`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdId => "id-ID",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::Any => "any",
        }
    }

    /// Whether `phone` is a mobile number in this locale.
    pub fn matches(&self, phone: &str) -> bool {
        match self {
            Self::IdId => ID_ID_MOBILE_RE.is_match(phone),
            Self::EnUs => EN_US_MOBILE_RE.is_match(phone),
            Self::EnGb => EN_GB_MOBILE_RE.is_match(phone),
            Self::Any => is_loose_phone(phone),
        }
    }
}

impl FromStr for PhoneLocale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id-id" | "id" => Ok(Self::IdId),
            "en-us" | "us" => Ok(Self::EnUs),
            "en-gb" | "gb" | "uk" => Ok(Self::EnGb),
            "any" => Ok(Self::Any),
            _ => Err(ValidationError::UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for PhoneLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At least one digit; only digits, spaces, hyphens, parentheses, '+' and '.'.
fn is_loose_phone(phone: &str) -> bool {
    if !phone.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'))
}

/// A phone number that passed the mobile-format check of some locale.
///
/// # Example
///
/// ```
/// use contact_book::domain::{PhoneLocale, PhoneNumber};
///
/// let phone = PhoneNumber::parse("081234567890", PhoneLocale::IdId).unwrap();
/// assert_eq!(phone.as_str(), "081234567890");
/// assert!(PhoneNumber::parse("12345", PhoneLocale::IdId).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate `phone` against the mobile format of `locale`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the number does not match.
    pub fn parse(phone: impl Into<String>, locale: PhoneLocale) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if phone.is_empty() || !locale.matches(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

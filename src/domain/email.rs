//! EmailAddress value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;

/// One dot-separated atom of an unquoted local part. Letters outside ASCII
/// are allowed, astral-plane characters and the surrogate block are not.
static LOCAL_ATOM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9!#$%&'*+\-/=?^_`{|}~\u{A1}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}]+$")
        .expect("Failed to compile email local atom regex")
});

/// The inside of a quoted local part: printable text, whitespace and
/// backslash escapes, but no bare '"' or '\'.
static QUOTED_LOCAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:[\s\x01-\x08\x0b\x0c\x0e-\x1f\x7f\x21\x23-\x5b\x5d-\x7e\u{A1}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}]|\\[\x01-\x09\x0b\x0c\x0d-\x7f\u{A1}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}])*$",
    )
    .expect("Failed to compile quoted email local part regex")
});

static DOMAIN_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9\-\u{A1}-\u{D7FF}\u{E000}-\u{10FFFF}]+$")
        .expect("Failed to compile email domain label regex")
});

static FULL_WIDTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{FF01}-\u{FF5E}]").expect("Failed to compile full-width regex"));

/// Alphabetic (any script) with at least two characters, or an IDNA
/// `xn--` label.
static TLD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z\u{A1}-\u{A8}\u{AA}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFEF}]{2,}|xn[a-z0-9-]{2,})$")
        .expect("Failed to compile email TLD regex")
});

const MAX_LOCAL_BYTES: usize = 64;
const MAX_ADDRESS_LEN: usize = 254;
const MAX_LABEL_LEN: usize = 63;

/// A syntactically valid email address.
///
/// # Example
///
/// ```
/// use contact_book::domain::EmailAddress;
///
/// let email = EmailAddress::new("alice@x.com").unwrap();
/// assert_eq!(email.as_str(), "alice@x.com");
/// assert!(EmailAddress::new("josé@example.com").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new EmailAddress, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - At most 254 characters, split at the last '@'
    /// - Local part of at most 64 bytes: either dot-separated atoms (UTF-8
    ///   letters allowed, no empty atom) or a double-quoted string
    /// - Domain of at least two labels. Labels hold letters of any script,
    ///   digits and inner hyphens, up to 63 characters each
    /// - Top-level domain is alphabetic with two or more characters, or an
    ///   `xn--` label
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the email format is invalid.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into();

        if !Self::is_valid(&email) {
            return Err(ValidationError::InvalidEmail(email));
        }

        Ok(Self(email))
    }

    /// Check the format without allocating a value object.
    pub fn is_valid(email: &str) -> bool {
        if email.is_empty() || email.chars().count() > MAX_ADDRESS_LEN {
            return false;
        }

        let Some((local, domain)) = email.rsplit_once('@') else {
            return false;
        };

        if local.len() > MAX_LOCAL_BYTES || domain.len() > MAX_ADDRESS_LEN {
            return false;
        }

        Self::is_valid_domain(domain) && Self::is_valid_local(local)
    }

    fn is_valid_local(local: &str) -> bool {
        if let Some(quoted) = local
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            return QUOTED_LOCAL_RE.is_match(quoted);
        }

        local.split('.').all(|atom| LOCAL_ATOM_RE.is_match(atom))
    }

    fn is_valid_domain(domain: &str) -> bool {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return false;
        }

        let Some(tld) = labels.last() else {
            return false;
        };
        if !TLD_RE.is_match(tld) {
            return false;
        }

        labels.iter().all(|label| Self::is_valid_label(label))
    }

    fn is_valid_label(label: &str) -> bool {
        label.chars().count() <= MAX_LABEL_LEN
            && DOMAIN_LABEL_RE.is_match(label)
            && !FULL_WIDTH_RE.is_match(label)
            && !label.starts_with('-')
            && !label.ends_with('-')
    }

    /// Get the email address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

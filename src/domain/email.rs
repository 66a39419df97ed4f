// Copyright (c) 2025 - Cowboy AI, Inc.
//! Email Value Object with Format Validation

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{DomainError, DomainResult};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email pattern compiles");
}

/// Email address value object
///
/// Invariants:
/// - Non-blank
/// - Matches `local@domain.tld`
/// - Stored trimmed and lower-cased, so equality and hashing are
///   case-insensitive by construction
///
/// # Examples
///
/// ```rust
/// use fleet_rental::domain::Email;
///
/// let email = Email::new("  John.Doe@Example.com ").unwrap();
/// assert_eq!(email.as_str(), "john.doe@example.com");
///
/// assert!(Email::new("").is_err());
/// assert!(Email::new("no-at-sign.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation and normalization
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let value = value.as_ref();

        if value.trim().is_empty() {
            return Err(DomainError::validation("email", "email cannot be empty"));
        }

        let normalized = Self::normalize(value);

        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(DomainError::validation(
                "email",
                format!("'{}' is not a valid email address", value.trim()),
            ));
        }

        Ok(Self(normalized))
    }

    /// Canonical form used for storage and lookups
    pub fn normalize(value: &str) -> String {
        value.trim().to_lowercase()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Part before the `@`
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or(&self.0)
    }

    /// Part after the `@`
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, domain)| domain).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Email {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

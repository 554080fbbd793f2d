//! Code destinations: phone entry, email check and masking for logs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

/// Country code offered by the phone entry step
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Message shown when the national number is not 10 digits
pub const INVALID_PHONE_ENTRY: &str = "Please enter a valid 10-digit phone number.";

// National number as typed on the phone entry step
static NATIONAL_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Where a one-time passcode is delivered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Destination {
    Phone(String),
    Email(String),
}

impl Destination {
    /// Build a phone destination from the phone entry step
    pub fn from_phone_entry(country_code: &str, national_number: &str) -> Result<Self, ValidationError> {
        let number = normalize_phone_number(national_number);
        if !NATIONAL_NUMBER_REGEX.is_match(&number) {
            return Err(ValidationError::new("phone", INVALID_PHONE_ENTRY, "invalid_phone"));
        }
        let full = format!("{}{}", country_code.trim(), number);
        if !is_valid_international_phone(&full) {
            return Err(ValidationError::new("country_code", INVALID_PHONE_ENTRY, "invalid_country_code"));
        }
        Ok(Destination::Phone(full))
    }

    /// Build an email destination
    pub fn from_email(email: &str) -> Result<Self, ValidationError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ValidationError::new("email", "Invalid email format", "invalid_email"));
        }
        Ok(Destination::Email(email.to_string()))
    }

    /// Parse either form; anything with an `@` is treated as an email
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.contains('@') {
            Self::from_email(value)
        } else {
            let normalized = normalize_phone_number(value);
            if is_valid_international_phone(&normalized) {
                Ok(Destination::Phone(normalized))
            } else {
                Err(ValidationError::new("destination", INVALID_PHONE_ENTRY, "invalid_phone"))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Destination::Phone(value) | Destination::Email(value) => value,
        }
    }

    /// Masked form safe for logs
    pub fn masked(&self) -> String {
        match self {
            Destination::Phone(phone) => mask_phone_number(phone),
            Destination::Email(email) => mask_email(email),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    INTERNATIONAL_PHONE_REGEX.is_match(&normalized)
}

/// Basic `local@domain.tld` check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask a phone number for display (e.g., +91****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

/// Mask an email address for display (e.g., j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "****".to_string(),
    }
}

/// Mask any destination string for logs
pub fn mask_destination(destination: &str) -> String {
    if destination.contains('@') {
        mask_email(destination)
    } else {
        mask_phone_number(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_entry_builds_full_number() {
        let destination = Destination::from_phone_entry(DEFAULT_COUNTRY_CODE, "98765 43210").unwrap();
        assert_eq!(destination, Destination::Phone("+919876543210".to_string()));
        assert_eq!(destination.as_str(), "+919876543210");
    }

    #[test]
    fn test_phone_entry_requires_ten_digits() {
        for input in ["987654321", "98765432101", "", "98765abcde"] {
            let err = Destination::from_phone_entry(DEFAULT_COUNTRY_CODE, input).unwrap_err();
            assert_eq!(err.message, INVALID_PHONE_ENTRY);
        }
    }

    #[test]
    fn test_email_destination() {
        assert!(Destination::from_email("joseph@example.com").is_ok());
        assert!(Destination::from_email("joseph@example").is_err());
        assert!(Destination::from_email("jo seph@example.com").is_err());
    }

    #[test]
    fn test_parse_either_form() {
        assert!(matches!(Destination::parse("+14155552671"), Ok(Destination::Phone(_))));
        assert!(matches!(Destination::parse("a@b.io"), Ok(Destination::Email(_))));
        assert!(Destination::parse("14155552671").is_err());
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+919876543210"), "+91****3210");
        assert_eq!(mask_phone_number("12345"), "****");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("joseph@example.com"), "j***@example.com");
        assert_eq!(mask_email("@example.com"), "****");
        assert_eq!(mask_destination("joseph@example.com"), "j***@example.com");
        assert_eq!(mask_destination("+919876543210"), "+91****3210");
    }
}

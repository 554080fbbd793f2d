//! Sign-up details form and its validation engine

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use ob_shared::destination::is_valid_email;
use ob_shared::validation::{validators, ValidationErrors};

use super::identity::IdentityClaims;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

pub const PASSWORD_MIN_LENGTH: usize = 8;

static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());
static SPECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).unwrap());

/// Account details collected after phone verification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SignUpDetails {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(length(min = 1))]
    pub username: String,

    pub email: String,

    pub password: String,

    pub confirm_password: String,

    pub agree_to_terms: bool,
}

impl SignUpDetails {
    /// Copy name and email from a third-party identity
    pub fn prefill_from(&mut self, claims: &IdentityClaims) {
        if let Some(name) = &claims.name {
            self.name = name.clone();
        }
        if let Some(email) = &claims.email {
            self.email = email.clone();
        }
    }
}

/// Field-level checks over the sign-up form
pub trait FormValidationEngine: Send + Sync {
    /// Per-field errors for `details`; empty when every checked field passes
    fn validate(&self, details: &SignUpDetails) -> ValidationErrors;

    /// Whether the form may be submitted
    fn is_form_valid(&self, details: &SignUpDetails) -> bool;
}

/// Default rules: email format, password strength, confirmation match
#[derive(Debug, Clone, Copy, Default)]
pub struct SignUpFormValidator;

impl SignUpFormValidator {
    pub fn new() -> Self {
        Self
    }
}

impl FormValidationEngine for SignUpFormValidator {
    fn validate(&self, details: &SignUpDetails) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if !validators::not_empty(&details.email) {
            errors.add_error("email", EMAIL_REQUIRED, "required");
        } else if !is_valid_email(&details.email) {
            errors.add_error("email", EMAIL_INVALID, "format");
        }

        let failures = password_rule_failures(&details.password);
        if !failures.is_empty() {
            errors.add_error("password", failures.join(", "), "password_rules");
        }

        if details.password != details.confirm_password {
            errors.add_error("confirm_password", PASSWORDS_DO_NOT_MATCH, "mismatch");
        }

        errors
    }

    fn is_form_valid(&self, details: &SignUpDetails) -> bool {
        self.validate(details).is_empty() && details.validate().is_ok() && details.agree_to_terms
    }
}

/// Password rules `password` fails, in display order
pub fn password_rule_failures(password: &str) -> Vec<&'static str> {
    let mut failures = Vec::new();
    if !validators::min_chars(password, PASSWORD_MIN_LENGTH) {
        failures.push("At least 8 characters");
    }
    if !UPPERCASE.is_match(password) {
        failures.push("One uppercase letter");
    }
    if !LOWERCASE.is_match(password) {
        failures.push("One lowercase letter");
    }
    if !DIGIT.is_match(password) {
        failures.push("One number");
    }
    if !SPECIAL.is_match(password) {
        failures.push("One special character");
    }
    failures
}

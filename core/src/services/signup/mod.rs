//! Account details step that follows phone verification

mod form;
mod identity;

pub use form::{
    password_rule_failures, FormValidationEngine, SignUpDetails, SignUpFormValidator,
    EMAIL_INVALID, EMAIL_REQUIRED, PASSWORDS_DO_NOT_MATCH, PASSWORD_MIN_LENGTH,
};
pub use identity::{IdentityClaims, IdentityError, IdentityProvider};

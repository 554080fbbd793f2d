//! Third-party identity sign-in contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims returned by an identity provider after sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Provider-scoped user identifier
    pub subject: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Sign-in cancelled by user")]
    Cancelled,

    #[error("Identity provider error: {reason}")]
    Provider { reason: String },
}

/// Sign-in with an external account (e.g. Google) used to prefill the form
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self) -> Result<IdentityClaims, IdentityError>;
}

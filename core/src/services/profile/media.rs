//! Image picking contract

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An image chosen from the device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Displayable location (file URI, data URI or URL)
    pub uri: String,
    pub mime_type: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Media access denied")]
    PermissionDenied,

    #[error("Unsupported media type: {mime_type}")]
    UnsupportedType { mime_type: String },

    #[error("Media picker error: {reason}")]
    Picker { reason: String },
}

/// Device image picker
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// `Ok(None)` when the user closes the picker without choosing
    async fn pick_image(&self) -> Result<Option<ImageSource>, MediaError>;
}

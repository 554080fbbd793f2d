//! Profile setup: avatar choice and home location

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use super::media::{ImageSource, MediaError, MediaPicker};

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/192";

pub const INVALID_LOCATION: &str = "Please enter a valid location.";

/// Gallery offered when the user has no photo of their own
pub const DEFAULT_IMAGES: [&str; 8] = [
    "https://picsum.photos/192?random=1",
    "https://picsum.photos/192?random=2",
    "https://picsum.photos/192?random=3",
    "https://picsum.photos/192?random=4",
    "https://picsum.photos/192?random=5",
    "https://picsum.photos/192?random=6",
    "https://picsum.photos/192?random=7",
    "https://picsum.photos/192?random=8",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Please enter a valid location.")]
    InvalidLocation,

    #[error("No default image at index {index}")]
    UnknownDefaultImage { index: usize },

    #[error(transparent)]
    Media(#[from] MediaError),
}

/// Current profile picture
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileImage {
    #[default]
    Placeholder,
    /// Index into [`DEFAULT_IMAGES`]
    Default { index: usize },
    Uploaded { source: ImageSource },
}

impl ProfileImage {
    pub fn uri(&self) -> &str {
        match self {
            ProfileImage::Placeholder => PLACEHOLDER_IMAGE,
            ProfileImage::Default { index } => DEFAULT_IMAGES[*index],
            ProfileImage::Uploaded { source } => &source.uri,
        }
    }
}

/// State of the welcome / profile setup step
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileSetup {
    image: ProfileImage,
    location: Option<String>,
    error_message: Option<String>,
}

impl ProfileSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> &ProfileImage {
        &self.image
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Pick one of the default gallery images
    pub fn select_default_image(&mut self, index: usize) -> Result<(), ProfileError> {
        if index >= DEFAULT_IMAGES.len() {
            return Err(ProfileError::UnknownDefaultImage { index });
        }
        self.image = ProfileImage::Default { index };
        Ok(())
    }

    /// Let the user upload a picture; returns whether the image changed
    pub async fn upload_image(&mut self, picker: &dyn MediaPicker) -> Result<bool, ProfileError> {
        match picker.pick_image().await? {
            Some(source) => {
                self.image = ProfileImage::Uploaded { source };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Store the trimmed location; blank input is rejected and shown as an error
    pub fn submit_location(&mut self, location: &str) -> Result<&str, ProfileError> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            self.error_message = Some(ProfileError::InvalidLocation.to_string());
            return Err(ProfileError::InvalidLocation);
        }

        self.error_message = None;
        info!(event = "profile_location_submitted", "Profile location submitted");
        Ok(self.location.insert(trimmed.to_string()).as_str())
    }
}

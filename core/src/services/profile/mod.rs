//! Welcome step: profile picture and location

mod media;
mod setup;

pub use media::{ImageSource, MediaError, MediaPicker};
pub use setup::{
    ProfileError, ProfileImage, ProfileSetup, DEFAULT_IMAGES, INVALID_LOCATION,
    PLACEHOLDER_IMAGE,
};

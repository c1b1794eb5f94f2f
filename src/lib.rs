//! Typed, validated settings for a static site.
//!
//! Settings files are read by [`sitekit_config::Config`] and frozen into an
//! immutable [`Settings`] by [`Settings::from_config`].

pub use sitekit_config as config;

pub use crate::error::Error;
pub use crate::error::SettingError;
pub use crate::new::create_new_project;
pub use crate::sitekit_model::FeedTarget;
pub use crate::sitekit_model::Settings;
pub use crate::sitekit_model::StaticFile;

pub mod error;
pub mod sitekit_model;

mod new;

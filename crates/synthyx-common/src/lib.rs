//! Shared error taxonomy and configuration for Synthyx.

pub mod config;
pub mod error;

pub use config::{ArtifactConfig, Config};
pub use error::{Result, SynthyxError};

//! Error types for nativeplan-lib

use thiserror::Error;

use crate::capability::Edition;

/// A configuration the installed toolchain cannot honour. Aborts the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("Configuration option {option} is only supported in {required} (detected {detected}).")]
  UnsupportedEdition {
    option: &'static str,
    required: Edition,
    detected: Edition,
  },

  #[error(
    "Configuration option {option} requires {edition} for JDK {required} or later, but the detected JDK version is {detected}."
  )]
  UnsupportedVersion {
    option: &'static str,
    edition: Edition,
    required: u32,
    detected: u32,
  },
}

/// Errors returned by a resolution pass.
#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Result type for resolution operations
pub type Result<T> = std::result::Result<T, Error>;

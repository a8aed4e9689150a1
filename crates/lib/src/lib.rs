//! nativeplan-lib: resolution of native-image build settings
//!
//! Given a project model, the configurations of its sibling build steps, and
//! the user's options, this crate resolves what the native-image compiler is
//! invoked with:
//! - `config`: configuration trees and path reads
//! - `expression`: `${...}` property expressions in configuration values
//! - `project`: the project model and build step lookup
//! - `main_class`: main class discovery from packaging plugins
//! - `capability`: toolchain edition and version detection
//! - `sbom`: the augmented SBOM policy
//! - `plan`: one full resolution pass

pub mod args;
pub mod capability;
pub mod config;
pub mod error;
pub mod expression;
pub mod main_class;
pub mod plan;
pub mod project;
pub mod sbom;

pub use error::{ConfigError, Error, Result};

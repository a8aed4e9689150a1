//! Toolchain capability detection.
//!
//! Policy decisions depend on which native-image distribution is installed
//! and which JDK it is built on. Both facts come from the tool's
//! `--version` output. Detection never fails: anything that cannot be
//! determined collapses to the least capable answer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Marker present in the version output of Oracle GraalVM.
pub const ORACLE_GRAALVM_IDENTIFIER: &str = "Oracle GraalVM";

/// Toolchain distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
  Community,
  /// Oracle GraalVM, including the former Enterprise Edition.
  Oracle,
}

impl Edition {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Edition::Community => "GraalVM Community",
      Edition::Oracle => ORACLE_GRAALVM_IDENTIFIER,
    }
  }
}

impl fmt::Display for Edition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Snapshot of what the installed toolchain can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFacts {
  pub edition: Edition,
  pub major_version: u32,
}

impl CapabilityFacts {
  pub const fn new(edition: Edition, major_version: u32) -> Self {
    Self { edition, major_version }
  }

  /// The least capable toolchain: community edition, version 0.
  pub const fn unknown() -> Self {
    Self::new(Edition::Community, 0)
  }

  /// Derive facts from `native-image --version` output.
  pub fn from_version_output(output: &str) -> Self {
    Self {
      edition: parse_edition(output),
      major_version: parse_major_version(output),
    }
  }

  pub fn is_oracle(&self) -> bool {
    self.edition == Edition::Oracle
  }
}

/// Identify the distribution from version output.
pub fn parse_edition(output: &str) -> Edition {
  let legacy_ee = output
    .lines()
    .any(|line| line.starts_with("GraalVM ") && line.split_whitespace().any(|word| word == "EE"));

  if output.contains(ORACLE_GRAALVM_IDENTIFIER) || legacy_ee {
    Edition::Oracle
  } else {
    Edition::Community
  }
}

/// Extract the major JDK version from version output.
///
/// Understands the current format (`native-image 21.0.2 2024-01-16`) and the
/// legacy one (`GraalVM 22.3.0 Java 17 CE (Java Version 17.0.5+8-...)`).
/// Returns 0 when no version can be found.
pub fn parse_major_version(output: &str) -> u32 {
  for line in output.lines().map(str::trim) {
    if let Some(rest) = line.strip_prefix("native-image ") {
      if let Some(major) = leading_number(rest) {
        return major;
      }
    } else if line.starts_with("GraalVM ") {
      let java = line
        .split_once("Java Version ")
        .or_else(|| line.split_once(" Java "))
        .and_then(|(_, rest)| leading_number(rest));
      if let Some(major) = java {
        return major;
      }
    }
  }
  0
}

fn leading_number(s: &str) -> Option<u32> {
  let s = s.trim_start();
  let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
  s[..end].parse().ok()
}

/// Errors from querying the toolchain.
#[derive(Debug, Error)]
pub enum ProbeError {
  #[error("failed to run {path}: {source}")]
  Spawn {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("{path} --version exited with {status}")]
  Failed { path: String, status: std::process::ExitStatus },

  #[error("version output of {0} is not valid UTF-8")]
  InvalidOutput(String),
}

/// Source of the toolchain's version string.
pub trait VersionSource {
  fn version_output(&self) -> Result<String, ProbeError>;
}

/// Fixed version output, for hosts that already queried the toolchain.
pub struct StaticVersion(pub String);

impl VersionSource for StaticVersion {
  fn version_output(&self) -> Result<String, ProbeError> {
    Ok(self.0.clone())
  }
}

/// Queries a `native-image` executable.
#[derive(Debug, Clone)]
pub struct NativeImageCommand {
  executable: PathBuf,
}

impl NativeImageCommand {
  pub fn new(executable: impl Into<PathBuf>) -> Self {
    Self {
      executable: executable.into(),
    }
  }

  /// The `native-image` launcher inside a GraalVM installation.
  pub fn from_home(home: impl AsRef<Path>) -> Self {
    let name = if cfg!(windows) { "native-image.cmd" } else { "native-image" };
    Self::new(home.as_ref().join("bin").join(name))
  }

  pub fn executable(&self) -> &Path {
    &self.executable
  }
}

impl Default for NativeImageCommand {
  fn default() -> Self {
    Self::new("native-image")
  }
}

impl VersionSource for NativeImageCommand {
  fn version_output(&self) -> Result<String, ProbeError> {
    let path = self.executable.display().to_string();
    debug!(executable = %path, "querying native-image version");

    let output = Command::new(&self.executable)
      .arg("--version")
      .output()
      .map_err(|source| ProbeError::Spawn {
        path: path.clone(),
        source,
      })?;

    if !output.status.success() {
      return Err(ProbeError::Failed {
        path,
        status: output.status,
      });
    }

    String::from_utf8(output.stdout).map_err(|_| ProbeError::InvalidOutput(path))
  }
}

/// Detect capability facts, falling back to [`CapabilityFacts::unknown`] when
/// the toolchain cannot be queried.
pub fn detect(source: &(impl VersionSource + ?Sized)) -> CapabilityFacts {
  match source.version_output() {
    Ok(output) => {
      let facts = CapabilityFacts::from_version_output(&output);
      debug!(edition = %facts.edition, major_version = facts.major_version, "detected toolchain");
      facts
    }
    Err(e) => {
      warn!(error = %e, "could not determine toolchain version, assuming least capable toolchain");
      CapabilityFacts::unknown()
    }
  }
}

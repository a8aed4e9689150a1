mod probe;
mod resolve;

pub use probe::cmd_probe;
pub use resolve::{ResolveArgs, cmd_resolve};

use std::path::PathBuf;

use clap::Args;
use nativeplan_lib::capability::{NativeImageCommand, StaticVersion, VersionSource};

/// Where toolchain facts come from.
#[derive(Debug, Args)]
pub struct ToolchainArgs {
  /// Path to the native-image executable (default: $GRAALVM_HOME/bin/native-image, then PATH)
  #[arg(long, value_name = "PATH")]
  pub native_image: Option<PathBuf>,

  /// Use this text as the native-image version output instead of running the tool
  #[arg(long, value_name = "TEXT", conflicts_with = "native_image")]
  pub version_output: Option<String>,
}

impl ToolchainArgs {
  pub fn version_source(&self) -> Box<dyn VersionSource> {
    if let Some(output) = &self.version_output {
      return Box::new(StaticVersion(output.clone()));
    }
    if let Some(path) = &self.native_image {
      return Box::new(NativeImageCommand::new(path));
    }
    match std::env::var_os("GRAALVM_HOME") {
      Some(home) if !home.is_empty() => Box::new(NativeImageCommand::from_home(home)),
      _ => Box::new(NativeImageCommand::default()),
    }
  }
}

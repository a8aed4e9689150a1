//! Implementation of the `nativeplan probe` command.

use anyhow::Result;

use nativeplan_lib::capability::detect;
use nativeplan_lib::sbom;

use super::ToolchainArgs;
use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_probe(toolchain: &ToolchainArgs, format: OutputFormat) -> Result<()> {
  let facts = detect(&*toolchain.version_source());

  if format.is_json() {
    return print_json(&facts);
  }

  print_success("Toolchain");
  print_stat("Edition", facts.edition.as_str());
  print_stat("JDK version", &facts.major_version.to_string());
  print_stat("Augmented SBOM", if sbom::supported(&facts) { "supported" } else { "unsupported" });
  Ok(())
}

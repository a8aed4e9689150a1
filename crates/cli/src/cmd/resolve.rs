//! Implementation of the `nativeplan resolve` command.
//!
//! Loads a project model, detects the toolchain, and prints the main class
//! and arguments the native-image compiler would be invoked with.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use nativeplan_lib::capability::detect;
use nativeplan_lib::plan::{Plan, PlanOptions, resolve};
use nativeplan_lib::project::{Project, ProjectProperties};

use super::ToolchainArgs;
use crate::output::{OutputFormat, format_args_line, print_info, print_json, print_stat, print_success};

#[derive(Debug, Args)]
pub struct ResolveArgs {
  /// Project model (JSON)
  pub project: PathBuf,

  /// Main class to use instead of discovering one
  #[arg(long)]
  pub main_class: Option<String>,

  /// Force augmented SBOM generation on or off
  #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
  pub augmented_sbom: Option<bool>,

  /// Argument passed through to native-image (repeatable)
  #[arg(long = "build-arg", value_name = "ARG", allow_hyphen_values = true)]
  pub build_args: Vec<String>,

  /// Skip native-image generation
  #[arg(long)]
  pub skip: bool,

  /// Skip native-image generation for projects with pom packaging
  #[arg(long)]
  pub skip_for_pom: bool,

  /// User property for expressions, overriding project properties (repeatable)
  #[arg(short = 'D', long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
  pub properties: Vec<(String, String)>,

  #[command(flatten)]
  pub toolchain: ToolchainArgs,
}

impl ResolveArgs {
  fn options(&self) -> PlanOptions {
    PlanOptions {
      skip: self.skip,
      skip_for_pom: self.skip_for_pom,
      main_class: self.main_class.clone(),
      augmented_sbom: self.augmented_sbom.into(),
      build_args: self.build_args.clone(),
    }
  }
}

fn parse_property(s: &str) -> Result<(String, String), String> {
  match s.split_once('=') {
    Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
    _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
  }
}

fn load_project(path: &Path) -> Result<Project> {
  let content = fs::read_to_string(path).with_context(|| format!("Failed to read project: {}", path.display()))?;
  let project: Project =
    serde_json::from_str(&content).with_context(|| format!("Failed to parse project: {}", path.display()))?;
  debug!(
    path = %path.display(),
    build_steps = project.build_steps.len(),
    "loaded project model"
  );
  Ok(project)
}

pub fn cmd_resolve(args: &ResolveArgs, format: OutputFormat) -> Result<()> {
  let project = load_project(&args.project)?;
  let user_properties: BTreeMap<String, String> = args.properties.iter().cloned().collect();
  let properties = ProjectProperties::new(&project, &user_properties);
  let facts = detect(&*args.toolchain.version_source());

  let plan = resolve(&project, &args.options(), &properties, &facts)?;

  if format.is_json() {
    return print_json(&plan);
  }

  match plan {
    Plan::Skipped { reason } => {
      print_info(&format!("Skipping native-image generation ({}).", reason));
    }
    Plan::Resolved(outputs) => {
      print_success("Resolved native-image build");
      print_stat("Main class", outputs.main_class.as_deref().unwrap_or("(none)"));
      print_stat("Arguments", &format_args_line(outputs.arguments.iter()));
      print_stat(
        "Augmented SBOM",
        if outputs.sbom_generation_requested {
          "requested"
        } else {
          "not requested"
        },
      );
    }
  }

  Ok(())
}

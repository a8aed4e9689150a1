//! A single resolution pass for one project.
//!
//! Combines main class discovery and the SBOM policy into the arguments and
//! entry point handed to the native-image compiler.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Result;
use crate::args::BuildArgs;
use crate::capability::CapabilityFacts;
use crate::expression::PropertySource;
use crate::main_class::{default_probes, resolve_main_class};
use crate::project::Project;
use crate::sbom::{self, SbomOverride};

/// User-facing settings for a native build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanOptions {
  /// Skip the native build entirely.
  #[serde(rename = "skipNativeBuild")]
  pub skip: bool,

  /// Skip the native build for projects with `pom` packaging.
  #[serde(rename = "skipNativeBuildForPom")]
  pub skip_for_pom: bool,

  /// Explicit main class; disables discovery.
  pub main_class: Option<String>,

  #[serde(rename = "augmentedSBOM")]
  pub augmented_sbom: SbomOverride,

  /// Raw arguments passed through to the compiler.
  pub build_args: Vec<String>,
}

/// Why a pass produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
  Disabled,
  PomPackaging,
}

impl SkipReason {
  /// The option responsible for the skip.
  pub const fn parameter(&self) -> &'static str {
    match self {
      SkipReason::Disabled => "skipNativeBuild",
      SkipReason::PomPackaging => "skipNativeBuildForPom",
    }
  }
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "parameter '{}' is true", self.parameter())
  }
}

/// Everything the compiler invocation needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOutputs {
  pub main_class: Option<String>,
  pub arguments: BuildArgs,
  /// Whether the caller should generate an augmented SBOM.
  pub sbom_generation_requested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Plan {
  Skipped { reason: SkipReason },
  Resolved(ResolvedOutputs),
}

impl Plan {
  pub fn outputs(&self) -> Option<&ResolvedOutputs> {
    match self {
      Plan::Resolved(outputs) => Some(outputs),
      Plan::Skipped { .. } => None,
    }
  }
}

/// Resolve the native build for `project`.
///
/// # Errors
///
/// Returns an error when the options request something the toolchain
/// described by `facts` cannot do.
pub fn resolve(
  project: &Project,
  options: &PlanOptions,
  properties: &impl PropertySource,
  facts: &CapabilityFacts,
) -> Result<Plan> {
  if let Some(reason) = skip_reason(project, options) {
    info!(reason = %reason, "skipping native-image generation");
    return Ok(Plan::Skipped { reason });
  }

  let mut arguments: BuildArgs = options.build_args.iter().cloned().collect();

  let main_class = resolve_main_class(options.main_class.as_deref(), &default_probes(), project, properties);

  let decision = sbom::decide(options.augmented_sbom, facts, &mut arguments)?;

  Ok(Plan::Resolved(ResolvedOutputs {
    main_class,
    arguments,
    sbom_generation_requested: decision.requested,
  }))
}

fn skip_reason(project: &Project, options: &PlanOptions) -> Option<SkipReason> {
  if options.skip {
    Some(SkipReason::Disabled)
  } else if options.skip_for_pom && project.is_pom() {
    Some(SkipReason::PomPackaging)
  } else {
    None
  }
}

//! Main class discovery from sibling build steps.
//!
//! When no main class is configured explicitly, packaging plugins often
//! declare one already (a shade transformer, an assembly or jar manifest).
//! Each place to look is a [`Probe`]; probes are tried in order and the first
//! one that yields a resolvable value wins.

use std::fmt;

use tracing::info;

use crate::config::ConfigNode;
use crate::expression::{self, PropertySource};
use crate::project::{PluginKey, StepLocator};

/// Group id of the Apache Maven core plugins.
pub const MAVEN_PLUGINS_GROUP: &str = "org.apache.maven.plugins";

/// Which configuration of a build step a probe reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
  /// The step's own configuration.
  Direct,
  /// Each execution's configuration, in declaration order.
  PerExecution,
}

/// One place a main class may be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
  pub step: PluginKey,
  pub mode: SearchMode,
  pub path: Vec<String>,
}

impl Probe {
  pub fn new(step: PluginKey, mode: SearchMode, path: &[&str]) -> Self {
    Self {
      step,
      mode,
      path: path.iter().map(|s| s.to_string()).collect(),
    }
  }

  /// Read this probe against `locator`, returning the first resolvable value.
  pub fn evaluate(&self, locator: &impl StepLocator, properties: &impl PropertySource) -> Option<String> {
    let step = locator.find_step(&self.step)?;

    let read = |config: Option<&ConfigNode>| {
      let raw = config?.read(&self.path)?;
      expression::resolve(raw, properties)
    };

    match self.mode {
      SearchMode::Direct => read(step.configuration.as_ref()),
      SearchMode::PerExecution => step
        .executions
        .iter()
        .find_map(|execution| read(execution.configuration.as_ref())),
    }
  }
}

impl fmt::Display for Probe {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self.step, self.path.join(" -> "))
  }
}

/// The probes consulted when no main class is configured: the shade
/// plugin's manifest transformer, then the assembly and jar plugin manifests.
pub fn default_probes() -> Vec<Probe> {
  vec![
    Probe::new(
      PluginKey::new(MAVEN_PLUGINS_GROUP, "maven-shade-plugin"),
      SearchMode::PerExecution,
      &["transformers", "transformer", "mainClass"],
    ),
    Probe::new(
      PluginKey::new(MAVEN_PLUGINS_GROUP, "maven-assembly-plugin"),
      SearchMode::Direct,
      &["archive", "manifest", "mainClass"],
    ),
    Probe::new(
      PluginKey::new(MAVEN_PLUGINS_GROUP, "maven-jar-plugin"),
      SearchMode::Direct,
      &["archive", "manifest", "mainClass"],
    ),
  ]
}

/// Resolve the main class.
///
/// An explicit value is returned untouched without consulting any probe.
pub fn resolve_main_class(
  explicit: Option<&str>,
  probes: &[Probe],
  locator: &impl StepLocator,
  properties: &impl PropertySource,
) -> Option<String> {
  if let Some(main_class) = explicit {
    return Some(main_class.to_string());
  }

  probes.iter().find_map(|probe| {
    let main_class = probe.evaluate(locator, properties)?;
    info!(
      plugin = %probe.step,
      path = %probe.path.join(" -> "),
      main_class = %main_class,
      "obtained main class from plugin"
    );
    Some(main_class)
  })
}

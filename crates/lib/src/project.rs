//! Project model and build step lookup.
//!
//! A [`Project`] is a read-only snapshot of the host build's model: its
//! coordinates, packaging, properties, and the build steps (plugins) it
//! declares. Each step has a direct configuration and any number of
//! executions, each with its own configuration.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::config::ConfigNode;
use crate::expression::{PropertySource, PropertyValue};

/// Stable identifier of a build step: `groupId:artifactId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginKey {
  pub group_id: String,
  pub artifact_id: String,
}

impl PluginKey {
  pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
    Self {
      group_id: group_id.into(),
      artifact_id: artifact_id.into(),
    }
  }
}

impl fmt::Display for PluginKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.group_id, self.artifact_id)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid plugin key '{0}', expected 'groupId:artifactId'")]
pub struct InvalidPluginKey(pub String);

impl FromStr for PluginKey {
  type Err = InvalidPluginKey;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once(':') {
      Some((group, artifact)) if !group.is_empty() && !artifact.is_empty() && !artifact.contains(':') => {
        Ok(PluginKey::new(group, artifact))
      }
      _ => Err(InvalidPluginKey(s.to_string())),
    }
  }
}

impl Serialize for PluginKey {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for PluginKey {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
  }
}

/// One execution of a build step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub configuration: Option<ConfigNode>,
}

/// A build step (plugin) declared by the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
  pub key: PluginKey,
  #[serde(default)]
  pub configuration: Option<ConfigNode>,
  #[serde(default)]
  pub executions: Vec<Execution>,
}

impl BuildStep {
  pub fn new(key: PluginKey) -> Self {
    Self {
      key,
      configuration: None,
      executions: Vec::new(),
    }
  }

  pub fn with_configuration(mut self, configuration: ConfigNode) -> Self {
    self.configuration = Some(configuration);
    self
  }

  pub fn with_execution(mut self, id: impl Into<String>, configuration: Option<ConfigNode>) -> Self {
    self.executions.push(Execution {
      id: id.into(),
      configuration,
    });
    self
  }
}

/// Lookup of build steps by key.
pub trait StepLocator {
  fn find_step(&self, key: &PluginKey) -> Option<&BuildStep>;
}

/// Snapshot of the project being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  #[serde(default)]
  pub group_id: String,
  #[serde(default)]
  pub artifact_id: String,
  #[serde(default)]
  pub version: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default = "default_packaging")]
  pub packaging: String,
  #[serde(default)]
  pub basedir: Option<String>,
  #[serde(default)]
  pub properties: BTreeMap<String, String>,
  #[serde(default)]
  pub build_steps: Vec<BuildStep>,
}

fn default_packaging() -> String {
  "jar".to_string()
}

impl Project {
  pub fn is_pom(&self) -> bool {
    self.packaging == "pom"
  }
}

impl StepLocator for Project {
  fn find_step(&self, key: &PluginKey) -> Option<&BuildStep> {
    self.build_steps.iter().find(|step| &step.key == key)
  }
}

/// Properties visible to expressions for one build of a project.
///
/// User (session) properties win over the project's built-in values, which
/// win over properties declared in the project.
pub struct ProjectProperties<'a> {
  project: &'a Project,
  user_properties: &'a BTreeMap<String, String>,
}

impl<'a> ProjectProperties<'a> {
  pub fn new(project: &'a Project, user_properties: &'a BTreeMap<String, String>) -> Self {
    Self {
      project,
      user_properties,
    }
  }

  fn builtin(&self, name: &str) -> Option<PropertyValue> {
    let text = |s: &str| Some(PropertyValue::Text(s.to_string()));
    match name {
      "project" => Some(PropertyValue::Structured),
      "project.groupId" => text(&self.project.group_id),
      "project.artifactId" => text(&self.project.artifact_id),
      "project.version" => text(&self.project.version),
      "project.packaging" => text(&self.project.packaging),
      "project.name" => self.project.name.as_deref().and_then(text),
      "basedir" | "project.basedir" => self.project.basedir.as_deref().and_then(text),
      _ => None,
    }
  }
}

impl PropertySource for ProjectProperties<'_> {
  fn lookup(&self, name: &str) -> Option<PropertyValue> {
    self
      .user_properties
      .lookup(name)
      .or_else(|| self.builtin(name))
      .or_else(|| self.project.properties.lookup(name))
  }
}

//! Arguments handed to the native-image compiler.

use serde::Serialize;

/// Ordered, append-only list of compiler arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildArgs(Vec<String>);

impl BuildArgs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, arg: impl Into<String>) {
    self.0.push(arg.into());
  }

  /// Whether any argument satisfies `predicate`.
  pub fn any(&self, predicate: impl Fn(&str) -> bool) -> bool {
    self.0.iter().any(|arg| predicate(arg))
  }

  /// Whether any argument contains `fragment`, so `--enable-sbom` matches
  /// `--enable-sbom=embed,export`.
  pub fn contains_fragment(&self, fragment: &str) -> bool {
    self.any(|arg| arg.contains(fragment))
  }

  /// Append `arg` unless an argument containing it is already present.
  /// Returns whether it was appended.
  pub fn push_unless_present(&mut self, arg: &str) -> bool {
    if self.contains_fragment(arg) {
      return false;
    }
    self.push(arg);
    true
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn as_slice(&self) -> &[String] {
    &self.0
  }

  pub fn into_vec(self) -> Vec<String> {
    self.0
  }
}

impl<S: Into<String>> FromIterator<S> for BuildArgs {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

impl<S: Into<String>> Extend<S> for BuildArgs {
  fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
    self.0.extend(iter.into_iter().map(Into::into));
  }
}

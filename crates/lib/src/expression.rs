//! Property expression evaluation for configuration values.
//!
//! Plugin configuration values may reference build properties using the host
//! build tool's `${name}` syntax. This module parses those strings and
//! evaluates them against a [`PropertySource`]. Evaluation is all-or-nothing:
//! a value either resolves to literal text or is reported as unresolved.
//!
//! # Syntax
//!
//! - `${name}` - the value of property `name`
//! - `$${` - a literal `${` (escape)
//!
//! Any other `$` passes through unchanged.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use nativeplan_lib::expression::resolve;
//!
//! let mut props = BTreeMap::new();
//! props.insert("app.main".to_string(), "com.example.App".to_string());
//!
//! assert_eq!(resolve("${app.main}", &props), Some("com.example.App".to_string()));
//! assert_eq!(resolve("${missing}", &props), None);
//! ```

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::debug;

/// The value a property lookup produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
  /// Plain text.
  Text(String),

  /// A structured value (an object or list in the host model). Never usable
  /// as a configuration string.
  Structured,
}

/// Source of property values for expression evaluation.
pub trait PropertySource {
  /// Look up a property by name. `None` means the property is unknown.
  fn lookup(&self, name: &str) -> Option<PropertyValue>;
}

impl PropertySource for BTreeMap<String, String> {
  fn lookup(&self, name: &str) -> Option<PropertyValue> {
    self.get(name).cloned().map(PropertyValue::Text)
  }
}

impl PropertySource for HashMap<String, String> {
  fn lookup(&self, name: &str) -> Option<PropertyValue> {
    self.get(name).cloned().map(PropertyValue::Text)
  }
}

/// A segment of a parsed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text
  Literal(String),

  /// A `${...}` reference, holding the property name
  Expression(String),
}

/// Reasons an expression could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
  #[error("unclosed expression at position {0}")]
  Unclosed(usize),

  #[error("empty expression at position {0}")]
  Empty(usize),

  #[error("unknown property: {0}")]
  UnknownProperty(String),

  #[error("property '{0}' is not a string")]
  NotText(String),
}

/// Parse a configuration value into literal and expression segments.
///
/// # Errors
///
/// Returns an error if an expression is left unclosed or names nothing.
pub fn parse(input: &str) -> Result<Vec<Segment>, ExpressionError> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut chars = input.char_indices().peekable();

  while let Some((pos, ch)) = chars.next() {
    if ch != '$' {
      literal.push(ch);
      continue;
    }

    match chars.peek() {
      Some((_, '$')) => {
        chars.next();
        if let Some((_, '{')) = chars.peek() {
          // $${ -> literal ${
          chars.next();
          literal.push_str("${");
        } else {
          literal.push_str("$$");
        }
      }
      Some((_, '{')) => {
        chars.next();

        if !literal.is_empty() {
          segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }

        let mut name = String::new();
        let mut closed = false;
        for (_, c) in chars.by_ref() {
          if c == '}' {
            closed = true;
            break;
          }
          name.push(c);
        }

        if !closed {
          return Err(ExpressionError::Unclosed(pos));
        }
        let name = name.trim();
        if name.is_empty() {
          return Err(ExpressionError::Empty(pos));
        }
        segments.push(Segment::Expression(name.to_string()));
      }
      _ => literal.push('$'),
    }
  }

  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  Ok(segments)
}

/// Evaluate a configuration value against `source`.
///
/// # Errors
///
/// Returns an error if parsing fails, a property is unknown, or a property
/// resolves to a structured value.
pub fn evaluate(input: &str, source: &(impl PropertySource + ?Sized)) -> Result<String, ExpressionError> {
  let segments = parse(input)?;
  let mut result = String::new();

  for segment in &segments {
    match segment {
      Segment::Literal(text) => result.push_str(text),
      Segment::Expression(name) => match source.lookup(name) {
        Some(PropertyValue::Text(value)) => result.push_str(&value),
        Some(PropertyValue::Structured) => return Err(ExpressionError::NotText(name.clone())),
        None => return Err(ExpressionError::UnknownProperty(name.clone())),
      },
    }
  }

  Ok(result)
}

/// Evaluate a configuration value, treating any failure as unresolved.
pub fn resolve(input: &str, source: &(impl PropertySource + ?Sized)) -> Option<String> {
  match evaluate(input, source) {
    Ok(value) => Some(value),
    Err(e) => {
      debug!(value = %input, error = %e, "configuration value is unresolved");
      None
    }
  }
}

//! Plugin configuration trees.
//!
//! Build steps carry their configuration as a nested tree of named children
//! with string leaves, the shape a POM `<configuration>` block takes once
//! parsed. Readers walk an explicit path through the tree; a missing child at
//! any depth is an ordinary outcome and yields `None`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A node in a configuration tree.
///
/// Deserializes from JSON where strings become leaves and objects become
/// branches, so `{"archive": {"manifest": {"mainClass": "app.Main"}}}` is a
/// three-level branch ending in a leaf. Numbers and booleans become leaves
/// holding their text, arrays are repeated elements of the same name, and
/// `null` is an opaque node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
  /// Text content of an element.
  Leaf(String),

  /// Named child elements.
  Branch(BTreeMap<String, ConfigNode>),

  /// Several elements sharing one name. Lookups see only the first.
  Repeated(Vec<ConfigNode>),

  /// Content with no readable value.
  Opaque,
}

impl ConfigNode {
  /// Create a leaf node.
  pub fn leaf(value: impl Into<String>) -> Self {
    ConfigNode::Leaf(value.into())
  }

  /// Create a branch node from `(name, child)` pairs.
  pub fn branch<K, I>(children: I) -> Self
  where
    K: Into<String>,
    I: IntoIterator<Item = (K, ConfigNode)>,
  {
    ConfigNode::Branch(children.into_iter().map(|(k, v)| (k.into(), v)).collect())
  }

  /// The direct child with the given name, if this is a branch that has one.
  ///
  /// When the name is repeated, the first element is returned.
  pub fn child(&self, name: &str) -> Option<&ConfigNode> {
    match self {
      ConfigNode::Branch(children) => children.get(name)?.first(),
      ConfigNode::Leaf(_) | ConfigNode::Repeated(_) | ConfigNode::Opaque => None,
    }
  }

  fn first(&self) -> Option<&ConfigNode> {
    match self {
      ConfigNode::Repeated(items) => items.first()?.first(),
      node => Some(node),
    }
  }

  /// The leaf value of this node, if it is a leaf.
  pub fn value(&self) -> Option<&str> {
    match self {
      ConfigNode::Leaf(value) => Some(value),
      ConfigNode::Branch(_) | ConfigNode::Repeated(_) | ConfigNode::Opaque => None,
    }
  }

  /// Walk `path` from this node and return the leaf value at the end.
  ///
  /// An empty path reads this node's own value.
  pub fn read<S: AsRef<str>>(&self, path: &[S]) -> Option<&str> {
    let mut node = self;
    for name in path {
      node = node.child(name.as_ref())?;
    }
    node.value()
  }
}

impl<'de> Deserialize<'de> for ConfigNode {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(ConfigNodeVisitor)
  }
}

struct ConfigNodeVisitor;

impl<'de> Visitor<'de> for ConfigNodeVisitor {
  type Value = ConfigNode;

  fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("a configuration value")
  }

  fn visit_str<E: de::Error>(self, v: &str) -> Result<ConfigNode, E> {
    Ok(ConfigNode::leaf(v))
  }

  fn visit_string<E: de::Error>(self, v: String) -> Result<ConfigNode, E> {
    Ok(ConfigNode::Leaf(v))
  }

  fn visit_bool<E: de::Error>(self, v: bool) -> Result<ConfigNode, E> {
    Ok(ConfigNode::Leaf(v.to_string()))
  }

  fn visit_i64<E: de::Error>(self, v: i64) -> Result<ConfigNode, E> {
    Ok(ConfigNode::Leaf(v.to_string()))
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<ConfigNode, E> {
    Ok(ConfigNode::Leaf(v.to_string()))
  }

  fn visit_f64<E: de::Error>(self, v: f64) -> Result<ConfigNode, E> {
    Ok(ConfigNode::Leaf(v.to_string()))
  }

  fn visit_unit<E: de::Error>(self) -> Result<ConfigNode, E> {
    Ok(ConfigNode::Opaque)
  }

  fn visit_none<E: de::Error>(self) -> Result<ConfigNode, E> {
    Ok(ConfigNode::Opaque)
  }

  fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ConfigNode, D::Error> {
    ConfigNode::deserialize(deserializer)
  }

  fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ConfigNode, A::Error> {
    let mut items = Vec::new();
    while let Some(item) = seq.next_element()? {
      items.push(item);
    }
    Ok(ConfigNode::Repeated(items))
  }

  fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ConfigNode, A::Error> {
    let mut children = BTreeMap::new();
    while let Some((name, child)) = map.next_entry::<String, ConfigNode>()? {
      // first occurrence of a name wins
      children.entry(name).or_insert(child);
    }
    Ok(ConfigNode::Branch(children))
  }
}

/// Read `path` from a possibly absent configuration.
pub fn read<'a, S: AsRef<str>>(config: Option<&'a ConfigNode>, path: &[S]) -> Option<&'a str> {
  config?.read(path)
}

//! Option trees: the nested key-value structure every field carries.
//!
//! Options flow through four layers (global defaults, type defaults, caller
//! options, render-time overrides), each merged over the previous with
//! [`merge::merge`]. Keys preserve insertion order so rendered output is
//! deterministic.

pub mod merge;
pub mod path;

use indexmap::IndexMap;
use serde::Serialize;

/// A single value in an option tree.
///
/// Scalars, lists, and nested trees cover everything templates consume.
/// `Null` is distinct from an absent key: a `Null` entry survives merging
/// but is skipped when serialized as an HTML attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<OptionValue>),
    Tree(OptionTree),
}

impl OptionValue {
    /// Returns the string slice if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested tree if this is a `Tree` value.
    pub fn as_tree(&self) -> Option<&OptionTree> {
        match self {
            OptionValue::Tree(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the nested tree mutably if this is a `Tree` value.
    pub fn as_tree_mut(&mut self) -> Option<&mut OptionTree> {
        match self {
            OptionValue::Tree(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool` value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Stringifies a scalar value for attribute output.
    ///
    /// `Null`, lists, and trees have no scalar form and return `None`.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            OptionValue::Bool(b) => Some(b.to_string()),
            OptionValue::Int(i) => Some(i.to_string()),
            OptionValue::Float(f) => Some(f.to_string()),
            OptionValue::Str(s) => Some(s.clone()),
            OptionValue::Null | OptionValue::List(_) | OptionValue::Tree(_) => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(i: i64) -> Self {
        OptionValue::Int(i)
    }
}

impl From<f64> for OptionValue {
    fn from(f: f64) -> Self {
        OptionValue::Float(f)
    }
}

impl From<OptionTree> for OptionValue {
    fn from(t: OptionTree) -> Self {
        OptionValue::Tree(t)
    }
}

/// An insertion-ordered mapping from option keys to [`OptionValue`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OptionTree {
    entries: IndexMap<String, OptionValue>,
}

impl OptionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `key`. An existing key keeps its position;
    /// a new key is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style insert for literal trees in tests and defaults.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionValue> {
        self.entries.get_mut(key)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for OptionTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = OptionTree::new();
        for (k, v) in iter {
            tree.insert(k, v);
        }
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let mut tree = OptionTree::new();
        tree.insert("b", 1i64);
        tree.insert("a", 2i64);
        tree.insert("c", 3i64);

        let keys: Vec<_> = tree.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut tree = OptionTree::new();
        tree.insert("a", 1i64);
        tree.insert("b", 2i64);
        tree.insert("a", 3i64);

        let keys: Vec<_> = tree.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(tree.get("a"), Some(&OptionValue::Int(3)));
    }

    #[test]
    fn remove_preserves_order_of_rest() {
        let mut tree = OptionTree::new()
            .with("a", 1i64)
            .with("b", 2i64)
            .with("c", 3i64);
        let removed = tree.remove("b");

        assert_eq!(removed, Some(OptionValue::Int(2)));
        let keys: Vec<_> = tree.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn scalar_string_forms() {
        assert_eq!(OptionValue::Int(5).to_scalar_string(), Some("5".into()));
        assert_eq!(
            OptionValue::Bool(true).to_scalar_string(),
            Some("true".into())
        );
        assert_eq!(OptionValue::Null.to_scalar_string(), None);
        assert_eq!(OptionValue::List(vec![]).to_scalar_string(), None);
    }
}

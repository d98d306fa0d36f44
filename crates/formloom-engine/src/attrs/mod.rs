//! HTML attribute maps and their string serialization.
//!
//! Templates receive pre-serialized attribute strings (`wrapperAttrs`,
//! `labelAttrs`, `errorAttrs`) rather than raw trees, so serialization
//! order and null handling are part of the rendering contract.

use indexmap::IndexMap;

use crate::options::{OptionTree, OptionValue};

/// An insertion-ordered map of HTML attribute names to values.
///
/// A `None` value marks an attribute that exists in the map but must not
/// render at all (not even as `key=""`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrMap {
    entries: IndexMap<String, Option<String>>,
}

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute. Re-setting an existing name keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), Some(value.into()));
    }

    /// Sets an attribute that may be null (skipped on serialization).
    pub fn set_opt(&mut self, name: impl Into<String>, value: Option<String>) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Option<String>)> {
        self.entries.iter()
    }

    /// Extracts renderable attributes from an option subtree.
    ///
    /// Scalars are stringified; `Null` entries are carried as skipped
    /// attributes; nested trees and lists have no attribute form and are
    /// dropped.
    pub fn from_subtree(tree: &OptionTree) -> Self {
        let mut attrs = AttrMap::new();
        for (key, value) in tree.iter() {
            match value {
                OptionValue::Null => attrs.set_opt(key.clone(), None),
                OptionValue::List(_) | OptionValue::Tree(_) => {}
                scalar => attrs.set_opt(key.clone(), scalar.to_scalar_string()),
            }
        }
        attrs
    }

    /// Serializes to `key="value" ` pairs, one trailing space each.
    ///
    /// Null-valued entries are skipped entirely. Values are escaped for a
    /// double-quoted attribute position. An empty map yields `""`.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.entries {
            let Some(value) = value else { continue };
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push_str("\" ");
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = AttrMap::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serialize_empty_map() {
        assert_eq!(AttrMap::new().serialize(), "");
    }

    #[test]
    fn serialize_orders_by_insertion() {
        let mut attrs = AttrMap::new();
        attrs.set("required", "required");
        attrs.set("min", "18");
        attrs.set("max", "65");
        assert_eq!(
            attrs.serialize(),
            "required=\"required\" min=\"18\" max=\"65\" "
        );
    }

    #[test]
    fn null_entries_are_skipped_not_emptied() {
        let mut attrs = AttrMap::new();
        attrs.set("class", "form-control");
        attrs.set_opt("placeholder", None);
        attrs.set("id", "age");

        let out = attrs.serialize();
        assert_eq!(out, "class=\"form-control\" id=\"age\" ");
        assert!(!out.contains("placeholder"));
    }

    #[test]
    fn values_cannot_break_out_of_quotes() {
        let mut attrs = AttrMap::new();
        attrs.set("class", "a\"b");
        let out = attrs.serialize();
        assert!(!out.contains("a\"b\""));
        assert_eq!(out, "class=\"a&quot;b\" ");
    }

    #[test]
    fn from_subtree_keeps_scalars_drops_structures() {
        let tree = OptionTree::new()
            .with("class", "form-group")
            .with("data-count", 3i64)
            .with("nested", OptionTree::new().with("x", 1i64))
            .with("tags", OptionValue::List(vec!["a".into()]))
            .with("hidden", OptionValue::Null);

        let attrs = AttrMap::from_subtree(&tree);
        assert_eq!(attrs.get("class"), Some("form-group"));
        assert_eq!(attrs.get("data-count"), Some("3"));
        assert!(!attrs.contains("nested"));
        assert!(!attrs.contains("tags"));
        // present but skipped
        assert!(attrs.contains("hidden"));
        assert_eq!(attrs.get("hidden"), None);
        assert_eq!(attrs.serialize(), "class=\"form-group\" data-count=\"3\" ");
    }

    #[test]
    fn reset_keeps_position() {
        let mut attrs = AttrMap::new();
        attrs.set("min", "1");
        attrs.set("max", "9");
        attrs.set("min", "2");
        assert_eq!(attrs.serialize(), "min=\"2\" max=\"9\" ");
    }
}

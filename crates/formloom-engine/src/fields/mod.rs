//! Field descriptors, kinds, and the type registry/resolver around them.

pub mod registry;
pub mod resolver;

use serde::Serialize;

use crate::options::OptionTree;

/// Classification of a field type for constraint derivation.
///
/// The kind decides which attribute form a rule emits: `min:5` becomes
/// `min="5"` on a numeric field but `minlength="5"` on a text field, and
/// only date-like fields honor `after`/`before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Text,
    Numeric,
    DateLike,
}

impl FieldKind {
    /// Derives the kind from a declared field type name.
    pub fn from_type(field_type: &str) -> Self {
        match field_type {
            "number" | "range" => FieldKind::Numeric,
            "date" | "datetime" | "datetime-local" => FieldKind::DateLike,
            _ => FieldKind::Text,
        }
    }
}

/// A declared form field: name, type, label, and caller-supplied options.
///
/// Descriptors live for the duration of a form's construction and may be
/// re-resolved on every render call; resolution never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: String,
    pub label: String,
    pub options: OptionTree,
}

impl FieldDescriptor {
    /// Creates a descriptor with a label humanized from the field name.
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let name = name.into();
        let label = humanize(&name);
        Self {
            name,
            field_type: field_type.into(),
            label,
            options: OptionTree::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_options(mut self, options: OptionTree) -> Self {
        self.options = options;
        self
    }

    pub fn kind(&self) -> FieldKind {
        FieldKind::from_type(&self.field_type)
    }
}

/// Turns a field name into a display label: separators become spaces and
/// the first letter is capitalized (`first_name` -> `First name`).
pub fn humanize(name: &str) -> String {
    let spaced = name.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("number", FieldKind::Numeric)]
    #[case("range", FieldKind::Numeric)]
    #[case("date", FieldKind::DateLike)]
    #[case("datetime", FieldKind::DateLike)]
    #[case("datetime-local", FieldKind::DateLike)]
    #[case("text", FieldKind::Text)]
    #[case("email", FieldKind::Text)]
    #[case("file", FieldKind::Text)]
    #[case("time", FieldKind::Text)]
    fn kind_derivation(#[case] field_type: &str, #[case] expected: FieldKind) {
        assert_eq!(FieldKind::from_type(field_type), expected);
    }

    #[rstest]
    #[case("first_name", "First name")]
    #[case("email", "Email")]
    #[case("date-of-birth", "Date of birth")]
    #[case("", "")]
    fn humanized_labels(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(humanize(name), expected);
    }

    #[test]
    fn descriptor_defaults_label_from_name() {
        let field = FieldDescriptor::new("first_name", "text");
        assert_eq!(field.label, "First name");
        assert_eq!(field.kind(), FieldKind::Text);
    }

    #[test]
    fn descriptor_label_override() {
        let field = FieldDescriptor::new("dob", "date").with_label("Date of birth");
        assert_eq!(field.label, "Date of birth");
        assert_eq!(field.kind(), FieldKind::DateLike);
    }
}

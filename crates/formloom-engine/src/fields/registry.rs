//! The field-type registry: built-in types plus runtime-registered custom
//! types.
//!
//! The registry is an explicit owned object, constructed once at
//! application start and read-only afterwards. Custom types typically come
//! from configuration and are registered before the first `resolve` call.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use super::FieldKind;
use crate::options::{OptionTree, OptionValue};

/// A registered field type: the template its fields render with, the kind
/// used for constraint derivation, and its type-level default options.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldType {
    pub name: String,
    pub template: String,
    pub kind: FieldKind,
    pub defaults: OptionTree,
}

impl FieldType {
    /// A type whose kind derives from its name and which carries no
    /// type-level defaults. Custom types registered from configuration
    /// take this form.
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        let name = name.into();
        let kind = FieldKind::from_type(&name);
        Self {
            name,
            template: template.into(),
            kind,
            defaults: OptionTree::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: OptionTree) -> Self {
        self.defaults = defaults;
        self
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FieldTypeError {
    #[error("field type `{name}` is already registered")]
    Duplicate { name: String },

    #[error("unsupported field type `{requested}` (known types: {})", .known.join(", "))]
    Unsupported {
        requested: String,
        known: Vec<String>,
    },
}

/// Maps declared type names to [`FieldType`] entries.
#[derive(Debug, Clone, Default)]
pub struct FieldTypeRegistry {
    types: IndexMap<String, FieldType>,
}

impl FieldTypeRegistry {
    /// An empty registry with no types at all. Mostly useful in tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in field types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for field_type in builtin_types() {
            // Built-in names are distinct by construction.
            let _ = registry.register(field_type);
        }
        registry
    }

    /// Registers a field type. Fails if the name is already taken, whether
    /// by a built-in or an earlier custom registration.
    pub fn register(&mut self, field_type: FieldType) -> Result<(), FieldTypeError> {
        if self.types.contains_key(&field_type.name) {
            return Err(FieldTypeError::Duplicate {
                name: field_type.name.clone(),
            });
        }
        debug!(
            "registering field type `{}` -> `{}`",
            field_type.name, field_type.template
        );
        self.types.insert(field_type.name.clone(), field_type);
        Ok(())
    }

    /// Convenience for config-driven registration: name plus template id.
    pub fn register_custom(
        &mut self,
        name: impl Into<String>,
        template: impl Into<String>,
    ) -> Result<(), FieldTypeError> {
        self.register(FieldType::new(name, template))
    }

    /// Resolves a declared type name, listing every known type on failure.
    pub fn resolve(&self, name: &str) -> Result<&FieldType, FieldTypeError> {
        self.types
            .get(name)
            .ok_or_else(|| FieldTypeError::Unsupported {
                requested: name.to_string(),
                known: self.known_types(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Every registered type name, in registration order.
    pub fn known_types(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }
}

/// The built-in field types and their type-level defaults.
fn builtin_types() -> Vec<FieldType> {
    let simple = [
        "text", "email", "url", "tel", "search", "password", "textarea", "number", "range",
        "date", "datetime-local", "time", "file",
    ];

    let mut types: Vec<FieldType> = simple
        .iter()
        .map(|name| FieldType::new(*name, format!("fields/{name}")))
        .collect();

    types.push(
        FieldType::new("hidden", "fields/hidden").with_defaults(
            OptionTree::new().with("showLabel", false).with("showError", false),
        ),
    );
    types.push(FieldType::new("select", "fields/select").with_defaults(choice_defaults()));
    types.push(FieldType::new("choice", "fields/choice").with_defaults(
        choice_defaults().with("expanded", false).with("multiple", false),
    ));
    types.push(FieldType::new("checkbox", "fields/checkbox").with_defaults(
        OptionTree::new().with("value", 1i64).with("checked", false),
    ));
    types.push(FieldType::new("radio", "fields/radio").with_defaults(
        OptionTree::new().with("value", 1i64).with("checked", false),
    ));
    for name in ["button", "submit", "reset"] {
        types.push(FieldType::new(name, "fields/button").with_defaults(
            OptionTree::new()
                .with("showLabel", false)
                .with("attr", OptionTree::new().with("type", name)),
        ));
    }
    types.push(
        FieldType::new("static", "fields/static")
            .with_defaults(OptionTree::new().with("tag", "div")),
    );

    types
}

fn choice_defaults() -> OptionTree {
    OptionTree::new()
        .with("choices", OptionValue::List(Vec::new()))
        .with("selected", OptionValue::Null)
        .with("empty_value", OptionValue::Null)
}

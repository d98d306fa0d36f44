//! Per-field option resolution: defaults layering, attribute-string
//! preparation, template extraction, and error-class injection.

use log::trace;
use serde::Serialize;

use super::registry::FieldType;
use crate::attrs::AttrMap;
use crate::options::{OptionTree, OptionValue, merge::merge_into, path};
use crate::render::ErrorSource;

/// Globally configured CSS classes and display toggles.
///
/// These seed the first (lowest-precedence) merge layer; any of them can be
/// overridden per type, per field, or per render call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDefaults {
    pub wrapper_class: String,
    pub wrapper_error_class: String,
    pub label_class: String,
    pub field_class: String,
    pub error_class: String,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            wrapper_class: "form-group".to_string(),
            wrapper_error_class: "has-error".to_string(),
            label_class: "control-label".to_string(),
            field_class: "form-control".to_string(),
            error_class: "text-danger".to_string(),
        }
    }
}

/// The outcome of resolving one field's options.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// The fully merged option tree, with `wrapperAttrs`/`errorAttrs`/
    /// `labelAttrs` strings injected.
    pub options: OptionTree,
    /// A `template` option extracted from the merged tree, if any.
    pub template: Option<String>,
}

/// Computes a field's effective render-time options.
pub struct FieldOptionResolver<'e> {
    defaults: StyleDefaults,
    errors: &'e dyn ErrorSource,
}

impl<'e> FieldOptionResolver<'e> {
    pub fn new(defaults: StyleDefaults, errors: &'e dyn ErrorSource) -> Self {
        Self { defaults, errors }
    }

    /// The global default option tree every field starts from.
    pub fn global_defaults(&self) -> OptionTree {
        OptionTree::new()
            .with(
                "wrapper",
                OptionTree::new().with("class", self.defaults.wrapper_class.as_str()),
            )
            .with(
                "attr",
                OptionTree::new().with("class", self.defaults.field_class.as_str()),
            )
            .with(
                "label_attr",
                OptionTree::new().with("class", self.defaults.label_class.as_str()),
            )
            .with(
                "errors",
                OptionTree::new().with("class", self.defaults.error_class.as_str()),
            )
            .with("showLabel", true)
            .with("showField", true)
            .with("showError", true)
    }

    /// Merges the four option layers for `field_name` and prepares the
    /// tree for rendering.
    ///
    /// Layer order, each overriding the previous: global defaults, the
    /// type's defaults, the caller's options, render-time overrides.
    /// Inputs are untouched; re-resolving the same field is side-effect
    /// free.
    pub fn resolve(
        &self,
        field_name: &str,
        field_type: &FieldType,
        caller_options: &OptionTree,
        render_overrides: &OptionTree,
    ) -> ResolvedField {
        let mut options = self.global_defaults();
        merge_into(&mut options, &field_type.defaults);
        merge_into(&mut options, caller_options);
        merge_into(&mut options, render_overrides);

        if self.errors.has_errors(field_name) {
            self.inject_error_class(&mut options);
        }

        let template = match path::remove_path(&mut options, "template") {
            Some(OptionValue::Str(template)) => Some(template),
            Some(_) | None => None,
        };
        if let Some(template) = &template {
            trace!("field `{field_name}` overrides template with `{template}`");
        }

        prepare_attr_strings(&mut options);

        ResolvedField { options, template }
    }

    /// Appends the configured error class to `wrapper.class`, guarded so
    /// repeated resolution never stacks it twice.
    fn inject_error_class(&self, options: &mut OptionTree) {
        let error_class = self.defaults.wrapper_error_class.as_str();
        let current = path::get_str_path(options, "wrapper.class").unwrap_or_default();
        if current.contains(error_class) {
            return;
        }
        let appended = if current.is_empty() {
            error_class.to_string()
        } else {
            format!("{current} {error_class}")
        };
        path::set_path(options, "wrapper.class", appended);
    }
}

/// Serializes the `wrapper`, `errors`, and `label_attr` subtrees into
/// sibling attribute strings for template consumption. The raw subtrees
/// stay in place.
fn prepare_attr_strings(options: &mut OptionTree) {
    for (source, target) in [
        ("wrapper", "wrapperAttrs"),
        ("errors", "errorAttrs"),
        ("label_attr", "labelAttrs"),
    ] {
        let serialized = options
            .get(source)
            .and_then(OptionValue::as_tree)
            .map(|subtree| AttrMap::from_subtree(subtree).serialize())
            .unwrap_or_default();
        options.insert(target, serialized);
    }
}

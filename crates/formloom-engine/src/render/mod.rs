//! Collaborator seams for rendering, message translation, and validation
//! errors.
//!
//! The engine never emits HTML documents or looks up i18n strings itself;
//! it hands a fully-resolved context to a [`Renderer`] and treats
//! [`Translator`] output as opaque. Both are traits so host applications
//! plug in their own template engine and message catalog.

use indexmap::IndexMap;
use thiserror::Error;

use crate::options::{OptionTree, path};

/// Named parameters for a message lookup (`attribute`, `min`, `max`, ...).
pub type MessageParams = IndexMap<String, String>;

/// Resolves a message key into display text.
///
/// Used for `title` attributes and field labels. The engine only supplies
/// the key (e.g. `validation.alpha_num`) and a parameter bag; whatever
/// comes back is used verbatim.
pub trait Translator {
    fn translate(&self, key: &str, params: &MessageParams) -> String;
}

/// A [`Translator`] that echoes the key back.
///
/// Deterministic stand-in for applications without a message catalog.
#[derive(Debug, Default)]
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, key: &str, _params: &MessageParams) -> String {
        key.to_string()
    }
}

/// Reports whether a field currently has validation errors.
///
/// Consulted once per field resolution to decide wrapper error-class
/// injection.
pub trait ErrorSource {
    fn has_errors(&self, field_name: &str) -> bool;
}

/// An [`ErrorSource`] reporting no errors for any field.
#[derive(Debug, Default)]
pub struct NoErrors;

impl ErrorSource for NoErrors {
    fn has_errors(&self, _field_name: &str) -> bool {
        false
    }
}

/// An [`ErrorSource`] backed by a fixed set of failing field names.
#[derive(Debug, Default)]
pub struct StaticErrors {
    fields: Vec<String>,
}

impl StaticErrors {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl ErrorSource for StaticErrors {
    fn has_errors(&self, field_name: &str) -> bool {
        self.fields.iter().any(|f| f == field_name)
    }
}

/// Errors surfaced by a [`Renderer`] implementation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template `{template}`")]
    UnknownTemplate { template: String },

    #[error("template `{template}` failed: {message}")]
    Template { template: String, message: String },
}

/// Everything a template needs to render one field.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub name: String,
    pub field_type: String,
    pub options: OptionTree,
    pub show_label: bool,
    pub show_field: bool,
    pub show_error: bool,
}

impl RenderContext {
    /// Builds a context from resolved options, reading the `showLabel`,
    /// `showField`, and `showError` toggles out of the tree (all default
    /// to `true`).
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, options: OptionTree) -> Self {
        let show_label = path::get_bool_path(&options, "showLabel", true);
        let show_field = path::get_bool_path(&options, "showField", true);
        let show_error = path::get_bool_path(&options, "showError", true);
        Self {
            name: name.into(),
            field_type: field_type.into(),
            options,
            show_label,
            show_field,
            show_error,
        }
    }
}

/// Renders a template identifier with a field context into markup.
pub trait Renderer {
    fn render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionTree;

    #[test]
    fn key_translator_echoes_key() {
        let t = KeyTranslator;
        assert_eq!(
            t.translate("validation.alpha", &MessageParams::new()),
            "validation.alpha"
        );
    }

    #[test]
    fn static_errors_matches_exact_names() {
        let errors = StaticErrors::new(["email", "age"]);
        assert!(errors.has_errors("email"));
        assert!(!errors.has_errors("emails"));
        assert!(!NoErrors.has_errors("email"));
    }

    #[test]
    fn context_reads_show_toggles() {
        let options = OptionTree::new().with("showLabel", false);
        let ctx = RenderContext::new("age", "number", options);
        assert!(!ctx.show_label);
        assert!(ctx.show_field);
        assert!(ctx.show_error);
    }
}

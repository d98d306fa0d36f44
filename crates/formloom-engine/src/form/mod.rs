//! The ordered field container tying the pipeline together.
//!
//! A [`Form`] owns its field descriptors and, per render call, runs each
//! one through type resolution, option merging, rule translation, and
//! finally the external renderer. Rendering never mutates the form, so a
//! form can render repeatedly with different override options.

use indexmap::IndexMap;
use log::debug;
use thiserror::Error;

use crate::attrs::AttrMap;
use crate::fields::registry::{FieldTypeError, FieldTypeRegistry};
use crate::fields::resolver::{FieldOptionResolver, ResolvedField, StyleDefaults};
use crate::fields::FieldDescriptor;
use crate::options::merge::merge_into;
use crate::options::{path, OptionTree, OptionValue};
use crate::render::{ErrorSource, RenderContext, RenderError, Renderer, Translator};
use crate::rules::{RuleEntry, RuleError, RuleTranslator, Rules};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("field `{name}` already exists on this form")]
    DuplicateField { name: String },

    #[error("no field named `{name}` on this form")]
    UnknownField { name: String },

    #[error(transparent)]
    Type(#[from] FieldTypeError),

    #[error(transparent)]
    Rules(#[from] RuleError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// An ordered collection of fields plus the collaborators needed to
/// resolve and render them.
pub struct Form<'a> {
    registry: &'a FieldTypeRegistry,
    resolver: FieldOptionResolver<'a>,
    translator: &'a dyn Translator,
    fields: IndexMap<String, FieldDescriptor>,
}

impl<'a> Form<'a> {
    pub fn new(
        registry: &'a FieldTypeRegistry,
        defaults: StyleDefaults,
        translator: &'a dyn Translator,
        errors: &'a dyn ErrorSource,
    ) -> Self {
        Self {
            registry,
            resolver: FieldOptionResolver::new(defaults, errors),
            translator,
            fields: IndexMap::new(),
        }
    }

    /// Adds a field. The type name must resolve now: an unsupported type
    /// fails the add, not the eventual render.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        field_type: &str,
        options: OptionTree,
    ) -> Result<(), FormError> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return Err(FormError::DuplicateField { name });
        }
        self.registry.resolve(field_type)?;

        debug!("adding field `{name}` of type `{field_type}`");
        let field = FieldDescriptor::new(name.clone(), field_type).with_options(options);
        let field = match path::get_str_path(&field.options, "label") {
            Some(label) => {
                let label = label.to_string();
                field.with_label(label)
            }
            None => field,
        };
        self.fields.insert(name, field);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Removes a field, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<FieldDescriptor> {
        self.fields.shift_remove(name)
    }

    /// Overlays options onto an existing field.
    pub fn modify(&mut self, name: &str, options: &OptionTree) -> Result<(), FormError> {
        let field = self
            .fields
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField {
                name: name.to_string(),
            })?;
        merge_into(&mut field.options, options);
        Ok(())
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Resolves one field's render-time options without rendering it.
    ///
    /// Validation rules found in the field's options contribute HTML5
    /// constraint attributes into the `attr` subtree; attributes the
    /// caller already set win over derived ones.
    pub fn resolve_field(
        &self,
        name: &str,
        overrides: &OptionTree,
    ) -> Result<ResolvedField, FormError> {
        let field = self.fields.get(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_string(),
        })?;
        let field_type = self.registry.resolve(&field.field_type)?;

        let mut resolved =
            self.resolver
                .resolve(&field.name, field_type, &field.options, overrides);

        if let Some(rules) = extract_rules(&resolved.options) {
            let derived = RuleTranslator::new(self.translator).translate(&rules, field)?;
            apply_constraint_attrs(&mut resolved.options, &derived);
        }

        Ok(resolved)
    }

    /// Renders one field through the external renderer.
    pub fn render_field(
        &self,
        renderer: &dyn Renderer,
        name: &str,
        overrides: &OptionTree,
    ) -> Result<String, FormError> {
        let field = self.fields.get(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_string(),
        })?;
        let field_type = self.registry.resolve(&field.field_type)?;
        let resolved = self.resolve_field(name, overrides)?;

        let template = resolved
            .template
            .unwrap_or_else(|| field_type.template.clone());
        let context = RenderContext::new(&field.name, &field.field_type, resolved.options);
        Ok(renderer.render(&template, &context)?)
    }

    /// Renders every field in insertion order, concatenating the output.
    pub fn render(&self, renderer: &dyn Renderer) -> Result<String, FormError> {
        let empty = OptionTree::new();
        let mut out = String::new();
        for name in self.fields.keys() {
            out.push_str(&self.render_field(renderer, name, &empty)?);
        }
        Ok(out)
    }
}

/// Reads a rule specification out of a resolved option tree's `rules` key.
///
/// Accepts a single line string or a list of token strings; anything else
/// is treated as no rules.
fn extract_rules(options: &OptionTree) -> Option<Rules> {
    match options.get("rules")? {
        OptionValue::Str(line) => Some(Rules::Line(line.clone())),
        OptionValue::List(items) => {
            let entries = items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|token| RuleEntry::Token(token.to_string()))
                .collect();
            Some(Rules::List(entries))
        }
        _ => None,
    }
}

/// Folds derived constraint attributes into the `attr` subtree, leaving
/// caller-set attributes untouched.
fn apply_constraint_attrs(options: &mut OptionTree, derived: &AttrMap) {
    if !matches!(options.get("attr"), Some(OptionValue::Tree(_))) {
        options.insert("attr", OptionTree::new());
    }
    if let Some(OptionValue::Tree(attr)) = options.get_mut("attr") {
        for (name, value) in derived.iter() {
            let Some(value) = value else { continue };
            if !attr.contains_key(name) {
                attr.insert(name.clone(), value.as_str());
            }
        }
    }
}

//! End-to-end scenarios: registry -> resolver -> rule translation -> a
//! minimal renderer, the way a host application consumes the engine.

use formloom_engine::attrs::AttrMap;
use formloom_engine::fields::registry::FieldTypeRegistry;
use formloom_engine::fields::resolver::StyleDefaults;
use formloom_engine::form::Form;
use formloom_engine::options::{OptionTree, OptionValue, path};
use formloom_engine::render::{
    KeyTranslator, NoErrors, RenderContext, RenderError, Renderer, StaticErrors,
};

/// A bare-bones renderer emitting one input tag per field, enough to see
/// derived attributes land in markup.
struct TagRenderer;

impl Renderer for TagRenderer {
    fn render(&self, template: &str, ctx: &RenderContext) -> Result<String, RenderError> {
        let wrapper_attrs = path::get_str_path(&ctx.options, "wrapperAttrs").unwrap_or_default();
        let field_attrs = ctx
            .options
            .get("attr")
            .and_then(OptionValue::as_tree)
            .map(AttrMap::from_subtree)
            .unwrap_or_default()
            .serialize();

        Ok(format!(
            "<div {}data-template=\"{}\"><input type=\"{}\" name=\"{}\" {}/></div>",
            wrapper_attrs, template, ctx.field_type, ctx.name, field_attrs
        ))
    }
}

fn build_form(registry: &FieldTypeRegistry) -> Form<'_> {
    Form::new(registry, StyleDefaults::default(), &KeyTranslator, &NoErrors)
}

#[test]
fn numeric_field_renders_derived_constraints() {
    let registry = FieldTypeRegistry::with_builtins();
    let mut form = build_form(&registry);
    form.add(
        "age",
        "number",
        OptionTree::new().with("rules", "required|integer|min:18|max:65"),
    )
    .unwrap();

    let html = form
        .render_field(&TagRenderer, "age", &OptionTree::new())
        .unwrap();

    assert!(html.contains("name=\"age\""));
    assert!(html.contains("type=\"number\""));
    assert!(html.contains("required=\"required\""));
    assert!(html.contains("step=\"1\""));
    assert!(html.contains("min=\"18\""));
    assert!(html.contains("max=\"65\""));
    assert!(!html.contains("pattern="));
    assert!(!html.contains("title="));
}

#[test]
fn text_field_renders_pattern_and_lengths() {
    let registry = FieldTypeRegistry::with_builtins();
    let mut form = build_form(&registry);
    form.add(
        "username",
        "text",
        OptionTree::new().with("rules", "required|alpha_dash|between:3,20"),
    )
    .unwrap();

    let html = form
        .render_field(&TagRenderer, "username", &OptionTree::new())
        .unwrap();

    assert!(html.contains("required=\"required\""));
    assert!(html.contains("pattern=\"[a-zA-Z0-9_\\-]+\""));
    assert!(html.contains("title=\"validation.alpha_dash\""));
    assert!(html.contains("minlength=\"3\""));
    assert!(html.contains("maxlength=\"20\""));
}

#[test]
fn whole_form_renders_in_insertion_order() {
    let registry = FieldTypeRegistry::with_builtins();
    let mut form = build_form(&registry);
    form.add("email", "email", OptionTree::new()).unwrap();
    form.add("age", "number", OptionTree::new()).unwrap();
    form.add("save", "submit", OptionTree::new()).unwrap();

    let html = form.render(&TagRenderer).unwrap();
    let email_at = html.find("name=\"email\"").unwrap();
    let age_at = html.find("name=\"age\"").unwrap();
    let save_at = html.find("name=\"save\"").unwrap();
    assert!(email_at < age_at && age_at < save_at);
}

#[test]
fn template_override_reaches_the_renderer() {
    let registry = FieldTypeRegistry::with_builtins();
    let mut form = build_form(&registry);
    form.add(
        "bio",
        "textarea",
        OptionTree::new().with("template", "app/markdown-editor"),
    )
    .unwrap();

    let html = form
        .render_field(&TagRenderer, "bio", &OptionTree::new())
        .unwrap();
    assert!(html.contains("data-template=\"app/markdown-editor\""));
}

#[test]
fn render_time_overrides_beat_caller_options() {
    let registry = FieldTypeRegistry::with_builtins();
    let mut form = build_form(&registry);
    form.add(
        "name",
        "text",
        OptionTree::new().with("attr", OptionTree::new().with("placeholder", "from-caller")),
    )
    .unwrap();

    let overrides =
        OptionTree::new().with("attr", OptionTree::new().with("placeholder", "from-render"));
    let html = form.render_field(&TagRenderer, "name", &overrides).unwrap();
    assert!(html.contains("placeholder=\"from-render\""));
    // the global field class survives the override merge
    assert!(html.contains("class=\"form-control\""));
}

#[test]
fn failing_field_wrapper_carries_error_class() {
    let registry = FieldTypeRegistry::with_builtins();
    let errors = StaticErrors::new(["email"]);
    let mut form = Form::new(
        &registry,
        StyleDefaults::default(),
        &KeyTranslator,
        &errors,
    );
    form.add("email", "email", OptionTree::new()).unwrap();
    form.add("name", "text", OptionTree::new()).unwrap();

    let html = form
        .render_field(&TagRenderer, "email", &OptionTree::new())
        .unwrap();
    assert!(html.contains("class=\"form-group has-error\""));

    let html = form
        .render_field(&TagRenderer, "name", &OptionTree::new())
        .unwrap();
    assert!(html.contains("class=\"form-group\""));
    assert!(!html.contains("has-error"));
}

#[test]
fn custom_registered_type_renders_with_its_template() {
    let mut registry = FieldTypeRegistry::with_builtins();
    registry
        .register_custom("datetime", "app/fields/datetime")
        .unwrap();

    let mut form = build_form(&registry);
    form.add(
        "starts_at",
        "datetime",
        OptionTree::new().with("rules", "after:2030-01-01"),
    )
    .unwrap();

    let html = form
        .render_field(&TagRenderer, "starts_at", &OptionTree::new())
        .unwrap();
    assert!(html.contains("data-template=\"app/fields/datetime\""));
    // datetime kinds format with the T separator
    assert!(html.contains("min=\"2030-01-01T00:00:00\""));
}

#[test]
fn attribute_values_cannot_break_out_of_markup() {
    let registry = FieldTypeRegistry::with_builtins();
    let mut form = build_form(&registry);
    form.add(
        "name",
        "text",
        OptionTree::new().with(
            "attr",
            OptionTree::new().with("placeholder", "\"><script>alert(1)</script>"),
        ),
    )
    .unwrap();

    let html = form
        .render_field(&TagRenderer, "name", &OptionTree::new())
        .unwrap();
    // the embedded quote is escaped, so the attribute cannot close early
    assert!(html.contains("placeholder=\"&quot;"));
    assert!(!html.contains("placeholder=\"\"><script>"));
}

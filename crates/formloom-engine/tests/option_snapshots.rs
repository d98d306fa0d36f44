//! Snapshot coverage for option-tree shapes: the global default layer and
//! a full four-layer merge.

use formloom_engine::fields::resolver::{FieldOptionResolver, StyleDefaults};
use formloom_engine::options::merge::merge_into;
use formloom_engine::options::OptionTree;
use formloom_engine::render::NoErrors;

#[test]
fn global_defaults_shape() {
    let resolver = FieldOptionResolver::new(StyleDefaults::default(), &NoErrors);
    let defaults = resolver.global_defaults();
    insta::assert_yaml_snapshot!("global_defaults", defaults);
}

#[test]
fn four_layer_merge_shape() {
    let global = OptionTree::new()
        .with("wrapper", OptionTree::new().with("class", "form-group"))
        .with("attr", OptionTree::new().with("class", "form-control"));
    let type_defaults = OptionTree::new()
        .with("attr", OptionTree::new().with("class", "checkbox-inline"))
        .with("value", 1i64);
    let caller = OptionTree::new()
        .with("label", "remember")
        .with("wrapper", OptionTree::new().with("id", "remember-row"));
    let render_time = OptionTree::new().with("value", 0i64);

    let mut merged = global;
    merge_into(&mut merged, &type_defaults);
    merge_into(&mut merged, &caller);
    merge_into(&mut merged, &render_time);

    insta::assert_yaml_snapshot!("four_layer_merge", merged);
}

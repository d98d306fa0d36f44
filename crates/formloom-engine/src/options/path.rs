//! Dotted-path access into option trees.
//!
//! Callers address nested options as `"wrapper.class"` or `"label_attr.id"`.
//! Lookup never requires intermediate levels to exist; set auto-vivifies
//! them, overwriting any non-tree value standing in the way.

use super::{OptionTree, OptionValue};

/// Looks up a value by dotted path. Missing intermediates yield `None`.
pub fn get_path<'a>(tree: &'a OptionTree, path: &str) -> Option<&'a OptionValue> {
    let mut current = tree;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let value = current.get(segment)?;
        if segments.peek().is_none() {
            return Some(value);
        }
        current = value.as_tree()?;
    }
    None
}

/// Looks up a string value by dotted path.
pub fn get_str_path<'a>(tree: &'a OptionTree, path: &str) -> Option<&'a str> {
    get_path(tree, path).and_then(OptionValue::as_str)
}

/// Looks up a boolean by dotted path, falling back to `default`.
pub fn get_bool_path(tree: &OptionTree, path: &str, default: bool) -> bool {
    get_path(tree, path)
        .and_then(OptionValue::as_bool)
        .unwrap_or(default)
}

/// Sets a value at a dotted path, creating intermediate trees as needed.
///
/// An intermediate key holding a non-tree value is replaced by a tree,
/// matching the overwrite semantics of the merge layers above it.
pub fn set_path(tree: &mut OptionTree, path: &str, value: impl Into<OptionValue>) {
    let mut current = tree;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment, value);
            return;
        }
        let needs_tree = !matches!(current.get(segment), Some(OptionValue::Tree(_)));
        if needs_tree {
            current.insert(segment, OptionTree::new());
        }
        current = current
            .get_mut(segment)
            .and_then(OptionValue::as_tree_mut)
            .expect("intermediate was just set to a tree");
    }
}

/// Removes and returns the value at a dotted path, if present.
pub fn remove_path(tree: &mut OptionTree, path: &str) -> Option<OptionValue> {
    match path.split_once('.') {
        None => tree.remove(path),
        Some((head, rest)) => {
            let subtree = tree.get_mut(head)?.as_tree_mut()?;
            remove_path(subtree, rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> OptionTree {
        OptionTree::new()
            .with("class", "form-control")
            .with(
                "wrapper",
                OptionTree::new().with("class", "form-group").with("id", "w1"),
            )
    }

    #[test]
    fn get_top_level() {
        let tree = sample();
        assert_eq!(get_str_path(&tree, "class"), Some("form-control"));
    }

    #[test]
    fn get_nested() {
        let tree = sample();
        assert_eq!(get_str_path(&tree, "wrapper.class"), Some("form-group"));
    }

    #[test]
    fn missing_intermediate_is_none() {
        let tree = sample();
        assert_eq!(get_path(&tree, "label_attr.class"), None);
        assert_eq!(get_path(&tree, "wrapper.missing.deeper"), None);
    }

    #[test]
    fn scalar_intermediate_is_none() {
        let tree = sample();
        // "class" is a string, not a tree; descending through it fails
        assert_eq!(get_path(&tree, "class.deeper"), None);
    }

    #[test]
    fn set_auto_vivifies() {
        let mut tree = OptionTree::new();
        set_path(&mut tree, "label_attr.class", "control-label");
        assert_eq!(
            get_str_path(&tree, "label_attr.class"),
            Some("control-label")
        );
    }

    #[test]
    fn set_overwrites_scalar_intermediate() {
        let mut tree = OptionTree::new().with("wrapper", "not-a-tree");
        set_path(&mut tree, "wrapper.class", "form-group");
        assert_eq!(get_str_path(&tree, "wrapper.class"), Some("form-group"));
    }

    #[test]
    fn remove_nested_leaves_siblings() {
        let mut tree = sample();
        let removed = remove_path(&mut tree, "wrapper.class");
        assert_eq!(removed, Some(OptionValue::Str("form-group".into())));
        assert_eq!(get_str_path(&tree, "wrapper.id"), Some("w1"));
    }

    #[test]
    fn remove_missing_is_none() {
        let mut tree = sample();
        assert_eq!(remove_path(&mut tree, "nope.class"), None);
    }
}

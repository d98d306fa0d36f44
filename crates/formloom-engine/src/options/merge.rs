//! Deep structural merge of option trees.
//!
//! Later layers override earlier layers. Two trees under the same key merge
//! recursively; every other pairing (scalar over scalar, list over list,
//! scalar over tree, ...) is a wholesale replacement. Lists never
//! concatenate.
//!
//! Only left-to-right sequential application is meaningful here: the
//! resolver applies global defaults, then type defaults, then caller
//! options, then render-time overrides, in that order.

use super::{OptionTree, OptionValue};

/// Returns a new tree with `overrides` merged over `base`.
///
/// Keys only in `base` keep their position; keys only in `overrides` are
/// appended in their own order. Neither input is mutated.
pub fn merge(base: &OptionTree, overrides: &OptionTree) -> OptionTree {
    let mut result = base.clone();
    merge_into(&mut result, overrides);
    result
}

/// Merges `overrides` into `base` in place.
pub fn merge_into(base: &mut OptionTree, overrides: &OptionTree) {
    for (key, over_value) in overrides.iter() {
        match (base.get_mut(key), over_value) {
            (Some(OptionValue::Tree(base_sub)), OptionValue::Tree(over_sub)) => {
                merge_into(base_sub, over_sub);
            }
            _ => {
                base.insert(key.clone(), over_value.clone());
            }
        }
    }
}

//! Core form-composition engine: option merging, validation-rule
//! translation, attribute serialization, and field-type resolution.

pub mod attrs;
pub mod fields;
pub mod form;
pub mod options;
pub mod render;
pub mod rules;

// Re-export key types for easier usage
pub use attrs::AttrMap;
pub use fields::{registry::*, resolver::*, FieldDescriptor, FieldKind};
pub use form::{Form, FormError};
pub use options::{merge::merge, OptionTree, OptionValue};
pub use render::*;
pub use rules::*;

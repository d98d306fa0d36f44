//! Validation-rule parsing and HTML5 constraint derivation.
//!
//! A rule specification like `"required|min:5|alpha_num"` is tokenized into
//! `(name, parameters)` pairs, each name normalized to a canonical dispatch
//! key, then translated into the HTML5 input attributes a browser can
//! enforce (`required`, `pattern`, `min`, `maxlength`, ...). Which attribute
//! form a rule emits depends on the field's kind: `min:5` is `min="5"` on a
//! number input but `minlength="5"` on a text input.
//!
//! Unknown rule names are deliberately ignored; server-side-only rules
//! (`unique`, `exists`, custom rules) pass through without contributing
//! client-side constraints.

mod cursor;
pub mod parser;
pub mod translate;

pub use parser::{canonical_name, parse};
pub use translate::{RuleKind, RuleTranslator};

use thiserror::Error;

/// A validation rule specification as accepted from callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Rules {
    /// A single `|`-delimited line, e.g. `"required|between:3,20"`.
    Line(String),
    /// An ordered list of individual rule entries.
    List(Vec<RuleEntry>),
}

impl From<&str> for Rules {
    fn from(line: &str) -> Self {
        Rules::Line(line.to_string())
    }
}

impl From<String> for Rules {
    fn from(line: String) -> Self {
        Rules::Line(line)
    }
}

/// One entry of a list-form rule specification.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleEntry {
    /// A whole token still carrying its parameters, e.g. `"min:5"`.
    Token(String),
    /// A pre-split entry: rule name first, parameters following.
    /// Parameters here bypass CSV parsing entirely.
    Parts(Vec<String>),
}

/// A parsed rule: canonical dispatch name plus ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleToken {
    /// Canonical PascalCase name, e.g. `AlphaNum` for `alpha_num`.
    pub name: String,
    pub params: Vec<String>,
}

/// Errors raised while translating parsed rules into attributes.
///
/// Missing or malformed parameters are caller errors and fail fast;
/// unknown rule names are not errors at all.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("rule `{rule}` expects {expected} parameter(s), found {found}")]
    MissingParameter {
        rule: String,
        expected: usize,
        found: usize,
    },

    #[error("rule `{rule}` expects a positive integer parameter, got `{value}`")]
    InvalidNumber { rule: String, value: String },

    #[error("rule `{rule}` has an unparseable date parameter `{value}`")]
    InvalidDate { rule: String, value: String },
}

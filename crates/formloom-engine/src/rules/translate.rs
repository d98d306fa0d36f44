//! Translation of parsed rule tokens into HTML5 constraint attributes.
//!
//! Dispatch is a closed enum rather than name reflection: every supported
//! rule is a [`RuleKind`] variant, and a canonical name that maps to no
//! variant contributes nothing. Attribute emission is pure: the same
//! token, field, and translator always produce the same partial map.

use chrono::{Days, Local, NaiveDate, NaiveDateTime};

use crate::attrs::AttrMap;
use crate::fields::{FieldDescriptor, FieldKind};
use crate::render::{MessageParams, Translator};

use super::{RuleError, RuleToken, Rules, parser};

/// The closed set of rules that derive client-side constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Required,
    Accepted,
    Alpha,
    AlphaNum,
    AlphaDash,
    Integer,
    Numeric,
    Boolean,
    Digits,
    DigitsBetween,
    Min,
    Max,
    Between,
    Size,
    In,
    NotIn,
    After,
    Before,
    Image,
    Mimes,
}

impl RuleKind {
    /// Looks up a canonical (PascalCase) rule name. Unknown names are not
    /// an error: server-only rules simply have no client-side counterpart.
    pub fn from_canonical(name: &str) -> Option<Self> {
        Some(match name {
            "Required" => RuleKind::Required,
            "Accepted" => RuleKind::Accepted,
            "Alpha" => RuleKind::Alpha,
            "AlphaNum" => RuleKind::AlphaNum,
            "AlphaDash" => RuleKind::AlphaDash,
            "Integer" => RuleKind::Integer,
            "Numeric" => RuleKind::Numeric,
            "Boolean" => RuleKind::Boolean,
            "Digits" => RuleKind::Digits,
            "DigitsBetween" => RuleKind::DigitsBetween,
            "Min" => RuleKind::Min,
            "Max" => RuleKind::Max,
            "Between" => RuleKind::Between,
            "Size" => RuleKind::Size,
            "In" => RuleKind::In,
            "NotIn" => RuleKind::NotIn,
            "After" => RuleKind::After,
            "Before" => RuleKind::Before,
            "Image" => RuleKind::Image,
            "Mimes" => RuleKind::Mimes,
            _ => return None,
        })
    }

    /// Message-catalog key for this rule's `title` text.
    fn message_key(self) -> &'static str {
        match self {
            RuleKind::Required => "validation.required",
            RuleKind::Accepted => "validation.accepted",
            RuleKind::Alpha => "validation.alpha",
            RuleKind::AlphaNum => "validation.alpha_num",
            RuleKind::AlphaDash => "validation.alpha_dash",
            RuleKind::Integer => "validation.integer",
            RuleKind::Numeric => "validation.numeric",
            RuleKind::Boolean => "validation.boolean",
            RuleKind::Digits => "validation.digits",
            RuleKind::DigitsBetween => "validation.digits_between",
            RuleKind::Min => "validation.min",
            RuleKind::Max => "validation.max",
            RuleKind::Between => "validation.between",
            RuleKind::Size => "validation.size",
            RuleKind::In => "validation.in",
            RuleKind::NotIn => "validation.not_in",
            RuleKind::After => "validation.after",
            RuleKind::Before => "validation.before",
            RuleKind::Image => "validation.image",
            RuleKind::Mimes => "validation.mimes",
        }
    }
}

/// Translates rule specifications into attribute maps for a given field.
pub struct RuleTranslator<'t> {
    translator: &'t dyn Translator,
}

impl<'t> RuleTranslator<'t> {
    pub fn new(translator: &'t dyn Translator) -> Self {
        Self { translator }
    }

    /// Translates a whole rule specification, folding each recognized
    /// rule's attributes in rule order.
    pub fn translate(
        &self,
        rules: &Rules,
        field: &FieldDescriptor,
    ) -> Result<AttrMap, RuleError> {
        let mut attrs = AttrMap::new();
        for token in parser::parse(rules) {
            let Some(kind) = RuleKind::from_canonical(&token.name) else {
                continue;
            };
            self.apply(kind, &token, field, &mut attrs)?;
        }
        Ok(attrs)
    }

    fn apply(
        &self,
        kind: RuleKind,
        token: &RuleToken,
        field: &FieldDescriptor,
        attrs: &mut AttrMap,
    ) -> Result<(), RuleError> {
        let numeric = field.kind() == FieldKind::Numeric;

        match kind {
            RuleKind::Required => {
                attrs.set("required", "required");
            }
            RuleKind::Accepted => {
                attrs.set("required", "required");
                attrs.set("title", self.title(kind, field, &[]));
            }
            RuleKind::Alpha => {
                attrs.set("pattern", "[a-zA-Z]+");
                attrs.set("title", self.title(kind, field, &[]));
            }
            RuleKind::AlphaNum => {
                attrs.set("pattern", "[a-zA-Z0-9]+");
                attrs.set("title", self.title(kind, field, &[]));
            }
            RuleKind::AlphaDash => {
                attrs.set("pattern", "[a-zA-Z0-9_\\-]+");
                attrs.set("title", self.title(kind, field, &[]));
            }
            RuleKind::Integer => {
                if numeric {
                    attrs.set("step", "1");
                } else {
                    attrs.set("pattern", "\\d+");
                    attrs.set("title", self.title(kind, field, &[]));
                }
            }
            RuleKind::Numeric => {
                if numeric {
                    attrs.set("step", "any");
                } else {
                    attrs.set("pattern", "[-+]?[0-9]*[.,]?[0-9]+");
                    attrs.set("title", self.title(kind, field, &[]));
                }
            }
            RuleKind::Boolean => {
                attrs.set("pattern", "0|1");
                attrs.set("title", self.title(kind, field, &[]));
            }
            RuleKind::Digits => {
                let [n] = required_params::<1>(token)?;
                let n = parse_count(&token.name, n)?;
                if numeric {
                    attrs.set("min", pow10(n - 1).to_string());
                    attrs.set("max", (pow10(n) - 1).to_string());
                } else {
                    attrs.set("pattern", format!("\\d{{{n}}}"));
                    attrs.set(
                        "title",
                        self.title(kind, field, &[("digits", n.to_string())]),
                    );
                }
            }
            RuleKind::DigitsBetween => {
                let [lo, hi] = required_params::<2>(token)?;
                let lo_n = parse_count(&token.name, lo)?;
                let hi_n = parse_count(&token.name, hi)?;
                if numeric {
                    attrs.set("min", pow10(lo_n - 1).to_string());
                    attrs.set("max", (pow10(hi_n) - 1).to_string());
                } else {
                    attrs.set("pattern", format!("\\d{{{lo_n},{hi_n}}}"));
                    attrs.set(
                        "title",
                        self.title(
                            kind,
                            field,
                            &[("min", lo_n.to_string()), ("max", hi_n.to_string())],
                        ),
                    );
                }
            }
            RuleKind::Min => {
                let [value] = required_params::<1>(token)?;
                if numeric {
                    attrs.set("min", value.clone());
                } else {
                    attrs.set("minlength", value.clone());
                }
            }
            RuleKind::Max => {
                let [value] = required_params::<1>(token)?;
                if numeric {
                    attrs.set("max", value.clone());
                } else {
                    attrs.set("maxlength", value.clone());
                }
            }
            RuleKind::Between => {
                let [lo, hi] = required_params::<2>(token)?;
                if numeric {
                    attrs.set("min", lo.clone());
                    attrs.set("max", hi.clone());
                } else {
                    attrs.set("minlength", lo.clone());
                    attrs.set("maxlength", hi.clone());
                }
            }
            RuleKind::Size => {
                let [value] = required_params::<1>(token)?;
                if numeric {
                    attrs.set("min", value.clone());
                    attrs.set("max", value.clone());
                    attrs.set(
                        "title",
                        self.title(kind, field, &[("size", value.clone())]),
                    );
                } else {
                    let n = parse_count(&token.name, value)?;
                    attrs.set("pattern", format!(".{{{n}}}"));
                    attrs.set("title", self.title(kind, field, &[("size", n.to_string())]));
                }
            }
            RuleKind::In => {
                let values = at_least_one_param(token)?;
                attrs.set("pattern", values.join("|"));
                attrs.set("title", self.title(kind, field, &[]));
            }
            RuleKind::NotIn => {
                let values = at_least_one_param(token)?;
                let anchored: Vec<String> =
                    values.iter().map(|v| format!("^{v}$")).collect();
                attrs.set("pattern", format!("(?:(?!{}).)*", anchored.join("|")));
                attrs.set("title", self.title(kind, field, &[]));
            }
            RuleKind::After => {
                let [value] = required_params::<1>(token)?;
                if field.kind() == FieldKind::DateLike {
                    attrs.set("min", format_date_param(&token.name, field, value)?);
                }
            }
            RuleKind::Before => {
                let [value] = required_params::<1>(token)?;
                if field.kind() == FieldKind::DateLike {
                    attrs.set("max", format_date_param(&token.name, field, value)?);
                }
            }
            RuleKind::Image => {
                attrs.set("accept", "image/*");
            }
            RuleKind::Mimes => {
                let exts = at_least_one_param(token)?;
                let accept: Vec<String> = exts.iter().map(|ext| format!(".{ext}")).collect();
                attrs.set("accept", accept.join(", "));
            }
        }
        Ok(())
    }

    /// Builds `title` text through the external translator: the rule's
    /// message key plus the field label and any rule parameters.
    fn title(
        &self,
        kind: RuleKind,
        field: &FieldDescriptor,
        extra: &[(&str, String)],
    ) -> String {
        let mut params = MessageParams::new();
        params.insert("attribute".to_string(), field.label.clone());
        for (key, value) in extra {
            params.insert((*key).to_string(), value.clone());
        }
        self.translator.translate(kind.message_key(), &params)
    }
}

/// Fails fast when a rule received fewer parameters than it needs.
fn required_params<const N: usize>(token: &RuleToken) -> Result<&[String; N], RuleError> {
    token
        .params
        .first_chunk::<N>()
        .ok_or_else(|| RuleError::MissingParameter {
            rule: token.name.clone(),
            expected: N,
            found: token.params.len(),
        })
}

fn at_least_one_param(token: &RuleToken) -> Result<&[String], RuleError> {
    if token.params.is_empty() {
        return Err(RuleError::MissingParameter {
            rule: token.name.clone(),
            expected: 1,
            found: 0,
        });
    }
    Ok(&token.params)
}

/// Parses a digit-count parameter: a positive integer small enough for the
/// 10^n math to stay in `i64`.
fn parse_count(rule: &str, value: &str) -> Result<u32, RuleError> {
    match value.trim().parse::<u32>() {
        Ok(n) if (1..=18).contains(&n) => Ok(n),
        _ => Err(RuleError::InvalidNumber {
            rule: rule.to_string(),
            value: value.to_string(),
        }),
    }
}

fn pow10(n: u32) -> i64 {
    10i64.pow(n)
}

/// Reformats a date parameter for a date-like field's `min`/`max`.
///
/// `datetime`/`datetime-local` fields get the `T`-separated full form;
/// plain dates get `Y-m-d`.
fn format_date_param(
    rule: &str,
    field: &FieldDescriptor,
    value: &str,
) -> Result<String, RuleError> {
    let parsed = parse_date_expr(value).ok_or_else(|| RuleError::InvalidDate {
        rule: rule.to_string(),
        value: value.to_string(),
    })?;

    let with_time = matches!(field.field_type.as_str(), "datetime" | "datetime-local");
    let format = if with_time {
        "%Y-%m-%dT%H:%M:%S"
    } else {
        "%Y-%m-%d"
    };
    Ok(parsed.format(format).to_string())
}

/// Lenient date parsing: ISO date or datetime, or a relative keyword.
fn parse_date_expr(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    match value.to_ascii_lowercase().as_str() {
        "today" => return midnight(Local::now().date_naive()),
        "tomorrow" => {
            return midnight(Local::now().date_naive().checked_add_days(Days::new(1))?);
        }
        "yesterday" => {
            return midnight(Local::now().date_naive().checked_sub_days(Days::new(1))?);
        }
        _ => {}
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(midnight)
}

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

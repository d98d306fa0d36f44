//! Tokenization of rule specifications.
//!
//! Line form: split on `|`, each token split on the first `:` into name and
//! parameter string. Parameters are CSV-parsed so quoted values may contain
//! commas, except for `regex`, whose entire remainder is one parameter
//! (the pattern itself routinely contains commas).

use super::cursor::Cursor;
use super::{RuleEntry, RuleToken, Rules};

/// Parses a rule specification into an ordered token sequence.
///
/// Both input forms normalize rule names identically, so `"alpha_num"` in a
/// line and `["alpha_num"]` as a pre-split entry dispatch the same way.
pub fn parse(rules: &Rules) -> Vec<RuleToken> {
    match rules {
        Rules::Line(line) => line
            .split('|')
            .filter(|token| !token.trim().is_empty())
            .map(parse_token)
            .collect(),
        Rules::List(entries) => entries
            .iter()
            .map(|entry| match entry {
                RuleEntry::Token(token) => parse_token(token),
                RuleEntry::Parts(parts) => {
                    let (name, params) = parts
                        .split_first()
                        .map(|(n, p)| (n.as_str(), p.to_vec()))
                        .unwrap_or(("", Vec::new()));
                    RuleToken {
                        name: canonical_name(name),
                        params,
                    }
                }
            })
            .collect(),
    }
}

/// Parses one `name:params` token.
fn parse_token(token: &str) -> RuleToken {
    match token.split_once(':') {
        None => RuleToken {
            name: canonical_name(token),
            params: Vec::new(),
        },
        Some((name, param_str)) => {
            // A regex pattern is a single parameter no matter how many
            // commas it contains.
            let params = if name.trim().eq_ignore_ascii_case("regex") {
                vec![param_str.to_string()]
            } else {
                split_params(param_str)
            };
            RuleToken {
                name: canonical_name(name),
                params,
            }
        }
    }
}

/// Normalizes a raw rule name into its canonical PascalCase dispatch key.
///
/// Snake and kebab segments are capitalized and joined: `alpha_num` and
/// `alpha-num` both become `AlphaNum`; an already-camelCase `alphaNum`
/// becomes `AlphaNum` too.
pub fn canonical_name(raw: &str) -> String {
    raw.trim()
        .split(['_', '-'])
        .filter(|segment| !segment.is_empty())
        .map(capitalize_first)
        .collect()
}

fn capitalize_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// CSV-style parameter splitting.
///
/// Fields are comma-separated; a field wrapped in double quotes may contain
/// literal commas, and `""` inside quotes is an escaped quote. An empty
/// parameter string yields no parameters.
fn split_params(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut cur = Cursor::new(s);
    let mut params = Vec::new();

    loop {
        params.push(scan_field(&mut cur));
        if !cur.eat(b',') {
            break;
        }
        if cur.eof() {
            // trailing comma means a final empty field
            params.push(String::new());
            break;
        }
    }
    params
}

/// Scans a single field, stopping before the next separator comma.
///
/// Bytes accumulate and convert back to a string at the end; splitting only
/// ever happens at ASCII delimiters, so multi-byte UTF-8 content inside a
/// field survives intact.
fn scan_field(cur: &mut Cursor<'_>) -> String {
    let mut bytes = Vec::new();

    if cur.eat(b'"') {
        // Quoted field: commas are literal, "" is an escaped quote.
        loop {
            match cur.bump() {
                None => break,
                Some(b'"') => {
                    if cur.eat(b'"') {
                        bytes.push(b'"');
                    } else {
                        break;
                    }
                }
                Some(b) => bytes.push(b),
            }
        }
        // Anything between the closing quote and the separator is kept
        // verbatim, matching lenient CSV readers.
        scan_until_comma(cur, &mut bytes);
    } else {
        scan_until_comma(cur, &mut bytes);
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

fn scan_until_comma(cur: &mut Cursor<'_>, bytes: &mut Vec<u8>) {
    while let Some(b) = cur.peek() {
        if b == b',' {
            break;
        }
        cur.bump();
        bytes.push(b);
    }
}

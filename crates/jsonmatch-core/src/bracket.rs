//! Canonical bracket-form encoding of JSON values.
//!
//! The bracket form is the byte-level contract between the encoder and the
//! parser: a labelled ordered tree written as `{label` followed by child
//! trees followed by `}`. Two JSON values with the same structure and the
//! same normalized leaf content encode to identical strings, which is what
//! makes the downstream tree-edit-distance comparison meaningful.
//!
//! Normalization rules, in order of application:
//!
//! - every byte ≥ 128 is dropped (ASCII reduction),
//! - for string leaves, every ASCII whitespace byte is then removed,
//! - finally `{` and `}` occurring inside label text are escaped as `\{`
//!   and `\}`.
//!
//! Object nodes get the header label `\{\}`; member nodes are labelled
//! `"key":`; booleans encode as `True` / `False`. The capitalized boolean
//! spelling and the i32-truncation number branch are compatibility-sensitive
//! and must not be normalized away.

use serde_json::Value;

/// Returns `true` for the six ASCII whitespace bytes.
///
/// Matches the C locale `isspace` set — note that this includes vertical
/// tab (0x0B), which `u8::is_ascii_whitespace` does not.
fn is_ascii_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

/// Drops every non-ASCII character.
fn ascii_filter(s: &str) -> String {
    s.chars().filter(char::is_ascii).collect()
}

/// Removes all ASCII whitespace. The input is already ASCII-filtered, so
/// bytewise inspection is exact.
fn remove_whitespace(s: &str) -> String {
    s.bytes()
        .filter(|&b| !is_ascii_space(b))
        .map(char::from)
        .collect()
}

/// Escapes `{` and `}` inside label text as `\{` and `\}`.
fn escape_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            other => out.push(other),
        }
    }
    out
}

/// Encodes one JSON value into canonical bracket form.
///
/// When `sort_keys` is `false`, object members are emitted in insertion
/// order (`serde_json` is built with `preserve_order`, so the parsed map
/// retains it). When `true`, members are sorted lexicographically by the
/// byte values of their ASCII-filtered keys, making the encoding
/// key-order-insensitive.
///
/// The encoding is total: every `serde_json::Value` has a bracket form.
pub fn encode(value: &Value, sort_keys: bool) -> String {
    let mut out = String::new();
    encode_into(value, sort_keys, &mut out);
    out
}

fn encode_into(value: &Value, sort_keys: bool, out: &mut String) {
    match value {
        Value::Object(map) => {
            out.push_str("{\\{\\}");
            if sort_keys {
                let mut members: Vec<(String, &Value)> = map
                    .iter()
                    .map(|(k, v)| (ascii_filter(k), v))
                    .collect();
                members.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                for (key, member) in members {
                    encode_member(&key, member, sort_keys, out);
                }
            } else {
                for (key, member) in map {
                    encode_member(&ascii_filter(key), member, sort_keys, out);
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push_str("{[]");
            for item in items {
                encode_into(item, sort_keys, out);
            }
            out.push('}');
        }
        Value::String(s) => {
            let normalized = remove_whitespace(&ascii_filter(s));
            out.push_str("{\"");
            out.push_str(&escape_brackets(&normalized));
            out.push_str("\"}");
        }
        Value::Number(n) => {
            out.push('{');
            out.push_str(&format_number(n));
            out.push('}');
        }
        Value::Bool(true) => out.push_str("{True}"),
        Value::Bool(false) => out.push_str("{False}"),
        Value::Null => out.push_str("{null}"),
    }
}

/// Emits one object member: `{"key":` + value subtree + `}`.
///
/// `key` is already ASCII-filtered; keys keep their whitespace (only string
/// leaves are whitespace-stripped).
fn encode_member(key: &str, value: &Value, sort_keys: bool, out: &mut String) {
    out.push_str("{\"");
    out.push_str(&escape_brackets(key));
    out.push_str("\":");
    encode_into(value, sort_keys, out);
    out.push('}');
}

/// Formats a JSON number: integer spelling when the value round-trips
/// through `i32` truncation, shortest `f64` spelling otherwise.
///
/// Very large integers intentionally fall into the float branch and may
/// lose precision; this mirrors the established wire behavior.
fn format_number(n: &serde_json::Number) -> String {
    let d = n.as_f64().unwrap_or(0.0);
    let truncated = d as i32;
    if f64::from(truncated) == d {
        truncated.to_string()
    } else {
        d.to_string()
    }
}

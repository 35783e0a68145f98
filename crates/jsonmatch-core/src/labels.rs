//! Node labels and the per-run label dictionary.
//!
//! Every tree node carries a [`Label`] — the pair of a [`LabelKind`] and the
//! printable label text from the bracket form. Labels are interned into a
//! [`LabelDictionary`], which assigns dense `u32` ids in first-seen order.
//! Equality of ids implies equality of labels, so the cost models and the
//! inverted list work on ids alone and only go back through the dictionary
//! when they need the kind or the text.
//!
//! The dictionary is a per-run structure: one matching run owns exactly one
//! dictionary, and every tree built during that run resolves its ids against
//! it. It is not thread-safe.

use std::collections::HashMap;
use std::fmt;

/// Dense label identifier assigned by [`LabelDictionary::intern`].
pub type LabelId = u32;

/// The JSON-derived kind of a tree node label.
///
/// Structural kinds (`Object`, `Array`) carry no meaningful text; `Key`
/// labels keep the full `"name":` spelling from the bracket form so that
/// equal keys compare equal by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// An object node (bracket label `{}`, escaped as `\{\}` on the wire).
    Object,
    /// An array node (bracket label `[]`).
    Array,
    /// An object member node (`"name":`).
    Key,
    /// A string leaf (`"text"`).
    String,
    /// A numeric leaf.
    Number,
    /// A boolean leaf (`True` / `False`).
    Bool,
    /// The null leaf.
    Null,
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::Key => "key",
            Self::String => "string",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Null => "null",
        };
        f.write_str(s)
    }
}

/// A node label: kind plus the printable bracket-form text.
///
/// The text is stored exactly as it appears between the structural brackets
/// (after unescaping), so two labels are equal iff their bracket spellings
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    /// JSON-derived kind of the labelled node.
    pub kind: LabelKind,
    /// Unescaped label text; empty only for degenerate hand-written input.
    pub text: String,
}

impl Label {
    /// Builds a label by classifying raw (unescaped) bracket label text.
    ///
    /// Classification mirrors the encoder's output shapes:
    /// - `{}` → [`LabelKind::Object`], `[]` → [`LabelKind::Array`]
    /// - `"…":` → [`LabelKind::Key`], `"…"` → [`LabelKind::String`]
    /// - `True` / `False` → [`LabelKind::Bool`], `null` → [`LabelKind::Null`]
    /// - anything parseable as `f64` → [`LabelKind::Number`]
    ///
    /// Text that fits none of the above (possible in hand-written bracket
    /// strings) is treated as a string label.
    pub fn classify(text: String) -> Self {
        let kind = match text.as_str() {
            "{}" => LabelKind::Object,
            "[]" => LabelKind::Array,
            "True" | "False" => LabelKind::Bool,
            "null" => LabelKind::Null,
            other => {
                if other.len() >= 3 && other.starts_with('"') && other.ends_with("\":") {
                    LabelKind::Key
                } else if other.len() >= 2 && other.starts_with('"') && other.ends_with('"') {
                    LabelKind::String
                } else if other.parse::<f64>().is_ok() {
                    LabelKind::Number
                } else {
                    LabelKind::String
                }
            }
        };
        Self { kind, text }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.text)
    }
}

/// Error raised when the dictionary runs out of representable ids.
///
/// Purely theoretical for real inputs (`u32::MAX` distinct labels), but the
/// failure is explicit rather than a wrapping overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryOverflow;

impl fmt::Display for DictionaryOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("label dictionary exhausted the u32 id space")
    }
}

impl std::error::Error for DictionaryOverflow {}

/// Bidirectional `Label ↔ LabelId` mapping with dense first-seen ids.
#[derive(Debug, Default)]
pub struct LabelDictionary {
    ids: HashMap<Label, LabelId>,
    labels: Vec<Label>,
}

impl LabelDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `label`, assigning the next unused id on first
    /// sight.
    ///
    /// # Errors
    ///
    /// [`DictionaryOverflow`] if the next id would not fit in a `u32`.
    pub fn intern(&mut self, label: Label) -> Result<LabelId, DictionaryOverflow> {
        if let Some(&id) = self.ids.get(&label) {
            return Ok(id);
        }
        let id = LabelId::try_from(self.labels.len()).map_err(|_| DictionaryOverflow)?;
        self.ids.insert(label.clone(), id);
        self.labels.push(label);
        Ok(id)
    }

    /// Returns the label assigned to `id`.
    ///
    /// Total for every id this dictionary has handed out; a foreign id is a
    /// caller logic error and panics via the slice index.
    pub fn get(&self, id: LabelId) -> &Label {
        &self.labels[id as usize]
    }

    /// Number of distinct labels interned so far.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn label(kind: LabelKind, text: &str) -> Label {
        Label {
            kind,
            text: text.to_owned(),
        }
    }

    #[test]
    fn intern_assigns_dense_first_seen_ids() {
        let mut dict = LabelDictionary::new();
        let a = dict.intern(label(LabelKind::String, "\"a\"")).expect("intern");
        let b = dict.intern(label(LabelKind::String, "\"b\"")).expect("intern");
        let c = dict.intern(label(LabelKind::Object, "{}")).expect("intern");
        assert_eq!((a, b, c), (0, 1, 2));
    }

    #[test]
    fn intern_is_idempotent() {
        let mut dict = LabelDictionary::new();
        let first = dict.intern(label(LabelKind::Null, "null")).expect("intern");
        let second = dict.intern(label(LabelKind::Null, "null")).expect("intern");
        assert_eq!(first, second);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn get_round_trips_every_assigned_id() {
        let mut dict = LabelDictionary::new();
        let labels = [
            label(LabelKind::Object, "{}"),
            label(LabelKind::Key, "\"name\":"),
            label(LabelKind::Number, "42"),
        ];
        for l in &labels {
            dict.intern(l.clone()).expect("intern");
        }
        for (i, l) in labels.iter().enumerate() {
            assert_eq!(dict.get(i as LabelId), l);
        }
    }

    #[test]
    fn same_text_different_kind_gets_distinct_ids() {
        // "null" as a string leaf vs the null literal.
        let mut dict = LabelDictionary::new();
        let a = dict.intern(label(LabelKind::Null, "null")).expect("intern");
        let b = dict.intern(label(LabelKind::String, "null")).expect("intern");
        assert_ne!(a, b);
    }

    #[test]
    fn classify_structural_labels() {
        assert_eq!(Label::classify("{}".to_owned()).kind, LabelKind::Object);
        assert_eq!(Label::classify("[]".to_owned()).kind, LabelKind::Array);
    }

    #[test]
    fn classify_key_and_string() {
        assert_eq!(
            Label::classify("\"name\":".to_owned()).kind,
            LabelKind::Key
        );
        assert_eq!(
            Label::classify("\"name\"".to_owned()).kind,
            LabelKind::String
        );
    }

    #[test]
    fn classify_literals() {
        assert_eq!(Label::classify("True".to_owned()).kind, LabelKind::Bool);
        assert_eq!(Label::classify("False".to_owned()).kind, LabelKind::Bool);
        assert_eq!(Label::classify("null".to_owned()).kind, LabelKind::Null);
    }

    #[test]
    fn classify_numbers() {
        assert_eq!(Label::classify("42".to_owned()).kind, LabelKind::Number);
        assert_eq!(Label::classify("-3.5".to_owned()).kind, LabelKind::Number);
        assert_eq!(Label::classify("1e9".to_owned()).kind, LabelKind::Number);
    }

    #[test]
    fn classify_unquoted_text_falls_back_to_string() {
        assert_eq!(Label::classify("foo".to_owned()).kind, LabelKind::String);
        assert_eq!(Label::classify(String::new()).kind, LabelKind::String);
    }

    #[test]
    fn empty_dictionary_reports_empty() {
        let dict = LabelDictionary::new();
        assert!(dict.is_empty());
        assert_eq!(dict.len(), 0);
    }
}

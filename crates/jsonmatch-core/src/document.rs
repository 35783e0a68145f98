//! The document input contract and component preparation.
//!
//! A *document* is a JSON object carrying a top-level array named
//! `components`; each element is an arbitrary JSON value and is the unit of
//! matching. Documents may carry a display name (typically the source file
//! name); the engine itself identifies documents by their insertion-order
//! `doc_id` and treats names as opaque.
//!
//! Malformed inputs follow the skip-with-diagnostic policy: batch
//! construction logs a `tracing` warning for each offending document and
//! keeps going, so one bad file never aborts a run.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::bracket::encode;

/// A document accepted by the matching engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Opaque display name (e.g. the source file name).
    #[serde(skip)]
    pub name: Option<String>,
    /// The components to be matched, in document order.
    pub components: Vec<Value>,
}

/// Violations of the document input contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The input is not valid JSON at all.
    MalformedJson {
        /// Parser detail message.
        detail: String,
    },
    /// The input is JSON but not an object with a `components` array.
    MissingComponents {
        /// Deserializer detail message.
        detail: String,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { detail } => {
                write!(f, "document is not valid JSON: {detail}")
            }
            Self::MissingComponents { detail } => {
                write!(f, "document has no usable `components` array: {detail}")
            }
        }
    }
}

impl std::error::Error for DocumentError {}

impl Document {
    /// Builds a document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// [`DocumentError::MissingComponents`] when `value` is not an object
    /// with a `components` array.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        serde_json::from_value(value).map_err(|e| DocumentError::MissingComponents {
            detail: e.to_string(),
        })
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// [`DocumentError::MalformedJson`] for invalid JSON,
    /// [`DocumentError::MissingComponents`] for a contract violation.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(text).map_err(|e| DocumentError::MalformedJson {
            detail: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Attaches a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Encodes every component into bracket form.
    pub fn prepare(&self, sort_keys: bool) -> PreparedDocument {
        PreparedDocument {
            name: self.name.clone(),
            brackets: self
                .components
                .iter()
                .map(|c| encode(c, sort_keys))
                .collect(),
        }
    }
}

/// Builds documents from `(name, value)` pairs, skipping contract
/// violations with a logged diagnostic.
///
/// The surviving documents keep their relative order; `doc_id`s are their
/// indices in the returned vector.
pub fn collect_documents(
    values: impl IntoIterator<Item = (Option<String>, Value)>,
) -> Vec<Document> {
    let mut documents = Vec::new();
    for (name, value) in values {
        match Document::from_value(value) {
            Ok(doc) => documents.push(match name {
                Some(n) => doc.with_name(n),
                None => doc,
            }),
            Err(err) => {
                tracing::warn!(
                    name = name.as_deref().unwrap_or("<unnamed>"),
                    %err,
                    "skipping document"
                );
            }
        }
    }
    documents
}

/// A document with its components already in bracket form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedDocument {
    /// Display name carried through from the source document.
    pub name: Option<String>,
    /// One bracket string per component, in document order.
    pub brackets: Vec<String>,
}

impl PreparedDocument {
    /// Number of components.
    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Returns `true` if the document has no components.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

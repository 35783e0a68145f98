//! Cross-document JSON component matching.
//!
//! Given a set of JSON documents that each carry a top-level `components`
//! array, this crate determines which components across documents represent
//! the same thing. Components are serialized into a canonical bracket form,
//! compared with an exact JSON tree edit distance (JEDI) after a two-stage
//! inverted-list filter, disciplined pair-by-pair through an optimal
//! bipartite assignment, and finally fused into transitive groups with
//! union-find.
//!
//! The top-level entry points are [`n_way_match_pivot`],
//! [`n_way_match_all`], and the pair-level [`match_documents`]; see
//! [`MatchConfig`] for the tuning knobs.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod assignment;
pub mod bracket;
pub mod chains;
pub mod cost;
pub mod document;
pub mod engine;
pub mod inverted_list;
pub mod jedi;
pub mod label_sets;
pub mod labels;
pub mod matcher;
pub mod parser;
pub mod union_find;

pub use bracket::encode;
pub use chains::{build_component_chains, ComponentId, Group, Match};
pub use cost::{CostModel, CostModelKind, TextAwareCostModel, UnitCostModel};
pub use document::{collect_documents, Document, DocumentError, PreparedDocument};
pub use engine::{
    match_documents, n_way_match, n_way_match_all, n_way_match_pivot, MatchConfig, Strategy,
};
pub use jedi::{LookupResult, Verifier};
pub use labels::{Label, LabelDictionary, LabelId, LabelKind};
pub use parser::{parse, Node, ParseError};

/// Returns the current version of the jsonmatch-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Top-level matching strategies over a document set.
//!
//! Two strategies drive the pair matcher and fuse its output into groups:
//!
//! - **pivot** — the document with the most components (lowest index on
//!   ties) is matched against every other document. Cheap, and good
//!   enough when one document plausibly covers the whole component space.
//! - **all-pairs** — every ordered document pair is matched. Quadratic in
//!   the document count but catches components the pivot lacks.
//!
//! Both return the transitive groups; the raw pairwise matches are
//! available through [`match_documents`].

use crate::chains::{build_component_chains, Group, Match};
use crate::cost::CostModelKind;
use crate::document::Document;
use crate::labels::LabelDictionary;
use crate::matcher::match_pair;
use crate::parser::ParseError;

/// Configuration for a matching run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Matches with a JEDI value above this are dropped after assignment.
    pub cost_thresh: f64,
    /// Serialize object keys in sorted order when encoding components.
    pub sort_keys: bool,
    /// Per-candidate upper bound inside the lookup. The default is high
    /// enough to disable distance-based rejection at that layer; all
    /// effective filtering happens at `cost_thresh`.
    pub distance_threshold: f64,
    /// Which cost model the verifier and assignment use.
    pub cost_model: CostModelKind,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cost_thresh: 25.0,
            sort_keys: false,
            distance_threshold: 100_000.0,
            cost_model: CostModelKind::Unit,
        }
    }
}

/// The two driving strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Largest document against every other.
    Pivot,
    /// Every ordered pair.
    AllPairs,
}

/// Runs `strategy` over `documents` and returns the transitive groups.
///
/// # Errors
///
/// Propagates [`ParseError`] from hand-fed bracket input; never fails for
/// documents prepared by the built-in encoder.
pub fn n_way_match(
    documents: &[Document],
    strategy: Strategy,
    config: &MatchConfig,
) -> Result<Vec<Group>, ParseError> {
    match strategy {
        Strategy::Pivot => n_way_match_pivot(documents, config),
        Strategy::AllPairs => n_way_match_all(documents, config),
    }
}

/// Pivot strategy: matches the largest document against every other and
/// chains the results.
///
/// With fewer than two documents the result is empty.
///
/// # Errors
///
/// See [`n_way_match`].
pub fn n_way_match_pivot(
    documents: &[Document],
    config: &MatchConfig,
) -> Result<Vec<Group>, ParseError> {
    let prepared: Vec<_> = documents.iter().map(|d| d.prepare(config.sort_keys)).collect();

    let mut pivot_index = 0usize;
    let mut pivot_size = 0usize;
    for (i, doc) in prepared.iter().enumerate() {
        if doc.len() > pivot_size {
            pivot_index = i;
            pivot_size = doc.len();
        }
    }

    tracing::debug!(pivot_index, pivot_size, documents = prepared.len(), "pivot selected");

    let mut dict = LabelDictionary::new();
    let mut matches: Vec<Match> = Vec::new();
    for k in 0..prepared.len() {
        if k == pivot_index {
            continue;
        }
        matches.extend(match_pair(
            &prepared[pivot_index],
            &prepared[k],
            pivot_index,
            k,
            config,
            &mut dict,
        )?);
    }

    Ok(build_component_chains(&matches))
}

/// All-pairs strategy: matches every ordered document pair and chains the
/// results.
///
/// # Errors
///
/// See [`n_way_match`].
pub fn n_way_match_all(
    documents: &[Document],
    config: &MatchConfig,
) -> Result<Vec<Group>, ParseError> {
    let prepared: Vec<_> = documents.iter().map(|d| d.prepare(config.sort_keys)).collect();

    let mut dict = LabelDictionary::new();
    let mut matches: Vec<Match> = Vec::new();
    for p in 0..prepared.len() {
        for k in 0..prepared.len() {
            if k == p {
                continue;
            }
            matches.extend(match_pair(
                &prepared[p],
                &prepared[k],
                p,
                k,
                config,
                &mut dict,
            )?);
        }
    }

    Ok(build_component_chains(&matches))
}

/// Pair-level entry point: matches `query` (doc id 0) against `target`
/// (doc id 1) and returns the raw match list.
///
/// # Errors
///
/// See [`n_way_match`].
pub fn match_documents(
    query: &Document,
    target: &Document,
    config: &MatchConfig,
) -> Result<Vec<Match>, ParseError> {
    let mut dict = LabelDictionary::new();
    match_pair(
        &query.prepare(config.sort_keys),
        &target.prepare(config.sort_keys),
        0,
        1,
        config,
        &mut dict,
    )
}

//! Two-stage inverted-list candidate filter.
//!
//! The index maps each label id to its postings — `(set_id, position)`
//! pairs recording where the label sits in each tree's frequency-ordered
//! list. Probing applies two lower bounds before any exact distance is
//! computed:
//!
//! 1. **Size bound** — a tree whose node count differs from the query's by
//!    more than the distance budget cannot be within budget (delete and
//!    insert both cost at least 1 under the provided models).
//! 2. **Prefix-overlap bound** — for a query of length `m` and budget `t`,
//!    two trees within distance `t` must share at least `m − t` labels, and
//!    the shared labels must already appear within the first `m − t + 1`
//!    positions of each frequency-ordered list.
//!
//! When `m − t ≤ 0` the overlap requirement is vacuous and every tree in
//! the size window qualifies; with the engine's default distance budget the
//! filter therefore passes everything through and all pruning happens at
//! the assignment threshold.

use std::collections::HashMap;

use crate::label_sets::{LabelSet, LabelSetCollection};
use crate::labels::LabelId;

/// A single posting: which set contains the label and at which position of
/// that set's frequency-ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    /// Tree / set id within the collection.
    pub set_id: usize,
    /// Position of this occurrence in the set's ordered list.
    pub pos: usize,
}

/// Inverted index over a collection's frequency-ordered label sets.
#[derive(Debug, Clone)]
pub struct TwoStageInvertedList {
    /// Postings per label id, ascending by `set_id` (and by `pos` within a
    /// set, since sets are scanned front to back).
    postings: Vec<Vec<Posting>>,
}

impl TwoStageInvertedList {
    /// Builds the index over `collection`.
    ///
    /// Each occurrence of a label in a set contributes one posting, so the
    /// index is exactly consistent with the set representation.
    pub fn build(collection: &LabelSetCollection) -> Self {
        let mut postings: Vec<Vec<Posting>> = vec![Vec::new(); collection.label_count()];
        for (set_id, set) in collection.sets.iter().enumerate() {
            for (pos, &label) in set.labels.iter().enumerate() {
                postings[label as usize].push(Posting { set_id, pos });
            }
        }
        Self { postings }
    }

    /// Returns the candidate set ids for `query_id` under `max_distance`.
    ///
    /// The query itself is never a candidate. Output is ascending by set
    /// id, deduplicated.
    pub fn probe(
        &self,
        collection: &LabelSetCollection,
        query_id: usize,
        max_distance: f64,
    ) -> Vec<usize> {
        let query = &collection.sets[query_id];
        let m = query.labels.len();
        // Budget in whole edit operations.
        let t = if max_distance >= usize::MAX as f64 {
            usize::MAX
        } else {
            max_distance.ceil().max(0.0) as usize
        };

        if m == 0 || t >= m {
            // Overlap requirement is vacuous: size window only.
            return self.size_window(collection, query_id, query.size, t);
        }

        let required = m - t;
        let query_prefix = &query.labels[..(required + 1).min(m)];

        // Count multiset overlap between the query prefix and each
        // candidate's prefix, capping per-label contributions at the
        // smaller occurrence count.
        let mut query_counts: HashMap<LabelId, usize> = HashMap::new();
        for &l in query_prefix {
            *query_counts.entry(l).or_insert(0) += 1;
        }

        let mut overlap: HashMap<usize, usize> = HashMap::new();
        for (&label, &q_count) in &query_counts {
            let mut per_set: HashMap<usize, usize> = HashMap::new();
            for p in &self.postings[label as usize] {
                if p.set_id == query_id {
                    continue;
                }
                let cand = &collection.sets[p.set_id];
                if !within_size_window(query.size, cand.size, t) {
                    continue;
                }
                let cand_prefix_len = cand.labels.len().saturating_sub(t) + 1;
                if p.pos < cand_prefix_len {
                    *per_set.entry(p.set_id).or_insert(0) += 1;
                }
            }
            for (set_id, c_count) in per_set {
                *overlap.entry(set_id).or_insert(0) += c_count.min(q_count);
            }
        }

        let mut out: Vec<usize> = overlap
            .into_iter()
            .filter(|&(_, count)| count >= required)
            .map(|(set_id, _)| set_id)
            .collect();
        out.sort_unstable();
        out
    }

    /// Stage-1-only enumeration: every set whose size is within `t` of
    /// `query_size`, excluding the query.
    fn size_window(
        &self,
        collection: &LabelSetCollection,
        query_id: usize,
        query_size: usize,
        t: usize,
    ) -> Vec<usize> {
        let lo = query_size.saturating_sub(t);
        let hi = query_size.saturating_add(t);
        let mut out: Vec<usize> = collection
            .size_index
            .range(lo..=hi)
            .flat_map(|(_, ids)| ids.iter().copied())
            .filter(|&id| id != query_id)
            .collect();
        out.sort_unstable();
        out
    }
}

fn within_size_window(a: usize, b: usize, t: usize) -> bool {
    a.abs_diff(b) <= t
}

//! Frequency-ordered label-set representation of a tree collection.
//!
//! For candidate filtering each tree is reduced to the multiset of its label
//! ids, ordered by how rare each label is across the whole collection
//! (rarest first, ties broken by id). Rare labels sort to the front, which
//! is what makes the inverted list's prefix bound selective.
//!
//! The converter is a builder: it consumes the tree collection once and
//! returns an immutable [`LabelSetCollection`] for query-time use.

use std::collections::BTreeMap;

use crate::labels::LabelId;
use crate::parser::Node;

/// One tree's set representation: postorder size and the frequency-ordered
/// list of its label ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    /// Node count of the tree.
    pub size: usize,
    /// Label ids sorted ascending by `(global frequency, id)`.
    pub labels: Vec<LabelId>,
}

/// The converter's output over a tree collection.
///
/// `sets[i]` is the representation of tree `i`; `frequencies[l]` is the
/// number of occurrences of label `l` across the collection; `size_index`
/// groups set ids by tree size for size-bounded candidate enumeration.
#[derive(Debug, Clone, Default)]
pub struct LabelSetCollection {
    /// Per-tree set representations, indexed by tree id.
    pub sets: Vec<LabelSet>,
    /// Global occurrence count per label id.
    pub frequencies: Vec<usize>,
    /// Tree size → set ids of that size.
    pub size_index: BTreeMap<usize, Vec<usize>>,
}

impl LabelSetCollection {
    /// Number of distinct label ids observed (the histogram's length).
    pub fn label_count(&self) -> usize {
        self.frequencies.len()
    }
}

/// Builds the frequency-ordered set representation for `trees`.
///
/// Two passes: postorder label recording plus the global histogram, then a
/// per-tree sort by `(frequency, id)`. The sort key depends only on the
/// collection's content, never on input order, so the representation is
/// deterministic for a given collection.
pub fn convert(trees: &[Node]) -> LabelSetCollection {
    let mut postorder_labels: Vec<Vec<LabelId>> = Vec::with_capacity(trees.len());
    let mut frequencies: Vec<usize> = Vec::new();

    for tree in trees {
        let mut labels = Vec::with_capacity(tree.size());
        record_postorder(tree, &mut labels);
        for &l in &labels {
            let idx = l as usize;
            if idx >= frequencies.len() {
                frequencies.resize(idx + 1, 0);
            }
            frequencies[idx] += 1;
        }
        postorder_labels.push(labels);
    }

    let mut sets = Vec::with_capacity(postorder_labels.len());
    let mut size_index: BTreeMap<usize, Vec<usize>> = BTreeMap::new();

    for (set_id, mut labels) in postorder_labels.into_iter().enumerate() {
        labels.sort_by_key(|&l| (frequencies[l as usize], l));
        size_index.entry(labels.len()).or_default().push(set_id);
        sets.push(LabelSet {
            size: labels.len(),
            labels,
        });
    }

    LabelSetCollection {
        sets,
        frequencies,
        size_index,
    }
}

fn record_postorder(node: &Node, out: &mut Vec<LabelId>) {
    for child in &node.children {
        record_postorder(child, out);
    }
    out.push(node.label_id);
}

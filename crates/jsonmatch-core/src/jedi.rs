//! Exact JSON tree edit distance (JEDI) verification.
//!
//! JEDI is a JSON-aware tree edit distance: children of two object nodes
//! are matched order-independently through a minimum-cost bipartite
//! assignment over the member subtrees, while every other child forest
//! (arrays, members, mixed kinds) is matched with the Zhang–Shasha ordered
//! forest recurrence. Node costs come from the active [`CostModel`].
//!
//! Forests are postorder intervals `[s, e)` over the flattened trees. The
//! recurrence on a pair of forests considers, for the rightmost roots:
//!
//! - deleting the root of the last tree — the interval just loses its last
//!   node, so the root's children splice into the forest at the vacated
//!   position and stay available for later matching,
//! - inserting the other forest's last root, symmetrically,
//! - matching the two rightmost subtrees against each other and the rests
//!   against the rests; when both forests are single trees this expands to
//!   a root rename plus the distance between the child forests.
//!
//! The object discipline replaces that last expansion for object–object
//! pairs: members are matched as whole key–value subtrees via an optimal
//! assignment, with unmatched members deleted or inserted outright.
//!
//! Forest subproblems are memoized, so each reachable interval pair is
//! solved once.

use std::collections::HashMap;

use crate::assignment::{solve, CostMatrix};
use crate::cost::CostModel;
use crate::inverted_list::TwoStageInvertedList;
use crate::label_sets::LabelSetCollection;
use crate::labels::{LabelDictionary, LabelId, LabelKind};
use crate::parser::Node;

/// One verified candidate pair with its exact distance.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Query tree id within the collection.
    pub tree_id_1: usize,
    /// Candidate tree id within the collection.
    pub tree_id_2: usize,
    /// Exact JEDI value between the two trees.
    pub jedi_value: f64,
}

/// JEDI verifier parameterized by a cost model.
pub struct Verifier<'a, C: CostModel> {
    dict: &'a LabelDictionary,
    cost: &'a C,
}

impl<'a, C: CostModel> Verifier<'a, C> {
    /// Creates a verifier resolving label kinds against `dict`.
    pub fn new(dict: &'a LabelDictionary, cost: &'a C) -> Self {
        Self { dict, cost }
    }

    /// Computes the exact JEDI value between two trees.
    pub fn distance(&self, a: &Node, b: &Node) -> f64 {
        let f1 = Flat::build(a, self.cost);
        let f2 = Flat::build(b, self.cost);
        let mut state = Jedi {
            dict: self.dict,
            cost: self.cost,
            f1: &f1,
            f2: &f2,
            memo: HashMap::new(),
        };
        state.tree_dist(f1.root(), f2.root())
    }

    /// Probes the index for candidates of `query_id` and verifies each one
    /// exactly, keeping results within `max_distance`.
    ///
    /// Candidate enumeration order is the index's (ascending tree id), so
    /// the output is deterministic.
    pub fn execute_lookup(
        &self,
        trees: &[Node],
        collection: &LabelSetCollection,
        index: &TwoStageInvertedList,
        query_id: usize,
        max_distance: f64,
    ) -> Vec<LookupResult> {
        let mut results = Vec::new();
        for candidate in index.probe(collection, query_id, max_distance) {
            let value = self.distance(&trees[query_id], &trees[candidate]);
            if value <= max_distance {
                results.push(LookupResult {
                    tree_id_1: query_id,
                    tree_id_2: candidate,
                    jedi_value: value,
                });
            }
        }
        results
    }
}

/// Postorder-flattened tree.
///
/// A node's subtree occupies the contiguous postorder interval
/// `[lld[i], i]`, where `lld` is the leftmost leaf descendant. Per-node
/// delete/insert costs are kept as prefix sums so any forest interval
/// prices its wholesale removal or insertion in constant time.
struct Flat {
    labels: Vec<LabelId>,
    children: Vec<Vec<usize>>,
    lld: Vec<usize>,
    del_prefix: Vec<f64>,
    ins_prefix: Vec<f64>,
}

impl Flat {
    fn build<C: CostModel>(root: &Node, cost: &C) -> Self {
        let mut flat = Self {
            labels: Vec::new(),
            children: Vec::new(),
            lld: Vec::new(),
            del_prefix: Vec::new(),
            ins_prefix: Vec::new(),
        };
        flat.push(root);

        flat.del_prefix.push(0.0);
        flat.ins_prefix.push(0.0);
        for i in 0..flat.labels.len() {
            let label = flat.labels[i];
            flat.del_prefix.push(flat.del_prefix[i] + cost.del(label));
            flat.ins_prefix.push(flat.ins_prefix[i] + cost.ins(label));
        }
        flat
    }

    /// Appends `node`'s subtree in postorder, returning its index.
    fn push(&mut self, node: &Node) -> usize {
        let child_ids: Vec<usize> = node.children.iter().map(|c| self.push(c)).collect();
        let idx = self.labels.len();
        let lld = child_ids.first().map_or(idx, |&c| self.lld[c]);
        self.labels.push(node.label_id);
        self.lld.push(lld);
        self.children.push(child_ids);
        idx
    }

    /// The root is the last node in postorder.
    fn root(&self) -> usize {
        self.labels.len() - 1
    }

    /// The postorder interval `[s, e)` covering node `i`'s subtree.
    fn subtree(&self, i: usize) -> (usize, usize) {
        (self.lld[i], i + 1)
    }

    /// Cost of deleting every node in `[s, e)`.
    fn del_range(&self, s: usize, e: usize) -> f64 {
        self.del_prefix[e] - self.del_prefix[s]
    }

    /// Cost of inserting every node in `[s, e)`.
    fn ins_range(&self, s: usize, e: usize) -> f64 {
        self.ins_prefix[e] - self.ins_prefix[s]
    }
}

/// One distance computation: both flattened trees plus the memo table over
/// forest interval pairs.
struct Jedi<'a, C: CostModel> {
    dict: &'a LabelDictionary,
    cost: &'a C,
    f1: &'a Flat,
    f2: &'a Flat,
    memo: HashMap<(usize, usize, usize, usize), f64>,
}

impl<C: CostModel> Jedi<'_, C> {
    /// Distance between the complete subtrees rooted at `i` and `j`.
    fn tree_dist(&mut self, i: usize, j: usize) -> f64 {
        let (s1, e1) = self.f1.subtree(i);
        let (s2, e2) = self.f2.subtree(j);
        self.forest_dist(s1, e1, s2, e2)
    }

    /// Edit distance between the postorder forests `[s1, e1)` and `[s2, e2)`.
    fn forest_dist(&mut self, s1: usize, e1: usize, s2: usize, e2: usize) -> f64 {
        if s1 >= e1 && s2 >= e2 {
            return 0.0;
        }
        if s1 >= e1 {
            return self.f2.ins_range(s2, e2);
        }
        if s2 >= e2 {
            return self.f1.del_range(s1, e1);
        }

        let key = (s1, e1, s2, e2);
        if let Some(&known) = self.memo.get(&key) {
            return known;
        }

        let r1 = e1 - 1;
        let r2 = e2 - 1;
        let l1 = self.f1.lld[r1];
        let l2 = self.f2.lld[r2];

        // Delete the rightmost root of F1: dropping only the last postorder
        // node splices its children into the forest, where they remain
        // available for matching.
        let mut best =
            self.forest_dist(s1, e1 - 1, s2, e2) + self.cost.del(self.f1.labels[r1]);

        // Insert the rightmost root of F2, symmetrically.
        best = best.min(
            self.forest_dist(s1, e1, s2, e2 - 1) + self.cost.ins(self.f2.labels[r2]),
        );

        if l1 == s1 && l2 == s2 {
            // Both forests are single trees: map root to root. Object pairs
            // match their members order-independently; everything else
            // recurses on the ordered child forests.
            let object_pair = self.dict.get(self.f1.labels[r1]).kind == LabelKind::Object
                && self.dict.get(self.f2.labels[r2]).kind == LabelKind::Object;
            let ren = self.cost.ren(self.f1.labels[r1], self.f2.labels[r2]);
            let forests = if object_pair {
                let cs1 = self.f1.children[r1].clone();
                let cs2 = self.f2.children[r2].clone();
                self.member_assignment(&cs1, &cs2)
            } else {
                self.forest_dist(l1, r1, l2, r2)
            };
            best = best.min(ren + forests);
        } else {
            // Split off the rightmost subtrees: if both roots take part in
            // the mapping they must map to each other, so the pair costs
            // the whole-tree distance and the rests match independently.
            let split =
                self.forest_dist(s1, l1, s2, l2) + self.tree_dist(r1, r2);
            best = best.min(split);
        }

        self.memo.insert(key, best);
        best
    }

    /// Order-independent member matching: pad to square, assign, sum.
    ///
    /// Members are matched as whole key–value subtrees; unmatched members
    /// are deleted or inserted outright.
    fn member_assignment(&mut self, cs1: &[usize], cs2: &[usize]) -> f64 {
        let p = cs1.len();
        let q = cs2.len();
        let n = p.max(q);
        if n == 0 {
            return 0.0;
        }

        let mut matrix = CostMatrix::filled(n, 0.0);
        for row in 0..n {
            for col in 0..n {
                let value = match (cs1.get(row), cs2.get(col)) {
                    (Some(&a), Some(&b)) => self.tree_dist(a, b),
                    (Some(&a), None) => {
                        let (s, e) = self.f1.subtree(a);
                        self.f1.del_range(s, e)
                    }
                    (None, Some(&b)) => {
                        let (s, e) = self.f2.subtree(b);
                        self.f2.ins_range(s, e)
                    }
                    (None, None) => 0.0,
                };
                matrix.set(row, col, value);
            }
        }

        match solve(&matrix) {
            Ok(perm) => perm
                .iter()
                .enumerate()
                .map(|(row, &col)| matrix.at(row, col))
                .sum(),
            // Unreachable with finite entries; the exhaustive fallback is
            // still a valid edit script.
            Err(_) => {
                cs1.iter()
                    .map(|&a| {
                        let (s, e) = self.f1.subtree(a);
                        self.f1.del_range(s, e)
                    })
                    .sum::<f64>()
                    + cs2
                        .iter()
                        .map(|&b| {
                            let (s, e) = self.f2.subtree(b);
                            self.f2.ins_range(s, e)
                        })
                        .sum::<f64>()
            }
        }
    }
}

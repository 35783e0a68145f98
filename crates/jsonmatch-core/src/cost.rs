//! Edit cost models over interned label ids.
//!
//! The verifier and the pair matcher are generic over [`CostModel`], which
//! exposes the three primitive edit costs: rename, delete, insert. Costs
//! must be non-negative and `ren(x, x)` must be zero; the triangle
//! inequality is not required.

use crate::labels::{LabelDictionary, LabelId};

/// Sentinel cost for forbidden edits and matrix padding.
///
/// Finite so the assignment solver always has a feasible (if useless)
/// arc; any real match costs orders of magnitude less.
pub const MAX_COST: f64 = 1e9;

/// Primitive edit costs between interned labels.
pub trait CostModel {
    /// Cost of renaming label `a` to label `b`. Zero when `a == b`.
    fn ren(&self, a: LabelId, b: LabelId) -> f64;

    /// Cost of deleting a node labelled `a`.
    fn del(&self, a: LabelId) -> f64;

    /// Cost of inserting a node labelled `a`.
    fn ins(&self, a: LabelId) -> f64;
}

/// Selects which cost model a matching run uses.
///
/// The models borrow run-local state (the text-aware model resolves label
/// text through the dictionary), so configuration carries this tag and the
/// engine instantiates the model where the dictionary is in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostModelKind {
    /// [`UnitCostModel`].
    #[default]
    Unit,
    /// [`TextAwareCostModel`].
    TextAware,
}

/// Unit costs: rename 1 (0 on equal ids), delete 1, insert 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitCostModel;

impl CostModel for UnitCostModel {
    fn ren(&self, a: LabelId, b: LabelId) -> f64 {
        if a == b {
            0.0
        } else {
            1.0
        }
    }

    fn del(&self, _: LabelId) -> f64 {
        1.0
    }

    fn ins(&self, _: LabelId) -> f64 {
        1.0
    }
}

/// Text-aware costs: kind mismatches are effectively forbidden
/// ([`MAX_COST`]), equal ids are free, and any other rename costs
/// `0.5 + lev_norm(text_a, text_b)` where `lev_norm` is the Levenshtein
/// distance divided by the longer text's length.
#[derive(Debug)]
pub struct TextAwareCostModel<'a> {
    dict: &'a LabelDictionary,
}

impl<'a> TextAwareCostModel<'a> {
    /// Builds a model resolving ids against `dict`.
    pub fn new(dict: &'a LabelDictionary) -> Self {
        Self { dict }
    }
}

impl CostModel for TextAwareCostModel<'_> {
    fn ren(&self, a: LabelId, b: LabelId) -> f64 {
        if a == b {
            return 0.0;
        }
        let la = self.dict.get(a);
        let lb = self.dict.get(b);
        if la.kind != lb.kind {
            return MAX_COST;
        }
        0.5 + normalized_levenshtein(&la.text, &lb.text)
    }

    fn del(&self, _: LabelId) -> f64 {
        1.0
    }

    fn ins(&self, _: LabelId) -> f64 {
        1.0
    }
}

/// Levenshtein distance divided by the longer input's length, in `[0, 1]`.
///
/// Two-row dynamic program; byte-wise comparison (label text is ASCII by
/// construction).
fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.is_empty() {
        return if b.is_empty() { 0.0 } else { 1.0 };
    }
    if b.is_empty() {
        return 1.0;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let sub = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + sub);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()] as f64 / a.len().max(b.len()) as f64
}

//! Fusing pairwise matches into transitive component groups.
//!
//! A [`Match`] relates one component of one document to one component of
//! another. The chain builder runs union-find over every match and returns
//! the connected components: each group collects the [`ComponentId`]s that
//! are transitively "the same thing" across the document set.

use std::collections::HashMap;
use std::fmt;

use crate::union_find::UnionFind;

/// One accepted pairwise component match.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    /// Document id of the query (pivot) side.
    pub query_doc: usize,
    /// Document id of the target side.
    pub target_doc: usize,
    /// Component index within the query document.
    pub query_comp: usize,
    /// Component index within the target document.
    pub target_comp: usize,
    /// JEDI value the assignment accepted for this pair.
    pub cost: f64,
}

/// Identity of one component of one document.
///
/// Equality and hashing use only `(doc_id, comp_id)`; `cost` is carried for
/// consumers that want to display the match cost that pulled the component
/// into its group, and takes no part in identity.
#[derive(Debug, Clone, Copy)]
pub struct ComponentId {
    /// Document id (insertion order of the document set).
    pub doc_id: usize,
    /// Component index within the document's `components` array.
    pub comp_id: usize,
    /// Cost of the match that introduced this component.
    pub cost: f64,
}

impl PartialEq for ComponentId {
    fn eq(&self, other: &Self) -> bool {
        self.doc_id == other.doc_id && self.comp_id == other.comp_id
    }
}

impl Eq for ComponentId {}

impl std::hash::Hash for ComponentId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.doc_id.hash(state);
        self.comp_id.hash(state);
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.doc_id, self.comp_id)
    }
}

/// A transitive group of cross-document equivalents.
pub type Group = Vec<ComponentId>;

/// Unites every match's two endpoints and returns the resulting partition.
///
/// Only components touched by at least one match appear in the output.
/// Groups and their members are ordered by first appearance in `matches`,
/// so the output is deterministic for a given match list.
pub fn build_component_chains(matches: &[Match]) -> Vec<Group> {
    // First pass: assign dense ordinals in order of first appearance.
    let mut ordinals: HashMap<(usize, usize), usize> = HashMap::new();
    let mut members: Vec<ComponentId> = Vec::new();

    let mut ordinal_of = |c: ComponentId, members: &mut Vec<ComponentId>| -> usize {
        *ordinals.entry((c.doc_id, c.comp_id)).or_insert_with(|| {
            members.push(c);
            members.len() - 1
        })
    };

    let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(matches.len());
    for m in matches {
        let a = ordinal_of(
            ComponentId {
                doc_id: m.query_doc,
                comp_id: m.query_comp,
                cost: m.cost,
            },
            &mut members,
        );
        let b = ordinal_of(
            ComponentId {
                doc_id: m.target_doc,
                comp_id: m.target_comp,
                cost: m.cost,
            },
            &mut members,
        );
        pairs.push((a, b));
    }

    let mut uf = UnionFind::new(members.len());
    for (a, b) in pairs {
        uf.union(a, b);
    }

    // Second pass: bucket members by representative, preserving first-seen
    // order of both groups and members.
    let mut group_of_root: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for (ordinal, component) in members.iter().enumerate() {
        let root = uf.find(ordinal);
        let group_idx = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[group_idx].push(*component);
    }

    groups
}

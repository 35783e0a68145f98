//! Optimal one-to-one component matching between two documents.
//!
//! For each pivot component the trees are rebuilt (pivot at tree id 0, the
//! target's components at ids 1..=t), the label-set filter and the JEDI
//! verifier produce the row of exact distances, and the rows accumulate
//! into a square cost matrix padded with [`MAX_COST`]. A minimum-cost
//! assignment over that matrix decides which pairs become [`Match`]es;
//! pairs whose cost exceeds the configured threshold are dropped.
//!
//! Trees, label sets, and the inverted list are rebuilt per pivot row and
//! owned by that row; the label dictionary is the one run-lifetime
//! structure and is threaded through mutably.

use crate::assignment::{solve, CostMatrix};
use crate::chains::Match;
use crate::cost::{CostModel, CostModelKind, TextAwareCostModel, UnitCostModel, MAX_COST};
use crate::document::PreparedDocument;
use crate::engine::MatchConfig;
use crate::inverted_list::TwoStageInvertedList;
use crate::jedi::{LookupResult, Verifier};
use crate::label_sets::convert;
use crate::labels::LabelDictionary;
use crate::parser::{parse, Node, ParseError};

/// Matches the components of `pivot` against the components of `target`.
///
/// Returns the accepted matches, labelled with `pivot_doc` / `target_doc`.
/// An empty side yields no matches; a non-optimal assignment yields no
/// matches for this pair (not an error).
///
/// # Errors
///
/// [`ParseError`] if a bracket string is malformed — impossible for
/// encoder-produced strings, so this indicates hand-fed input.
pub fn match_pair(
    pivot: &PreparedDocument,
    target: &PreparedDocument,
    pivot_doc: usize,
    target_doc: usize,
    config: &MatchConfig,
    dict: &mut LabelDictionary,
) -> Result<Vec<Match>, ParseError> {
    let p = pivot.len();
    let t = target.len();
    if p == 0 || t == 0 {
        return Ok(Vec::new());
    }

    let n = p.max(t);
    let mut costs = CostMatrix::filled(n, MAX_COST);

    for i in 0..p {
        let mut trees: Vec<Node> = Vec::with_capacity(t + 1);
        trees.push(parse(&pivot.brackets[i], dict)?);
        for bracket in &target.brackets {
            trees.push(parse(bracket, dict)?);
        }

        let collection = convert(&trees);
        let index = TwoStageInvertedList::build(&collection);

        let results = match config.cost_model {
            CostModelKind::Unit => {
                let model = UnitCostModel;
                verify_row(dict, &model, &trees, &collection, &index, config)
            }
            CostModelKind::TextAware => {
                let model = TextAwareCostModel::new(dict);
                verify_row(dict, &model, &trees, &collection, &index, config)
            }
        };

        for res in results {
            if res.tree_id_1 != 0 {
                continue;
            }
            // Targets start at tree id 1.
            let j = res.tree_id_2 - 1;
            if j < t {
                costs.set(i, j, res.jedi_value);
            }
        }
    }

    let permutation = match solve(&costs) {
        Ok(perm) => perm,
        Err(err) => {
            tracing::warn!(pivot_doc, target_doc, %err, "dropping document pair");
            return Ok(Vec::new());
        }
    };

    let mut matches = Vec::new();
    for (i, &j) in permutation.iter().enumerate().take(p) {
        if j >= t {
            continue;
        }
        let cost = costs.at(i, j);
        if cost >= MAX_COST || cost > config.cost_thresh {
            continue;
        }
        matches.push(Match {
            query_doc: pivot_doc,
            target_doc,
            query_comp: i,
            target_comp: j,
            cost,
        });
    }

    tracing::debug!(
        pivot_doc,
        target_doc,
        matched = matches.len(),
        "document pair assigned"
    );
    Ok(matches)
}

fn verify_row<C: CostModel>(
    dict: &LabelDictionary,
    model: &C,
    trees: &[Node],
    collection: &crate::label_sets::LabelSetCollection,
    index: &TwoStageInvertedList,
    config: &MatchConfig,
) -> Vec<LookupResult> {
    Verifier::new(dict, model).execute_lookup(trees, collection, index, 0, config.distance_threshold)
}

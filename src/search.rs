use float_ord::FloatOrd;
use itertools::Itertools;
use serde::Serialize;

use crate::error::Error;
use crate::matrix::AffinityMatrix;
use crate::score::{conductance, density, Weights};
use crate::{Item, GROUP_SIZE};

/// A scored subset of items proposed as a possible or partial solution
/// group.
///
/// Candidates are ephemeral: the ranking functions produce them fresh on
/// every call and nothing in the crate holds on to them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Candidate {
    /// Member items, ascending.
    pub items: Vec<Item>,
    /// Mean internal affinity; see [`density`].
    pub density: f64,
    /// Enclosure ratio, or [`None`] where undefined; see [`conductance`].
    pub conductance: Option<f64>,
    /// Weighted combination the rankings sort by.
    pub score: f64,
}

impl Candidate {
    // Descending by score; equal scores fall back to ascending item
    // indices so rankings do not depend on enumeration or sort internals.
    fn rank_key(&self) -> (FloatOrd<f64>, &[Item]) {
        (FloatOrd(-self.score), &self.items)
    }
}

/// Score a single group of items against the matrix.
pub fn score_group(
    items: &[Item],
    matrix: &AffinityMatrix,
    weights: &Weights,
) -> Result<Candidate, Error> {
    let conductance = conductance(items, matrix)?;
    let density = density(items, matrix)?;

    let mut items = items.to_vec();
    items.sort_unstable();
    Ok(Candidate {
        items,
        density,
        conductance,
        score: weights.combine(conductance, density),
    })
}

/// Every four-item subset of `available`, scored and ranked descending.
///
/// The enumeration is exhaustive — `C(|available|, 4)` candidates, no
/// pruning and no deduplication. Filtering against previously tried
/// guesses is the caller's concern.
pub fn rank_four_groups(
    matrix: &AffinityMatrix,
    available: &[Item],
    weights: &Weights,
) -> Result<Vec<Candidate>, Error> {
    rank(
        available.iter().copied().combinations(GROUP_SIZE),
        matrix,
        weights,
    )
}

/// Every trio inside a given four-item group, ranked descending.
///
/// Used after a one-away guess to ask which three of the four were
/// probably the real partial group.
pub fn rank_three_subsets(
    four: &[Item; GROUP_SIZE],
    matrix: &AffinityMatrix,
    weights: &Weights,
) -> Result<Vec<Candidate>, Error> {
    rank(
        four.iter().copied().combinations(GROUP_SIZE - 1),
        matrix,
        weights,
    )
}

/// Each way of extending `trio` with a fourth item from `available`,
/// ranked descending.
pub fn rank_completions(
    trio: &[Item; GROUP_SIZE - 1],
    matrix: &AffinityMatrix,
    available: &[Item],
    weights: &Weights,
) -> Result<Vec<Candidate>, Error> {
    rank(
        available
            .iter()
            .copied()
            .filter(|fourth| !trio.contains(fourth))
            .map(|fourth| trio.iter().copied().chain([fourth]).collect_vec()),
        matrix,
        weights,
    )
}

fn rank(
    groups: impl Iterator<Item = Vec<Item>>,
    matrix: &AffinityMatrix,
    weights: &Weights,
) -> Result<Vec<Candidate>, Error> {
    let mut candidates = groups
        .map(|items| score_group(&items, matrix, weights))
        .collect::<Result<Vec<_>, _>>()?;
    candidates.sort_unstable_by(|a, b| a.rank_key().cmp(&b.rank_key()));
    Ok(candidates)
}

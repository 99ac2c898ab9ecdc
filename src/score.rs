use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::matrix::AffinityMatrix;
use crate::{Item, NUM_ITEMS};

/// Score contributed by a candidate whose conductance is undefined.
///
/// Keeps such candidates at the bottom of every ranking while the
/// undefined value itself stays visible on the candidate.
pub(crate) const UNDEFINED_CONDUCTANCE_SCORE: f64 = -1.0;

/// Relative weighting of conductance and density in a candidate's score.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Weights {
    /// Multiplier on conductance.
    pub conductance: f64,
    /// Multiplier on density.
    pub density: f64,
}

impl Default for Weights {
    /// The pair tuned by genetic search over the puzzle archive.
    fn default() -> Self {
        Self {
            conductance: 0.7441864013671875,
            density: 0.06005859375,
        }
    }
}

impl Weights {
    pub(crate) fn combine(&self, conductance: Option<f64>, density: f64) -> f64 {
        self.conductance * conductance.unwrap_or(UNDEFINED_CONDUCTANCE_SCORE)
            + self.density * density
    }
}

/// Mean affinity over the full `items × items` cross product, diagonal
/// included.
///
/// Pairs touching a purged item contribute nothing, but the divisor stays
/// `|items|²`; in valid use the selection holds only active items.
pub fn density(items: &[Item], matrix: &AffinityMatrix) -> Result<f64, Error> {
    validate_items(items)?;

    let mut total = 0.0;
    for &i in items {
        for &j in items {
            total += matrix.affinity(i, j).unwrap_or(0.0);
        }
    }
    Ok(total / (items.len() * items.len()) as f64)
}

/// How enclosed `items` is relative to the rest of the active item space.
///
/// For every edge leaving an item in the selection, internal affinity
/// (diagonal included) accumulates at quarter weight and external affinity
/// at full weight; edges touching a purged item are skipped outright. The
/// result is `1 − outside / (2·inside + outside)`, so a tightly enclosed
/// selection approaches one.
///
/// The quarter and double weightings are tuned for four-item selections
/// and are reused unchanged when scoring trios.
///
/// Returns [`None`] when the selection's edge mass is purely internal or
/// purely external — the ratio is undefined there, and callers must not
/// read the absence as a legitimately low conductance.
pub fn conductance(items: &[Item], matrix: &AffinityMatrix) -> Result<Option<f64>, Error> {
    validate_items(items)?;

    let mut inside = 0.0;
    let mut outside = 0.0;
    for &i in items {
        for j in 0..NUM_ITEMS {
            let Some(affinity) = matrix.affinity(i, j) else {
                continue;
            };
            if items.contains(&j) {
                inside += affinity / 4.0;
            } else {
                outside += affinity;
            }
        }
    }

    if inside == 0.0 || outside == 0.0 {
        return Ok(None);
    }
    Ok(Some(1.0 - outside / (2.0 * inside + outside)))
}

fn validate_items(items: &[Item]) -> Result<(), Error> {
    if items.is_empty() {
        return Err(Error::EmptySelection);
    }
    if let Some(&out) = items.iter().find(|&&item| item >= NUM_ITEMS) {
        return Err(Error::ItemOutOfRange(out));
    }
    Ok(())
}

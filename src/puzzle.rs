use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::matrix::AffinityMatrix;
use crate::NUM_ITEMS;

/// One stored puzzle: sixteen words plus their pairwise affinity matrix.
///
/// This mirrors the on-disk `game_*.json` shape. The engine only ever
/// manipulates item indices; the words ride along for display. Words
/// arrive already grouped in ground-truth order, so
/// [`GroundTruth::standard`](crate::GroundTruth::standard) applies to
/// every record.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Puzzle {
    /// The sixteen puzzle entries, in ground-truth order.
    pub words: Vec<String>,
    /// Row-major 16×16 pairwise affinities.
    pub adjacency_matrix: Vec<Vec<f64>>,
}

impl Puzzle {
    /// Validate the record and split it into the word list and a fresh
    /// [`AffinityMatrix`].
    pub fn into_parts(self) -> Result<(Vec<String>, AffinityMatrix), Error> {
        if self.words.len() != NUM_ITEMS {
            return Err(Error::BadWordCount(self.words.len()));
        }
        let matrix = AffinityMatrix::new(self.adjacency_matrix)?;
        Ok((self.words, matrix))
    }
}

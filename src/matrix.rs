use ndarray::Array2;

use crate::error::Error;
use crate::{Item, NUM_ITEMS};

/// The pairwise affinity matrix for one puzzle instance.
///
/// Wraps a validated 16×16 non-negative affinity table together with a
/// per-item removal flag. Removal is one-way: once a group has been found,
/// purging its items stops their rows and columns from contributing to any
/// further score, and lookups touching them yield [`None`] rather than a
/// numeric sentinel.
#[derive(Clone, Debug, PartialEq)]
pub struct AffinityMatrix {
    affinities: Array2<f64>,
    removed: [bool; NUM_ITEMS],
}

impl AffinityMatrix {
    /// Build a matrix from row-major data, validating shape and sign.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        if rows.len() != NUM_ITEMS {
            return Err(Error::BadShape {
                rows: rows.len(),
                cols: rows.first().map_or(0, Vec::len),
            });
        }
        if let Some(short) = rows.iter().find(|row| row.len() != NUM_ITEMS) {
            return Err(Error::BadShape {
                rows: rows.len(),
                cols: short.len(),
            });
        }

        let mut affinities = Array2::zeros((NUM_ITEMS, NUM_ITEMS));
        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value < 0.0 {
                    return Err(Error::NegativeAffinity {
                        row: i,
                        col: j,
                        value,
                    });
                }
                affinities[(i, j)] = value;
            }
        }

        Ok(Self {
            affinities,
            removed: [false; NUM_ITEMS],
        })
    }

    /// The affinity between `i` and `j`, or [`None`] if either item has
    /// been purged.
    pub fn affinity(&self, i: Item, j: Item) -> Option<f64> {
        if self.removed[i] || self.removed[j] {
            return None;
        }
        Some(self.affinities[(i, j)])
    }

    /// Whether `item` has been purged from the active search space.
    pub fn is_removed(&self, item: Item) -> bool {
        self.removed[item]
    }

    /// Items still participating in scoring, ascending.
    pub fn active_items(&self) -> Vec<Item> {
        (0..NUM_ITEMS).filter(|&item| !self.removed[item]).collect()
    }

    /// A copy of this matrix with `items` purged.
    ///
    /// Purging an already-purged item changes nothing, so the operation is
    /// idempotent. There is no way to reactivate an item.
    pub fn purged(&self, items: &[Item]) -> Result<Self, Error> {
        if let Some(&out) = items.iter().find(|&&item| item >= NUM_ITEMS) {
            return Err(Error::ItemOutOfRange(out));
        }

        let mut next = self.clone();
        for &item in items {
            next.removed[item] = true;
        }
        Ok(next)
    }
}

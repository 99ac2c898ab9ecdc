use thiserror::Error;

use crate::{Item, GROUP_SIZE, NUM_ITEMS};

/// Reasons caller input may be rejected at the crate's entry points.
///
/// The engine has no I/O and nothing retryable; every variant here is a
/// malformed input. An undefined conductance is *not* an error — it is
/// reported as [`None`] on the affected [`Candidate`](crate::Candidate).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The affinity matrix is not 16×16.
    #[error("affinity matrix must be {NUM_ITEMS}x{NUM_ITEMS}, got {rows}x{cols}")]
    BadShape {
        /// Number of rows supplied.
        rows: usize,
        /// Length of the offending row.
        cols: usize,
    },
    /// An affinity between two items is negative.
    #[error("negative affinity {value} at ({row}, {col})")]
    NegativeAffinity {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
        /// The entry itself.
        value: f64,
    },
    /// A puzzle record does not carry exactly sixteen words.
    #[error("puzzle must have {NUM_ITEMS} words, got {0}")]
    BadWordCount(usize),
    /// An item index is outside `[0, 16)`.
    #[error("item index {0} out of range")]
    ItemOutOfRange(Item),
    /// A guess does not contain exactly four items.
    #[error("guess must contain {GROUP_SIZE} items, got {0}")]
    BadGuessSize(usize),
    /// The same item appears more than once in a guess.
    #[error("item {0} appears more than once in guess")]
    DuplicateItem(Item),
    /// A guessed item belongs to a group that was already found.
    #[error("item {0} is no longer available")]
    ItemUnavailable(Item),
    /// The ground-truth groups are not a disjoint partition of all items.
    #[error("invalid ground-truth groups: {0}")]
    BadGroups(&'static str),
    /// A scoring function was called with no items selected.
    #[error("cannot score an empty item selection")]
    EmptySelection,
}

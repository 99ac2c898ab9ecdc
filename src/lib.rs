#![warn(missing_docs)]

//! # `tetrad`
//!
//! A suggestion engine for Connections-style word grouping puzzles: sixteen items hide four groups of four, and the engine proposes which four most likely belong together.
//! Input is a precomputed 16×16 pairwise affinity matrix; the engine never looks at the words themselves, only their indices.
//! Begin by building an [`AffinityMatrix`] (usually through a stored [`Puzzle`] record), then either call the ranking functions directly or drive a full game through a [`SolverSession`].
//!
//! # Internals
//!
//! Each four-item candidate is scored with two measures over the affinity matrix.
//! *Density* is the mean affinity across the candidate's full cross product, diagonal included — how strongly the four items pull on each other.
//! *Conductance* borrows from graph partitioning: it is one minus the fraction of the candidate's total weighted edge mass that leaks to items outside the candidate, so a well-enclosed group scores near one.
//! The two combine linearly under a [`Weights`] pair tuned against an archive of past puzzles.
//!
//! A [`SolverSession`] drives the suggest → guess → update loop.
//! All `C(n, 4)` candidates over the remaining items are ranked, previously rejected guesses are pruned, and a guess (the top candidate, or a human's pick) is classified against the ground truth.
//! A correct guess purges the solved items from the matrix and resets the rejected set, since every remaining score may shift once those edges are gone.
//! A one-away guess can be narrowed further: the strongest trio inside the near miss is kept and ranked against each possible fourth item.

pub use classify::{GroundTruth, GuessOutcome};
pub use error::Error;
pub use matrix::AffinityMatrix;
pub use puzzle::Puzzle;
pub use score::{conductance, density, Weights};
pub use search::{rank_completions, rank_four_groups, rank_three_subsets, score_group, Candidate};
pub use session::{SolveReport, SolveStatus, SolverSession, StepReport};

pub(crate) mod classify;
mod tests;
pub(crate) mod error;
pub(crate) mod matrix;
pub(crate) mod puzzle;
pub(crate) mod score;
pub(crate) mod search;
pub(crate) mod session;

/// Index of one of the sixteen entries in a puzzle instance.
pub type Item = usize;

/// Items per puzzle.
pub const NUM_ITEMS: usize = 16;

/// Items per hidden group.
pub const GROUP_SIZE: usize = 4;

/// Hidden groups per puzzle.
pub const NUM_GROUPS: usize = 4;

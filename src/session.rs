use std::collections::HashSet;

use serde::Serialize;

use crate::classify::{GroundTruth, GuessOutcome};
use crate::error::Error;
use crate::matrix::AffinityMatrix;
use crate::score::Weights;
use crate::search::{self, Candidate};
use crate::{Item, GROUP_SIZE, NUM_GROUPS, NUM_ITEMS};

/// Canonical identity of a guess: its items in ascending order.
type GuessKey = [Item; GROUP_SIZE];

/// One solve of a single puzzle, interactive or unattended.
///
/// The session owns its matrix and all per-puzzle state; whatever drives
/// it (a CLI, a request handler, a UI controller) holds the session by
/// value and feeds guesses through [`step`](Self::step). Nothing here is
/// shared or global, so concurrent sessions over different puzzles are
/// fully isolated by construction.
#[derive(Clone, Debug)]
pub struct SolverSession {
    matrix: AffinityMatrix,
    ground_truth: GroundTruth,
    weights: Weights,
    available: Vec<Item>,
    found_groups: usize,
    turns: usize,
    // guesses rejected since the last found group; cleared on Correct
    tried: HashSet<GuessKey>,
}

/// What a single guess did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StepReport {
    /// How the guess classified.
    pub outcome: GuessOutcome,
    /// Groups found so far, including this guess if it was correct.
    pub found_groups: usize,
    /// Whether all four groups have now been found.
    pub solved: bool,
}

/// Why an unattended [`run`](SolverSession::run) stopped.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum SolveStatus {
    /// All four groups were found.
    Solved,
    /// Every remaining candidate had already been rejected.
    OutOfCandidates,
    /// The try budget ran out first.
    OutOfTries,
}

/// Summary of an unattended run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SolveReport {
    /// Terminal condition.
    pub status: SolveStatus,
    /// Groups found before stopping.
    pub found_groups: usize,
    /// Guesses submitted.
    pub tries: usize,
}

impl SolverSession {
    /// Start a session over a fresh matrix and its ground truth.
    pub fn new(matrix: AffinityMatrix, ground_truth: GroundTruth, weights: Weights) -> Self {
        let available = matrix.active_items();
        Self {
            matrix,
            ground_truth,
            weights,
            available,
            found_groups: 0,
            turns: 0,
            tried: HashSet::new(),
        }
    }

    /// Groups found so far.
    pub fn found_groups(&self) -> usize {
        self.found_groups
    }

    /// Guesses submitted so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Whether all four groups have been found.
    pub fn solved(&self) -> bool {
        self.found_groups == NUM_GROUPS
    }

    /// Items not yet part of a found group, ascending.
    pub fn available(&self) -> &[Item] {
        &self.available
    }

    /// The session's current matrix, with found groups purged.
    pub fn matrix(&self) -> &AffinityMatrix {
        &self.matrix
    }

    /// Ranked four-group candidates, minus guesses already rejected this
    /// epoch.
    ///
    /// An empty result means there is nothing left to suggest — an
    /// expected outcome, not an error. The caller decides whether to stop
    /// or let a human guess freely.
    pub fn suggestions(&self) -> Result<Vec<Candidate>, Error> {
        let ranked = search::rank_four_groups(&self.matrix, &self.available, &self.weights)?;
        Ok(self.without_tried(ranked))
    }

    /// Narrowed suggestions after a one-away guess.
    ///
    /// Keeps the strongest trio inside the near miss, then ranks each way
    /// of completing it with a fourth available item. Falls back to an
    /// empty list when the near miss yields no trio to build on.
    pub fn completion_suggestions(&self, guess: &[Item]) -> Result<Vec<Candidate>, Error> {
        let near_miss = self.validate(guess)?;
        let trios = search::rank_three_subsets(&near_miss, &self.matrix, &self.weights)?;
        let Some(best) = trios.first() else {
            return Ok(Vec::new());
        };

        let trio: [Item; GROUP_SIZE - 1] = best
            .items
            .clone()
            .try_into()
            .expect("trio candidates hold three items");
        let completions =
            search::rank_completions(&trio, &self.matrix, &self.available, &self.weights)?;
        Ok(self.without_tried(completions))
    }

    /// Submit one guess and apply its state transition.
    ///
    /// A correct guess removes its items from play, purges them from the
    /// matrix and clears the rejected set: once those edges stop counting,
    /// every remaining score may change, so stale exclusions would prune
    /// live candidates. Any other outcome only records the guess as
    /// rejected for the current epoch.
    pub fn step(&mut self, guess: &[Item]) -> Result<StepReport, Error> {
        let key = self.validate(guess)?;
        self.turns += 1;

        let outcome = self.ground_truth.classify(&key);
        match outcome {
            GuessOutcome::Correct => {
                self.found_groups += 1;
                self.available.retain(|item| !key.contains(item));
                self.matrix = self.matrix.purged(&key)?;
                self.tried.clear();
            }
            GuessOutcome::OneAway | GuessOutcome::Incorrect => {
                self.tried.insert(key);
            }
        }

        Ok(StepReport {
            outcome,
            found_groups: self.found_groups,
            solved: self.solved(),
        })
    }

    /// Play unattended, always submitting the top unrejected candidate.
    ///
    /// Stops on a solve, on candidate exhaustion, or after `max_tries`
    /// guesses. The budget guarantees termination for batch callers even
    /// if candidates never run out.
    pub fn run(&mut self, max_tries: usize) -> Result<SolveReport, Error> {
        let mut tries = 0;
        while !self.solved() && tries < max_tries {
            let suggestions = self.suggestions()?;
            let Some(best) = suggestions.first() else {
                return Ok(SolveReport {
                    status: SolveStatus::OutOfCandidates,
                    found_groups: self.found_groups,
                    tries,
                });
            };

            let guess = best.items.clone();
            tries += 1;
            self.step(&guess)?;
        }

        Ok(SolveReport {
            status: if self.solved() {
                SolveStatus::Solved
            } else {
                SolveStatus::OutOfTries
            },
            found_groups: self.found_groups,
            tries,
        })
    }

    fn without_tried(&self, ranked: Vec<Candidate>) -> Vec<Candidate> {
        ranked
            .into_iter()
            .filter(|candidate| {
                let key: GuessKey = candidate
                    .items
                    .clone()
                    .try_into()
                    .expect("ranked candidates hold four items");
                !self.tried.contains(&key)
            })
            .collect()
    }

    fn validate(&self, guess: &[Item]) -> Result<GuessKey, Error> {
        let mut key: GuessKey = guess
            .to_vec()
            .try_into()
            .map_err(|_| Error::BadGuessSize(guess.len()))?;
        key.sort_unstable();

        if let Some(pair) = key.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::DuplicateItem(pair[0]));
        }
        for &item in &key {
            if item >= NUM_ITEMS {
                return Err(Error::ItemOutOfRange(item));
            }
            if !self.available.contains(&item) {
                return Err(Error::ItemUnavailable(item));
            }
        }
        Ok(key)
    }
}

use serde::Serialize;
use strum::Display;

use crate::error::Error;
use crate::{Item, GROUP_SIZE, NUM_GROUPS, NUM_ITEMS};

/// Result of comparing a submitted guess against the ground truth.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum GuessOutcome {
    /// The guess equals one ground-truth group exactly.
    Correct,
    /// The guess shares exactly three items with some ground-truth group.
    OneAway,
    /// Neither of the above.
    Incorrect,
}

/// The four correct groups for one puzzle instance, fixed for a session.
///
/// Disjointness is a constructor invariant: every item in `[0, 16)`
/// appears in exactly one group. A guess can therefore equal at most one
/// group and overlap at most one group in three items, so classification
/// never needs a tie-break.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GroundTruth {
    groups: [[Item; GROUP_SIZE]; NUM_GROUPS],
}

impl GroundTruth {
    /// Build a ground truth, validating that `groups` partition the items.
    pub fn new(mut groups: [[Item; GROUP_SIZE]; NUM_GROUPS]) -> Result<Self, Error> {
        let mut seen = [false; NUM_ITEMS];
        for group in &groups {
            for &item in group {
                if item >= NUM_ITEMS {
                    return Err(Error::ItemOutOfRange(item));
                }
                if seen[item] {
                    return Err(Error::BadGroups(
                        "each item must appear in exactly one group",
                    ));
                }
                seen[item] = true;
            }
        }
        // 16 slots with no repeats force full coverage
        for group in &mut groups {
            group.sort_unstable();
        }
        Ok(Self { groups })
    }

    /// The arrangement every stored puzzle record uses: words arrive
    /// already grouped, so the groups are `0..4`, `4..8`, `8..12` and
    /// `12..16`.
    pub fn standard() -> Self {
        Self {
            groups: [
                [0, 1, 2, 3],
                [4, 5, 6, 7],
                [8, 9, 10, 11],
                [12, 13, 14, 15],
            ],
        }
    }

    /// The four groups, each ascending.
    pub fn groups(&self) -> &[[Item; GROUP_SIZE]; NUM_GROUPS] {
        &self.groups
    }

    /// Classify a guess against all four groups.
    ///
    /// The guess is treated as a set: order is irrelevant and duplicates
    /// collapse before comparison.
    pub fn classify(&self, guess: &[Item; GROUP_SIZE]) -> GuessOutcome {
        let mut distinct = guess.to_vec();
        distinct.sort_unstable();
        distinct.dedup();

        let mut outcome = GuessOutcome::Incorrect;
        for group in &self.groups {
            let overlap = distinct.iter().filter(|item| group.contains(*item)).count();
            if overlap == GROUP_SIZE {
                return GuessOutcome::Correct;
            }
            if overlap == GROUP_SIZE - 1 {
                outcome = GuessOutcome::OneAway;
            }
        }
        outcome
    }

    /// Index of the group sharing exactly three items with `guess`, if
    /// any — the group a one-away guess almost hit.
    pub fn one_away_group(&self, guess: &[Item; GROUP_SIZE]) -> Option<usize> {
        self.groups.iter().position(|group| {
            guess.iter().filter(|item| group.contains(*item)).count() == GROUP_SIZE - 1
        })
    }
}

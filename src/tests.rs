#[cfg(test)]
mod tests {
    use crate::{
        conductance, density, rank_completions, rank_four_groups, rank_three_subsets, score_group,
        AffinityMatrix, Error, GroundTruth, GuessOutcome, Puzzle, SolveStatus, SolverSession,
        Weights, NUM_ITEMS,
    };

    // Block matrix: items i and j share `inside` affinity when i/4 == j/4
    // (diagonal included), `outside` otherwise.
    fn blocks(inside: f64, outside: f64) -> AffinityMatrix {
        let rows = (0..NUM_ITEMS)
            .map(|i| {
                (0..NUM_ITEMS)
                    .map(|j| if i / 4 == j / 4 { inside } else { outside })
                    .collect()
            })
            .collect();
        AffinityMatrix::new(rows).unwrap()
    }

    fn separated() -> AffinityMatrix {
        blocks(1.0, 0.05)
    }

    #[test]
    fn matrix_validation() {
        assert_eq!(
            AffinityMatrix::new(vec![vec![0.0; NUM_ITEMS]; 15]),
            Err(Error::BadShape { rows: 15, cols: 16 }),
        );

        let mut ragged = vec![vec![0.0; NUM_ITEMS]; NUM_ITEMS];
        ragged[7] = vec![0.0; 3];
        assert_eq!(
            AffinityMatrix::new(ragged),
            Err(Error::BadShape { rows: 16, cols: 3 }),
        );

        let mut negative = vec![vec![0.0; NUM_ITEMS]; NUM_ITEMS];
        negative[2][9] = -0.5;
        assert_eq!(
            AffinityMatrix::new(negative),
            Err(Error::NegativeAffinity {
                row: 2,
                col: 9,
                value: -0.5,
            }),
        );
    }

    #[test]
    fn density_is_order_independent_and_bounded() {
        let rows = (0..NUM_ITEMS)
            .map(|i| (0..NUM_ITEMS).map(|j| (i + j) as f64 / 10.0).collect())
            .collect();
        let matrix = AffinityMatrix::new(rows).unwrap();

        let forward = density(&[2, 5, 7], &matrix).unwrap();
        let shuffled = density(&[7, 2, 5], &matrix).unwrap();
        assert_eq!(forward, shuffled);

        // bounded by the min/max of the selected cross product
        assert!(forward >= 0.4 && forward <= 1.4);

        assert_eq!(density(&[], &matrix), Err(Error::EmptySelection));
    }

    #[test]
    fn scoring_rejects_out_of_range_items() {
        let matrix = separated();
        let weights = Weights::default();

        assert_eq!(density(&[16], &matrix), Err(Error::ItemOutOfRange(16)));
        assert_eq!(
            conductance(&[0, 1, 99], &matrix),
            Err(Error::ItemOutOfRange(99)),
        );
        assert_eq!(
            score_group(&[0, 1, 2, 16], &matrix, &weights),
            Err(Error::ItemOutOfRange(16)),
        );
        assert_eq!(
            rank_four_groups(&matrix, &[0, 1, 2, 20], &weights),
            Err(Error::ItemOutOfRange(20)),
        );
    }

    #[test]
    fn density_includes_diagonal() {
        assert_eq!(density(&[0, 1, 2, 3], &separated()).unwrap(), 1.0);
    }

    #[test]
    fn conductance_undefined_without_external_mass() {
        // a perfectly isolated group has no outside edges at all
        let matrix = blocks(1.0, 0.0);
        assert_eq!(conductance(&[0, 1, 2, 3], &matrix).unwrap(), None);
    }

    #[test]
    fn conductance_undefined_without_internal_mass() {
        // zero within the block and on the diagonal, all mass external
        let rows = (0..NUM_ITEMS)
            .map(|i| {
                (0..NUM_ITEMS)
                    .map(|j| if i / 4 == j / 4 { 0.0 } else { 1.0 })
                    .collect()
            })
            .collect();
        let matrix = AffinityMatrix::new(rows).unwrap();
        assert_eq!(conductance(&[0, 1, 2, 3], &matrix).unwrap(), None);
    }

    #[test]
    fn conductance_of_enclosed_group() {
        // inside = 16 * 1.0 / 4, outside = 4 * 12 * 0.05
        let expected = 1.0 - 2.4 / (2.0 * 4.0 + 2.4);
        let got = conductance(&[0, 1, 2, 3], &separated()).unwrap().unwrap();
        assert!((got - expected).abs() < 1e-12);
        assert!(got <= 1.0);
    }

    #[test]
    fn conductance_skips_purged_edges() {
        let matrix = separated().purged(&[12, 13, 14, 15]).unwrap();
        // outside shrinks to 4 * 8 * 0.05 once the last block is gone
        let expected = 1.0 - 1.6 / (2.0 * 4.0 + 1.6);
        let got = conductance(&[0, 1, 2, 3], &matrix).unwrap().unwrap();
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn purge_is_idempotent_and_one_way() {
        let matrix = separated();
        let once = matrix.purged(&[0, 1, 2, 3]).unwrap();
        let twice = once.purged(&[0, 1, 2, 3]).unwrap();
        assert_eq!(once, twice);

        assert!(once.is_removed(0));
        assert_eq!(once.affinity(0, 5), None);
        assert_eq!(once.affinity(5, 3), None);
        assert_eq!(once.affinity(4, 5), Some(1.0));
        assert_eq!(once.active_items(), (4..NUM_ITEMS).collect::<Vec<_>>());

        assert_eq!(matrix.purged(&[16]), Err(Error::ItemOutOfRange(16)));
    }

    #[test]
    fn four_group_ranking_is_exhaustive() {
        let matrix = separated();
        let available: Vec<_> = (0..NUM_ITEMS).collect();
        let ranked = rank_four_groups(&matrix, &available, &Weights::default()).unwrap();

        // C(16, 4)
        assert_eq!(ranked.len(), 1820);
        assert!(ranked.iter().all(|candidate| candidate.items.len() == 4));

        let mut seen: Vec<_> = ranked
            .iter()
            .map(|candidate| candidate.items.clone())
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 1820);

        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn equal_scores_rank_lexicographically() {
        let matrix = separated();
        let available: Vec<_> = (0..NUM_ITEMS).collect();
        let ranked = rank_four_groups(&matrix, &available, &Weights::default()).unwrap();

        // the four true groups tie exactly by symmetry
        let top: Vec<_> = ranked[..4]
            .iter()
            .map(|candidate| candidate.items.clone())
            .collect();
        assert_eq!(
            top,
            vec![
                vec![0, 1, 2, 3],
                vec![4, 5, 6, 7],
                vec![8, 9, 10, 11],
                vec![12, 13, 14, 15],
            ],
        );
    }

    #[test]
    fn classifier_examples() {
        let truth = GroundTruth::standard();
        assert_eq!(truth.classify(&[0, 1, 2, 3]), GuessOutcome::Correct);
        assert_eq!(truth.classify(&[3, 0, 2, 1]), GuessOutcome::Correct);
        assert_eq!(truth.classify(&[0, 1, 2, 4]), GuessOutcome::OneAway);
        assert_eq!(truth.classify(&[0, 4, 8, 12]), GuessOutcome::Incorrect);

        assert_eq!(GuessOutcome::OneAway.to_string(), "OneAway");

        assert_eq!(truth.one_away_group(&[0, 1, 2, 4]), Some(0));
        assert_eq!(truth.one_away_group(&[5, 6, 7, 12]), Some(1));
        assert_eq!(truth.one_away_group(&[0, 4, 8, 12]), None);
    }

    #[test]
    fn ground_truth_validation() {
        assert!(GroundTruth::new([
            [3, 2, 1, 0],
            [7, 6, 5, 4],
            [11, 10, 9, 8],
            [15, 14, 13, 12],
        ])
        .is_ok());

        assert_eq!(
            GroundTruth::new([
                [0, 1, 2, 3],
                [3, 4, 5, 6],
                [7, 8, 9, 10],
                [11, 12, 13, 14],
            ]),
            Err(Error::BadGroups("each item must appear in exactly one group")),
        );

        assert_eq!(
            GroundTruth::new([
                [0, 1, 2, 16],
                [4, 5, 6, 7],
                [8, 9, 10, 11],
                [12, 13, 14, 15],
            ]),
            Err(Error::ItemOutOfRange(16)),
        );
    }

    #[test]
    fn trio_and_completion_search_reproduce_top_group() {
        let matrix = separated();
        let weights = Weights::default();
        let available: Vec<_> = (0..NUM_ITEMS).collect();

        let top = rank_four_groups(&matrix, &available, &weights).unwrap()[0].clone();
        assert_eq!(top.items, vec![0, 1, 2, 3]);

        let four: [usize; 4] = top.items.clone().try_into().unwrap();
        let trios = rank_three_subsets(&four, &matrix, &weights).unwrap();
        assert_eq!(trios.len(), 4);
        // all four trios tie by symmetry; lexicographic tie-break
        assert_eq!(trios[0].items, vec![0, 1, 2]);

        let trio: [usize; 3] = trios[0].items.clone().try_into().unwrap();
        let completions = rank_completions(&trio, &matrix, &available, &weights).unwrap();
        assert_eq!(completions.len(), 13);
        assert_eq!(completions[0].items, top.items);
    }

    #[test]
    fn step_validation() {
        let mut session =
            SolverSession::new(separated(), GroundTruth::standard(), Weights::default());

        assert_eq!(session.step(&[0, 1, 2]), Err(Error::BadGuessSize(3)));
        assert_eq!(session.step(&[0, 1, 2, 2]), Err(Error::DuplicateItem(2)));
        assert_eq!(session.step(&[0, 1, 2, 16]), Err(Error::ItemOutOfRange(16)));
        assert_eq!(session.turns(), 0);

        session.step(&[0, 1, 2, 3]).unwrap();
        assert_eq!(session.step(&[0, 4, 5, 6]), Err(Error::ItemUnavailable(0)));
    }

    #[test]
    fn correct_guess_purges_and_resets_tried() {
        let mut session =
            SolverSession::new(separated(), GroundTruth::standard(), Weights::default());

        let near_miss = vec![4, 5, 6, 8];
        let report = session.step(&near_miss).unwrap();
        assert_eq!(report.outcome, GuessOutcome::OneAway);
        assert!(!session
            .suggestions()
            .unwrap()
            .iter()
            .any(|candidate| candidate.items == near_miss));

        let report = session.step(&[0, 1, 2, 3]).unwrap();
        assert_eq!(report.outcome, GuessOutcome::Correct);
        assert_eq!(report.found_groups, 1);
        assert!(!report.solved);

        // purged rows answer None everywhere
        for item in 0..4 {
            assert!(session.matrix().is_removed(item));
            assert_eq!(session.matrix().affinity(item, 10), None);
        }
        assert_eq!(session.available(), (4..NUM_ITEMS).collect::<Vec<_>>());

        // the rejected set was cleared, so the near miss is rankable again
        assert!(session
            .suggestions()
            .unwrap()
            .iter()
            .any(|candidate| candidate.items == near_miss));
    }

    #[test]
    fn one_away_narrowing_completes_the_group() {
        let mut session =
            SolverSession::new(separated(), GroundTruth::standard(), Weights::default());

        let report = session.step(&[0, 1, 2, 4]).unwrap();
        assert_eq!(report.outcome, GuessOutcome::OneAway);

        let completions = session.completion_suggestions(&[0, 1, 2, 4]).unwrap();
        assert_eq!(completions[0].items, vec![0, 1, 2, 3]);
        // the near miss itself was rejected and stays filtered
        assert!(!completions
            .iter()
            .any(|candidate| candidate.items == vec![0, 1, 2, 4]));
    }

    #[test]
    fn well_separated_puzzle_solves_in_four_tries() {
        let mut session =
            SolverSession::new(separated(), GroundTruth::standard(), Weights::default());

        assert_eq!(session.suggestions().unwrap()[0].items, vec![0, 1, 2, 3]);

        let report = session.run(100).unwrap();
        assert_eq!(report.status, SolveStatus::Solved);
        assert_eq!(report.found_groups, 4);
        assert_eq!(report.tries, 4);
        assert!(session.solved());
        assert_eq!(session.turns(), 4);
    }

    #[test]
    fn run_respects_try_budget() {
        let mut session =
            SolverSession::new(separated(), GroundTruth::standard(), Weights::default());

        let report = session.run(2).unwrap();
        assert_eq!(report.status, SolveStatus::OutOfTries);
        assert_eq!(report.tries, 2);
        assert_eq!(report.found_groups, 2);
    }

    #[test]
    fn flat_matrix_still_terminates() {
        // no affinity signal at all: every candidate ties, so the session
        // walks the enumeration order through the rejected set
        let matrix = blocks(0.5, 0.5);
        let truth = GroundTruth::new([
            [0, 1, 2, 4],
            [3, 5, 6, 7],
            [8, 9, 10, 12],
            [11, 13, 14, 15],
        ])
        .unwrap();
        let mut session = SolverSession::new(matrix, truth, Weights::default());

        let report = session.run(100).unwrap();
        assert_eq!(report.status, SolveStatus::Solved);
        assert_eq!(report.tries, 6);
    }

    #[test]
    fn puzzle_record_round_trip() {
        let puzzle = Puzzle {
            words: (0..NUM_ITEMS).map(|i| format!("word{i}")).collect(),
            adjacency_matrix: (0..NUM_ITEMS)
                .map(|i| {
                    (0..NUM_ITEMS)
                        .map(|j| if i / 4 == j / 4 { 1.0 } else { 0.05 })
                        .collect()
                })
                .collect(),
        };

        let json = serde_json::to_string(&puzzle).unwrap();
        let parsed: Puzzle = serde_json::from_str(&json).unwrap();
        let (words, matrix) = parsed.into_parts().unwrap();
        assert_eq!(words.len(), NUM_ITEMS);
        assert_eq!(matrix, separated());

        let short = Puzzle {
            words: vec!["only".into()],
            adjacency_matrix: vec![vec![0.0; NUM_ITEMS]; NUM_ITEMS],
        };
        assert_eq!(short.into_parts(), Err(Error::BadWordCount(1)));
    }

    #[test]
    fn default_weights_match_tuning() {
        let weights = Weights::default();
        assert_eq!(weights.conductance, 0.7441864013671875);
        assert_eq!(weights.density, 0.06005859375);
    }
}

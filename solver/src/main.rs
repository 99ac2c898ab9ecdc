use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{fs, io};

use clap::Parser;
use tetrad::{GroundTruth, Puzzle, SolveReport, SolveStatus, SolverSession, Weights};

/// Run the suggestion engine unattended over a directory of stored
/// puzzles and report aggregate statistics.
#[derive(Debug, Parser)]
#[command(name = "solver", version)]
struct Args {
    /// Directory containing `game_*.json` puzzle records.
    data_dir: PathBuf,
    /// Give up on a puzzle after this many guesses.
    #[arg(long, default_value_t = 100)]
    max_tries: usize,
    /// Conductance weight (defaults to the tuned value).
    #[arg(long)]
    conductance_weight: Option<f64>,
    /// Density weight (defaults to the tuned value).
    #[arg(long)]
    density_weight: Option<f64>,
    /// Only run the first N puzzles found.
    #[arg(long)]
    limit: Option<usize>,
}

fn weights(args: &Args) -> Weights {
    let mut weights = Weights::default();
    if let Some(conductance) = args.conductance_weight {
        weights.conductance = conductance;
    }
    if let Some(density) = args.density_weight {
        weights.density = density;
    }
    weights
}

/// Game numbers with a `game_<n>.json` record in `data_dir`, ascending.
fn available_games(data_dir: &Path) -> io::Result<Vec<u32>> {
    let mut numbers = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let file_name = entry?.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if let Some(number) = name
            .strip_prefix("game_")
            .and_then(|rest| rest.strip_suffix(".json"))
            .and_then(|digits| digits.parse().ok())
        {
            numbers.push(number);
        }
    }
    numbers.sort_unstable();
    Ok(numbers)
}

fn solve_game(path: &Path, weights: Weights, max_tries: usize) -> Result<SolveReport, String> {
    let raw = fs::read_to_string(path).map_err(|err| err.to_string())?;
    let puzzle: Puzzle = serde_json::from_str(&raw).map_err(|err| err.to_string())?;
    let (_words, matrix) = puzzle.into_parts().map_err(|err| err.to_string())?;

    let mut session = SolverSession::new(matrix, GroundTruth::standard(), weights);
    session.run(max_tries).map_err(|err| err.to_string())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn std_dev(values: &[f64]) -> f64 {
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

fn main() -> ExitCode {
    let args = Args::parse();
    let weights = weights(&args);

    let games = match available_games(&args.data_dir) {
        Ok(games) => games,
        Err(err) => {
            eprintln!("cannot read {}: {}", args.data_dir.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let games = &games[..args.limit.unwrap_or(games.len()).min(games.len())];

    println!("Running solver on {} games...\n", games.len());

    let mut reports = Vec::with_capacity(games.len());
    for &number in games {
        let path = args.data_dir.join(format!("game_{number}.json"));
        match solve_game(&path, weights, args.max_tries) {
            Ok(report) => {
                reports.push(report);
                if reports.len() % 50 == 0 {
                    println!("Processed {}/{} games...", reports.len(), games.len());
                }
            }
            Err(err) => eprintln!("skipping game {number}: {err}"),
        }
    }

    if reports.is_empty() {
        eprintln!("no puzzles ran");
        return ExitCode::FAILURE;
    }

    let all_tries: Vec<f64> = reports.iter().map(|report| report.tries as f64).collect();
    let solved_tries: Vec<f64> = reports
        .iter()
        .filter(|report| report.status == SolveStatus::Solved)
        .map(|report| report.tries as f64)
        .collect();

    println!("\n=== RESULTS ===");
    println!(
        "Solved: {}/{} games ({:.1}%)",
        solved_tries.len(),
        reports.len(),
        solved_tries.len() as f64 / reports.len() as f64 * 100.0,
    );
    println!("Average tries: {:.2}", mean(&all_tries));

    if !solved_tries.is_empty() {
        println!("Solved games average: {:.2} tries", mean(&solved_tries));
        println!("Solved games median: {:.2} tries", median(&solved_tries));
        println!("Solved games std dev: {:.2}", std_dev(&solved_tries));
        println!(
            "Best solve: {:.0} tries",
            solved_tries.iter().copied().fold(f64::INFINITY, f64::min),
        );
        println!(
            "Worst solve: {:.0} tries",
            solved_tries.iter().copied().fold(0.0, f64::max),
        );
    }

    ExitCode::SUCCESS
}

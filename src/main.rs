use clap::{Parser, ValueEnum};
use eight_puzzle::animate::Animator;
use eight_puzzle::config::Config;
use eight_puzzle::{Board, Heuristic};
use log::error;
use rand::{rngs::StdRng, SeedableRng};
use std::io;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeuristicArg {
    /// Manhattan distance over all nine cells, blank included
    ManhattanWithBlank,
    /// Manhattan distance over the numbered tiles only
    Manhattan,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::ManhattanWithBlank => Heuristic::ManhattanWithBlank,
            HeuristicArg::Manhattan => Heuristic::Manhattan,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Starting board, e.g. "3,8,0,1,7,6,5,4,2" or "380/176/542"
    #[clap(short, long, conflicts_with = "random")]
    puzzle: Option<Board>,

    /// Start from a random solvable board
    #[clap(short, long)]
    random: bool,

    /// Seed for --random
    #[clap(long, requires = "random")]
    seed: Option<u64>,

    #[clap(long, value_enum, default_value = "manhattan-with-blank")]
    heuristic: HeuristicArg,

    /// Give up after this many node expansions
    #[clap(long)]
    max_expansions: Option<usize>,

    /// Pause between animation frames, in milliseconds
    #[clap(long, default_value_t = 300)]
    delay_ms: u64,

    /// Print the moves instead of animating them
    #[clap(long)]
    no_animate: bool,
}

impl Args {
    fn into_config(self) -> Config {
        let defaults = Config::default();
        let puzzle = if self.random {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Board::shuffled(&mut rng)
        } else {
            self.puzzle.unwrap_or(defaults.puzzle)
        };

        Config {
            puzzle,
            heuristic: self.heuristic.into(),
            max_expansions: self.max_expansions,
            delay: Duration::from_millis(self.delay_ms),
            animate: !self.no_animate,
        }
    }
}

fn run(config: &Config) -> eight_puzzle::Result<()> {
    println!("Initial Puzzle:\n{}", config.puzzle);

    let solution = config.solver().solve(&config.puzzle)?;
    if solution.is_empty() {
        if config.puzzle.is_goal() {
            println!("Puzzle is already solved");
        } else {
            println!("No solution found after {} expansions", solution.expanded);
        }
        return Ok(());
    }

    if config.animate {
        let mut animator = Animator::new(io::stdout(), config.delay);
        animator.play(&config.puzzle, &solution.steps)?;
    } else {
        for node in &solution.steps {
            if let Some(movement) = node.movement {
                println!("{}\n{}", movement, node.board);
            }
        }
    }

    let labels: String = solution.moves().iter().map(|m| m.label()).collect();
    println!(
        "Found solution with {} moves: {} ({} nodes expanded)",
        solution.move_count(),
        labels,
        solution.expanded
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let config = Args::parse().into_config();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use padlife::persist::{load_board, save_board};
use padlife::seed::random_grid;
use padlife::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "padlife", version, about = "Conway's Game of Life on a bounded board")]
struct Cli {
  /// Log level (off, error, warn, info, debug, trace).
  #[arg(long, global = true, env = "PADLIFE_LOG", default_value = "info")]
  log_level: LevelFilter,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Run a board for a number of generations and save the result.
  Run {
    /// Input board (.rle, .json, .cells, .png or .bmp).
    #[arg(short = 'f', long)]
    input: PathBuf,
    /// Output board, the format follows the extension.
    #[arg(short, long)]
    output: PathBuf,
    /// Number of generations.
    #[arg(short = 'n', long)]
    generations: usize,
    /// Print the board after every generation.
    #[arg(short, long)]
    verbose: bool,
    /// Compute each generation on all cores.
    #[arg(long)]
    parallel: bool,
  },
  /// Save a randomly seeded board.
  Random {
    #[arg(long)]
    rows: usize,
    #[arg(long)]
    cols: usize,
    /// Probability of a cell being alive.
    #[arg(long, default_value_t = 0.5)]
    density: f64,
    /// Seed for reproducible boards.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(short, long)]
    output: PathBuf,
  },
  /// Report when a board starts repeating.
  Period {
    #[arg(short = 'f', long)]
    input: PathBuf,
    /// Give up after this many generations.
    #[arg(long, default_value_t = 10_000)]
    max: usize,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  simple_logger::SimpleLogger::new()
    .with_level(cli.log_level)
    .init()
    .context("failed to initialize logging")?;

  match cli.command {
    Command::Run { input, output, generations, verbose, parallel } => {
      run_command(input, output, generations, verbose, parallel)
    }
    Command::Random { rows, cols, density, seed, output } => {
      random_command(rows, cols, density, seed, output)
    }
    Command::Period { input, max } => period_command(input, max),
  }
}

fn run_command(
  input: PathBuf,
  output: PathBuf,
  generations: usize,
  verbose: bool,
  parallel: bool,
) -> Result<()> {
  let board = load_board(&input)
    .with_context(|| format!("failed to load board from {}", input.display()))?;
  let stepper = Stepper::for_board(&board).parallel(parallel);
  let mut uni = Universe::with_stepper(board, stepper);

  if verbose {
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock());
    uni
      .simulate_with(generations, &mut reporter)
      .context("failed to print generation")?;
  } else {
    uni.simulate(generations);
  }

  info!("ran {} generations, population {}", uni.generation(), uni.board().population());
  save_board(uni.board(), &output)
    .with_context(|| format!("failed to save board to {}", output.display()))
}

fn random_command(
  rows: usize,
  cols: usize,
  density: f64,
  seed: Option<u64>,
  output: PathBuf,
) -> Result<()> {
  let mut rng = match seed {
    Some(seed) => SmallRng::seed_from_u64(seed),
    None => SmallRng::from_entropy(),
  };
  let board = Board::new(&random_grid(rows, cols, density, &mut rng))?;
  save_board(&board, &output)
    .with_context(|| format!("failed to save board to {}", output.display()))
}

fn period_command(input: PathBuf, max: usize) -> Result<()> {
  let board = load_board(&input)
    .with_context(|| format!("failed to load board from {}", input.display()))?;
  let mut uni = Universe::new(board);
  match uni.find_cycle(max) {
    Some(Cycle { start, period }) => {
      println!("repeats from generation {} with period {}", start, period);
      Ok(())
    }
    None => bail!("no repeat within {} generations", max),
  }
}

//! match3-sim: plays a seeded match-3 board headlessly and prints every move.

use anyhow::{Context, Result, bail};
use clap::Parser;
use match3_engine::{Board, BoardEvent, Config, SwapOutcome};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut config = Config::load(args.config.as_deref()).context("failed to load config")?;
    if let Some(width) = args.width {
        config.board.width = width;
    }
    if let Some(height) = args.height {
        config.board.height = height;
    }
    if let Some(colors) = args.colors {
        config.board.colors_count = colors;
    }

    let mut builder = Board::builder(config);
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut board = builder.build().context("invalid board configuration")?;
    if !args.quiet {
        board.subscribe(print_event);
    }

    let initial = board.initialize().context("initial board did not settle")?;
    if !args.quiet {
        println!(
            "initial board (score {}, {} combo passes):",
            board.score(),
            initial.combo_level
        );
        print!("{}", board.grid());
    }

    let mut played = 0;
    for turn in 1..=args.moves {
        let Some(&(a, b)) = board.find_valid_swaps().first() else {
            println!("no valid moves left after {played} moves");
            break;
        };
        match board.try_swap(a, b)? {
            SwapOutcome::Accepted => {}
            SwapOutcome::Rejected(reason) => bail!("hint {a} <-> {b} was rejected: {reason}"),
        }
        let resolution = board.resolve().context("resolution aborted")?;
        played = turn;
        info!(turn, %a, %b, points = resolution.points, "move played");
        if !args.quiet {
            println!(
                "\nmove {turn}: {a} <-> {b}  +{} (combo {})  score {}",
                resolution.points,
                resolution.combo_level,
                board.score()
            );
            print!("{}", board.grid());
        }
    }

    if args.quiet {
        print!("{}", board.grid());
    } else {
        print_legend(&board);
    }
    println!("final score: {} after {played} moves", board.score());
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level {level:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn print_event(event: &BoardEvent) {
    match event {
        BoardEvent::MatchesFound {
            matches,
            combo_level,
        } => println!("  combo x{combo_level}: {} tiles", matches.match_count()),
        BoardEvent::SwapRejected { a, b, reason } => warn!(%a, %b, %reason, "swap rejected"),
        _ => {}
    }
}

fn print_legend(board: &Board) {
    let config = board.config();
    if config.tile_sprites.is_empty() {
        return;
    }
    println!();
    for color in 0..config.colors_count {
        if let Some(sprite) = config.sprite_for(color) {
            println!("{} = {sprite}", char::from(b'A' + color % 26));
        }
    }
}

/// Headless match-3 simulator.
#[derive(Debug, Parser)]
#[command(
    name = "match3-sim",
    version,
    about = "Plays a seeded match-3 board headlessly, always taking the first matching swap.",
    long_about = "match3-sim builds a board, settles it, then plays up to --moves swaps. \
        Each move takes the first legal swap that forms a match, scanning columns \
        left to right and rows bottom to top, and resolves every combo before the next.\n\n\
        Colours are printed as letters A, B, C... with the top row first. Use --config to \
        load a board[key]=\"value\" / score[key]=\"value\" file; flags override it."
)]
pub struct Args {
    /// Board width in columns. Overrides the config file.
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Board height in rows. Overrides the config file.
    #[arg(long, value_name = "ROWS")]
    pub height: Option<usize>,

    /// Number of tile colours. Overrides the config file.
    #[arg(long, value_name = "N")]
    pub colors: Option<u8>,

    /// Seed for colour generation. Random when not set.
    #[arg(short, long, value_name = "N")]
    pub seed: Option<u64>,

    /// Moves to play before stopping.
    #[arg(short, long, default_value = "10", value_name = "N")]
    pub moves: u32,

    /// Path to a config file (section[key]="value" lines).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. "info" or "match3_engine=debug").
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    pub log_level: String,

    /// Only print the final board and score.
    #[arg(short, long)]
    pub quiet: bool,
}

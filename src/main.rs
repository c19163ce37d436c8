//! Headless Gomoku matches between search agents.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gomoku::agent::{build_agent, AgentSpec};
use gomoku::config::MatchConfig;
use gomoku::{Match, Winner};

/// Match configuration read when `--config` is not given
const DEFAULT_CONFIG: &str = "gomoku.toml";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play one or more games between two agents
    Play {
        /// Agent for Black (random, minimax, alphabeta, expectimax, multiastar, mcts, qlearning)
        #[arg(long)]
        black: Option<String>,
        /// Agent for White
        #[arg(long)]
        white: Option<String>,
        /// Board size
        #[arg(long)]
        size: Option<usize>,
        /// Number of games
        #[arg(long)]
        games: Option<u32>,
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
        /// Path to TOML match configuration [default: gomoku.toml if present]
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print each game record as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Play {
            black,
            white,
            size,
            games,
            seed,
            config,
            json,
        } => {
            let mut config = match config {
                Some(path) => MatchConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => MatchConfig::load_or_default(Path::new(DEFAULT_CONFIG))
                    .with_context(|| format!("loading {DEFAULT_CONFIG}"))?,
            };
            // Command-line flags override the file
            if let Some(kind) = black {
                config.black = AgentSpec::of(kind);
            }
            if let Some(kind) = white {
                config.white = AgentSpec::of(kind);
            }
            if let Some(size) = size {
                config.board_size = size;
            }
            if let Some(games) = games {
                config.games = games;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.validate().context("invalid match configuration")?;
            play(&config, json)
        }
    }
}

fn play(config: &MatchConfig, json: bool) -> Result<()> {
    let runner = Match::new(config.board_size);
    let (mut black_wins, mut white_wins, mut draws) = (0u32, 0u32, 0u32);

    for game in 0..config.games {
        let mut black = build_agent(&config.black, config.board_size, config.agent_seed(game, 0))
            .context("building black agent")?;
        let mut white = build_agent(&config.white, config.board_size, config.agent_seed(game, 1))
            .context("building white agent")?;

        let (record, board) = runner.play(black.as_mut(), white.as_mut());
        match record.winner {
            Winner::Black => black_wins += 1,
            Winner::White => white_wins += 1,
            Winner::Draw => draws += 1,
        }

        println!("{board}");
        if json {
            println!("{}", serde_json::to_string(&record)?);
        }
        let winner = match record.winner_kind {
            Some(kind) => format!("{} ({kind})", record.winner),
            None => record.winner.to_string(),
        };
        println!(
            "Game {}: {} vs {} -> {winner} [{} black / {} white moves, blocks {}/{}, missed {}/{}]",
            game + 1,
            black.kind(),
            white.kind(),
            record.moves_black,
            record.moves_white,
            record.blocks_black,
            record.blocks_white,
            record.missed_blocks_black,
            record.missed_blocks_white
        );

        // Learners reload the table when rebuilt for the next game
        if config.black.learning == Some(true) {
            black.save().context("saving black's value table")?;
        }
        if config.white.learning == Some(true) {
            white.save().context("saving white's value table")?;
        }
    }

    println!("Black {black_wins}, White {white_wins}, Draws {draws}");
    Ok(())
}

//! Setback simulator CLI - plays complete games in memory with random legal intents.
//!
//! Games run through the public engine API; a rejected intent or stalled game
//! counts as a failed game.

mod metrics;
mod output;
mod simulator;
mod types;

use std::time::Instant;

use clap::Parser;
use metrics::{build_game_metrics, SimConfig};
use output::OutputWriter;
use setback_core::{GameEndReason, PartnershipId};
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use types::{MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "setback-sim")]
#[command(about = "In-memory Setback game simulator")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Base seed; game N uses base + N. Random per game when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Score a partnership must reach to win
    #[arg(long, default_value = "21")]
    target_score: i16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "basic")]
    metrics_level: MetricsLevel,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok(),
            args.verbose,
            args.show_output,
        ))
        .init();

    if args.target_score <= 0 {
        return Err(format!("target score must be positive, got {}", args.target_score).into());
    }

    if args.show_output {
        info!(games = args.games, target_score = args.target_score, "Starting simulator");
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    if args.show_output {
        info!("Output directory: {}", args.output_dir);
    }

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = match args.seed {
            Some(base) => base.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        match Simulator::new(game_seed, args.target_score).simulate_game() {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    SimConfig {
                        target_score: args.target_score,
                        total_games: args.games,
                    },
                    &result,
                    duration_ms,
                    &args.metrics_level,
                );

                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }

                if args.verbose {
                    info!(
                        game = game_num,
                        seed = game_seed,
                        scores = ?result.final_scores,
                        "Game completed"
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!(game = game_num, seed = game_seed, "Game failed: {}", e);
            }
        }
    }

    let elapsed = start.elapsed();

    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();

    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());

        print_summary(&results, errors, elapsed, args.games);
    }

    Ok(())
}

/// `RUST_LOG` wins when set and valid; otherwise the CLI flags pick the level.
fn log_filter(rust_log: Option<String>, verbose: bool, show_output: bool) -> EnvFilter {
    let fallback = if verbose {
        "debug"
    } else if show_output {
        "info"
    } else {
        "warn"
    };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn print_summary(results: &[GameResult], errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);

    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let mut wins = [0u32; 2];
    let mut total_scores = [0i64; 2];
    let mut hands = 0usize;
    let mut bids_made = 0usize;
    let mut tie_breaks = 0u32;

    for result in results {
        wins[result.winner.index()] += 1;
        for (side, &score) in result.final_scores.iter().enumerate() {
            total_scores[side] += i64::from(score);
        }
        hands += result.hands.len();
        bids_made += result.hands.iter().filter(|h| h.bid_made).count();
        if result.decided_by == GameEndReason::BiddingTieBreak {
            tie_breaks += 1;
        }
    }

    let games = results.len() as f64;
    println!("\n=== Results by Partnership ===");
    for side in PartnershipId::ALL {
        let i = side.index();
        println!(
            "{:?}: avg={:.1}, wins={} ({:.1}%)",
            side,
            total_scores[i] as f64 / games,
            wins[i],
            wins[i] as f64 / games * 100.0
        );
    }

    println!("\n=== Bidding ===");
    println!("Average hands per game: {:.1}", hands as f64 / games);
    if hands > 0 {
        println!(
            "Bids made: {}/{} ({:.1}%)",
            bids_made,
            hands,
            bids_made as f64 / hands as f64 * 100.0
        );
    }
    println!("Games decided by bidding tie-break: {}", tie_breaks);
}

use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use crate::alpha_beta;
use crate::display::{print_error, report_table, styled_divisor, styled_value};
use crate::error::DivvyError;
use crate::game::GameState;
use crate::minimax;
use crate::search::{self, Algorithm, FALLBACK_DIVISOR};
use crate::tree::{self, Divisor};

/// Largest depth accepted by the one-shot commands; the tree grows as 3^depth.
const MAX_DEPTH: u32 = 15;

#[derive(Parser)]
#[command(
    name = "divvy",
    version = "1.0.0",
    about = "Divvy \u{2014} play or analyze the divide-by-2/3/4 elimination game."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Minimax,
    #[value(name = "alpha-beta", alias = "ab")]
    AlphaBeta,
}

impl AlgorithmArg {
    fn to_algorithm(self) -> Algorithm {
        match self {
            AlgorithmArg::Minimax => Algorithm::Minimax,
            AlgorithmArg::AlphaBeta => Algorithm::AlphaBeta,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the AI
    Play,
    /// Recommend the AI's move for a position
    Best {
        /// Current number
        number: u64,
        /// Search depth
        #[arg(short, long, default_value = "12")]
        depth: u32,
        /// Search algorithm
        #[arg(short, long, default_value = "alpha-beta")]
        algorithm: AlgorithmArg,
        /// Player score so far
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        player_score: i64,
        /// AI score so far
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        ai_score: i64,
        /// Bank accumulated so far
        #[arg(long, default_value = "0")]
        bank: u64,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run minimax and alpha-beta side by side on one position
    Bench {
        /// Starting number
        number: u64,
        /// Search depth
        #[arg(short, long, default_value = "12")]
        depth: u32,
        /// Emit the comparison as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    match cli.command {
        Commands::Play => crate::play::play_command(),
        Commands::Best {
            number,
            depth,
            algorithm,
            player_score,
            ai_score,
            bank,
            json,
        } => cmd_best(number, depth, algorithm.to_algorithm(), player_score, ai_score, bank, json),
        Commands::Bench { number, depth, json } => cmd_bench(number, depth, json),
    }
}

fn check_depth(depth: u32) -> bool {
    if depth > MAX_DEPTH {
        let err = DivvyError::InvalidValue(format!("depth {} out of range (0-{})", depth, MAX_DEPTH));
        print_error(&err.to_string());
        return false;
    }
    true
}

fn cmd_best(
    number: u64,
    depth: u32,
    algorithm: Algorithm,
    player_score: i64,
    ai_score: i64,
    bank: u64,
    json: bool,
) {
    if !check_depth(depth) {
        return;
    }

    let state = match GameState::from_parts(number, player_score, ai_score, bank) {
        Ok(state) => state,
        Err(err) => {
            print_error(&err.to_string());
            return;
        }
    };

    let report = search::run_search(&state, algorithm, depth);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(err) => print_error(&DivvyError::from(err).to_string()),
        }
        return;
    }

    println!();
    println!("{}", report_table(&report));
    match report.divisor {
        Some(divisor) => println!("\n  {} {}", "Recommended:".bold(), styled_divisor(divisor)),
        None => println!(
            "\n  {}",
            format!(
                "No move available (terminal position or zero depth); callers default to {}.",
                FALLBACK_DIVISOR
            )
            .yellow()
        ),
    }
}

#[derive(Serialize)]
struct BenchEntry {
    algorithm: Algorithm,
    value: f64,
    divisor: Option<Divisor>,
    millis: f64,
}

#[derive(Serialize)]
struct BenchReport {
    number: u64,
    depth: u32,
    nodes: u64,
    full_tree_nodes: u64,
    agree: bool,
    results: Vec<BenchEntry>,
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let out = f();
    (out, started.elapsed().as_secs_f64() * 1000.0)
}

fn cmd_bench(number: u64, depth: u32, json: bool) {
    if !check_depth(depth) {
        return;
    }

    let state = match GameState::new(number) {
        Ok(state) => state,
        Err(err) => {
            print_error(&err.to_string());
            return;
        }
    };

    let (root, nodes) = tree::build(
        state.number(),
        state.player_score(),
        state.ai_score(),
        false,
        state.bank(),
        depth,
    );

    // The tree is immutable and both searchers are pure, so they can walk
    // it concurrently.
    let (minimax_run, alpha_beta_run) = rayon::join(
        || timed(|| minimax::search(&root, depth, true)),
        || timed(|| alpha_beta::search(&root, depth, true)),
    );
    let ((mm_value, mm_move), mm_ms) = minimax_run;
    let ((ab_value, ab_move), ab_ms) = alpha_beta_run;

    let agree = mm_value == ab_value && mm_move == ab_move;

    if json {
        let report = BenchReport {
            number,
            depth,
            nodes,
            full_tree_nodes: search::full_tree_nodes(depth),
            agree,
            results: vec![
                BenchEntry {
                    algorithm: Algorithm::Minimax,
                    value: mm_value,
                    divisor: mm_move,
                    millis: mm_ms,
                },
                BenchEntry {
                    algorithm: Algorithm::AlphaBeta,
                    value: ab_value,
                    divisor: ab_move,
                    millis: ab_ms,
                },
            ],
        };
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(err) => print_error(&DivvyError::from(err).to_string()),
        }
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Algorithm"),
        Cell::new("Value").set_alignment(CellAlignment::Right),
        Cell::new("Move").set_alignment(CellAlignment::Right),
        Cell::new("Time (ms)").set_alignment(CellAlignment::Right),
    ]);
    for (algorithm, value, chosen, ms) in [
        (Algorithm::Minimax, mm_value, mm_move, mm_ms),
        (Algorithm::AlphaBeta, ab_value, ab_move, ab_ms),
    ] {
        table.add_row(vec![
            Cell::new(algorithm.to_string()),
            Cell::new(styled_value(value)).set_alignment(CellAlignment::Right),
            Cell::new(match chosen {
                Some(divisor) => styled_divisor(divisor),
                None => "none".dimmed().to_string(),
            })
            .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", ms)).set_alignment(CellAlignment::Right),
        ]);
    }

    println!();
    println!("{}", table);
    println!(
        "\n  Nodes generated: {} (full ternary tree: {})",
        nodes,
        search::full_tree_nodes(depth)
    );
    if agree {
        println!("  {}", "Both algorithms agree on value and move.".green());
    } else {
        println!(
            "  {}",
            "Algorithms diverged \u{2014} tie-break artifact, values should still match.".yellow()
        );
    }
}

//! Interactive game session for the `play` subcommand.
//!
//! All prompts read from an injected reader and write to an injected
//! writer, so whole sessions can be driven from tests without a TTY.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use colored::Colorize;
use itertools::Itertools;
use once_cell::sync::Lazy;
use rand::Rng;

use crate::display::{scoreboard, styled_divisor};
use crate::game::{Actor, GameState};
use crate::search::{run_search, Algorithm, FALLBACK_DIVISOR};
use crate::tree::Divisor;

/// How many starting numbers are offered per game.
const CANDIDATE_COUNT: usize = 5;

/// Starting numbers divisible by 2, 3, and 4, so every opening line of
/// play divides evenly.
static VALID_NUMBERS: Lazy<Vec<u64>> = Lazy::new(|| (20_004..=30_000).step_by(12).collect());

/// Random draw of candidate starting numbers for one game.
pub fn candidate_numbers(count: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| VALID_NUMBERS[rng.gen_range(0..VALID_NUMBERS.len())])
        .collect()
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

fn prompt(
    message: &str,
    default: Option<&str>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> String {
    if let Some(d) = default {
        write!(writer, "{} [{}]: ", message, d).ok();
    } else {
        write!(writer, "{}: ", message).ok();
    }
    writer.flush().ok();

    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => "q".to_string(),
        Ok(_) => {
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() {
                default.unwrap_or("").to_string()
            } else {
                trimmed
            }
        }
        Err(_) => "q".to_string(),
    }
}

fn prompt_menu(
    title: &str,
    options: &[&str],
    default_idx: usize,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> String {
    writeln!(writer, "\n  {}", title.bold()).ok();
    for (i, opt) in options.iter().enumerate() {
        let marker = if i == default_idx { " <" } else { "" };
        writeln!(writer, "    {}  {}{}", format!("{}.", i + 1).bold(), opt, marker.dimmed()).ok();
    }

    let answer = prompt("  Enter a number", Some(&format!("{}", default_idx + 1)), reader, writer);
    if answer.eq_ignore_ascii_case("q") {
        return "q".to_string();
    }

    let lower = answer.to_lowercase();
    for opt in options {
        if opt.to_lowercase().starts_with(&lower) {
            return opt.to_string();
        }
    }
    if let Ok(n) = answer.parse::<usize>() {
        if n >= 1 && n <= options.len() {
            return options[n - 1].to_string();
        }
    }
    options[default_idx].to_string()
}

fn prompt_yn(
    message: &str,
    default: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Option<bool> {
    let answer = prompt(&format!("{} (y/n)", message), Some(default), reader, writer);
    if answer.eq_ignore_ascii_case("q") {
        return None;
    }
    Some(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

struct QuitSession;

pub fn play_command() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut reader = stdin.lock();
    let mut writer = stdout.lock();
    run_interactive_session(&mut reader, &mut writer);
}

pub fn run_interactive_session(reader: &mut dyn BufRead, writer: &mut dyn Write) {
    writeln!(writer).ok();
    writeln!(writer, "{}", "Divvy \u{2014} divide the number, claim the bank".cyan().bold()).ok();
    writeln!(
        writer,
        "Divide by 2, 3, or 4. Odd results score, multiples of 5 feed the bank.\nType {} at any prompt to quit.\n",
        "'q'".bold()
    )
    .ok();

    loop {
        match play_one_game(reader, writer) {
            Ok(()) => {}
            Err(QuitSession) => {
                writeln!(writer, "\n{}\n", "Thanks for playing.".cyan().bold()).ok();
                return;
            }
        }

        match prompt_yn("\nPlay another game?", "y", reader, writer) {
            Some(true) => continue,
            _ => {
                writeln!(writer, "\n{}\n", "Thanks for playing.".cyan().bold()).ok();
                return;
            }
        }
    }
}

fn play_one_game(reader: &mut dyn BufRead, writer: &mut dyn Write) -> Result<(), QuitSession> {
    // -- Starting number --
    let candidates = candidate_numbers(CANDIDATE_COUNT);
    writeln!(
        writer,
        "  Available numbers: {}",
        candidates.iter().join(", ").bold()
    )
    .ok();

    let default_number = candidates[0].to_string();
    let number = loop {
        let answer = prompt("  Starting number", Some(&default_number), reader, writer);
        if answer.eq_ignore_ascii_case("q") {
            return Err(QuitSession);
        }
        match answer.parse::<u64>() {
            Ok(n) if candidates.contains(&n) => break n,
            _ => {
                writeln!(writer, "  {}", "Pick one of the listed numbers.".red()).ok();
            }
        }
    };

    // -- First mover --
    let first = prompt_menu("Who moves first?", &["Player", "AI bot"], 0, reader, writer);
    if first.eq_ignore_ascii_case("q") {
        return Err(QuitSession);
    }
    let mut player_turn = first == "Player";

    // -- Algorithm --
    let chosen = prompt_menu("Search algorithm", &["Minimax", "Alpha-beta"], 0, reader, writer);
    if chosen.eq_ignore_ascii_case("q") {
        return Err(QuitSession);
    }
    let algorithm = if chosen == "Alpha-beta" {
        Algorithm::AlphaBeta
    } else {
        Algorithm::Minimax
    };

    // -- Depth --
    let depth = loop {
        let answer = prompt("  Search depth (1-15)", Some("12"), reader, writer);
        if answer.eq_ignore_ascii_case("q") {
            return Err(QuitSession);
        }
        match answer.parse::<u32>() {
            Ok(d) if (1..=15).contains(&d) => break d,
            _ => {
                writeln!(writer, "  {}", "Enter a depth between 1 and 15.".red()).ok();
            }
        }
    };

    // -- Game loop --
    let mut game = match GameState::new(number) {
        Ok(game) => game,
        Err(err) => {
            writeln!(writer, "  {}", err.to_string().red()).ok();
            return Ok(());
        }
    };

    // Candidates sit well above the threshold, so at least one move is
    // always played before this is read.
    let mut last_mover = Actor::Player;
    let mut times: Vec<Duration> = Vec::new();

    while game.is_active() {
        writeln!(writer, "\n{}", scoreboard(&game)).ok();

        if player_turn {
            let divisor = loop {
                let answer = prompt("  Divide by (2, 3, 4)", None, reader, writer);
                if answer.eq_ignore_ascii_case("q") {
                    return Err(QuitSession);
                }
                match answer.parse::<u64>().ok().and_then(|raw| Divisor::try_from(raw).ok()) {
                    Some(divisor) => break divisor,
                    None => {
                        writeln!(writer, "  {}", "Enter 2, 3, or 4.".red()).ok();
                    }
                }
            };
            if let Err(err) = game.apply_move(Actor::Player, divisor) {
                writeln!(writer, "  {}", err.to_string().red()).ok();
                break;
            }
            last_mover = Actor::Player;
        } else {
            let started = Instant::now();
            let report = run_search(&game, algorithm, depth);
            let elapsed = started.elapsed();
            times.push(elapsed);

            let divisor = match report.divisor {
                Some(divisor) => divisor,
                None => {
                    writeln!(
                        writer,
                        "  {}",
                        format!("Search returned no move; defaulting to {}.", FALLBACK_DIVISOR)
                            .yellow()
                    )
                    .ok();
                    FALLBACK_DIVISOR
                }
            };
            if let Err(err) = game.apply_move(Actor::Ai, divisor) {
                writeln!(writer, "  {}", err.to_string().red()).ok();
                break;
            }
            last_mover = Actor::Ai;

            writeln!(
                writer,
                "  AI bot plays {}  ({} nodes, {:.1} ms)",
                styled_divisor(divisor),
                report.nodes,
                elapsed.as_secs_f64() * 1000.0
            )
            .ok();
        }

        player_turn = !player_turn;
    }

    // -- Final standings --
    let (player_final, ai_final) = game.final_scores(last_mover);
    let claimant = match last_mover {
        Actor::Player => "Player",
        Actor::Ai => "AI bot",
    };

    writeln!(writer, "\n{}", "--- Game over ---".cyan().bold()).ok();
    writeln!(writer, "  {} claims the bank (+{})", claimant.bold(), game.bank()).ok();
    writeln!(writer, "  Player score: {}", player_final).ok();
    writeln!(writer, "  AI bot score: {}", ai_final).ok();

    if player_final > ai_final {
        writeln!(writer, "  {}", "Player wins!".green().bold()).ok();
    } else if player_final < ai_final {
        writeln!(writer, "  {}", "AI bot wins!".red().bold()).ok();
    } else {
        writeln!(writer, "  {}", "It's a draw.".yellow().bold()).ok();
    }

    if !times.is_empty() {
        let total: Duration = times.iter().sum();
        let average = total / times.len() as u32;
        writeln!(
            writer,
            "  AI thinking time: {} searches, {:.1} ms average",
            times.len(),
            average.as_secs_f64() * 1000.0
        )
        .ok();
    }

    Ok(())
}

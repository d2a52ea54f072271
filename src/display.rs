use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::game::GameState;
use crate::search::SearchReport;
use crate::tree::Divisor;

/// Scoreboard shown between moves.
pub fn scoreboard(state: &GameState) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Number".bold().to_string()),
        Cell::new(state.number().to_string()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Player".bold().to_string()),
        Cell::new(state.player_score().to_string()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("AI bot".bold().to_string()),
        Cell::new(state.ai_score().to_string()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Bank".bold().to_string()),
        Cell::new(state.bank().to_string()).set_alignment(CellAlignment::Right),
    ]);

    table.to_string()
}

/// A divisor move rendered as, e.g., `÷3`.
pub fn styled_divisor(divisor: Divisor) -> String {
    format!("\u{f7}{}", divisor).cyan().bold().to_string()
}

/// One-shot search report as a metric/value table.
pub fn report_table(report: &SearchReport) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Algorithm".bold().to_string()),
        Cell::new(report.algorithm.to_string()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Depth".bold().to_string()),
        Cell::new(report.depth.to_string()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Nodes generated".bold().to_string()),
        Cell::new(report.nodes.to_string()).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Evaluation".bold().to_string()),
        Cell::new(styled_value(report.value)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Best move".bold().to_string()),
        Cell::new(match report.divisor {
            Some(divisor) => styled_divisor(divisor),
            None => "none".dimmed().to_string(),
        })
        .set_alignment(CellAlignment::Right),
    ]);

    table.to_string()
}

/// Evaluations colored by which side they favor.
pub fn styled_value(value: f64) -> String {
    let text = format!("{:.3}", value);
    if value > 0.0 {
        text.green().to_string()
    } else if value < 0.0 {
        text.red().to_string()
    } else {
        text.yellow().to_string()
    }
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{run_search, Algorithm};

    #[test]
    fn scoreboard_lists_all_four_metrics() {
        let state = GameState::from_parts(24000, -2, 3, 7).unwrap();
        let board = scoreboard(&state);
        for needle in ["Number", "24000", "Player", "-2", "AI bot", "3", "Bank", "7"] {
            assert!(board.contains(needle), "missing {:?} in:\n{}", needle, board);
        }
    }

    #[test]
    fn report_table_shows_the_chosen_move() {
        let state = GameState::new(24000).unwrap();
        let report = run_search(&state, Algorithm::AlphaBeta, 3);
        let table = report_table(&report);
        assert!(table.contains("alpha-beta"));
        assert!(table.contains("40"));
        assert!(table.contains('3'));
    }

    #[test]
    fn divisor_styling_keeps_the_digit() {
        assert!(styled_divisor(Divisor::Four).contains('4'));
    }
}

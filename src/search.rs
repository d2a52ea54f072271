//! Search façade: algorithm selection and the per-turn entry point.

use std::fmt;

use serde::Serialize;

use crate::alpha_beta;
use crate::game::GameState;
use crate::minimax;
use crate::tree::{self, Divisor};

/// Which searcher chooses the AI's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "minimax"),
            Algorithm::AlphaBeta => write!(f, "alpha-beta"),
        }
    }
}

/// Move applied when a search yields no divisor (terminal root or zero
/// depth). Callers surface that as a degraded condition, not a failure.
pub const FALLBACK_DIVISOR: Divisor = Divisor::Two;

/// Outcome of one AI search over a freshly built tree.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub depth: u32,
    pub value: f64,
    pub divisor: Option<Divisor>,
    /// Total nodes generated for this search, including the root.
    pub nodes: u64,
}

/// Build a tree rooted at the current position with the AI to move, then
/// run the chosen searcher maximizing for the AI. The tree lives only for
/// this call; nothing carries over to the next turn.
pub fn run_search(state: &GameState, algorithm: Algorithm, depth: u32) -> SearchReport {
    let (root, nodes) = tree::build(
        state.number(),
        state.player_score(),
        state.ai_score(),
        false,
        state.bank(),
        depth,
    );

    let (value, divisor) = match algorithm {
        Algorithm::Minimax => minimax::search(&root, depth, true),
        Algorithm::AlphaBeta => alpha_beta::search(&root, depth, true),
    };

    SearchReport {
        algorithm,
        depth,
        value,
        divisor,
        nodes,
    }
}

/// Node count of a full ternary tree of the given depth:
/// `(3^(depth+1) - 1) / 2`. Actual searches fall below this once a subtree
/// reaches the terminal threshold.
pub fn full_tree_nodes(depth: u32) -> u64 {
    (3u64.pow(depth + 1) - 1) / 2
}

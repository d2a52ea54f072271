//! Leaf evaluation: a weighted five-term estimate of how favorable a
//! position is for the AI. Applied by the searchers wherever the tree was
//! not expanded further (depth cutoff or terminal number).

use crate::game::TERMINAL_NUMBER;
use crate::tree::TreeNode;

/// Score `node` from the AI's perspective; higher is better for the AI.
///
/// Pure: the node is never mutated and repeated calls return the same
/// value. Childless nodes contribute nothing through the child-derived
/// terms.
pub fn evaluate(node: &TreeNode) -> f64 {
    // Direct score differential.
    let score_diff = (node.ai_score - node.player_score) as f64;

    // Bank pressure: the bank weighs more as the number shrinks toward the
    // end of the game.
    let bank_pressure = node.bank as f64 * 10.0 / node.value as f64;

    // Immediate gain potential across reachable children. The AI-side
    // delta cancels itself out; only the negated player delta remains.
    let mut gain = 0_i64;

    // Bank increment potential: children landing on a multiple of 5.
    let mut bank_potential = 0_i64;

    // End-game potential: within reach of the terminal threshold, reward
    // ending the game and taking the bank.
    let mut end_game = 0_i64;

    if let Some(children) = node.children.as_deref() {
        for child in children {
            gain -= child.player_score - node.player_score;
            if child.value % 5 == 0 {
                bank_potential += 1;
            }
        }

        if node.value / 4 <= TERMINAL_NUMBER {
            let best = children
                .iter()
                .map(|child| child.bank as i64 + if child.value % 2 == 0 { -1 } else { 1 })
                .max()
                .unwrap_or(0);
            end_game = if node.is_player_turn { -best } else { best };
        }
    }

    10.0 * score_diff
        + bank_pressure
        + 3.0 * gain as f64
        + 5.0 * bank_potential as f64
        + 10.0 * end_game as f64
}

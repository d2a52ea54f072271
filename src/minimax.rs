//! Exhaustive minimax over a generated game tree.

use crate::heuristic::evaluate;
use crate::tree::{Divisor, TreeNode};

/// Search the subtree under `node`, maximizing for the AI when
/// `maximizing` is set and minimizing on the opponent's turns. Returns the
/// best reachable evaluation and the divisor achieving it; the divisor is
/// `None` only at a leaf or when `depth` is zero.
///
/// Children are visited in ascending-divisor order and a tie keeps the
/// first best value seen.
pub fn search(node: &TreeNode, depth: u32, maximizing: bool) -> (f64, Option<Divisor>) {
    let children = match node.children.as_deref() {
        Some(children) if depth > 0 => children,
        _ => return (evaluate(node), None),
    };

    let mut best_value = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_move = None;

    for (divisor, child) in Divisor::ALL.into_iter().zip(children.iter()) {
        let (value, _) = search(child, depth - 1, !maximizing);

        if (maximizing && value > best_value) || (!maximizing && value < best_value) {
            best_value = value;
            best_move = Some(divisor);
        }
    }

    (best_value, best_move)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::tree::build;

    #[test]
    fn leaf_returns_heuristic_and_no_move() {
        let (root, _) = build(8, 0, 0, false, 0, 3);
        let (value, chosen) = search(&root, 3, true);
        assert_eq!(chosen, None);
        assert_relative_eq!(value, evaluate(&root));
    }

    #[test]
    fn depth_zero_returns_heuristic_and_no_move() {
        let (root, _) = build(24000, 0, 0, false, 0, 3);
        let (value, chosen) = search(&root, 0, true);
        assert_eq!(chosen, None);
        assert_relative_eq!(value, evaluate(&root));
    }

    #[test]
    fn picks_the_maximizing_child() {
        // Children of 11 are the leaves 5, 3, 2; dividing by 2 lands on an
        // odd multiple of 5 and dominates.
        let (root, _) = build(11, 0, 0, false, 0, 3);
        let (value, chosen) = search(&root, 3, true);
        assert_relative_eq!(value, 12.0);
        assert_eq!(chosen, Some(Divisor::Two));
    }

    #[test]
    fn ties_keep_the_first_divisor() {
        let (root, _) = build(11, 0, 0, false, 0, 1);
        let mut tied = root.clone();
        // Flatten all leaf evaluations to the same value.
        for child in tied.children.as_deref_mut().unwrap() {
            child.player_score = 0;
            child.ai_score = 0;
            child.bank = 0;
        }
        let (value, chosen) = search(&tied, 1, true);
        assert_eq!(value, 0.0);
        assert_eq!(chosen, Some(Divisor::Two));
    }

    #[test]
    fn minimizing_prefers_the_smallest_value() {
        let (root, _) = build(11, 0, 0, true, 0, 1);
        let (value, chosen) = search(&root, 1, false);
        let worst = Divisor::ALL
            .iter()
            .map(|&d| evaluate(root.child(d).unwrap()))
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!(value, worst);
        assert!(chosen.is_some());
    }

    #[test]
    fn pinned_midgame_search() {
        let (root, _) = build(24000, 0, 0, false, 0, 3);
        let (value, chosen) = search(&root, 3, true);
        assert_relative_eq!(value, -9.94);
        assert_eq!(chosen, Some(Divisor::Three));
    }
}

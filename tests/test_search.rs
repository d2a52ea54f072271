//! Cross-checks between the two searchers and pinned end-to-end search
//! results.

use approx::assert_relative_eq;

use divvy_cli::game::GameState;
use divvy_cli::search::{full_tree_nodes, run_search, Algorithm, FALLBACK_DIVISOR};
use divvy_cli::tree::{build, Divisor};
use divvy_cli::{alpha_beta, minimax};

// ---------------------------------------------------------------------------
// Pinned positions
// ---------------------------------------------------------------------------

struct Pinned {
    number: u64,
    depth: u32,
    player_score: i64,
    ai_score: i64,
    bank: u64,
    value: f64,
    divisor: u64,
    nodes: u64,
}

const fn pos(
    number: u64,
    depth: u32,
    player_score: i64,
    ai_score: i64,
    bank: u64,
    value: f64,
    divisor: u64,
    nodes: u64,
) -> Pinned {
    Pinned {
        number,
        depth,
        player_score,
        ai_score,
        bank,
        value,
        divisor,
        nodes,
    }
}

const PINNED: &[Pinned] = &[
    pos(24000, 1, 0, 0, 0, -9.998333333333333, 4, 4),
    pos(24000, 2, 0, 0, 0, 0.006666666666666667, 4, 13),
    pos(24000, 3, 0, 0, 0, -9.94, 3, 40),
    pos(24000, 4, 0, 0, 0, -19.68, 3, 121),
    pos(24000, 6, 0, 0, 0, -16.666666666666668, 3, 1093),
    pos(20004, 3, 0, 0, 0, 10.018018018018019, 4, 40),
    pos(29988, 5, 0, 0, 0, 10.0, 4, 364),
    pos(12000, 4, 0, 0, 0, 0.16042780748663102, 4, 121),
    pos(50, 5, 0, 0, 0, 21.25, 2, 16),
    pos(48, 3, 0, 0, 0, 0.0, 2, 16),
    pos(44, 2, 0, 0, 0, 0.0, 4, 13),
    pos(24, 2, 0, 0, 0, -10.0, 3, 7),
    pos(11, 3, 0, 0, 0, 12.0, 2, 4),
    pos(375, 4, 2, -1, 3, -15.714285714285715, 4, 100),
    pos(1500, 5, -2, 2, 1, 42.857142857142854, 4, 331),
    pos(46, 3, 1, 1, 2, 6.0, 4, 16),
];

#[test]
fn pinned_results_hold_for_both_algorithms() {
    for p in PINNED {
        let state = GameState::from_parts(p.number, p.player_score, p.ai_score, p.bank).unwrap();
        let expected = Divisor::try_from(p.divisor).unwrap();

        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let report = run_search(&state, algorithm, p.depth);
            assert_relative_eq!(report.value, p.value);
            assert_eq!(
                report.divisor,
                Some(expected),
                "{} on {} at depth {}",
                algorithm,
                p.number,
                p.depth
            );
            assert_eq!(report.nodes, p.nodes, "{} at depth {}", p.number, p.depth);
        }
    }
}

// ---------------------------------------------------------------------------
// Algorithm agreement
// ---------------------------------------------------------------------------

/// Minimax values of the three root branches; distinct values rule out the
/// tie-break caveat between the searchers.
fn root_branch_values(number: u64, depth: u32) -> Option<Vec<f64>> {
    let (root, _) = build(number, 0, 0, false, 0, depth);
    let children = root.children.as_deref()?;
    Some(
        children
            .iter()
            .map(|child| minimax::search(child, depth - 1, false).0)
            .collect(),
    )
}

fn all_distinct(values: &[f64]) -> bool {
    values
        .iter()
        .enumerate()
        .all(|(i, a)| values[i + 1..].iter().all(|b| a != b))
}

#[test]
fn searchers_agree_on_value_everywhere() {
    let numbers = [
        11, 12, 13, 17, 23, 24, 30, 40, 43, 44, 48, 50, 93, 100, 187, 375, 750, 1500, 3000,
        12000, 20004, 24000, 29988,
    ];
    for number in numbers {
        for depth in 1..=5 {
            let (root, _) = build(number, 0, 0, false, 0, depth);
            let (mm_value, _) = minimax::search(&root, depth, true);
            let (ab_value, _) = alpha_beta::search(&root, depth, true);
            assert_relative_eq!(mm_value, ab_value);
        }
    }
}

#[test]
fn searchers_agree_on_move_when_branches_are_distinct() {
    let numbers = [11, 23, 40, 50, 100, 375, 1500, 20004, 24000, 29988];
    let mut checked = 0;
    for number in numbers {
        for depth in 1..=5 {
            let Some(values) = root_branch_values(number, depth) else {
                continue;
            };
            if !all_distinct(&values) {
                continue;
            }
            let (root, _) = build(number, 0, 0, false, 0, depth);
            let (_, mm_move) = minimax::search(&root, depth, true);
            let (_, ab_move) = alpha_beta::search(&root, depth, true);
            assert_eq!(mm_move, ab_move, "{} at depth {}", number, depth);
            checked += 1;
        }
    }
    assert!(checked > 10, "the sweep must exercise real positions");
}

// ---------------------------------------------------------------------------
// Degraded searches
// ---------------------------------------------------------------------------

#[test]
fn zero_depth_search_returns_no_move() {
    let state = GameState::new(24000).unwrap();
    for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
        let report = run_search(&state, algorithm, 0);
        assert_eq!(report.divisor, None);
        assert_eq!(report.nodes, 1);
    }
}

#[test]
fn terminal_search_returns_no_move() {
    let state = GameState::from_parts(10, 1, -1, 2).unwrap();
    let report = run_search(&state, Algorithm::AlphaBeta, 6);
    assert_eq!(report.divisor, None);
    // Only the heuristic of the bare root remains.
    assert_relative_eq!(report.value, 10.0 * -2.0 + 2.0);
}

#[test]
fn fallback_move_is_divide_by_two() {
    assert_eq!(FALLBACK_DIVISOR, Divisor::Two);
}

#[test]
fn node_counts_never_exceed_the_closed_form() {
    for number in [11, 50, 100, 24000] {
        for depth in 0..=6 {
            let (_, count) = build(number, 0, 0, false, 0, depth);
            assert!(count <= full_tree_nodes(depth));
        }
    }
}

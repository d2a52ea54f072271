//! Game-tree generation: hypothetical futures of the current position.
//!
//! A tree is built fresh for every AI search and discarded afterwards;
//! nothing is cached between turns. Nodes are never mutated once built.

use std::fmt;

use crate::error::{DivvyError, DivvyResult};
use crate::game::TERMINAL_NUMBER;

/// A legal move: divide the current number by 2, 3, or 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Divisor {
    Two,
    Three,
    Four,
}

impl Divisor {
    /// All moves in ascending order. Tree children are laid out in this
    /// order and both searchers rely on it for their first-wins tie-break.
    pub const ALL: [Divisor; 3] = [Divisor::Two, Divisor::Three, Divisor::Four];

    pub fn value(self) -> u64 {
        match self {
            Divisor::Two => 2,
            Divisor::Three => 3,
            Divisor::Four => 4,
        }
    }

    /// Slot of this divisor in a child array.
    pub fn index(self) -> usize {
        match self {
            Divisor::Two => 0,
            Divisor::Three => 1,
            Divisor::Four => 2,
        }
    }
}

impl TryFrom<u64> for Divisor {
    type Error = DivvyError;

    fn try_from(raw: u64) -> DivvyResult<Self> {
        match raw {
            2 => Ok(Divisor::Two),
            3 => Ok(Divisor::Three),
            4 => Ok(Divisor::Four),
            _ => Err(DivvyError::InvalidDivisor(raw)),
        }
    }
}

impl fmt::Display for Divisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl serde::Serialize for Divisor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value())
    }
}

/// One hypothetical position: the number at this node plus the totals as if
/// the path from the real game state had been played out.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub value: u64,
    pub player_score: i64,
    pub ai_score: i64,
    pub bank: u64,
    /// Side to move at this node.
    pub is_player_turn: bool,
    /// The three divisor branches in ascending order; `None` exactly when
    /// the node is a leaf (depth exhausted or `value <= 10`).
    pub children: Option<Box<[TreeNode; 3]>>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn child(&self, divisor: Divisor) -> Option<&TreeNode> {
        self.children.as_deref().map(|children| &children[divisor.index()])
    }
}

/// Expand every divisor choice from the given position until `depth` runs
/// out or the number falls to the terminal threshold. Returns the root and
/// the node count of the whole subtree (diagnostics only).
///
/// Deterministic: same inputs, same tree. No I/O, no randomness.
pub fn build(
    number: u64,
    player_score: i64,
    ai_score: i64,
    is_player_turn: bool,
    bank: u64,
    depth: u32,
) -> (TreeNode, u64) {
    let mut node = TreeNode {
        value: number,
        player_score,
        ai_score,
        bank,
        is_player_turn,
        children: None,
    };
    let mut count = 1;

    if depth == 0 || number <= TERMINAL_NUMBER {
        return (node, count);
    }

    let children = Divisor::ALL.map(|divisor| {
        let value = number / divisor.value();

        // Even/odd rule: the side moving out of this node pays or gains.
        let delta = if value % 2 == 0 { -1 } else { 1 };
        let (child_player, child_ai) = if is_player_turn {
            (player_score + delta, ai_score)
        } else {
            (player_score, ai_score + delta)
        };

        let child_bank = bank + u64::from(value % 5 == 0);

        let (child, child_count) = build(
            value,
            child_player,
            child_ai,
            !is_player_turn,
            child_bank,
            depth - 1,
        );
        count += child_count;
        child
    });
    node.children = Some(Box::new(children));

    (node, count)
}

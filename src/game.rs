//! Live game state: the shared number, both running tallies, and the bank.

use crate::error::{DivvyError, DivvyResult};
use crate::tree::Divisor;

/// Numbers at or below this threshold cannot be divided further.
pub const TERMINAL_NUMBER: u64 = 10;

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Player,
    Ai,
}

impl Actor {
    pub fn opponent(self) -> Actor {
        match self {
            Actor::Player => Actor::Ai,
            Actor::Ai => Actor::Player,
        }
    }
}

/// The single source of truth for a game in progress. Search never touches
/// it; only `apply_move` mutates, and only through the accessors below is
/// it read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    number: u64,
    player_score: i64,
    ai_score: i64,
    bank: u64,
}

impl GameState {
    /// Start a fresh game from `number`.
    pub fn new(number: u64) -> DivvyResult<Self> {
        Self::from_parts(number, 0, 0, 0)
    }

    /// Reconstruct a mid-game position from raw totals.
    pub fn from_parts(number: u64, player_score: i64, ai_score: i64, bank: u64) -> DivvyResult<Self> {
        if number == 0 {
            return Err(DivvyError::InvalidValue(
                "number must be positive".to_string(),
            ));
        }
        Ok(GameState {
            number,
            player_score,
            ai_score,
            bank,
        })
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn player_score(&self) -> i64 {
        self.player_score
    }

    pub fn ai_score(&self) -> i64 {
        self.ai_score
    }

    pub fn bank(&self) -> u64 {
        self.bank
    }

    /// The game continues while the number is above the terminal threshold.
    pub fn is_active(&self) -> bool {
        self.number > TERMINAL_NUMBER
    }

    /// Divide the number on behalf of `actor`. An odd result scores +1 for
    /// the mover, an even result -1; a result divisible by 5 grows the bank.
    /// Rejected without mutation once the game is over.
    pub fn apply_move(&mut self, actor: Actor, divisor: Divisor) -> DivvyResult<()> {
        if !self.is_active() {
            return Err(DivvyError::GameOver(self.number));
        }

        self.number /= divisor.value();
        self.bank += u64::from(self.number % 5 == 0);

        let delta = if self.number % 2 == 0 { -1 } else { 1 };
        match actor {
            Actor::Player => self.player_score += delta,
            Actor::Ai => self.ai_score += delta,
        }

        Ok(())
    }

    /// Final standings as `(player, ai)`: the side that made the terminal
    /// move claims the bank on top of its tally.
    pub fn final_scores(&self, last_mover: Actor) -> (i64, i64) {
        let bank = self.bank as i64;
        match last_mover {
            Actor::Player => (self.player_score + bank, self.ai_score),
            Actor::Ai => (self.player_score, self.ai_score + bank),
        }
    }
}

//! Divvy: the divide-by-2/3/4 elimination game, with a minimax and
//! alpha-beta search core behind a small terminal front-end.

pub mod alpha_beta;
pub mod cli;
pub mod display;
pub mod error;
pub mod game;
pub mod heuristic;
pub mod minimax;
pub mod play;
pub mod search;
pub mod tree;

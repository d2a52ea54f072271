use thiserror::Error;

#[derive(Error, Debug)]
pub enum DivvyError {
    #[error("Invalid divisor: {0} (moves divide by 2, 3, or 4)")]
    InvalidDivisor(u64),

    #[error("Game is over: {0} is at or below the terminal threshold")]
    GameOver(u64),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type DivvyResult<T> = Result<T, DivvyError>;

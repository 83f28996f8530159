use thiserror::Error;
use worldle_data::DataError;

/// Engine failures.
///
/// None of these are transient: they point at bad input data, a bad
/// configuration, or a caller breaking the game rules. Nothing retries.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),
    #[error("Cannot sample {requested} items from a pool of {available}")]
    InvalidSampleSize { requested: usize, available: usize },
    #[error("{0} has already been guessed")]
    AlreadyGuessed(String),
    #[error("No guesses remaining")]
    GameOver,
    #[error("Bonus round opens once the main round is finished")]
    GameNotFinished,
    #[error("Bonus round already played")]
    BonusAlreadyTaken,
    #[error("Config error: {0}")]
    Config(String),
    #[error(transparent)]
    Data(#[from] DataError),
}

use thiserror::Error;

/// Alert text shown to the user when the entry form holds invalid values.
pub const INVALID_INPUT_MESSAGE: &str = "Inputs have to be positive numbers!";

/// Alert text shown when the browser could not provide a position.
pub const LOCATION_UNAVAILABLE_MESSAGE: &str = "Could not get your position.";

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{}", INVALID_INPUT_MESSAGE)]
    InvalidInput,

    #[error("No location selected on the map")]
    NoPendingLocation,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

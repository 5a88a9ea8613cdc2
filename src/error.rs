use thiserror::Error;

use crate::models::FormField;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0} is required")]
    MissingField(FormField),

    #[error("Invalid travel date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid travel time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(String),
}

impl Error {
    /// Transport and decode failures are reported to the user as one kind.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Decode(_))
    }
}

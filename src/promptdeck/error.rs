use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Front matter error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("{0} prompt(s) failed validation")]
    Validation(usize),
}

pub type Result<T> = std::result::Result<T, DeckError>;

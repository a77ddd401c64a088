use thiserror::Error;

/// Top-level error type shared across Mikan crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("channel error: {0}")]
    Channel(String),

    #[error("media error: {0}")]
    Media(String),

    #[error("identity lookup failed: {0}")]
    Identity(String),

    /// A segment appeared in a context where it cannot occur
    /// (e.g. an `at` segment outside a group chat).
    #[error("invalid context: {0}")]
    InvalidContext(String),

    #[error("malformed message record: {0}")]
    Record(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

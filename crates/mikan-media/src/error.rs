use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InvalidInput(String),
}

impl Error {
    /// Network and filesystem failures are transient; callers may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_are_retryable() {
        let err: Error = std::io::Error::other("disk gone").into();
        assert!(err.is_retryable());
    }

    #[test]
    fn invalid_input_is_not_retryable() {
        let err = Error::InvalidInput("no such file".into());
        assert!(!err.is_retryable());
    }
}

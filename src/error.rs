//! Error types for the swipedeck host

use std::io;
use thiserror::Error;

/// Errors raised outside the engine (config, feed files, terminal I/O)
#[derive(Debug, Error)]
pub enum SwipeDeckError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Feed error: {0}")]
    FeedError(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SwipeDeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SwipeDeckError::FeedError("empty feed".to_string());
        assert_eq!(err.to_string(), "Feed error: empty feed");
    }

    #[test]
    fn test_io_error_conversion() {
        fn fails() -> Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))?
        }

        let err = fails().unwrap_err();
        assert!(matches!(err, SwipeDeckError::Io(_)));
    }
}

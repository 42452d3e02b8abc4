use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelError {
    #[error("Path does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to scan {path}: {message}")]
    ScanIo { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Warm-up scan thread panicked")]
    WarmupPanicked,
}

pub type Result<T> = std::result::Result<T, ReelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_not_found_display() {
        let err = ReelError::RootNotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "Path does not exist: /nope");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReelError = io_err.into();
        assert!(matches!(err, ReelError::Io(_)));
    }
}

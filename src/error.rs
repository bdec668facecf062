// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Maps domain errors to specific exit codes for shell scripting

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Pagination limit reached after {pages} pages; offset chain did not terminate")]
    PaginationLimit { pages: usize },

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Auth(_) => 2,
            Error::Network(_) => 3,
            Error::Parse(_) => 4,
            Error::PaginationLimit { .. } => 5,
            Error::UnsupportedFormat(_) => 6,
            Error::Config(_) => 7,
            Error::Filesystem(_) => 8,
            Error::Pdf(_) => 9,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(Error::Auth("test".into()).exit_code(), 2);
        assert_eq!(Error::PaginationLimit { pages: 1000 }.exit_code(), 5);
        assert_eq!(Error::UnsupportedFormat("xml".into()).exit_code(), 6);
        assert_eq!(Error::Config("missing".into()).exit_code(), 7);
    }

    #[test]
    fn test_unsupported_format_names_format() {
        let msg = Error::UnsupportedFormat("xml".into()).to_string();
        assert!(msg.contains("xml"));
    }
}

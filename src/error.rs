//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// `ChurchTools` API error with status context
    #[error("ChurchTools API error: {message}")]
    ChurchTools {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Payload or file parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// A lookup matched no record (e.g. no upcoming sermon)
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a `ChurchTools` error with HTTP status
    pub fn api_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check CHURCHTOOLS_API_TOKEN (or API_TOKEN) environment variable"),
            403 => Some("The API user may lack permissions for this calendar or resource"),
            404 => Some("Check CHURCHTOOLS_API_BASE; the endpoint was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("ChurchTools server error - try again later"),
            _ => None,
        };
        Self::ChurchTools {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a not-found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Whether this error means "nothing matched" rather than a failure
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn api_status_provides_hints() {
        let err = Error::api_status("Unauthorized", 401);
        match err {
            Error::ChurchTools { hint: Some(h), .. } => {
                assert!(h.contains("CHURCHTOOLS_API_TOKEN"));
            }
            _ => panic!("Expected ChurchTools error with hint"),
        }
    }

    #[test]
    fn unknown_status_has_no_hint() {
        let err = Error::api_status("Teapot", 418);
        assert!(matches!(err, Error::ChurchTools { hint: None, status: Some(418), .. }));
    }

    #[test]
    fn not_found_is_distinguishable() {
        assert!(Error::not_found("sermon").is_not_found());
        assert!(!Error::Network("down".into()).is_not_found());
    }
}

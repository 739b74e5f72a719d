//! Option source error types

use std::time::Duration;

/// Errors that can occur while fetching an option list.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Non-success HTTP response from the source.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// Network error during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid source URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body was not a valid option list.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl SourceError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the body arrived but could not be understood.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SourceError::http(503, "down").to_string(), "HTTP 503: down");
        assert_eq!(
            SourceError::parse("missing field `options`").to_string(),
            "Response parse error: missing field `options`"
        );
        assert_eq!(
            SourceError::Timeout(Duration::from_millis(250)).to_string(),
            "Timeout after 250ms"
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(SourceError::http(404, "").status_code(), Some(404));
        assert_eq!(SourceError::parse("x").status_code(), None);
        assert!(SourceError::parse_with_body("x", "{}").is_malformed());
        assert!(!SourceError::InvalidUrl("nope".into()).is_malformed());
    }
}

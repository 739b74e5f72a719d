//! Option loading state.

use option_source::SourceError;
use thiserror::Error;

/// Why the option list could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LoadError {
    /// Error message
    pub message: String,
}

impl LoadError {
    /// Create a new load error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(err: SourceError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<&str> for LoadError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Where the remote option list is in its (single) fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Request in flight; queries get the loading placeholder.
    #[default]
    Loading,
    /// Options arrived and were inserted into the backing control.
    Loaded,
    /// The fetch failed; queries get the failure placeholder.
    Failed(LoadError),
}

impl LoadState {
    /// Check if the fetch is still in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if options are available
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Check if the fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Get the error if present
    pub fn as_error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

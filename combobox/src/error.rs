//! Error types

use option_source::SourceError;
use thiserror::Error;

/// Problems with a [`ComboboxConfig`](crate::ComboboxConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No `source_url` was configured.
    #[error("source_url is required")]
    MissingSourceUrl,

    /// `source_url` is not an absolute URL.
    #[error("invalid source_url {url:?}: {reason}")]
    InvalidSourceUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The highlight tag is not a plain element name.
    #[error("invalid highlight tag {0:?}")]
    InvalidHighlightTag(String),
}

/// Errors from widget construction and teardown.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("option source error: {0}")]
    Source(#[from] SourceError),

    /// The option fetch is spawned on the current tokio runtime.
    #[error("combobox must be created inside a tokio runtime")]
    NoRuntime,

    /// Another handle to the same widget already tore it down.
    #[error("combobox {0} was already destroyed")]
    Destroyed(String),
}

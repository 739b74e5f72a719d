//! Combobox configuration.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Label of the placeholder suggestion shown while options load.
pub const DEFAULT_LOADING_LABEL: &str = "Loading...";

/// Label of the placeholder suggestion shown when the fetch failed.
pub const DEFAULT_FAILED_LABEL: &str = "Failed to load options";

/// Element wrapped around matched text in suggestion labels.
pub const DEFAULT_HIGHLIGHT_TAG: &str = "strong";

/// Settings for a [`Combobox`](crate::Combobox).
///
/// Can be built in code or deserialized (e.g. from JSON):
///
/// ```
/// use combobox::ComboboxConfig;
/// use std::time::Duration;
///
/// let config = ComboboxConfig::new("https://forge.example.org/bugs/milestones")
///     .id("milestone")
///     .timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout_duration(), Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComboboxConfig {
    /// Widget id. Generated when absent.
    pub id: Option<String>,
    /// Endpoint returning `{ "options": [...] }`. Required by `Combobox::create`.
    pub source_url: Option<String>,
    /// Request timeout for the option fetch, in milliseconds.
    pub timeout_ms: Option<u64>,
    pub loading_label: String,
    pub failed_label: String,
    pub highlight_tag: String,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            id: None,
            source_url: None,
            timeout_ms: None,
            loading_label: DEFAULT_LOADING_LABEL.to_string(),
            failed_label: DEFAULT_FAILED_LABEL.to_string(),
            highlight_tag: DEFAULT_HIGHLIGHT_TAG.to_string(),
        }
    }
}

impl ComboboxConfig {
    /// Create a config for the given source URL.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: Some(source_url.into()),
            ..Default::default()
        }
    }

    /// Set the widget id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Set the placeholder label shown while loading.
    pub fn loading_label(mut self, label: impl Into<String>) -> Self {
        self.loading_label = label.into();
        self
    }

    /// Set the placeholder label shown after a failed fetch.
    pub fn failed_label(mut self, label: impl Into<String>) -> Self {
        self.failed_label = label.into();
        self
    }

    /// Set the element used to emphasize matches.
    pub fn highlight_tag(mut self, tag: impl Into<String>) -> Self {
        self.highlight_tag = tag.into();
        self
    }

    /// The fetch timeout, if any.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Parse the configured source URL.
    pub fn source_url(&self) -> Result<Url, ConfigError> {
        let raw = match self.source_url.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(ConfigError::MissingSourceUrl),
        };
        Url::parse(raw).map_err(|e| ConfigError::InvalidSourceUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })
    }

    /// Check everything that does not depend on the source URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tag = &self.highlight_tag;
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidHighlightTag(tag.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_url() {
        assert_eq!(
            ComboboxConfig::default().source_url(),
            Err(ConfigError::MissingSourceUrl)
        );
        assert_eq!(
            ComboboxConfig::new("   ").source_url(),
            Err(ConfigError::MissingSourceUrl)
        );
    }

    #[test]
    fn test_relative_source_url_rejected() {
        let err = ComboboxConfig::new("/p/test/bugs/milestones")
            .source_url()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSourceUrl { .. }));
    }

    #[test]
    fn test_highlight_tag_validation() {
        assert!(ComboboxConfig::default().validate().is_ok());
        assert!(ComboboxConfig::default().highlight_tag("em").validate().is_ok());
        assert_eq!(
            ComboboxConfig::default().highlight_tag("b onclick").validate(),
            Err(ConfigError::InvalidHighlightTag("b onclick".into()))
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ComboboxConfig = serde_json::from_str(
            r#"{"source_url":"http://localhost/options","timeout_ms":1500}"#,
        )
        .unwrap();
        assert_eq!(config.source_url.as_deref(), Some("http://localhost/options"));
        assert_eq!(config.timeout_duration(), Some(Duration::from_millis(1500)));
        assert_eq!(config.loading_label, DEFAULT_LOADING_LABEL);
        assert_eq!(config.highlight_tag, DEFAULT_HIGHLIGHT_TAG);
    }
}

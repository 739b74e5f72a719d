//! Option source trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::OptionEntry;
use crate::SourceError;

/// Anything that can produce the option list for a combobox.
///
/// [`OptionSourceClient`](crate::OptionSourceClient) is the HTTP
/// implementation; hosts can supply their own (an in-memory list, a cached
/// lookup, ...).
#[async_trait]
pub trait OptionSource: Send + Sync {
    /// Fetch the full option list, in display order.
    async fn fetch_options(&self) -> Result<Vec<OptionEntry>, SourceError>;
}

#[async_trait]
impl<S: OptionSource + ?Sized> OptionSource for Arc<S> {
    async fn fetch_options(&self) -> Result<Vec<OptionEntry>, SourceError> {
        (**self).fetch_options().await
    }
}

#[async_trait]
impl OptionSource for Vec<OptionEntry> {
    async fn fetch_options(&self) -> Result<Vec<OptionEntry>, SourceError> {
        Ok(self.clone())
    }
}

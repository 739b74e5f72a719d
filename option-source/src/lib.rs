//! Remote option source client
//!
//! Fetches the `{ "options": [{ "label": ..., "value": ... }] }` document a
//! combobox populates itself from.

pub mod error;
pub mod model;

mod client;
mod source;

pub use client::*;
pub use error::SourceError;
pub use model::{OptionEntry, OptionsResponse};
pub use source::OptionSource;

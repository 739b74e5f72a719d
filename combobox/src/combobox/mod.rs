//! Combobox widget - a text input with substring-filtered suggestions over a
//! hidden select control.

mod filter;
mod state;

pub use filter::{Suggestion, display_text, highlight, suggest};
pub use state::{Combobox, ComboboxId};

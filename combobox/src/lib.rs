//! Searchable dropdown widget.
//!
//! A [`Combobox`] wraps a hidden single-select [`SelectControl`] with a text
//! input that filters the control's options as the user types. Options are
//! fetched once from a remote [`OptionSource`] after the widget is created.
//!
//! The widget holds its own model; [`render`] derives markup from it.

pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod load;
pub mod render;
pub mod traits;

mod combobox;

pub use combobox::{Combobox, ComboboxId, Suggestion, display_text, highlight, suggest};
pub use config::ComboboxConfig;
pub use control::{SelectControl, SelectOption};
pub use error::{ConfigError, WidgetError};
pub use events::{ComboboxEvent, EventKind, SelectedEvent};
pub use load::{LoadError, LoadState};
pub use option_source::{OptionEntry, OptionSource, SourceError};
pub use traits::Widget;

pub mod prelude {
    pub use crate::combobox::{Combobox, Suggestion};
    pub use crate::config::ComboboxConfig;
    pub use crate::control::{SelectControl, SelectOption};
    pub use crate::events::{ComboboxEvent, EventKind, SelectedEvent};
    pub use crate::load::LoadState;
    pub use crate::traits::Widget;
}

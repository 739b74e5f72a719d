//! Widget capability trait.

use crate::error::WidgetError;

/// The lifecycle every widget exposes to its host.
///
/// A widget is instantiated explicitly per target rather than registered in
/// a shared namespace.
pub trait Widget: Sized {
    /// What the widget is mounted on; handed back on destroy.
    type Target;
    /// Construction options.
    type Config;
    /// Payload delivered to handlers.
    type Event;
    /// Handler lookup key.
    type EventKind;

    /// Mount the widget on `target`.
    fn create(target: Self::Target, config: Self::Config) -> Result<Self, WidgetError>;

    /// Tear the widget down and return its target.
    fn destroy(self) -> Result<Self::Target, WidgetError>;

    /// Register `handler` for events of `kind`.
    fn on<F>(&self, kind: Self::EventKind, handler: F)
    where
        F: Fn(&Self::Event) + Send + Sync + 'static;
}

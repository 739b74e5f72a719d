//! Combobox event types and handler registry.
//!
//! `selected` is the only event a combobox emits. Hosts subscribe through
//! [`Widget::on`](crate::Widget::on); handlers run after the widget has
//! released its own locks, so they may call back into the widget.

use std::sync::{Arc, RwLock};

use crate::control::SelectOption;

// =============================================================================
// Event Types
// =============================================================================

/// Identifies which handlers to call for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A suggestion was picked from the menu.
    Selected,
}

/// Payload of a `selected` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEvent {
    /// Widget ID that triggered the event
    pub widget_id: String,
    /// Index of the chosen option in the backing control
    pub index: usize,
    /// The chosen option
    pub option: SelectOption,
}

/// An event emitted by a combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboboxEvent {
    Selected(SelectedEvent),
}

impl ComboboxEvent {
    /// The kind used for handler lookup.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Selected(_) => EventKind::Selected,
        }
    }
}

// =============================================================================
// Handler Registry
// =============================================================================

/// A registered event handler.
pub type EventHandler = Arc<dyn Fn(&ComboboxEvent) + Send + Sync>;

/// Handlers keyed by event kind, in registration order.
///
/// Cheap to clone; clones share the same handler list.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<Vec<(EventKind, EventHandler)>>>,
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `kind`.
    pub fn register(&self, kind: EventKind, handler: EventHandler) {
        if let Ok(mut guard) = self.handlers.write() {
            guard.push((kind, handler));
        }
    }

    /// Call every handler registered for the event's kind.
    pub fn emit(&self, event: &ComboboxEvent) {
        let kind = event.kind();
        // Snapshot so handlers can register more handlers without deadlocking.
        let matching: Vec<EventHandler> = self
            .handlers
            .read()
            .map(|guard| {
                guard
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|(_, h)| Arc::clone(h))
                    .collect()
            })
            .unwrap_or_default();

        log::debug!("Emitting {:?} to {} handler(s)", kind, matching.len());
        for handler in matching {
            handler(event);
        }
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Check if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every handler.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.handlers.write() {
            guard.clear();
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn selected(index: usize) -> ComboboxEvent {
        ComboboxEvent::Selected(SelectedEvent {
            widget_id: "w".into(),
            index,
            option: SelectOption::new("Red", "r"),
        })
    }

    #[test]
    fn test_emit_calls_handlers_in_order() {
        let registry = HandlerRegistry::new();
        let seen = Arc::new(RwLock::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            registry.register(
                EventKind::Selected,
                Arc::new(move |_| seen.write().unwrap().push(tag)),
            );
        }

        registry.emit(&selected(1));
        assert_eq!(*seen.read().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_clear() {
        let registry = HandlerRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        registry.register(
            EventKind::Selected,
            Arc::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(registry.len(), 1);

        registry.clear();
        registry.emit(&selected(0));

        assert!(registry.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

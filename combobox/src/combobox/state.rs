//! Combobox widget state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use option_source::{OptionEntry, OptionSource, OptionSourceClient, SourceError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::ComboboxConfig;
use crate::control::{SelectControl, SelectOption};
use crate::error::WidgetError;
use crate::events::{ComboboxEvent, EventKind, HandlerRegistry, SelectedEvent};
use crate::load::{LoadError, LoadState};
use crate::traits::Widget;

use super::filter::{Suggestion, display_text, suggest};

/// Unique identifier for a Combobox widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComboboxId(usize);

impl ComboboxId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ComboboxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__combobox_{}", self.0)
    }
}

/// Internal state for a Combobox widget.
#[derive(Debug, Default)]
struct ComboboxInner {
    /// Backing control; `None` once the widget has been destroyed
    control: Option<SelectControl>,
    /// Value selected when the widget was created
    initial_value: String,

    // Input state
    /// Current input text
    text: String,
    /// Whether the input has focus
    focused: bool,
    /// Set by typing; cleared by a pick or a commit
    edited: bool,

    // Menu state
    /// Whether the suggestion menu is visible
    menu_open: bool,
    /// Last term a search ran for
    last_term: Option<String>,
    /// Suggestions from the last search
    suggestions: Vec<Suggestion>,
    /// Whether the menu was visible when the toggle was pressed
    was_open: bool,
}

/// A text input with substring-filtered suggestions over a hidden select.
///
/// The combobox takes ownership of a [`SelectControl`], hides it, and fetches
/// the option list from the configured source. Until the options arrive every
/// query answers with a single "Loading..." placeholder. The control's
/// selected option always tracks what the user picked or committed.
///
/// `Combobox` is a cheap-to-clone handle; clones share state. The host input
/// binding drives it through [`on_input`](Self::on_input),
/// [`on_pick`](Self::on_pick), [`on_blur`](Self::on_blur) and the toggle
/// methods, and reads [`suggestions`](Self::suggestions) to render the menu.
///
/// # Example
///
/// ```ignore
/// let control = SelectControl::new("milestone")
///     .with_options([("1.0", "1.0")])
///     .with_value("1.0");
/// let combobox = Combobox::create(control, ComboboxConfig::new(url))?;
///
/// combobox.on(EventKind::Selected, |event| log::info!("{:?}", event));
/// combobox.ready().await;
///
/// combobox.on_input("2.");
/// for suggestion in combobox.suggestions() {
///     println!("{}", suggestion.label);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Combobox {
    /// Widget id (from config or generated)
    id: String,
    config: Arc<ComboboxConfig>,
    /// Internal state
    inner: Arc<RwLock<ComboboxInner>>,
    /// Option fetch progress
    load: Arc<watch::Sender<LoadState>>,
    handlers: HandlerRegistry,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Focus request flag (checked by the host)
    focus_requested: Arc<AtomicBool>,
    /// Cancels the option fetch on destroy
    cancel: CancellationToken,
}

impl Combobox {
    /// Mount a combobox on `control`, fetching options from
    /// `config.source_url`.
    ///
    /// Must be called inside a tokio runtime; the fetch runs on a spawned task.
    pub fn create(control: SelectControl, config: ComboboxConfig) -> Result<Self, WidgetError> {
        let url = config.source_url()?;
        let source = OptionSourceClient::builder()
            .url(url.as_str())
            .maybe_timeout(config.timeout_duration())
            .build()?;
        Self::create_with_source(control, config, source)
    }

    /// Mount a combobox on `control`, fetching options from `source`.
    ///
    /// `config.source_url` is not consulted.
    pub fn create_with_source<S>(
        control: SelectControl,
        config: ComboboxConfig,
        source: S,
    ) -> Result<Self, WidgetError>
    where
        S: OptionSource + 'static,
    {
        config.validate()?;
        let handle = Handle::try_current().map_err(|_| WidgetError::NoRuntime)?;

        let widget = Self::mount(control, config);

        let task_widget = widget.clone();
        let cancel = widget.cancel.clone();
        handle.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    log::debug!("Combobox {} destroyed before options arrived", task_widget.id);
                }
                result = source.fetch_options() => match result {
                    Ok(entries) => task_widget.populate(entries),
                    Err(e) => task_widget.fail(e),
                },
            }
        });

        Ok(widget)
    }

    /// Hide the control and record its initial selection.
    fn mount(mut control: SelectControl, config: ComboboxConfig) -> Self {
        control.hide();

        let (initial_value, text) = match control.selected_option() {
            Some(option) if !option.value.is_empty() => {
                (option.value.clone(), display_text(&option.label))
            }
            _ => (String::new(), String::new()),
        };

        let id = config
            .id
            .clone()
            .unwrap_or_else(|| ComboboxId::new().to_string());

        log::debug!(
            "Combobox::mount id={} control={} initial_value={:?}",
            id,
            control.name(),
            initial_value
        );

        let (load, _) = watch::channel(LoadState::Loading);

        Self {
            id,
            config: Arc::new(config),
            inner: Arc::new(RwLock::new(ComboboxInner {
                control: Some(control),
                initial_value,
                text,
                ..Default::default()
            })),
            load: Arc::new(load),
            handlers: HandlerRegistry::new(),
            dirty: Arc::new(AtomicBool::new(true)),
            focus_requested: Arc::new(AtomicBool::new(false)),
            cancel: CancellationToken::new(),
        }
    }

    /// Get the widget id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the widget configuration.
    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Option loading
    // -------------------------------------------------------------------------

    /// Current load state.
    pub fn load_state(&self) -> LoadState {
        self.load.borrow().clone()
    }

    /// Wait until the option fetch has either succeeded or failed.
    pub async fn ready(&self) -> LoadState {
        let mut rx = self.load.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            // The sender lives in `self`, so it cannot be dropped while we wait.
            Err(_) => self.load_state(),
        }
    }

    /// Replace the control's options with the fetched list.
    ///
    /// Called once by the fetch task. The option selected at creation stays
    /// selected. If the menu is open the current text is searched again so the
    /// loaded options show up without another keystroke. Later calls, and
    /// calls after [`destroy`](Widget::destroy), are ignored.
    pub fn populate(&self, entries: Vec<OptionEntry>) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if !self.load.borrow().is_loading() {
            log::warn!("Combobox {} already populated; ignoring options", self.id);
            return;
        }
        let initial_value = guard.initial_value.clone();
        let Some(control) = guard.control.as_mut() else {
            log::warn!("Combobox {} destroyed; ignoring options", self.id);
            return;
        };

        let count = entries.len();
        control.replace_options(entries.into_iter().map(SelectOption::from), &initial_value);
        log::debug!("Combobox {} populated with {} options", self.id, count);

        // Load state only changes under the write lock, so readers woken by
        // this send see the re-run menu below.
        self.load.send_replace(LoadState::Loaded);
        self.rerun_open_search(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Record a failed fetch.
    fn fail(&self, err: SourceError) {
        log::warn!("Combobox {} failed to load options: {}", self.id, err);

        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.control.is_none() || !self.load.borrow().is_loading() {
            return;
        }
        self.load.send_replace(LoadState::Failed(LoadError::from(err)));
        self.rerun_open_search(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn rerun_open_search(&self, inner: &mut ComboboxInner) {
        if inner.menu_open {
            let term = inner.text.clone();
            self.search_locked(inner, &term);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Compute suggestions for `term` without touching menu state.
    pub fn on_query(&self, term: &str) -> Vec<Suggestion> {
        self.inner
            .read()
            .map(|guard| self.query(&guard, term))
            .unwrap_or_default()
    }

    /// Run a search for `term` and show the results.
    ///
    /// The menu opens when there is at least one suggestion and closes
    /// otherwise.
    pub fn search(&self, term: &str) -> Vec<Suggestion> {
        match self.inner.write() {
            Ok(mut guard) => self.search_locked(&mut guard, term),
            Err(_) => Vec::new(),
        }
    }

    /// Suggestions for `term`. The caller holds the state lock.
    fn query(&self, inner: &ComboboxInner, term: &str) -> Vec<Suggestion> {
        let Some(control) = inner.control.as_ref() else {
            return Vec::new();
        };
        match self.load_state() {
            LoadState::Loading => vec![Suggestion::placeholder(&self.config.loading_label)],
            LoadState::Failed(_) => vec![Suggestion::placeholder(&self.config.failed_label)],
            LoadState::Loaded => suggest(control.options(), term, &self.config.highlight_tag),
        }
    }

    fn search_locked(&self, inner: &mut ComboboxInner, term: &str) -> Vec<Suggestion> {
        let suggestions = self.query(inner, term);
        if inner.control.is_some() {
            inner.last_term = Some(term.to_string());
            inner.menu_open = !suggestions.is_empty();
            inner.suggestions = suggestions.clone();
            self.dirty.store(true, Ordering::SeqCst);
        }
        suggestions
    }

    // -------------------------------------------------------------------------
    // Input events (called by the host input binding)
    // -------------------------------------------------------------------------

    /// The input text changed.
    ///
    /// Searches unless `text` equals the last searched term.
    pub fn on_input(&self, text: &str) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.control.is_none() {
            return;
        }
        guard.text = text.to_string();
        guard.edited = true;
        self.dirty.store(true, Ordering::SeqCst);
        if guard.last_term.as_deref() != Some(text) {
            self.search_locked(&mut guard, text);
        }
    }

    /// The input gained focus; shows suggestions for the current text.
    pub fn on_focus(&self) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.control.is_none() {
            return;
        }
        guard.focused = true;
        let text = guard.text.clone();
        self.search_locked(&mut guard, &text);
    }

    /// The input lost focus.
    ///
    /// Closes the menu and commits the typed text if it was edited and no
    /// suggestion was picked since.
    pub fn on_blur(&self) {
        let commit = {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            guard.focused = false;
            guard.menu_open = false;
            self.dirty.store(true, Ordering::SeqCst);
            guard.edited.then(|| guard.text.clone())
        };
        if let Some(text) = commit {
            self.on_commit(&text);
        }
    }

    /// Reconcile free text with the known options.
    ///
    /// Selects the first option whose value equals `text` exactly and shows
    /// its label. Otherwise clears the text and the control's value and
    /// forgets the last searched term.
    pub fn on_commit(&self, text: &str) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        let guard = &mut *guard;
        let Some(control) = guard.control.as_mut() else {
            return;
        };

        guard.edited = false;
        match control.position_of_value(text) {
            Some(index) => {
                control.select(index);
                guard.text = display_text(&control.options()[index].label);
                log::debug!("Combobox {} committed {:?} (option {})", self.id, text, index);
            }
            None => {
                control.clear_value();
                guard.text.clear();
                guard.last_term = None;
                log::debug!("Combobox {} cleared unmatched text {:?}", self.id, text);
            }
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// A suggestion was picked from the menu.
    ///
    /// Selects the referenced option, puts the suggestion's value in the
    /// input and emits `selected`. Placeholders are ignored.
    pub fn on_pick(&self, suggestion: &Suggestion) -> bool {
        let Some(index) = suggestion.option else {
            return false;
        };

        let event = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            let Some(control) = guard.control.as_mut() else {
                return false;
            };
            if !control.select(index) {
                return false;
            }
            let option = control.options()[index].clone();

            guard.text = suggestion.value.clone();
            guard.last_term = Some(suggestion.value.clone());
            guard.edited = false;
            guard.menu_open = false;
            self.dirty.store(true, Ordering::SeqCst);

            SelectedEvent {
                widget_id: self.id.clone(),
                index,
                option,
            }
        };

        self.handlers.emit(&ComboboxEvent::Selected(event));
        true
    }

    /// Pick the suggestion at `position` in the current menu.
    pub fn pick_at(&self, position: usize) -> bool {
        match self.suggestions().get(position) {
            Some(suggestion) => self.on_pick(suggestion),
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Toggle affordance
    // -------------------------------------------------------------------------

    /// Mouse-down on the toggle: remember whether the menu was open.
    pub fn toggle_press(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.was_open = guard.menu_open;
        }
    }

    /// Click on the toggle.
    ///
    /// Focuses the input. A menu that was closed at press time is reopened
    /// with every option; one that was open is left closed.
    pub fn toggle_click(&self) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if guard.control.is_none() {
            return;
        }
        guard.focused = true;
        self.focus_requested.store(true, Ordering::SeqCst);

        if guard.was_open {
            guard.menu_open = false;
            self.dirty.store(true, Ordering::SeqCst);
        } else {
            self.search_locked(&mut guard, "");
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current input text.
    pub fn text(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.text.clone())
            .unwrap_or_default()
    }

    /// Current value of the backing control.
    pub fn value(&self) -> String {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.control.as_ref().map(|c| c.value().to_string()))
            .unwrap_or_default()
    }

    /// The selected option of the backing control.
    pub fn selected_option(&self) -> Option<SelectOption> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.control.as_ref()?.selected_option().cloned())
    }

    /// A snapshot of the backing control.
    pub fn control(&self) -> Option<SelectControl> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.control.clone())
    }

    /// Suggestions from the last search.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.inner
            .read()
            .map(|guard| guard.suggestions.clone())
            .unwrap_or_default()
    }

    /// Check if the suggestion menu is open.
    pub fn is_open(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.menu_open)
            .unwrap_or(false)
    }

    /// Check if the input has focus.
    pub fn is_focused(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.focused)
            .unwrap_or(false)
    }

    /// Check if the widget has been torn down.
    pub fn is_destroyed(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.control.is_none())
            .unwrap_or(true)
    }

    // -------------------------------------------------------------------------
    // Focus and dirty tracking
    // -------------------------------------------------------------------------

    /// Check and clear the focus request (called by the host).
    pub fn take_focus_request(&self) -> bool {
        self.focus_requested.swap(false, Ordering::SeqCst)
    }

    /// Check if the widget state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Widget for Combobox {
    type Target = SelectControl;
    type Config = ComboboxConfig;
    type Event = ComboboxEvent;
    type EventKind = EventKind;

    fn create(target: SelectControl, config: ComboboxConfig) -> Result<Self, WidgetError> {
        Combobox::create(target, config)
    }

    /// Remove the widget and hand back the control, visible again.
    ///
    /// Cancels a fetch still in flight; a response that slips through is
    /// ignored by [`populate`](Combobox::populate).
    fn destroy(self) -> Result<SelectControl, WidgetError> {
        self.cancel.cancel();
        self.handlers.clear();

        let control = self
            .inner
            .write()
            .ok()
            .and_then(|mut guard| {
                guard.menu_open = false;
                guard.suggestions.clear();
                guard.control.take()
            });

        match control {
            Some(mut control) => {
                control.show();
                log::debug!("Combobox {} destroyed", self.id);
                Ok(control)
            }
            None => Err(WidgetError::Destroyed(self.id.clone())),
        }
    }

    fn on<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&ComboboxEvent) + Send + Sync + 'static,
    {
        self.handlers.register(kind, Arc::new(handler));
    }
}

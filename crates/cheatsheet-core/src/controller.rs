//! Interactive search state: query text, debounce timer, last results, focus.
//!
//! Every keystroke updates the query at once and re-arms a single debounce timer.
//! Only a timer that fires without being superseded runs the search engine; its
//! results replace the stored list and are published on a `watch` channel for the
//! presenter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::catalog::Catalog;
use crate::search::{search, SearchResult};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Key that moves focus to the search input from anywhere else on the page.
pub const FOCUS_SHORTCUT: &str = "/";

/// Where a pointer-down landed, relative to the search widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Input,
    Results,
    Outside,
}

/// Page-wide events delivered by the host while listeners are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalEvent {
    KeyDown { key: String, in_text_entry: bool },
    PointerDown(PointerTarget),
}

#[derive(Debug, Default)]
struct State {
    query: String,
    focused: bool,
    generation: u64,
    searches: u64,
}

pub struct QueryController {
    catalog: Arc<Catalog>,
    debounce: Duration,
    state: Arc<Mutex<State>>,
    results: Arc<watch::Sender<Vec<SearchResult>>>,
    pending: Option<JoinHandle<()>>,
    listeners: Arc<AtomicUsize>,
}

impl QueryController {
    pub fn new(catalog: Arc<Catalog>, debounce: Duration) -> Self {
        let (results, _) = watch::channel(Vec::new());
        Self {
            catalog,
            debounce,
            state: Arc::new(Mutex::new(State::default())),
            results: Arc::new(results),
            pending: None,
            listeners: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Records a keystroke. Must be called from within a tokio runtime.
    ///
    /// The query is visible through [`query`](Self::query) immediately. Any pending
    /// timer is cancelled, so at most one search is ever scheduled.
    pub fn input(&mut self, text: impl Into<String>) {
        let generation = {
            let mut state = lock(&self.state);
            state.query = text.into();
            state.generation += 1;
            state.generation
        };
        self.cancel_pending();

        let catalog = Arc::clone(&self.catalog);
        let state = Arc::clone(&self.state);
        let results = Arc::clone(&self.results);
        // Fixed at the keystroke, not at the task's first poll.
        let deadline = Instant::now() + self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            let mut state = lock(&state);
            // A newer keystroke or a dismissal got here first.
            if state.generation != generation {
                return;
            }
            let found = search(&state.query, &catalog);
            state.searches += 1;
            debug!(query = %state.query, results = found.len(), "debounced search settled");
            results.send_replace(found);
        }));
    }

    pub fn query(&self) -> String {
        lock(&self.state).query.clone()
    }

    /// Results of the last settled search.
    pub fn results(&self) -> Vec<SearchResult> {
        self.results.borrow().clone()
    }

    /// Receiver that is notified every time a search settles.
    pub fn subscribe(&self) -> watch::Receiver<Vec<SearchResult>> {
        self.results.subscribe()
    }

    pub fn search_count(&self) -> u64 {
        lock(&self.state).searches
    }

    pub fn focus(&self) {
        lock(&self.state).focused = true;
    }

    pub fn is_focused(&self) -> bool {
        lock(&self.state).focused
    }

    /// Whether the presenter should render the result list. Gated on focus only; an
    /// empty list simply renders nothing.
    pub fn results_visible(&self) -> bool {
        self.is_focused()
    }

    /// Picks a result and dismisses the widget: the query and the focus flag are
    /// cleared together. The stored results are left as they are.
    pub fn select(&mut self, index: usize) -> Option<SearchResult> {
        let chosen = self.results.borrow().get(index).cloned();
        {
            let mut state = lock(&self.state);
            state.query.clear();
            state.focused = false;
            state.generation += 1;
        }
        self.cancel_pending();
        chosen
    }

    /// Attaches the page-wide key-down and pointer-down listeners. They stay active
    /// until the returned guard is dropped.
    pub fn attach_listeners(&self) -> ListenerGuard {
        self.listeners.fetch_add(1, Ordering::SeqCst);
        ListenerGuard {
            listeners: Arc::clone(&self.listeners),
        }
    }

    pub fn listeners_attached(&self) -> bool {
        self.listeners.load(Ordering::SeqCst) > 0
    }

    /// Feeds a page-wide event. Returns `true` when the event was consumed and the
    /// host should suppress its default action. Ignored while no listeners are
    /// attached.
    pub fn handle_global(&self, event: &GlobalEvent) -> bool {
        if !self.listeners_attached() {
            return false;
        }

        match event {
            GlobalEvent::KeyDown { key, in_text_entry } => {
                if key == FOCUS_SHORTCUT && !in_text_entry {
                    self.focus();
                    return true;
                }
                false
            }
            GlobalEvent::PointerDown(PointerTarget::Outside) => {
                lock(&self.state).focused = false;
                false
            }
            GlobalEvent::PointerDown(_) => false,
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Keeps the global listeners attached while alive.
#[must_use = "listeners detach as soon as the guard is dropped"]
pub struct ListenerGuard {
    listeners: Arc<AtomicUsize>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.listeners.fetch_sub(1, Ordering::SeqCst);
    }
}

fn lock(state: &Mutex<State>) -> MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

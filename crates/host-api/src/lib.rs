//! Host-facing contract for the datepill annotation engine.
//!
//! The engine runs inside a document-editing host. Everything the host
//! supplies is expressed here as a trait or a small value type, so the
//! core stays pure and testable without a real host:
//!
//! - [`EditorView`] / [`ViewChange`] / [`ViewAugmentation`]: the live
//!   editing surface and its update cycle.
//! - [`Decoration`] / [`DecorationSet`]: the replacement set the host
//!   renders over the document.
//! - [`SettingsStore`]: persisted key-value settings storage.
//! - [`StyleSink`]: process-wide presentation state (CSS custom
//!   properties on the host's document body).
//! - [`Scheduler`]: the host's cooperative event loop, used for one
//!   short deferred callback.
//! - [`dom`]: an arena tree standing in for the rendered-output subtree
//!   handed to post-processors.

pub mod dom;

use std::ops::Range;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors surfaced by host-provided collaborators.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("settings store failure: {0}")]
    Store(String),
}

/// Snapshot of the editing surface the host exposes to view augmentations.
///
/// Offsets are byte offsets into the document text. The host guarantees
/// that visible ranges fall on character boundaries.
pub trait EditorView {
    /// Ranges of the document currently laid out in the viewport,
    /// ascending and non-overlapping.
    fn visible_ranges(&self) -> Vec<Range<usize>>;

    /// Document text for a range previously obtained from
    /// [`visible_ranges`](EditorView::visible_ranges).
    fn slice(&self, range: Range<usize>) -> String;

    /// Primary cursor position.
    fn cursor(&self) -> usize;
}

/// Change descriptor delivered on every host update cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewChange {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub selection_set: bool,
}

impl ViewChange {
    /// True when anything that can move or invalidate decorations changed.
    #[must_use]
    pub fn needs_rebuild(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.selection_set
    }
}

/// A replacement decoration over a span of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration<W> {
    pub start: usize,
    pub end: usize,
    pub widget: W,
}

/// Ordered, non-overlapping set of replacement decorations.
///
/// Built through [`DecorationSet::builder`], which enforces the same
/// ascending-order discipline the host's own range-set builder requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecorationSet<W> {
    items: Vec<Decoration<W>>,
}

impl<W> DecorationSet<W> {
    #[must_use]
    pub fn builder() -> DecorationSetBuilder<W> {
        DecorationSetBuilder {
            items: Vec::new(),
            last_end: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration<W>> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<W> Default for DecorationSet<W> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

/// Builder enforcing ascending, non-overlapping insertion order.
#[derive(Debug)]
pub struct DecorationSetBuilder<W> {
    items: Vec<Decoration<W>>,
    last_end: usize,
}

impl<W> DecorationSetBuilder<W> {
    /// Add a decoration over `start..end`.
    ///
    /// Ranges must be added left to right and must not overlap a
    /// previously added range.
    pub fn add(&mut self, start: usize, end: usize, widget: W) {
        debug_assert!(start <= end, "decoration range is inverted");
        debug_assert!(
            start >= self.last_end,
            "decorations must be added in ascending order"
        );
        self.last_end = end;
        self.items.push(Decoration { start, end, widget });
    }

    #[must_use]
    pub fn finish(self) -> DecorationSet<W> {
        DecorationSet { items: self.items }
    }
}

/// A component the host constructs over its editing surface and queries
/// for decorations after every update.
///
/// The reference instant is passed explicitly so implementations stay
/// pure functions of their inputs; the host reads its local clock once
/// per update cycle.
pub trait ViewAugmentation {
    type Widget;

    fn from_view(view: &dyn EditorView, now: NaiveDateTime) -> Self
    where
        Self: Sized;

    fn update(&mut self, change: &ViewChange, view: &dyn EditorView, now: NaiveDateTime);

    fn decorations(&self) -> &DecorationSet<Self::Widget>;
}

/// Persisted key-value settings storage supplied by the host.
///
/// The stored value is an opaque JSON blob; `load` returns `None` the
/// first time a plugin runs, before anything has been saved.
pub trait SettingsStore {
    fn load(&self) -> Result<Option<serde_json::Value>, HostError>;
    fn save(&self, data: &serde_json::Value) -> Result<(), HostError>;
}

/// Process-wide presentation state: named style properties on the host's
/// document body. Properties set during activation must be removed again
/// on deactivation.
pub trait StyleSink {
    fn set_property(&mut self, name: &str, value: &str);
    fn remove_property(&mut self, name: &str);
}

/// The host's single-threaded cooperative scheduler.
///
/// Deferred tasks run after the current event settles, on the same
/// thread. The engine uses this for exactly one thing: re-reading task
/// completion state after the host has applied a checkbox toggle.
pub trait Scheduler {
    fn defer(&self, task: Box<dyn FnOnce()>);
}

/// In-memory [`SettingsStore`] for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    data: std::cell::RefCell<Option<serde_json::Value>>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data(value: serde_json::Value) -> Self {
        Self {
            data: std::cell::RefCell::new(Some(value)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Option<serde_json::Value>, HostError> {
        Ok(self.data.borrow().clone())
    }

    fn save(&self, data: &serde_json::Value) -> Result<(), HostError> {
        *self.data.borrow_mut() = Some(data.clone());
        Ok(())
    }
}

/// In-memory [`StyleSink`] recording the currently set properties.
#[derive(Debug, Default)]
pub struct MemoryStyleSink {
    properties: std::collections::BTreeMap<String, String>,
}

impl MemoryStyleSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl StyleSink for MemoryStyleSink {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn remove_property(&mut self, name: &str) {
        self.properties.remove(name);
    }
}

/// [`Scheduler`] that queues deferred tasks until the embedder drains
/// them, mimicking the host event loop settling.
#[derive(Default)]
pub struct QueueScheduler {
    tasks: std::cell::RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl QueueScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run every queued task, in submission order.
    pub fn run_pending(&self) {
        // Tasks may defer further work; drain until quiescent.
        loop {
            let batch: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            for task in batch {
                task();
            }
        }
    }
}

impl Scheduler for QueueScheduler {
    fn defer(&self, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push(task);
    }
}

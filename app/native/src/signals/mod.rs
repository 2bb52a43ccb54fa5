//! Scroll and pointer signal bus.
//!
//! High-frequency input (`scroll`, `mousemove`, `resize`) is published on the
//! [`ScrollSignalBus`]. Each registered [`StateUpdater`] is wrapped in its own
//! [`FrameScheduler`]: publishing only arms the schedulers of the updaters
//! interested in that signal, and the updaters run when the next frame is
//! delivered. Metrics are read from the document once per frame and shared
//! by every updater that runs in it.
//!
//! Updaters own disjoint slices of presentation state and never see each
//! other.

pub mod updaters;

use serde::Serialize;

pub use self::updaters::{BackToTopUpdater, CursorGlowUpdater, HeaderUpdater, ParallaxUpdater};
use crate::platform::{Document, Point, Size};
use crate::scheduler::{FrameScheduler, FrameSource};

// ============================================================================
// Types
// ============================================================================

/// A raw input signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputSignal {
    /// The window scrolled.
    Scroll,
    /// The pointer moved to a viewport position.
    PointerMove(Point),
    /// The viewport changed size.
    Resize,
}

/// Values read once at the start of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    /// Vertical scroll offset (px).
    pub scroll_y: f64,
    /// Viewport dimensions.
    pub viewport: Size,
    /// Most recent pointer position, if the pointer ever moved.
    pub pointer: Option<Point>,
}

impl ScrollMetrics {
    /// Reads the metrics from the document.
    #[must_use]
    pub fn read(doc: &dyn Document, pointer: Option<Point>) -> Self {
        Self { scroll_y: doc.scroll_y(), viewport: doc.viewport(), pointer }
    }
}

/// A visual-state updater driven by the bus.
pub trait StateUpdater {
    /// Scheduling slot of this updater.
    fn source(&self) -> FrameSource;

    /// Whether a signal should schedule this updater.
    fn listens_to(&self, signal: &InputSignal) -> bool;

    /// Applies the presentation state for the current metrics.
    fn update(&mut self, doc: &mut dyn Document, metrics: &ScrollMetrics);
}

struct Slot {
    scheduler: FrameScheduler,
    updater: Box<dyn StateUpdater>,
}

// ============================================================================
// ScrollSignalBus
// ============================================================================

/// Fans input signals out to frame-coalesced updaters.
#[derive(Default)]
pub struct ScrollSignalBus {
    slots: Vec<Slot>,
    pointer: Option<Point>,
}

impl ScrollSignalBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers an updater and runs it once immediately.
    pub fn register(&mut self, doc: &mut dyn Document, mut updater: Box<dyn StateUpdater>) {
        let source = updater.source();
        let metrics = ScrollMetrics::read(doc, self.pointer);
        updater.update(doc, &metrics);
        tracing::debug!(%source, "updater registered");
        self.slots.push(Slot { scheduler: FrameScheduler::new(source), updater });
    }

    /// Publishes a signal. Returns `true` if a frame is now wanted.
    pub fn publish(&mut self, signal: InputSignal) -> bool {
        if let InputSignal::PointerMove(point) = signal {
            self.pointer = Some(point);
        }
        for slot in &mut self.slots {
            if slot.updater.listens_to(&signal) {
                slot.scheduler.schedule();
            }
        }
        self.wants_frame()
    }

    /// Runs every pending updater. Returns the number of updaters that ran.
    pub fn on_frame(&mut self, doc: &mut dyn Document) -> usize {
        if !self.wants_frame() {
            return 0;
        }
        let metrics = ScrollMetrics::read(doc, self.pointer);
        let mut ran = 0;
        for slot in &mut self.slots {
            if slot.scheduler.take() {
                slot.updater.update(doc, &metrics);
                ran += 1;
            }
        }
        ran
    }

    /// Whether any updater is waiting for a frame.
    #[must_use]
    pub fn wants_frame(&self) -> bool { self.slots.iter().any(|s| s.scheduler.is_pending()) }

    /// Number of frame runs of a source, excluding the eager startup run.
    #[must_use]
    pub fn runs(&self, source: FrameSource) -> usize {
        self.slots
            .iter()
            .filter(|s| s.scheduler.source() == source)
            .map(|s| s.scheduler.runs())
            .sum()
    }

    /// Registered sources, in registration order.
    #[must_use]
    pub fn sources(&self) -> Vec<FrameSource> {
        self.slots.iter().map(|s| s.scheduler.source()).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

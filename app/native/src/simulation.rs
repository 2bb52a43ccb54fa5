//! Headless host for the page controller.
//!
//! [`Simulation`] plays the browser's part around a [`MemoryPage`]: it
//! dispatches input events, delivers display refreshes, and hands
//! intersection batches to the controller after each rendering update, the
//! way a browser event loop orders them. Programmatic scrolls made by the
//! controller are turned back into scroll events.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::LumenConfig;
use crate::constants::{classes, ids, properties};
use crate::controller::{EventOutcome, PageController, PageEvent};
use crate::error::LumenError;
use crate::platform::{Capabilities, Document, ElementId, MemoryPage, Point, Size};
use crate::reveal::RevealState;
use crate::scenario::{Scenario, Step};
use crate::scheduler::FrameSource;

/// Upper bound on refreshes delivered by [`Simulation::settle`].
const MAX_SETTLE_FRAMES: usize = 64;

// ============================================================================
// Snapshot
// ============================================================================

/// Reveal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealSummary {
    pub candidates: usize,
    pub revealed: usize,
    pub pending: usize,
}

/// Presentation state of the page after a simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub scroll_y: f64,
    pub viewport: Size,
    pub header_compact: bool,
    pub hero_transform: Option<String>,
    pub cursor_x: Option<String>,
    pub cursor_y: Option<String>,
    pub back_to_top_visible: bool,
    pub active_section: Option<String>,
    /// `href` of every link carrying the active class.
    pub active_links: Vec<String>,
    pub reveal: RevealSummary,
    pub nav_open: bool,
    pub modal_open: bool,
    pub modal_image: Option<String>,
    pub navigations: Vec<String>,
    pub frames: usize,
    /// Frame runs per updater, excluding the startup run.
    pub frame_runs: BTreeMap<String, usize>,
    pub dom_writes: usize,
    pub observe_calls: usize,
}

// ============================================================================
// Simulation
// ============================================================================

/// A page and its controller driven by synthetic events.
pub struct Simulation {
    page: MemoryPage,
    controller: PageController,
    frames: usize,
}

impl Simulation {
    /// Starts the controller on the page and delivers the initial intersection batches.
    pub fn new(mut page: MemoryPage, capabilities: Capabilities, config: &LumenConfig) -> Self {
        let controller = PageController::start(&mut page, capabilities, config);
        // Startup reads the initial offset directly
        page.take_scroll_change();
        let mut simulation = Self { page, controller, frames: 0 };
        simulation.deliver_intersections();
        simulation
    }

    /// Builds the scenario page and replays every step, then settles.
    ///
    /// # Errors
    ///
    /// Returns `LumenError::ScenarioError` if a step names an element that does not exist.
    pub fn run(scenario: &Scenario, config: &LumenConfig) -> Result<Self, LumenError> {
        let mut simulation = Self::new(scenario.build_page(), scenario.capabilities, config);
        for (index, step) in scenario.steps.iter().enumerate() {
            tracing::trace!(index, ?step, "step");
            simulation.apply(step)?;
        }
        simulation.settle();
        tracing::info!(steps = scenario.steps.len(), frames = simulation.frames, "scenario finished");
        Ok(simulation)
    }

    /// Applies one scripted step.
    ///
    /// # Errors
    ///
    /// Returns `LumenError::ScenarioError` if the step's selector does not resolve.
    pub fn apply(&mut self, step: &Step) -> Result<(), LumenError> {
        match step {
            Step::Scroll(y) => self.scroll_to(*y),
            Step::Pointer([x, y]) => {
                self.pointer(Point::new(*x, *y));
            }
            Step::Resize(size) => self.resize(*size),
            Step::Frame(count) => {
                for _ in 0..*count {
                    self.frame();
                }
            }
            Step::Settle => self.settle(),
            Step::Click(selector) => {
                let target = self.resolve(selector)?;
                self.click(target);
            }
            Step::ClickAt(click) => {
                let target = self.resolve(&click.target)?;
                self.click_at(target, Point::new(click.x, click.y));
            }
            Step::Key(key) => {
                self.key(key);
            }
            Step::Submit(selector) => {
                let form = self.resolve(selector)?;
                self.submit(form);
            }
            Step::Field(field) => {
                let element = self.resolve(&field.selector)?;
                self.page.seed_attribute(element, "value", &field.value);
            }
        }
        Ok(())
    }

    fn resolve(&self, selector: &str) -> Result<ElementId, LumenError> {
        self.page
            .query(selector)
            .ok_or_else(|| LumenError::ScenarioError(format!("no element matches {selector}")))
    }

    /// Dispatches an event, then any scroll event it caused.
    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        let outcome = self.controller.handle(&mut self.page, event);
        self.pump_scroll();
        outcome
    }

    fn pump_scroll(&mut self) {
        if self.page.take_scroll_change() {
            self.controller.handle(&mut self.page, PageEvent::Scroll);
        }
    }

    /// User scroll to an offset.
    pub fn scroll_to(&mut self, y: f64) {
        self.page.set_scroll_y(y);
        self.pump_scroll();
    }

    /// Pointer move to a viewport position.
    pub fn pointer(&mut self, point: Point) -> EventOutcome { self.dispatch(PageEvent::PointerMove(point)) }

    /// Viewport resize. Intersections are recomputed immediately.
    pub fn resize(&mut self, size: Size) {
        self.page.resize(size);
        self.dispatch(PageEvent::Resize(size));
        self.deliver_intersections();
    }

    /// Delivers one display refresh followed by the rendering update.
    pub fn frame(&mut self) {
        self.frames += 1;
        self.dispatch(PageEvent::Frame);
        self.deliver_intersections();
    }

    /// Delivers refreshes until no updater and no intersection is pending.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.controller.wants_frame() {
                break;
            }
            self.frame();
        }
        self.deliver_intersections();
    }

    /// Clicks the center of an element.
    pub fn click(&mut self, target: ElementId) -> EventOutcome {
        let position = self.page.bounding_rect(target).map(|r| r.center()).unwrap_or_default();
        self.click_at(target, position)
    }

    /// Clicks an element at a viewport position.
    pub fn click_at(&mut self, target: ElementId, position: Point) -> EventOutcome {
        self.dispatch(PageEvent::Click { target, position })
    }

    /// Presses a key.
    pub fn key(&mut self, key: &str) -> EventOutcome { self.dispatch(PageEvent::KeyDown(key.to_string())) }

    /// Submits a form.
    pub fn submit(&mut self, form: ElementId) -> EventOutcome { self.dispatch(PageEvent::Submit { form }) }

    /// Hands pending intersection batches to the controller.
    ///
    /// Returns the number of batches delivered.
    pub fn deliver_intersections(&mut self) -> usize {
        let batches = self.page.take_intersections();
        let count = batches.len();
        for (observer, entries) in batches {
            self.dispatch(PageEvent::Intersections { observer, entries });
        }
        count
    }

    /// The page.
    #[must_use]
    pub const fn page(&self) -> &MemoryPage { &self.page }

    /// Mutable access to the page, for seeding input state.
    pub const fn page_mut(&mut self) -> &mut MemoryPage { &mut self.page }

    /// The controller.
    #[must_use]
    pub const fn controller(&self) -> &PageController { &self.controller }

    /// Refreshes delivered so far.
    #[must_use]
    pub const fn frames(&self) -> usize { self.frames }

    /// Captures the current presentation state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let page = &self.page;
        let controller = &self.controller;
        let root = page.root();

        let header = page.elements_with_class(classes::HEADER).into_iter().next();
        let hero = page.elements_with_class(classes::HERO_BACKGROUND).into_iter().next();
        let modal = page.element_by_id(ids::MODAL);
        let modal_image = page
            .element_by_id(ids::MODAL_IMAGE)
            .and_then(|img| page.attribute(img, "src"))
            .filter(|src| !src.is_empty());

        let active_links = controller
            .sections()
            .links()
            .iter()
            .filter(|link| page.has_class(link.element, classes::ACTIVE))
            .map(|link| link.href.clone())
            .collect();

        let reveal = controller.reveal();
        let revealed = reveal.candidates().iter().filter(|c| c.state == RevealState::Revealed).count();

        Snapshot {
            scroll_y: page.scroll_y(),
            viewport: page.viewport(),
            header_compact: header.is_some_and(|h| page.has_class(h, classes::HEADER_COMPACT)),
            hero_transform: hero.and_then(|h| page.style(h, properties::TRANSFORM)).map(ToString::to_string),
            cursor_x: page.style(root, properties::CURSOR_X).map(ToString::to_string),
            cursor_y: page.style(root, properties::CURSOR_Y).map(ToString::to_string),
            back_to_top_visible: page.has_class(controller.floating().back_to_top(), classes::SHOW),
            active_section: controller.sections().active(),
            active_links,
            reveal: RevealSummary {
                candidates: reveal.candidates().len(),
                revealed,
                pending: reveal.candidates().len() - revealed,
            },
            nav_open: page.has_class(page.body(), classes::NAV_OPEN),
            modal_open: modal.is_some_and(|m| page.is_dialog_open(m)),
            modal_image,
            navigations: page.navigations().to_vec(),
            frames: self.frames,
            frame_runs: FrameSource::ALL
                .iter()
                .map(|source| (source.to_string(), controller.bus().runs(*source)))
                .collect(),
            dom_writes: page.mutation_count(),
            observe_calls: page.observe_calls(),
        }
    }
}

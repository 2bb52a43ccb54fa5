//! Page controller.
//!
//! Wires every component to the page in a single startup pass and routes
//! platform events to them. Components never see each other: the controller
//! only hands each one the document and the events it consumes.
//!
//! # Event routing
//!
//! | Event            | Consumer                                     |
//! |------------------|----------------------------------------------|
//! | `Scroll`         | signal bus (header, parallax, back-to-top)   |
//! | `PointerMove`    | signal bus (cursor glow)                     |
//! | `Frame`          | signal bus, runs pending updaters            |
//! | `Intersections`  | reveal engine or section tracker             |
//! | `Click`          | nav toggle, jump links, gallery, back-to-top |
//! | `KeyDown`        | gallery                                      |
//! | `Submit`         | contact form                                 |
//! | `DialogClosed`   | gallery                                      |

use serde::Serialize;

use crate::config::LumenConfig;
use crate::motion::ReducedMotionPolicy;
use crate::observer::{IntersectionEntry, ObserverId};
use crate::platform::{Capabilities, Document, ElementId, Point, Size};
use crate::reveal::RevealEngine;
use crate::sections::ActiveSectionTracker;
use crate::signals::{
    BackToTopUpdater, CursorGlowUpdater, HeaderUpdater, InputSignal, ParallaxUpdater, ScrollSignalBus,
};
use crate::widgets::{ContactForm, FloatingControls, GalleryModal, NavToggle, SmoothScroll};

// ============================================================================
// Events
// ============================================================================

/// An event delivered by the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The window scrolled.
    Scroll,
    /// The pointer moved.
    PointerMove(Point),
    /// The viewport was resized.
    Resize(Size),
    /// A display refresh.
    Frame,
    /// A batch of intersection entries for one observer.
    Intersections {
        observer: ObserverId,
        entries: Vec<IntersectionEntry>,
    },
    /// A click on an element at a viewport position.
    Click { target: ElementId, position: Point },
    /// A key press.
    KeyDown(String),
    /// A form submission.
    Submit { form: ElementId },
    /// A dialog was closed.
    DialogClosed { dialog: ElementId },
}

/// What the controller did with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcome {
    /// Whether the event's default action should be prevented.
    pub default_prevented: bool,
    /// Whether a frame should be delivered.
    pub frame_requested: bool,
}

// ============================================================================
// PageController
// ============================================================================

/// The viewport-reactive page controller.
pub struct PageController {
    capabilities: Capabilities,
    motion: ReducedMotionPolicy,
    bus: ScrollSignalBus,
    reveal: RevealEngine,
    sections: ActiveSectionTracker,
    nav: Option<NavToggle>,
    jump_links: SmoothScroll,
    gallery: GalleryModal,
    floating: FloatingControls,
    contact: Option<ContactForm>,
}

impl PageController {
    /// Binds every component to the page and runs the eager updates.
    pub fn start(doc: &mut dyn Document, capabilities: Capabilities, config: &LumenConfig) -> Self {
        let motion = ReducedMotionPolicy::from_capabilities(&capabilities);
        tracing::debug!(?capabilities, animate = motion.should_animate(), "starting page controller");

        let nav = NavToggle::bind(doc);
        let jump_links = SmoothScroll::new(motion);

        let mut bus = ScrollSignalBus::new();
        let header = HeaderUpdater::new(doc, config.scroll.header_compact_threshold);
        bus.register(doc, Box::new(header));
        let parallax = ParallaxUpdater::new(doc, motion, config.parallax);
        bus.register(doc, Box::new(parallax));
        let glow = CursorGlowUpdater::new(doc, motion);
        bus.register(doc, Box::new(glow));

        let reveal = RevealEngine::start(doc, &capabilities, motion, config.observer.reveal_threshold);
        let sections = ActiveSectionTracker::start(doc, &capabilities, &config.observer.section_thresholds);
        let gallery = GalleryModal::bind(doc, &capabilities);

        let floating = FloatingControls::inject(doc, &config.widgets, motion);
        let back_to_top =
            BackToTopUpdater::new(Some(floating.back_to_top()), config.scroll.back_to_top_threshold);
        bus.register(doc, Box::new(back_to_top));

        let contact = ContactForm::bind(doc, &config.widgets);

        Self {
            capabilities,
            motion,
            bus,
            reveal,
            sections,
            nav,
            jump_links,
            gallery,
            floating,
            contact,
        }
    }

    /// Routes one event.
    pub fn handle(&mut self, doc: &mut dyn Document, event: PageEvent) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        match event {
            PageEvent::Scroll => outcome.frame_requested = self.bus.publish(InputSignal::Scroll),
            PageEvent::PointerMove(point) => {
                outcome.frame_requested = self.bus.publish(InputSignal::PointerMove(point));
            }
            PageEvent::Resize(size) => {
                tracing::trace!(width = size.width, height = size.height, "resize");
                outcome.frame_requested = self.bus.publish(InputSignal::Resize);
            }
            PageEvent::Frame => {
                self.bus.on_frame(doc);
            }
            PageEvent::Intersections { observer, entries } => match observer {
                ObserverId::Reveal => {
                    self.reveal.on_batch(doc, &entries);
                }
                ObserverId::Sections => {
                    self.sections.on_batch(doc, &entries);
                }
            },
            PageEvent::Click { target, position } => {
                if let Some(nav) = &self.nav {
                    nav.on_click(doc, target);
                }
                outcome.default_prevented = self.jump_links.on_click(doc, target);
                self.gallery.on_click(doc, target, position);
                self.floating.on_click(doc, target);
            }
            PageEvent::KeyDown(key) => {
                self.gallery.on_key(doc, &key);
            }
            PageEvent::Submit { form } => {
                outcome.default_prevented =
                    self.contact.as_ref().is_some_and(|contact| contact.on_submit(doc, form));
            }
            PageEvent::DialogClosed { dialog } => self.gallery.on_closed(doc, dialog),
        }
        outcome
    }

    /// Whether an updater is waiting for the next frame.
    #[must_use]
    pub fn wants_frame(&self) -> bool { self.bus.wants_frame() }

    /// Capabilities the controller was started with.
    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities { &self.capabilities }

    /// Motion policy resolved at startup.
    #[must_use]
    pub const fn motion(&self) -> ReducedMotionPolicy { self.motion }

    /// The signal bus.
    #[must_use]
    pub const fn bus(&self) -> &ScrollSignalBus { &self.bus }

    /// The reveal engine.
    #[must_use]
    pub const fn reveal(&self) -> &RevealEngine { &self.reveal }

    /// The active section tracker.
    #[must_use]
    pub const fn sections(&self) -> &ActiveSectionTracker { &self.sections }

    /// The injected floating controls.
    #[must_use]
    pub const fn floating(&self) -> &FloatingControls { &self.floating }

    /// The gallery modal.
    #[must_use]
    pub const fn gallery(&self) -> &GalleryModal { &self.gallery }

    /// The contact form, if the page has one.
    #[must_use]
    pub const fn contact(&self) -> Option<&ContactForm> { self.contact.as_ref() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryPage, Rect};
    use crate::scheduler::FrameSource;

    fn page() -> (MemoryPage, ElementId) {
        let mut page = MemoryPage::new(Size::new(1000.0, 800.0));
        let body = page.body();
        let header = page.add_element(body, "header", None, &["header"], Some(Rect::new(0.0, 0.0, 1000.0, 80.0)));
        page.add_element(body, "main", None, &[], Some(Rect::new(0.0, 0.0, 1000.0, 3000.0)));
        (page, header)
    }

    #[test]
    fn test_start_runs_updaters_eagerly() {
        let (mut page, header) = page();
        page.set_scroll_y(100.0);
        let controller = PageController::start(&mut page, Capabilities::default(), &LumenConfig::default());
        assert!(page.has_class(header, "scrolled"));
        assert_eq!(controller.bus().sources(), FrameSource::ALL.to_vec());
        assert!(!controller.wants_frame());
    }

    #[test]
    fn test_scroll_waits_for_frame() {
        let (mut page, header) = page();
        let mut controller = PageController::start(&mut page, Capabilities::default(), &LumenConfig::default());

        page.set_scroll_y(50.0);
        let outcome = controller.handle(&mut page, PageEvent::Scroll);
        assert!(outcome.frame_requested);
        assert!(!page.has_class(header, "scrolled"));

        controller.handle(&mut page, PageEvent::Frame);
        assert!(page.has_class(header, "scrolled"));
        assert!(!controller.wants_frame());
    }

    #[test]
    fn test_resize_requests_no_frame() {
        let (mut page, _) = page();
        let mut controller = PageController::start(&mut page, Capabilities::default(), &LumenConfig::default());
        let outcome = controller.handle(&mut page, PageEvent::Resize(Size::new(400.0, 800.0)));
        assert!(!outcome.frame_requested);
    }

    #[test]
    fn test_submit_without_form_is_not_prevented() {
        let (mut page, _) = page();
        let mut controller = PageController::start(&mut page, Capabilities::default(), &LumenConfig::default());
        let body = page.body();
        let outcome = controller.handle(&mut page, PageEvent::Submit { form: body });
        assert!(!outcome.default_prevented);
        assert!(controller.contact().is_none());
    }
}

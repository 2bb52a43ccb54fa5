//! Visual-state updaters.
//!
//! Each updater is a pure function of the frame's [`ScrollMetrics`] writing
//! one narrow slice of presentation state through a handle it owns.

use super::{InputSignal, ScrollMetrics, StateUpdater};
use crate::config::ParallaxConfig;
use crate::constants::{classes, properties};
use crate::motion::ReducedMotionPolicy;
use crate::platform::{Document, ElementId};
use crate::presentation::{ClassFlag, RootProperty, StyleSlot};
use crate::scheduler::FrameSource;

// ============================================================================
// Pure functions
// ============================================================================

/// Vertical parallax offset for a scroll position, capped at `max_offset`.
#[must_use]
pub fn parallax_offset(scroll_y: f64, factor: f64, max_offset: f64) -> f64 {
    (scroll_y * factor).min(max_offset)
}

/// Transform string for a parallax offset.
#[must_use]
pub fn parallax_transform(offset: f64, scale: f64) -> String {
    format!("translate3d(0, {offset}px, 0) scale({scale})")
}

/// Position along an axis as a percentage of its extent, clamped to `[0, 100]`.
#[must_use]
pub fn glow_percent(position: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    let percent = (position / extent * 100.0).clamp(0.0, 100.0);
    // Normalizes -0.0 so it never formats with a sign
    percent + 0.0
}

/// Formats a percentage with two decimals and a `%` suffix.
#[must_use]
pub fn format_percent(percent: f64) -> String { format!("{percent:.2}%") }

// ============================================================================
// Header
// ============================================================================

/// Toggles the compact header state past a scroll offset.
#[derive(Debug)]
pub struct HeaderUpdater {
    flag: Option<ClassFlag>,
    threshold: f64,
}

impl HeaderUpdater {
    /// Binds to the first `.header` element, if any.
    #[must_use]
    pub fn new(doc: &dyn Document, threshold: f64) -> Self {
        let flag = doc
            .elements_with_class(classes::HEADER)
            .into_iter()
            .next()
            .map(|el| ClassFlag::new(el, classes::HEADER_COMPACT));
        if flag.is_none() {
            tracing::debug!("no header element; header updater inactive");
        }
        Self { flag, threshold }
    }
}

impl StateUpdater for HeaderUpdater {
    fn source(&self) -> FrameSource { FrameSource::Header }

    fn listens_to(&self, signal: &InputSignal) -> bool { matches!(signal, InputSignal::Scroll) }

    fn update(&mut self, doc: &mut dyn Document, metrics: &ScrollMetrics) {
        if let Some(flag) = &mut self.flag {
            flag.set(doc, metrics.scroll_y > self.threshold);
        }
    }
}

// ============================================================================
// Parallax
// ============================================================================

/// Moves the hero background with the scroll position.
#[derive(Debug)]
pub struct ParallaxUpdater {
    slot: Option<StyleSlot>,
    motion: ReducedMotionPolicy,
    config: ParallaxConfig,
}

impl ParallaxUpdater {
    /// Binds to the first `.hero-bg` element, if any.
    #[must_use]
    pub fn new(doc: &dyn Document, motion: ReducedMotionPolicy, config: ParallaxConfig) -> Self {
        let slot = doc
            .elements_with_class(classes::HERO_BACKGROUND)
            .into_iter()
            .next()
            .map(|el| StyleSlot::new(el, properties::TRANSFORM));
        Self { slot, motion, config }
    }
}

impl StateUpdater for ParallaxUpdater {
    fn source(&self) -> FrameSource { FrameSource::Parallax }

    fn listens_to(&self, signal: &InputSignal) -> bool { matches!(signal, InputSignal::Scroll) }

    fn update(&mut self, doc: &mut dyn Document, metrics: &ScrollMetrics) {
        if !self.motion.should_animate() {
            return;
        }
        let Some(slot) = &mut self.slot else {
            return;
        };
        let offset = parallax_offset(metrics.scroll_y, self.config.factor, self.config.max_offset);
        slot.set(doc, &parallax_transform(offset, self.config.scale));
    }
}

// ============================================================================
// Cursor glow
// ============================================================================

/// Publishes the pointer position as root custom properties.
#[derive(Debug)]
pub struct CursorGlowUpdater {
    x: RootProperty,
    y: RootProperty,
    motion: ReducedMotionPolicy,
}

impl CursorGlowUpdater {
    /// Binds `--mx` and `--my` on the document root.
    #[must_use]
    pub fn new(doc: &dyn Document, motion: ReducedMotionPolicy) -> Self {
        Self {
            x: RootProperty::new(doc, properties::CURSOR_X),
            y: RootProperty::new(doc, properties::CURSOR_Y),
            motion,
        }
    }
}

impl StateUpdater for CursorGlowUpdater {
    fn source(&self) -> FrameSource { FrameSource::CursorGlow }

    fn listens_to(&self, signal: &InputSignal) -> bool {
        matches!(signal, InputSignal::PointerMove(_))
    }

    fn update(&mut self, doc: &mut dyn Document, metrics: &ScrollMetrics) {
        if !self.motion.should_animate() {
            return;
        }
        let Some(pointer) = metrics.pointer else {
            return;
        };
        let x = glow_percent(pointer.x, metrics.viewport.width);
        let y = glow_percent(pointer.y, metrics.viewport.height);
        self.x.set(doc, &format_percent(x));
        self.y.set(doc, &format_percent(y));
    }
}

// ============================================================================
// Back to top
// ============================================================================

/// Shows the back-to-top control past a scroll offset.
#[derive(Debug)]
pub struct BackToTopUpdater {
    flag: Option<ClassFlag>,
    threshold: f64,
}

impl BackToTopUpdater {
    /// Binds to the given control.
    #[must_use]
    pub fn new(control: Option<ElementId>, threshold: f64) -> Self {
        Self { flag: control.map(|el| ClassFlag::new(el, classes::SHOW)), threshold }
    }
}

impl StateUpdater for BackToTopUpdater {
    fn source(&self) -> FrameSource { FrameSource::BackToTop }

    fn listens_to(&self, signal: &InputSignal) -> bool { matches!(signal, InputSignal::Scroll) }

    fn update(&mut self, doc: &mut dyn Document, metrics: &ScrollMetrics) {
        if let Some(flag) = &mut self.flag {
            flag.set(doc, metrics.scroll_y > self.threshold);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryPage, Point, Rect, Size};

    fn metrics(scroll_y: f64, pointer: Option<Point>) -> ScrollMetrics {
        ScrollMetrics { scroll_y, viewport: Size::new(1000.0, 800.0), pointer }
    }

    fn is_percent(value: &str) -> bool {
        let Some(number) = value.strip_suffix('%') else {
            return false;
        };
        let Some((int, frac)) = number.split_once('.') else {
            return false;
        };
        (1..=3).contains(&int.len())
            && int.chars().all(|c| c.is_ascii_digit())
            && frac.len() == 2
            && frac.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn test_parallax_offset_caps() {
        assert!((parallax_offset(100.0, 0.08, 40.0) - 8.0).abs() < 1e-9);
        assert!((parallax_offset(10_000.0, 0.08, 40.0) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parallax_transform_format() {
        assert_eq!(parallax_transform(8.0, 1.06), "translate3d(0, 8px, 0) scale(1.06)");
        assert_eq!(parallax_transform(0.4, 1.06), "translate3d(0, 0.4px, 0) scale(1.06)");
    }

    #[test]
    fn test_glow_percent_clamps() {
        assert!((glow_percent(500.0, 1000.0) - 50.0).abs() < f64::EPSILON);
        assert!((glow_percent(-20.0, 1000.0)).abs() < f64::EPSILON);
        assert!((glow_percent(2000.0, 1000.0) - 100.0).abs() < f64::EPSILON);
        assert!(glow_percent(10.0, 0.0).abs() < f64::EPSILON);
        assert_eq!(format_percent(glow_percent(-0.0, 1000.0)), "0.00%");
    }

    #[test]
    fn test_glow_values_always_match_format() {
        for x in [-50.0, 0.0, 0.5, 333.333, 999.999, 1000.0, 5000.0] {
            let value = format_percent(glow_percent(x, 1000.0));
            assert!(is_percent(&value), "{value}");
        }
    }

    #[test]
    fn test_header_toggles_at_threshold() {
        let mut page = MemoryPage::default();
        let body = page.body();
        let header = page.add_element(body, "header", None, &["header"], None);
        let mut updater = HeaderUpdater::new(&page, 12.0);

        updater.update(&mut page, &metrics(12.0, None));
        assert!(!page.has_class(header, "scrolled"));
        updater.update(&mut page, &metrics(13.0, None));
        assert!(page.has_class(header, "scrolled"));
    }

    #[test]
    fn test_header_absent_is_noop() {
        let mut page = MemoryPage::default();
        let mut updater = HeaderUpdater::new(&page, 12.0);
        updater.update(&mut page, &metrics(100.0, None));
        assert_eq!(page.mutation_count(), 0);
    }

    #[test]
    fn test_parallax_writes_transform() {
        let mut page = MemoryPage::default();
        let body = page.body();
        let hero = page.add_element(body, "div", None, &["hero-bg"], Some(Rect::default()));
        let mut updater =
            ParallaxUpdater::new(&page, ReducedMotionPolicy::animated(), ParallaxConfig::default());

        updater.update(&mut page, &metrics(100.0, None));
        assert_eq!(page.style(hero, "transform"), Some("translate3d(0, 8px, 0) scale(1.06)"));
    }

    #[test]
    fn test_parallax_reduced_motion_is_noop() {
        let mut page = MemoryPage::default();
        let body = page.body();
        page.add_element(body, "div", None, &["hero-bg"], None);
        let mut updater =
            ParallaxUpdater::new(&page, ReducedMotionPolicy::reduced(), ParallaxConfig::default());
        updater.update(&mut page, &metrics(100.0, None));
        assert_eq!(page.mutation_count(), 0);
    }

    #[test]
    fn test_cursor_glow_needs_pointer() {
        let mut page = MemoryPage::default();
        let mut updater = CursorGlowUpdater::new(&page, ReducedMotionPolicy::animated());
        updater.update(&mut page, &metrics(0.0, None));
        assert_eq!(page.style(page.root(), "--mx"), None);

        updater.update(&mut page, &metrics(0.0, Some(Point::new(250.0, 200.0))));
        assert_eq!(page.style(page.root(), "--mx"), Some("25.00%"));
        assert_eq!(page.style(page.root(), "--my"), Some("25.00%"));
    }

    #[test]
    fn test_back_to_top_toggles() {
        let mut page = MemoryPage::default();
        let body = page.body();
        let control = page.add_element(body, "button", None, &["backtop"], None);
        let mut updater = BackToTopUpdater::new(Some(control), 480.0);

        updater.update(&mut page, &metrics(481.0, None));
        assert!(page.has_class(control, "show"));
        updater.update(&mut page, &metrics(0.0, None));
        assert!(!page.has_class(control, "show"));
    }
}

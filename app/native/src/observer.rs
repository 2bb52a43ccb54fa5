//! Visibility observation model.
//!
//! Mirrors the semantics of a browser `IntersectionObserver`: an observer
//! registers targets with a list of thresholds, and the platform delivers
//! batches of [`IntersectionEntry`] asynchronously whenever a target's
//! intersection state crosses one of its thresholds. The first computation
//! after `observe` always reports the target.
//!
//! [`IntersectionTracker`] implements the threshold-crossing bookkeeping for
//! hosts that compute geometry themselves (see [`crate::platform::MemoryPage`]).

use serde::Serialize;
use smallvec::SmallVec;

use crate::platform::{ElementId, Rect, Size};

/// Identifies the observer a batch of entries belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ObserverId {
    /// One-shot reveal transitions.
    Reveal,
    /// Active section tracking.
    Sections,
}

/// One target's intersection state, as delivered in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionEntry {
    /// Observed element.
    pub target: ElementId,
    /// Whether the target intersects the viewport at all.
    pub is_intersecting: bool,
    /// Visible fraction of the target in `[0, 1]`.
    pub ratio: f64,
}

impl IntersectionEntry {
    /// Creates a new entry.
    #[must_use]
    pub const fn new(target: ElementId, is_intersecting: bool, ratio: f64) -> Self {
        Self { target, is_intersecting, ratio }
    }
}

/// A batch of entries for one observer.
pub type IntersectionBatch = (ObserverId, Vec<IntersectionEntry>);

/// Threshold list of a registration.
pub type Thresholds = SmallVec<[f64; 4]>;

/// Computes whether `target` (viewport coordinates) intersects a viewport of
/// the given size, and the visible fraction of its area.
///
/// Edge-adjacent rectangles count as intersecting with a ratio of zero.
/// Zero-area targets report a ratio of one while intersecting.
#[must_use]
pub fn intersection(target: Rect, viewport: Size) -> (bool, f64) {
    let left = target.left.max(0.0);
    let top = target.top.max(0.0);
    let right = target.right().min(viewport.width);
    let bottom = target.bottom().min(viewport.height);

    let is_intersecting = right >= left && bottom >= top;
    if !is_intersecting {
        return (false, 0.0);
    }

    let area = target.width * target.height;
    if area <= 0.0 {
        return (true, 1.0);
    }

    let visible = (right - left) * (bottom - top);
    (true, (visible / area).clamp(0.0, 1.0))
}

/// Number of thresholds the ratio has reached.
fn threshold_index(thresholds: &[f64], ratio: f64) -> usize {
    thresholds.iter().filter(|t| ratio >= **t).count()
}

/// Last reported crossing state of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crossing {
    intersecting: bool,
    index: usize,
}

#[derive(Debug, Clone)]
struct Registration {
    observer: ObserverId,
    target: ElementId,
    thresholds: Thresholds,
    last: Option<Crossing>,
}

/// Tracks observer registrations and produces threshold-crossing batches.
#[derive(Debug, Default)]
pub struct IntersectionTracker {
    registrations: Vec<Registration>,
    observe_calls: usize,
}

impl IntersectionTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers a target. Re-observing an observed target is a no-op.
    pub fn observe(&mut self, observer: ObserverId, target: ElementId, thresholds: &[f64]) {
        self.observe_calls += 1;
        if self.is_observed(observer, target) {
            return;
        }
        let mut thresholds: Thresholds = thresholds.iter().copied().collect();
        if thresholds.is_empty() {
            thresholds.push(0.0);
        }
        thresholds.sort_by(f64::total_cmp);
        self.registrations.push(Registration { observer, target, thresholds, last: None });
    }

    /// Removes a registration.
    pub fn unobserve(&mut self, observer: ObserverId, target: ElementId) {
        self.registrations.retain(|r| !(r.observer == observer && r.target == target));
    }

    /// Whether the target is registered with the observer.
    #[must_use]
    pub fn is_observed(&self, observer: ObserverId, target: ElementId) -> bool {
        self.registrations.iter().any(|r| r.observer == observer && r.target == target)
    }

    /// Number of registered targets for the observer.
    #[must_use]
    pub fn observed_count(&self, observer: ObserverId) -> usize {
        self.registrations.iter().filter(|r| r.observer == observer).count()
    }

    /// Total number of `observe` calls ever made.
    #[must_use]
    pub const fn observe_calls(&self) -> usize { self.observe_calls }

    /// Computes the entries whose crossing state changed since the last call,
    /// grouped per observer in registration order.
    ///
    /// `rect_of` returns a target's viewport-space bounding box; targets
    /// without one are reported as not intersecting.
    pub fn collect<F>(&mut self, viewport: Size, rect_of: F) -> Vec<IntersectionBatch>
    where
        F: Fn(ElementId) -> Option<Rect>,
    {
        let mut batches: Vec<IntersectionBatch> = Vec::new();

        for registration in &mut self.registrations {
            let (intersecting, ratio) =
                rect_of(registration.target).map_or((false, 0.0), |rect| intersection(rect, viewport));
            let crossing = Crossing {
                intersecting,
                index: threshold_index(&registration.thresholds, ratio),
            };

            if registration.last == Some(crossing) {
                continue;
            }
            registration.last = Some(crossing);

            let entry = IntersectionEntry::new(registration.target, intersecting, ratio);
            match batches.iter_mut().find(|(observer, _)| *observer == registration.observer) {
                Some((_, entries)) => entries.push(entry),
                None => batches.push((registration.observer, vec![entry])),
            }
        }

        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn test_intersection_fully_visible() {
        let (hit, ratio) = intersection(Rect::new(0.0, 100.0, 500.0, 200.0), VIEWPORT);
        assert!(hit);
        assert!((ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_partially_visible() {
        // 15% of a 1000px tall element peeking from the bottom
        let (hit, ratio) = intersection(Rect::new(0.0, 650.0, 500.0, 1000.0), VIEWPORT);
        assert!(hit);
        assert!((ratio - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_below_viewport() {
        let (hit, ratio) = intersection(Rect::new(0.0, 900.0, 500.0, 200.0), VIEWPORT);
        assert!(!hit);
        assert!(ratio.abs() < f64::EPSILON);
    }

    #[test]
    fn test_intersection_zero_area_inside() {
        let (hit, ratio) = intersection(Rect::new(10.0, 10.0, 0.0, 0.0), VIEWPORT);
        assert!(hit);
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold_index_counts_reached_thresholds() {
        let thresholds = [0.22, 0.35, 0.5];
        assert_eq!(threshold_index(&thresholds, 0.1), 0);
        assert_eq!(threshold_index(&thresholds, 0.35), 2);
        assert_eq!(threshold_index(&thresholds, 0.9), 3);
    }

    #[test]
    fn test_tracker_reports_initial_state_once() {
        let mut tracker = IntersectionTracker::new();
        let target = ElementId::new(3);
        tracker.observe(ObserverId::Reveal, target, &[0.12]);

        let rect = Rect::new(0.0, 2000.0, 100.0, 100.0);
        let first = tracker.collect(VIEWPORT, |_| Some(rect));
        assert_eq!(first.len(), 1);
        assert!(!first[0].1[0].is_intersecting);

        let second = tracker.collect(VIEWPORT, |_| Some(rect));
        assert!(second.is_empty());
    }

    #[test]
    fn test_tracker_reports_threshold_crossings_only() {
        let mut tracker = IntersectionTracker::new();
        let target = ElementId::new(1);
        tracker.observe(ObserverId::Sections, target, &[0.22, 0.35, 0.5]);
        let _ = tracker.collect(VIEWPORT, |_| Some(Rect::new(0.0, 760.0, 100.0, 200.0)));

        // 0.2 -> 0.21: same bucket, no entry
        let quiet = tracker.collect(VIEWPORT, |_| Some(Rect::new(0.0, 758.0, 100.0, 200.0)));
        assert!(quiet.is_empty());

        // 0.4: crosses 0.22 and 0.35
        let crossed = tracker.collect(VIEWPORT, |_| Some(Rect::new(0.0, 720.0, 100.0, 200.0)));
        assert_eq!(crossed.len(), 1);
        assert!((crossed[0].1[0].ratio - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_tracker_groups_batches_per_observer() {
        let mut tracker = IntersectionTracker::new();
        tracker.observe(ObserverId::Reveal, ElementId::new(1), &[0.12]);
        tracker.observe(ObserverId::Sections, ElementId::new(2), &[0.5]);
        tracker.observe(ObserverId::Reveal, ElementId::new(3), &[0.12]);

        let batches = tracker.collect(VIEWPORT, |_| Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].0, ObserverId::Reveal);
        assert_eq!(batches[0].1.len(), 2);
        assert_eq!(batches[1].0, ObserverId::Sections);
    }

    #[test]
    fn test_tracker_unobserve_stops_reports() {
        let mut tracker = IntersectionTracker::new();
        let target = ElementId::new(9);
        tracker.observe(ObserverId::Reveal, target, &[0.12]);
        tracker.unobserve(ObserverId::Reveal, target);
        assert!(!tracker.is_observed(ObserverId::Reveal, target));
        assert!(tracker.collect(VIEWPORT, |_| Some(Rect::default())).is_empty());
        assert_eq!(tracker.observe_calls(), 1);
    }
}

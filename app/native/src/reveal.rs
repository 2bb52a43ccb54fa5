//! Reveal-on-scroll engine.
//!
//! Candidates are collected once at startup from a fixed list of roles. Each
//! one moves through a two-state machine, `Pending -> Revealed`, exactly once.
//! The transition removes the candidate from the observed set, so later
//! intersection entries for it are structurally ignored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::classes;
use crate::motion::ReducedMotionPolicy;
use crate::observer::{IntersectionEntry, ObserverId};
use crate::platform::{Capabilities, Document, ElementId};

// ============================================================================
// Types
// ============================================================================

/// Role a candidate was selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealRole {
    SectionHead,
    Card,
    ServiceCard,
    GalleryItem,
    InfoCard,
    CtaBox,
    HeroContent,
    MediaCard,
}

impl RevealRole {
    /// All roles, in enumeration order.
    pub const ALL: [Self; 8] = [
        Self::SectionHead,
        Self::Card,
        Self::ServiceCard,
        Self::GalleryItem,
        Self::InfoCard,
        Self::CtaBox,
        Self::HeroContent,
        Self::MediaCard,
    ];

    /// Class selecting the role.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::SectionHead => "section-head",
            Self::Card => "card",
            Self::ServiceCard => "service-card",
            Self::GalleryItem => "gallery-item",
            Self::InfoCard => "info-card",
            Self::CtaBox => "cta-box",
            Self::HeroContent => "hero-content",
            Self::MediaCard => "media-card",
        }
    }
}

/// Reveal state of a candidate. Never goes back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealState {
    Pending,
    Revealed,
}

/// A reveal candidate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealCandidate {
    pub element: ElementId,
    pub role: RevealRole,
    /// Whether the candidate uses the emphasized motion.
    pub emphasized: bool,
    pub state: RevealState,
}

// ============================================================================
// RevealEngine
// ============================================================================

/// Drives one-shot reveal transitions from intersection batches.
#[derive(Debug, Default)]
pub struct RevealEngine {
    candidates: Vec<RevealCandidate>,
    /// Pending candidates still under observation, by element.
    observed: BTreeMap<ElementId, usize>,
    threshold: f64,
}

impl RevealEngine {
    /// Collects candidates, marks them, and starts observing them.
    ///
    /// Without visibility observation, or when motion is reduced, every
    /// candidate is revealed immediately and nothing is observed.
    pub fn start(
        doc: &mut dyn Document,
        capabilities: &Capabilities,
        motion: ReducedMotionPolicy,
        threshold: f64,
    ) -> Self {
        let candidates = collect_candidates(doc);
        let mut engine = Self { candidates, observed: BTreeMap::new(), threshold };

        for candidate in &engine.candidates {
            doc.set_class(candidate.element, classes::REVEAL, true);
            if candidate.emphasized {
                doc.set_class(candidate.element, classes::REVEAL_POP, true);
            }
        }

        if !capabilities.intersection_observer || !motion.should_animate() {
            tracing::debug!(
                candidates = engine.candidates.len(),
                observer = capabilities.intersection_observer,
                animate = motion.should_animate(),
                "revealing all candidates immediately"
            );
            for candidate in &mut engine.candidates {
                doc.set_class(candidate.element, classes::REVEAL_IN, true);
                candidate.state = RevealState::Revealed;
            }
            return engine;
        }

        for (index, candidate) in engine.candidates.iter().enumerate() {
            doc.observe(ObserverId::Reveal, candidate.element, &[threshold]);
            engine.observed.insert(candidate.element, index);
        }
        tracing::debug!(candidates = engine.candidates.len(), threshold, "reveal engine observing");
        engine
    }

    /// Handles one batch. Returns the number of candidates revealed by it.
    pub fn on_batch(&mut self, doc: &mut dyn Document, entries: &[IntersectionEntry]) -> usize {
        let mut revealed = 0;
        for entry in entries {
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            let Some(index) = self.observed.remove(&entry.target) else {
                continue;
            };
            let candidate = &mut self.candidates[index];
            candidate.state = RevealState::Revealed;
            doc.set_class(candidate.element, classes::REVEAL_IN, true);
            doc.unobserve(ObserverId::Reveal, candidate.element);
            tracing::trace!(element = %candidate.element, ratio = entry.ratio, "revealed");
            revealed += 1;
        }
        revealed
    }

    /// All candidates, in enumeration order.
    #[must_use]
    pub fn candidates(&self) -> &[RevealCandidate] { &self.candidates }

    /// State of a candidate.
    #[must_use]
    pub fn state(&self, element: ElementId) -> Option<RevealState> {
        self.candidates.iter().find(|c| c.element == element).map(|c| c.state)
    }

    /// Whether the element is still under observation.
    #[must_use]
    pub fn is_observed(&self, element: ElementId) -> bool { self.observed.contains_key(&element) }

    /// Number of revealed candidates.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.state == RevealState::Revealed).count()
    }

    /// Number of candidates still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize { self.candidates.len() - self.revealed_count() }
}

/// Enumerates candidates role by role, skipping elements already collected.
fn collect_candidates(doc: &dyn Document) -> Vec<RevealCandidate> {
    let mut candidates: Vec<RevealCandidate> = Vec::new();
    for role in RevealRole::ALL {
        for element in doc.elements_with_class(role.class()) {
            if candidates.iter().any(|c| c.element == element) {
                continue;
            }
            let emphasized = classes::EMPHASIZED_ROLES.iter().any(|class| doc.has_class(element, class));
            candidates.push(RevealCandidate {
                element,
                role,
                emphasized,
                state: RevealState::Pending,
            });
        }
    }
    candidates
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryPage, Rect};

    fn page() -> (MemoryPage, ElementId, ElementId, ElementId) {
        let mut page = MemoryPage::default();
        let body = page.body();
        let hero = page.add_element(body, "div", None, &["hero-content"], Some(Rect::default()));
        let card = page.add_element(body, "div", None, &["card", "cta-box"], Some(Rect::default()));
        let head = page.add_element(body, "div", None, &["section-head"], Some(Rect::default()));
        (page, hero, card, head)
    }

    fn caps() -> Capabilities { Capabilities::default() }

    #[test]
    fn test_candidates_follow_role_order_without_duplicates() {
        let (mut page, hero, card, head) = page();
        let engine = RevealEngine::start(&mut page, &caps(), ReducedMotionPolicy::animated(), 0.12);
        let elements: Vec<ElementId> = engine.candidates().iter().map(|c| c.element).collect();
        assert_eq!(elements, vec![head, card, hero]);
        assert_eq!(engine.candidates()[1].role, RevealRole::Card);
    }

    #[test]
    fn test_role_classes_are_distinct() {
        let names: Vec<&str> = RevealRole::ALL.iter().map(|role| role.class()).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name));
        }
    }

    #[test]
    fn test_emphasized_roles_are_reveal_roles() {
        for class in classes::EMPHASIZED_ROLES {
            assert!(RevealRole::ALL.iter().any(|role| role.class() == class));
        }
    }

    #[test]
    fn test_marks_reveal_and_pop() {
        let (mut page, hero, card, head) = page();
        let _engine = RevealEngine::start(&mut page, &caps(), ReducedMotionPolicy::animated(), 0.12);
        for el in [hero, card, head] {
            assert!(page.has_class(el, "reveal"));
            assert!(!page.has_class(el, "reveal-in"));
        }
        assert!(page.has_class(hero, "reveal-pop"));
        assert!(page.has_class(card, "reveal-pop"));
        assert!(!page.has_class(head, "reveal-pop"));
        assert_eq!(page.observed_count(ObserverId::Reveal), 3);
    }

    #[test]
    fn test_reduced_motion_reveals_everything() {
        let (mut page, hero, card, head) = page();
        let engine = RevealEngine::start(&mut page, &caps(), ReducedMotionPolicy::reduced(), 0.12);
        for el in [hero, card, head] {
            assert!(page.has_class(el, "reveal-in"));
        }
        assert_eq!(engine.pending_count(), 0);
        assert_eq!(page.observe_calls(), 0);
    }

    #[test]
    fn test_missing_observer_reveals_everything() {
        let (mut page, ..) = page();
        let caps = Capabilities { intersection_observer: false, ..Capabilities::default() };
        let engine = RevealEngine::start(&mut page, &caps, ReducedMotionPolicy::animated(), 0.12);
        assert_eq!(engine.revealed_count(), 3);
        assert_eq!(page.observe_calls(), 0);
    }

    #[test]
    fn test_reveal_is_one_shot() {
        let (mut page, hero, _, head) = page();
        let mut engine = RevealEngine::start(&mut page, &caps(), ReducedMotionPolicy::animated(), 0.12);

        let batch = [IntersectionEntry::new(hero, true, 0.15), IntersectionEntry::new(head, true, 0.05)];
        assert_eq!(engine.on_batch(&mut page, &batch), 1);
        assert_eq!(engine.state(hero), Some(RevealState::Revealed));
        assert_eq!(engine.state(head), Some(RevealState::Pending));
        assert!(!engine.is_observed(hero));
        assert!(!page.is_observed(ObserverId::Reveal, hero));

        // Leaving and re-entering changes nothing
        let again = [IntersectionEntry::new(hero, false, 0.0), IntersectionEntry::new(hero, true, 1.0)];
        assert_eq!(engine.on_batch(&mut page, &again), 0);
        assert!(page.has_class(hero, "reveal-in"));
        assert_eq!(engine.state(hero), Some(RevealState::Revealed));
    }
}

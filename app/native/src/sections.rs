//! Active section tracking.
//!
//! Navigation links pointing at in-page fragments are resolved to section
//! elements once at startup. Sections are observed at several thresholds; on
//! every batch the most visible intersecting section becomes the active one
//! and exactly the links pointing at it carry the `active` class.
//!
//! The active section is held in an [`eyeball::Observable`] so hosts can
//! subscribe to changes.

use eyeball::{Observable, Subscriber};
use serde::Serialize;

use crate::constants::classes;
use crate::observer::{IntersectionEntry, ObserverId};
use crate::platform::{Capabilities, Document, ElementId};

/// A navigation link and its raw `href`.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub element: ElementId,
    pub href: String,
}

impl NavLink {
    /// Fragment id the link points at, if it is an in-page link.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.href.strip_prefix('#').filter(|id| !id.is_empty())
    }
}

/// Tracks the single active section and projects it onto navigation links.
pub struct ActiveSectionTracker {
    links: Vec<NavLink>,
    sections: Vec<ElementId>,
    active: Observable<Option<String>>,
    observing: bool,
}

impl ActiveSectionTracker {
    /// Resolves sections from navigation links and starts observing them.
    ///
    /// Tracking is skipped when no section resolves or visibility observation
    /// is unavailable.
    pub fn start(doc: &mut dyn Document, capabilities: &Capabilities, thresholds: &[f64]) -> Self {
        let links: Vec<NavLink> = doc
            .elements_with_class(classes::NAV_LINK)
            .into_iter()
            .map(|element| NavLink {
                element,
                href: doc.attribute(element, "href").unwrap_or_default(),
            })
            .collect();

        let mut sections: Vec<ElementId> = Vec::new();
        for id in links.iter().filter_map(NavLink::fragment) {
            match doc.element_by_id(id) {
                Some(section) if !sections.contains(&section) => sections.push(section),
                Some(_) => {}
                None => tracing::debug!(id, "navigation link target not found"),
            }
        }

        let observing = capabilities.intersection_observer && !sections.is_empty();
        if observing {
            for section in &sections {
                doc.observe(ObserverId::Sections, *section, thresholds);
            }
            tracing::debug!(sections = sections.len(), links = links.len(), "section tracking started");
        } else {
            tracing::debug!(
                sections = sections.len(),
                observer = capabilities.intersection_observer,
                "section tracking skipped"
            );
        }

        Self { links, sections, active: Observable::new(None), observing }
    }

    /// Handles one batch. Returns the newly active section id, if it changed.
    ///
    /// Batches without an intersecting entry leave the active section as is.
    /// A tracker that never started observing ignores every batch.
    pub fn on_batch(&mut self, doc: &mut dyn Document, entries: &[IntersectionEntry]) -> Option<String> {
        if !self.observing {
            return None;
        }
        let winner = most_visible(entries)?;
        let id = doc.attribute(winner.target, "id").unwrap_or_default();

        Observable::set_if_not_eq(&mut self.active, Some(id.clone()))?;
        self.sync_links(doc, &id);
        tracing::trace!(id, ratio = winner.ratio, "active section changed");
        Some(id)
    }

    fn sync_links(&self, doc: &mut dyn Document, id: &str) {
        let target = format!("#{id}");
        for link in &self.links {
            doc.set_class(link.element, classes::ACTIVE, link.href == target);
        }
    }

    /// Currently active section id.
    #[must_use]
    pub fn active(&self) -> Option<String> { Observable::get(&self.active).clone() }

    /// Subscribes to active section changes.
    #[must_use]
    pub fn subscribe(&self) -> Subscriber<Option<String>> { Observable::subscribe(&self.active) }

    /// Resolved sections, in link order.
    #[must_use]
    pub fn sections(&self) -> &[ElementId] { &self.sections }

    /// All navigation links.
    #[must_use]
    pub fn links(&self) -> &[NavLink] { &self.links }

    /// Whether sections are being observed.
    #[must_use]
    pub const fn is_observing(&self) -> bool { self.observing }
}

/// Intersecting entry with the highest ratio. Ties go to the first one.
fn most_visible(entries: &[IntersectionEntry]) -> Option<&IntersectionEntry> {
    entries.iter().filter(|e| e.is_intersecting).fold(None, |best, entry| match best {
        Some(b) if b.ratio >= entry.ratio => Some(b),
        _ => Some(entry),
    })
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::platform::MemoryPage;

    const THRESHOLDS: [f64; 3] = [0.22, 0.35, 0.5];

    struct Fixture {
        page: MemoryPage,
        sections: [ElementId; 3],
        links: [ElementId; 4],
    }

    fn fixture() -> Fixture {
        let mut page = MemoryPage::default();
        let body = page.body();
        let mut links = [ElementId::new(0); 4];
        for (i, href) in ["#about", "#services", "#contact", "https://elsewhere.test"].iter().enumerate() {
            links[i] = page.add_element(body, "a", None, &["nav-link"], None);
            page.seed_attribute(links[i], "href", href);
        }
        let sections = [
            page.add_element(body, "section", Some("about"), &[], None),
            page.add_element(body, "section", Some("services"), &[], None),
            page.add_element(body, "section", Some("contact"), &[], None),
        ];
        Fixture { page, sections, links }
    }

    fn active_links(f: &Fixture) -> Vec<ElementId> {
        f.links.iter().copied().filter(|l| f.page.has_class(*l, "active")).collect()
    }

    #[test]
    fn test_resolves_sections_from_links() {
        let mut f = fixture();
        let tracker = ActiveSectionTracker::start(&mut f.page, &Capabilities::default(), &THRESHOLDS);
        assert_eq!(tracker.sections(), &f.sections);
        assert_eq!(tracker.links().len(), 4);
        assert!(tracker.is_observing());
        assert_eq!(f.page.observed_count(ObserverId::Sections), 3);
    }

    #[test]
    fn test_most_visible_section_wins() {
        let mut f = fixture();
        let mut tracker = ActiveSectionTracker::start(&mut f.page, &Capabilities::default(), &THRESHOLDS);
        let [about, services, contact] = f.sections;

        let batch = [
            IntersectionEntry::new(about, true, 0.30),
            IntersectionEntry::new(services, true, 0.45),
            IntersectionEntry::new(contact, true, 0.20),
        ];
        assert_eq!(tracker.on_batch(&mut f.page, &batch).as_deref(), Some("services"));
        assert_eq!(active_links(&f), vec![f.links[1]]);
    }

    #[test]
    fn test_ties_go_to_first_entry() {
        let mut f = fixture();
        let mut tracker = ActiveSectionTracker::start(&mut f.page, &Capabilities::default(), &THRESHOLDS);
        let [about, services, _] = f.sections;

        let batch = [IntersectionEntry::new(services, true, 0.5), IntersectionEntry::new(about, true, 0.5)];
        tracker.on_batch(&mut f.page, &batch);
        assert_eq!(tracker.active().as_deref(), Some("services"));
    }

    #[test]
    fn test_empty_batches_are_sticky() {
        let mut f = fixture();
        let mut tracker = ActiveSectionTracker::start(&mut f.page, &Capabilities::default(), &THRESHOLDS);
        let [about, services, _] = f.sections;

        tracker.on_batch(&mut f.page, &[IntersectionEntry::new(about, true, 0.6)]);
        let leaving = [IntersectionEntry::new(about, false, 0.0), IntersectionEntry::new(services, false, 0.0)];
        assert_eq!(tracker.on_batch(&mut f.page, &leaving), None);
        assert_eq!(tracker.active().as_deref(), Some("about"));
        assert_eq!(active_links(&f), vec![f.links[0]]);
    }

    #[test]
    fn test_unchanged_winner_writes_nothing() {
        let mut f = fixture();
        let mut tracker = ActiveSectionTracker::start(&mut f.page, &Capabilities::default(), &THRESHOLDS);
        let about = f.sections[0];

        tracker.on_batch(&mut f.page, &[IntersectionEntry::new(about, true, 0.3)]);
        let writes = f.page.mutation_count();
        assert_eq!(tracker.on_batch(&mut f.page, &[IntersectionEntry::new(about, true, 0.6)]), None);
        assert_eq!(f.page.mutation_count(), writes);
    }

    #[test]
    fn test_skipped_without_observer() {
        let mut f = fixture();
        let caps = Capabilities { intersection_observer: false, ..Capabilities::default() };
        let tracker = ActiveSectionTracker::start(&mut f.page, &caps, &THRESHOLDS);
        assert!(!tracker.is_observing());
        assert_eq!(f.page.observe_calls(), 0);
    }

    #[test]
    fn test_unresolved_fragments_skip_tracking() {
        let mut page = MemoryPage::default();
        let body = page.body();
        let link = page.add_element(body, "a", None, &["nav-link"], None);
        page.seed_attribute(link, "href", "#missing");
        let stray = page.add_element(body, "section", Some("about"), &[], None);

        let mut tracker = ActiveSectionTracker::start(&mut page, &Capabilities::default(), &THRESHOLDS);
        assert!(!tracker.is_observing());
        assert!(tracker.sections().is_empty());
        assert_eq!(page.observe_calls(), 0);

        assert_eq!(tracker.on_batch(&mut page, &[IntersectionEntry::new(stray, true, 0.8)]), None);
        assert!(!page.has_class(link, "active"));
    }

    #[test]
    fn test_subscriber_sees_changes() {
        let mut f = fixture();
        let mut tracker = ActiveSectionTracker::start(&mut f.page, &Capabilities::default(), &THRESHOLDS);
        let mut subscriber = tracker.subscribe();

        tracker.on_batch(&mut f.page, &[IntersectionEntry::new(f.sections[2], true, 0.4)]);
        assert_eq!(block_on(subscriber.next()), Some(Some("contact".to_string())));
    }
}

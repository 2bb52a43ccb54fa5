//! In-memory page.
//!
//! A small DOM model that implements [`Document`]: elements with classes,
//! attributes, inline styles, text, and a document-space layout rectangle.
//! It computes intersection batches like a browser does after each rendering
//! update, records navigations and programmatic scrolls, and counts DOM
//! writes so callers can assert that no redundant work happened.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Document, ElementId, Rect, ScrollBehavior, Size};
use crate::observer::{IntersectionBatch, IntersectionTracker, ObserverId};

/// A single element of the in-memory page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Node {
    /// Lowercase tag name.
    pub tag: String,
    /// Element id attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Classes in insertion order.
    pub classes: Vec<String>,
    /// Attributes other than `id` and `class`.
    pub attributes: BTreeMap<String, String>,
    /// Inline styles.
    pub styles: BTreeMap<String, String>,
    /// Text content.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Parent element.
    #[serde(skip)]
    pub parent: Option<ElementId>,
    /// Layout box: document coordinates, or viewport coordinates when `fixed`.
    #[serde(skip)]
    pub rect: Option<Rect>,
    /// Whether the element is positioned relative to the viewport.
    #[serde(skip)]
    pub fixed: bool,
    /// Open state for dialogs.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub open: bool,
}

/// A programmatic scroll request recorded by the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    /// Target offset (px).
    pub top: f64,
    /// Requested behavior.
    pub behavior: ScrollBehavior,
}

/// In-memory implementation of [`Document`].
#[derive(Debug)]
pub struct MemoryPage {
    nodes: Vec<Node>,
    viewport: Size,
    scroll_y: f64,
    scroll_changed: bool,
    tracker: IntersectionTracker,
    navigations: Vec<String>,
    scroll_requests: Vec<ScrollRequest>,
    mutations: usize,
}

impl Default for MemoryPage {
    fn default() -> Self { Self::new(Size::default()) }
}

impl MemoryPage {
    /// Creates a page containing only `<html>` and `<body>`.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let root = Node { tag: "html".to_string(), ..Node::default() };
        let body = Node {
            tag: "body".to_string(),
            parent: Some(ElementId::new(0)),
            ..Node::default()
        };
        Self {
            nodes: vec![root, body],
            viewport,
            scroll_y: 0.0,
            scroll_changed: false,
            tracker: IntersectionTracker::new(),
            navigations: Vec::new(),
            scroll_requests: Vec::new(),
            mutations: 0,
        }
    }

    /// Appends an element with classes and a document-space layout box.
    pub fn add_element(
        &mut self,
        parent: ElementId,
        tag: &str,
        id: Option<&str>,
        classes: &[&str],
        rect: Option<Rect>,
    ) -> ElementId {
        let element = self.push_node(Node {
            tag: tag.to_ascii_lowercase(),
            id: id.map(ToString::to_string),
            classes: classes.iter().map(ToString::to_string).collect(),
            parent: Some(parent),
            rect,
            ..Node::default()
        });
        tracing::trace!(%element, tag, "element added");
        element
    }

    /// Sets an element's layout box.
    pub fn set_rect(&mut self, element: ElementId, rect: Rect, fixed: bool) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.rect = Some(rect);
            node.fixed = fixed;
        }
    }

    /// Sets an attribute without counting it as a controller mutation.
    pub fn seed_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Simulates a user scroll.
    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
        self.scroll_changed = true;
    }

    /// Simulates a viewport resize.
    pub fn resize(&mut self, viewport: Size) { self.viewport = viewport; }

    /// Returns and clears the "scroll position changed" flag.
    ///
    /// Hosts use this to dispatch scroll events after programmatic scrolls.
    pub fn take_scroll_change(&mut self) -> bool { std::mem::take(&mut self.scroll_changed) }

    /// Computes pending intersection batches, as a browser does after rendering.
    pub fn take_intersections(&mut self) -> Vec<IntersectionBatch> {
        let mut tracker = std::mem::take(&mut self.tracker);
        let batches = tracker.collect(self.viewport, |el| self.bounding_rect(el));
        self.tracker = tracker;
        batches
    }

    /// Read access to an element.
    #[must_use]
    pub fn node(&self, element: ElementId) -> Option<&Node> { self.nodes.get(element.index()) }

    /// Inline style value.
    #[must_use]
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.node(element).and_then(|n| n.styles.get(property)).map(String::as_str)
    }

    /// Text content.
    #[must_use]
    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|n| n.text.as_str())
    }

    /// URIs navigated to, oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[String] { &self.navigations }

    /// Programmatic scroll requests, oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> &[ScrollRequest] { &self.scroll_requests }

    /// Number of class and style writes performed through [`Document`].
    #[must_use]
    pub const fn mutation_count(&self) -> usize { self.mutations }

    /// Total number of `observe` calls.
    #[must_use]
    pub const fn observe_calls(&self) -> usize { self.tracker.observe_calls() }

    /// Whether the element is observed by the observer.
    #[must_use]
    pub fn is_observed(&self, observer: ObserverId, element: ElementId) -> bool {
        self.tracker.is_observed(observer, element)
    }

    /// Number of elements observed by the observer.
    #[must_use]
    pub fn observed_count(&self, observer: ObserverId) -> usize {
        self.tracker.observed_count(observer)
    }

    /// Height of the laid-out document.
    #[must_use]
    pub fn document_height(&self) -> f64 {
        self.nodes
            .iter()
            .filter(|n| !n.fixed)
            .filter_map(|n| n.rect)
            .map(|r| r.bottom())
            .fold(self.viewport.height, f64::max)
    }

    fn push_node(&mut self, node: Node) -> ElementId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        ElementId::new(index)
    }

    fn max_scroll(&self) -> f64 { (self.document_height() - self.viewport.height).max(0.0) }
}

impl Document for MemoryPage {
    fn scroll_y(&self) -> f64 { self.scroll_y }

    fn viewport(&self) -> Size { self.viewport }

    fn root(&self) -> ElementId { ElementId::new(0) }

    fn body(&self) -> ElementId { ElementId::new(1) }

    fn elements(&self) -> Vec<ElementId> {
        (0..self.nodes.len())
            .filter_map(|i| u32::try_from(i).ok())
            .map(ElementId::new)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .and_then(|i| u32::try_from(i).ok())
            .map(ElementId::new)
    }

    fn tag_name(&self, element: ElementId) -> Option<String> {
        self.node(element).map(|n| n.tag.clone())
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|n| n.parent)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element).is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let node = self.node(element)?;
        match name {
            "id" => node.id.clone(),
            "class" => Some(node.classes.join(" ")),
            _ => node.attributes.get(name).cloned(),
        }
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let node = self.node(element)?;
        let rect = node.rect?;
        if node.fixed { Some(rect) } else { Some(rect.translate(0.0, -self.scroll_y)) }
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        let Some(node) = self.nodes.get_mut(element.index()) else {
            return;
        };
        self.mutations += 1;
        let present = node.classes.iter().any(|c| c == class);
        if enabled && !present {
            node.classes.push(class.to_string());
        } else if !enabled && present {
            node.classes.retain(|c| c != class);
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(element.index()) else {
            return;
        };
        match name {
            "id" => node.id = Some(value.to_string()),
            "class" => node.classes = value.split_whitespace().map(ToString::to_string).collect(),
            _ => {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(element.index()) else {
            return;
        };
        self.mutations += 1;
        node.styles.insert(property.to_string(), value.to_string());
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(element.index()) {
            node.text = text.to_string();
        }
    }

    fn create_element(&mut self, tag: &str, parent: ElementId) -> ElementId {
        self.push_node(Node {
            tag: tag.to_ascii_lowercase(),
            parent: Some(parent),
            ..Node::default()
        })
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let top = top.clamp(0.0, self.max_scroll());
        self.scroll_requests.push(ScrollRequest { top, behavior });
        if (top - self.scroll_y).abs() > f64::EPSILON {
            self.scroll_y = top;
            self.scroll_changed = true;
        }
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        let Some(node) = self.node(element) else {
            return;
        };
        let Some(rect) = node.rect else {
            return;
        };
        let top = if node.fixed { self.scroll_y + rect.top } else { rect.top };
        self.scroll_to(top, behavior);
    }

    fn navigate(&mut self, uri: &str) {
        tracing::debug!(uri, "navigation requested");
        self.navigations.push(uri.to_string());
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId, thresholds: &[f64]) {
        self.tracker.observe(observer, element, thresholds);
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        self.tracker.unobserve(observer, element);
    }

    fn show_modal(&mut self, dialog: ElementId) {
        if let Some(node) = self.nodes.get_mut(dialog.index()) {
            node.open = true;
        }
    }

    fn close_dialog(&mut self, dialog: ElementId) {
        if let Some(node) = self.nodes.get_mut(dialog.index()) {
            node.open = false;
        }
    }

    fn is_dialog_open(&self, dialog: ElementId) -> bool { self.node(dialog).is_some_and(|n| n.open) }
}

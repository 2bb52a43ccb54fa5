//! Platform boundary for the page controller.
//!
//! The controller never talks to a browser directly. Everything it reads or
//! writes goes through the [`Document`] trait, and everything it needs to know
//! about the platform is resolved once into a [`Capabilities`] descriptor.
//!
//! - [`Document`] - DOM read/write surface plus intersection observation
//! - [`Capabilities`] - Feature probes resolved at startup
//! - [`memory`] - In-memory page used by the CLI host and the tests

pub mod memory;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use memory::MemoryPage;

use crate::observer::ObserverId;

// ============================================================================
// Geometry
// ============================================================================

/// Opaque handle to an element of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(u32);

impl ElementId {
    /// Creates a handle from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self { Self(index) }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize { self.0 as usize }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate (px).
    pub x: f64,
    /// Vertical coordinate (px).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// Viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Size {
    /// Width (px).
    pub width: f64,
    /// Height (px).
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }
}

impl Default for Size {
    fn default() -> Self { Self::new(1280.0, 800.0) }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Rect {
    /// Left edge (px).
    pub left: f64,
    /// Top edge (px).
    pub top: f64,
    /// Width (px).
    pub width: f64,
    /// Height (px).
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 { self.left + self.width }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 { self.top + self.height }

    /// Returns the rectangle moved by the given offsets.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Whether the point lies inside the rectangle (edges included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// How a programmatic scroll should move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Jump immediately.
    #[default]
    Auto,
    /// Animate the scroll.
    Smooth,
}

// ============================================================================
// Capabilities
// ============================================================================

/// Platform capabilities, probed once at startup and injected into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Capabilities {
    /// Whether visibility observation (`IntersectionObserver`) is available.
    pub intersection_observer: bool,
    /// Whether the user asked for reduced motion.
    pub prefers_reduced_motion: bool,
    /// Whether native modal dialogs are supported.
    pub native_dialog: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            intersection_observer: true,
            prefers_reduced_motion: false,
            native_dialog: true,
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// The DOM surface consumed and produced by the controller.
///
/// Element enumeration is in document order. Implementations deliver
/// intersection batches back to the controller on their own cadence; `observe`
/// only registers interest.
pub trait Document {
    /// Vertical scroll offset (px).
    fn scroll_y(&self) -> f64;

    /// Viewport dimensions.
    fn viewport(&self) -> Size;

    /// The document root (`<html>`).
    fn root(&self) -> ElementId;

    /// The document body.
    fn body(&self) -> ElementId;

    /// All elements in document order.
    fn elements(&self) -> Vec<ElementId>;

    /// Looks up an element by id.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Lowercase tag name.
    fn tag_name(&self, element: ElementId) -> Option<String>;

    /// Parent element.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Whether the element carries the class.
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Attribute value.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Bounding box in viewport coordinates.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Adds or removes a class.
    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool);

    /// Sets an attribute.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    /// Sets an inline style property (custom properties included).
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Replaces the text content.
    fn set_text(&mut self, element: ElementId, text: &str);

    /// Creates an element and appends it to `parent`.
    fn create_element(&mut self, tag: &str, parent: ElementId) -> ElementId;

    /// Scrolls the window to a vertical offset.
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    /// Scrolls so the element's top aligns with the viewport's top.
    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior);

    /// Navigates the window to a URI.
    fn navigate(&mut self, uri: &str);

    /// Starts observing an element at the given thresholds.
    fn observe(&mut self, observer: ObserverId, element: ElementId, thresholds: &[f64]);

    /// Stops observing an element.
    fn unobserve(&mut self, observer: ObserverId, element: ElementId);

    /// Opens a dialog modally.
    fn show_modal(&mut self, dialog: ElementId);

    /// Closes a dialog.
    fn close_dialog(&mut self, dialog: ElementId);

    /// Whether a dialog is open.
    fn is_dialog_open(&self, dialog: ElementId) -> bool;

    /// Elements carrying the class, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.elements().into_iter().filter(|el| self.has_class(*el, class)).collect()
    }

    /// Nearest inclusive ancestor carrying the class.
    fn closest(&self, element: ElementId, class: &str) -> Option<ElementId> {
        let mut current = Some(element);
        while let Some(el) = current {
            if self.has_class(el, class) {
                return Some(el);
            }
            current = self.parent(el);
        }
        None
    }

    /// Whether `element` is `ancestor` or one of its descendants.
    fn is_inclusive_descendant(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(el) = current {
            if el == ancestor {
                return true;
            }
            current = self.parent(el);
        }
        false
    }

    /// Resolves a simple selector (`#id` or `.class`) to its first match.
    fn query(&self, selector: &str) -> Option<ElementId> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return (!id.is_empty()).then(|| self.element_by_id(id)).flatten();
        }
        if let Some(class) = selector.strip_prefix('.') {
            return self.elements_with_class(class).into_iter().next();
        }
        None
    }

    /// Value of the named field inside a form.
    fn field_value(&self, form: ElementId, name: &str) -> Option<String> {
        self.elements()
            .into_iter()
            .filter(|el| *el != form && self.is_inclusive_descendant(*el, form))
            .find(|el| self.attribute(*el, "name").as_deref() == Some(name))
            .and_then(|el| self.attribute(el, "value"))
    }

    /// Clears every named field inside a form.
    fn reset_form(&mut self, form: ElementId) {
        let fields: Vec<ElementId> = self
            .elements()
            .into_iter()
            .filter(|el| *el != form && self.is_inclusive_descendant(*el, form))
            .filter(|el| self.attribute(*el, "name").is_some())
            .collect();
        for field in fields {
            self.set_attribute(field, "value", "");
        }
    }
}

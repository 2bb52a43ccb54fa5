//! Mobile navigation toggle.

use crate::constants::{classes, ids};
use crate::platform::{Document, ElementId};

/// Opens and closes the mobile menu.
#[derive(Debug, Clone)]
pub struct NavToggle {
    toggle: ElementId,
    menu: ElementId,
}

impl NavToggle {
    /// Binds to `#navToggle` and `#navMenu`. Returns `None` if either is missing.
    #[must_use]
    pub fn bind(doc: &dyn Document) -> Option<Self> {
        let toggle = doc.element_by_id(ids::NAV_TOGGLE);
        let menu = doc.element_by_id(ids::NAV_MENU);
        match (toggle, menu) {
            (Some(toggle), Some(menu)) => Some(Self { toggle, menu }),
            _ => {
                tracing::debug!("navigation toggle inactive");
                None
            }
        }
    }

    /// Handles a click. Returns `true` if the menu state changed.
    pub fn on_click(&self, doc: &mut dyn Document, target: ElementId) -> bool {
        let body = doc.body();
        if doc.is_inclusive_descendant(target, self.toggle) {
            let open = !doc.has_class(body, classes::NAV_OPEN);
            doc.set_class(body, classes::NAV_OPEN, open);
            doc.set_attribute(self.toggle, "aria-expanded", if open { "true" } else { "false" });
            return true;
        }
        if doc.is_inclusive_descendant(target, self.menu) && doc.has_class(target, classes::NAV_LINK) {
            doc.set_class(body, classes::NAV_OPEN, false);
            doc.set_attribute(self.toggle, "aria-expanded", "false");
            return true;
        }
        false
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self, doc: &dyn Document) -> bool { doc.has_class(doc.body(), classes::NAV_OPEN) }
}

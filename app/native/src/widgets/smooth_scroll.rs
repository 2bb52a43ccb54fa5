//! Jump links declared with `data-scroll="#target"`.

use crate::motion::ReducedMotionPolicy;
use crate::platform::{Document, ElementId};

/// Attribute holding the target selector.
const ATTRIBUTE: &str = "data-scroll";

/// Scrolls to the element named by the clicked element's `data-scroll`.
#[derive(Debug, Clone, Copy)]
pub struct SmoothScroll {
    motion: ReducedMotionPolicy,
}

impl SmoothScroll {
    #[must_use]
    pub const fn new(motion: ReducedMotionPolicy) -> Self { Self { motion } }

    /// Handles a click. Returns `true` if the default action should be prevented.
    pub fn on_click(&self, doc: &mut dyn Document, target: ElementId) -> bool {
        let Some(selector) = doc.attribute(target, ATTRIBUTE).filter(|s| !s.is_empty()) else {
            return false;
        };
        let Some(destination) = doc.query(&selector) else {
            tracing::debug!(selector, "scroll target not found");
            return false;
        };
        doc.scroll_into_view(destination, self.motion.scroll_behavior());
        true
    }
}

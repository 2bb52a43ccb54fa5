//! Injected floating call link and back-to-top button.

use crate::config::WidgetsConfig;
use crate::constants::{classes, widgets};
use crate::motion::ReducedMotionPolicy;
use crate::platform::{Document, ElementId};

/// The two controls appended to the body at startup.
#[derive(Debug, Clone)]
pub struct FloatingControls {
    call: ElementId,
    back_to_top: ElementId,
    motion: ReducedMotionPolicy,
}

impl FloatingControls {
    /// Creates both controls and appends them to the body.
    pub fn inject(doc: &mut dyn Document, config: &WidgetsConfig, motion: ReducedMotionPolicy) -> Self {
        let body = doc.body();
        let href = phone_href(doc).unwrap_or_else(|| config.fallback_phone.clone());

        let call = doc.create_element("a", body);
        doc.set_attribute(call, "class", classes::FLOATING_CTA);
        doc.set_attribute(call, "href", &href);
        doc.set_attribute(call, "aria-label", &config.call_label);
        doc.set_text(call, &config.call_text);

        let back_to_top = doc.create_element("button", body);
        doc.set_attribute(back_to_top, "class", classes::BACK_TO_TOP);
        doc.set_attribute(back_to_top, "type", "button");
        doc.set_attribute(back_to_top, "aria-label", &config.back_to_top_label);
        doc.set_text(back_to_top, widgets::BACK_TO_TOP_TEXT);

        tracing::debug!(href, "floating controls injected");
        Self { call, back_to_top, motion }
    }

    /// The floating call link.
    #[must_use]
    pub const fn call(&self) -> ElementId { self.call }

    /// The back-to-top button.
    #[must_use]
    pub const fn back_to_top(&self) -> ElementId { self.back_to_top }

    /// Handles a click. Returns `true` if it scrolled back to the top.
    pub fn on_click(&self, doc: &mut dyn Document, target: ElementId) -> bool {
        if !doc.is_inclusive_descendant(target, self.back_to_top) {
            return false;
        }
        doc.scroll_to(0.0, self.motion.scroll_behavior());
        true
    }
}

/// `href` of the first `tel:` link on the page.
fn phone_href(doc: &dyn Document) -> Option<String> {
    doc.elements()
        .into_iter()
        .filter(|el| doc.tag_name(*el).as_deref() == Some("a"))
        .filter_map(|el| doc.attribute(el, "href"))
        .find(|href| href.starts_with("tel:"))
}

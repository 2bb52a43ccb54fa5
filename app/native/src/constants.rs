//! Tuning constants and DOM vocabulary for the page controller.
//!
//! This module centralizes the magic numbers, class names, and element ids used
//! throughout the controller. Numeric values are the defaults of the
//! configuration file; class names and ids are part of the page contract and
//! are not configurable.
//!
//! # Organization
//!
//! - `scroll` - Scroll offsets that toggle discrete presentation state
//! - `parallax` - Hero background parallax parameters
//! - `observer` - Intersection thresholds
//! - `classes` - Class names read or written by the controller
//! - `ids` - Element ids of the collaborator widgets
//! - `properties` - Style properties and custom properties
//! - `widgets` - Defaults for injected controls and the contact form

/// Scroll offsets that toggle discrete presentation state.
pub mod scroll {
    /// Offset (px) past which the header becomes compact.
    pub const HEADER_COMPACT_THRESHOLD: f64 = 12.0;

    /// Offset (px) past which the back-to-top control is shown.
    pub const BACK_TO_TOP_THRESHOLD: f64 = 480.0;
}

/// Hero background parallax parameters.
pub mod parallax {
    /// Vertical offset per scrolled pixel.
    pub const FACTOR: f64 = 0.08;

    /// Maximum vertical offset (px).
    pub const MAX_OFFSET: f64 = 40.0;

    /// Fixed scale applied with the translation so edges never show.
    pub const SCALE: f64 = 1.06;
}

/// Intersection thresholds.
pub mod observer {
    /// Visible fraction at which a reveal candidate transitions.
    pub const REVEAL_THRESHOLD: f64 = 0.12;

    /// Visible fractions reported for page sections.
    pub const SECTION_THRESHOLDS: [f64; 3] = [0.22, 0.35, 0.5];
}

/// Class names read or written by the controller.
pub mod classes {
    /// Header element.
    pub const HEADER: &str = "header";
    /// Compact header state.
    pub const HEADER_COMPACT: &str = "scrolled";
    /// Hero background (parallax target).
    pub const HERO_BACKGROUND: &str = "hero-bg";

    /// Base marker for reveal candidates.
    pub const REVEAL: &str = "reveal";
    /// Emphasized reveal motion.
    pub const REVEAL_POP: &str = "reveal-pop";
    /// Revealed state.
    pub const REVEAL_IN: &str = "reveal-in";

    /// Roles that receive the emphasized motion.
    pub const EMPHASIZED_ROLES: [&str; 3] = ["hero-content", "cta-box", "media-card"];

    /// Navigation link.
    pub const NAV_LINK: &str = "nav-link";
    /// Active navigation link.
    pub const ACTIVE: &str = "active";
    /// Body state while the mobile menu is open.
    pub const NAV_OPEN: &str = "nav-open";

    /// Gallery item button.
    pub const GALLERY_ITEM: &str = "gallery-item";

    /// Injected floating call-to-action.
    pub const FLOATING_CTA: &str = "floating-cta";
    /// Injected back-to-top control.
    pub const BACK_TO_TOP: &str = "backtop";
    /// Visible back-to-top control.
    pub const SHOW: &str = "show";
}

/// Element ids of the collaborator widgets.
pub mod ids {
    /// Mobile menu button.
    pub const NAV_TOGGLE: &str = "navToggle";
    /// Mobile menu container.
    pub const NAV_MENU: &str = "navMenu";
    /// Gallery modal dialog.
    pub const MODAL: &str = "imgModal";
    /// Image inside the gallery modal.
    pub const MODAL_IMAGE: &str = "modalImg";
    /// Close button of the gallery modal.
    pub const MODAL_CLOSE: &str = "modalClose";
    /// Gallery container.
    pub const GALLERY: &str = "gallery";
    /// Contact form.
    pub const CONTACT_FORM: &str = "contactForm";
    /// Feedback paragraph below the contact form.
    pub const CONTACT_FEEDBACK: &str = "contactFeedback";
}

/// Style properties and custom properties.
pub mod properties {
    /// Transform style property.
    pub const TRANSFORM: &str = "transform";
    /// Horizontal cursor position custom property.
    pub const CURSOR_X: &str = "--mx";
    /// Vertical cursor position custom property.
    pub const CURSOR_Y: &str = "--my";
}

/// Defaults for injected controls and the contact form.
pub mod widgets {
    /// Phone link used when the page has no `tel:` link.
    pub const FALLBACK_PHONE: &str = "tel:+390000000000";
    /// Accessible label of the floating call-to-action.
    pub const CALL_LABEL: &str = "Chiama ora";
    /// Text of the floating call-to-action.
    pub const CALL_TEXT: &str = "📞 Chiama ora";
    /// Accessible label of the back-to-top control.
    pub const BACK_TO_TOP_LABEL: &str = "Torna su";
    /// Text of the back-to-top control.
    pub const BACK_TO_TOP_TEXT: &str = "↑";
    /// Recipient of the contact form.
    pub const CONTACT_RECIPIENT: &str = "hello@example.com";
}

//! Reduced-motion policy.
//!
//! Resolved once from the platform's [`Capabilities`] when the controller
//! starts and handed by value to every component that animates. It is never
//! re-evaluated for the lifetime of a controller.

use serde::Serialize;

use crate::platform::{Capabilities, ScrollBehavior};

/// Whether continuous or decorative motion may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReducedMotionPolicy {
    animate: bool,
}

impl ReducedMotionPolicy {
    /// Resolves the policy from the platform's motion preference.
    #[must_use]
    pub const fn from_capabilities(capabilities: &Capabilities) -> Self {
        Self { animate: !capabilities.prefers_reduced_motion }
    }

    /// Policy that allows motion.
    #[must_use]
    pub const fn animated() -> Self { Self { animate: true } }

    /// Policy that suppresses motion.
    #[must_use]
    pub const fn reduced() -> Self { Self { animate: false } }

    /// Whether parallax, cursor glow, smooth scrolling, and reveal transitions run.
    #[must_use]
    pub const fn should_animate(self) -> bool { self.animate }

    /// Scroll behavior for programmatic scrolls.
    #[must_use]
    pub const fn scroll_behavior(self) -> ScrollBehavior {
        if self.animate { ScrollBehavior::Smooth } else { ScrollBehavior::Auto }
    }
}

impl Default for ReducedMotionPolicy {
    fn default() -> Self { Self::animated() }
}

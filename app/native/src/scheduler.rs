//! Frame-aligned coalescing of update requests.
//!
//! Scroll and pointer events arrive far more often than the display refreshes.
//! Every request between two refreshes is folded into a single pending run:
//! the first `schedule()` arms the scheduler, later ones are dropped until the
//! next refresh takes the pending run.
//!
//! Each visual-state source owns an independent [`FrameScheduler`], so a busy
//! source never delays another one.

use std::fmt;

use serde::Serialize;

// ============================================================================
// Types
// ============================================================================

/// A visual-state source with its own refresh slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameSource {
    /// Compact header toggle.
    Header,
    /// Hero background parallax.
    Parallax,
    /// Cursor glow custom properties.
    CursorGlow,
    /// Back-to-top visibility.
    BackToTop,
}

impl FrameSource {
    /// All sources, in registration order.
    pub const ALL: [Self; 4] = [Self::Header, Self::Parallax, Self::CursorGlow, Self::BackToTop];

    /// Stable name used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Parallax => "parallax",
            Self::CursorGlow => "cursor-glow",
            Self::BackToTop => "back-to-top",
        }
    }
}

impl fmt::Display for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ============================================================================
// FrameScheduler
// ============================================================================

/// Coalesces run requests into at most one run per refresh.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    source: FrameSource,
    pending: bool,
    runs: usize,
    dropped: usize,
}

impl FrameScheduler {
    /// Creates an idle scheduler for a source.
    #[must_use]
    pub const fn new(source: FrameSource) -> Self {
        Self { source, pending: false, runs: 0, dropped: 0 }
    }

    /// The source this scheduler belongs to.
    #[must_use]
    pub const fn source(&self) -> FrameSource { self.source }

    /// Requests a run on the next refresh.
    ///
    /// Returns `true` if the request armed the scheduler, `false` if a run was
    /// already pending and the request was dropped.
    pub fn schedule(&mut self) -> bool {
        if self.pending {
            self.dropped += 1;
            return false;
        }
        self.pending = true;
        true
    }

    /// Whether a run is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool { self.pending }

    /// Consumes the pending run at a refresh.
    ///
    /// Returns `true` if the caller should run the source now.
    pub fn take(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.runs += 1;
        tracing::trace!(source = %self.source, runs = self.runs, "frame run");
        true
    }

    /// Number of frame runs so far.
    #[must_use]
    pub const fn runs(&self) -> usize { self.runs }

    /// Number of requests folded into an already pending run.
    #[must_use]
    pub const fn dropped(&self) -> usize { self.dropped }
}

// ============================================================================
// Tests
// ============================================================================

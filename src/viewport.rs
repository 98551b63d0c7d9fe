//! Viewport state and visibility detection strategy.
//!
//! A [`Viewport`] is the pair every scroll-driven component reads: current
//! scroll offset and window height. Visibility math lives here so the reveal
//! and lazy-load components share one definition of "how much of this element
//! is on screen".
//!
//! ## Detection strategy
//!
//! The page the runtime models feature-detects `IntersectionObserver` once at
//! startup. That branch is modeled as [`DetectionMode`], chosen once from
//! [`Capabilities`] and handed to the components at init — subscription-based
//! detection when available, an eager/polling fallback when not. Call sites
//! never re-check the capability.

use serde::Serialize;

/// Scroll offset and window height, in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub scroll_y: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(height: f32) -> Self {
        Viewport {
            scroll_y: 0.0,
            height,
        }
    }

    /// Viewport-relative top of a box at `offset_top` from the document top
    /// (the `getBoundingClientRect().top` analog).
    pub fn relative_top(&self, offset_top: f32) -> f32 {
        offset_top - self.scroll_y
    }

    /// Fraction of a box currently inside the viewport, with the viewport's
    /// bottom edge pulled up by `bottom_margin` px (the
    /// `rootMargin: "0px 0px -Npx 0px"` analog). Zero-height boxes count as
    /// fully visible when their top edge is in range.
    pub fn visible_fraction(&self, offset_top: f32, height: f32, bottom_margin: f32) -> f32 {
        let top = self.relative_top(offset_top);
        let bottom = top + height;
        let view_bottom = self.height - bottom_margin;
        let overlap = bottom.min(view_bottom) - top.max(0.0);
        if height <= 0.0 {
            if top >= 0.0 && top <= view_bottom { 1.0 } else { 0.0 }
        } else {
            (overlap / height).clamp(0.0, 1.0)
        }
    }
}

/// What the host environment supports. Detected once, before init.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub intersection_observer: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            intersection_observer: true,
        }
    }
}

/// Visibility-detection strategy selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DetectionMode {
    /// Per-element subscriptions, released on first fire.
    Observer,
    /// No detection capability: load eagerly / reveal by scroll polling.
    Eager,
}

impl DetectionMode {
    pub fn select(caps: Capabilities) -> Self {
        if caps.intersection_observer {
            DetectionMode::Observer
        } else {
            DetectionMode::Eager
        }
    }
}

impl std::fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionMode::Observer => write!(f, "observer"),
            DetectionMode::Eager => write!(f, "eager"),
        }
    }
}

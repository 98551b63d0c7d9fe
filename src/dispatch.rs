//! Throttled scroll dispatch.
//!
//! One 100 ms-gated handler performs two independent checks per pass:
//!
//! 1. **Back-to-top visibility** — the `.back-to-top` button carries the
//!    `active` class exactly while `scroll_y ≥ 300`. A pure threshold with no
//!    hysteresis: crossing 300 in either direction toggles on the next pass.
//! 2. **Polling reveal** — for `.about-content`, `.pdf-container`, and
//!    `.contact-item`, force opacity 1 / translate 0 once the element's
//!    viewport-relative top is above `viewport height − 150`.
//!
//! The polling reveal overlaps [`crate::reveal::RevealObserver`] on purpose:
//! it is the path that still works when visibility detection is unavailable,
//! and both mechanisms write the same final values, so last-write-wins is
//! harmless. Do not "deduplicate" it against the observer.

use crate::dom::{Document, NodeId};
use crate::throttle::ThrottleGate;
use crate::timer::TimerQueue;
use crate::viewport::Viewport;

/// Selectors covered by the polling reveal check. Narrower than the observer
/// set: section titles are observer-only.
pub const POLLED_SELECTORS: &[&str] = &[".about-content", ".pdf-container", ".contact-item"];

const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy)]
pub struct DispatchSettings {
    pub throttle_ms: u64,
    /// Scroll offset at and past which the back-to-top button shows.
    pub back_to_top_threshold: f32,
    /// Reveal when `relative_top < viewport.height − reveal_margin`.
    pub reveal_margin: f32,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        DispatchSettings {
            throttle_ms: 100,
            back_to_top_threshold: 300.0,
            reveal_margin: 150.0,
        }
    }
}

#[derive(Debug)]
pub struct ScrollDispatcher {
    settings: DispatchSettings,
    gate: ThrottleGate,
    back_to_top: Option<NodeId>,
    polled: Vec<NodeId>,
}

impl ScrollDispatcher {
    pub fn init(document: &Document, settings: DispatchSettings) -> Self {
        ScrollDispatcher {
            settings,
            gate: ThrottleGate::new(settings.throttle_ms),
            back_to_top: document.query(".back-to-top"),
            polled: document.query_any(POLLED_SELECTORS),
        }
    }

    /// Gated entry point. `reset_task` is scheduled to end the cooldown when
    /// the gate lets this invocation through; suppressed invocations are
    /// dropped. Returns whether the handler actually ran.
    pub fn on_scroll<T>(
        &mut self,
        document: &mut Document,
        viewport: &Viewport,
        timers: &mut TimerQueue<T>,
        reset_task: T,
    ) -> bool {
        if !self.gate.try_pass(timers, reset_task) {
            return false;
        }
        self.handle(document, viewport);
        true
    }

    /// Route the throttle reset task here when it fires.
    pub fn end_cooldown(&mut self) {
        self.gate.end_cooldown();
    }

    pub fn teardown<T>(&mut self, timers: &mut TimerQueue<T>) {
        self.gate.teardown(timers);
    }

    /// The actual per-pass work, ungated. Also run once on ready so the
    /// initial scroll position is reflected without waiting for an event.
    pub fn handle(&mut self, document: &mut Document, viewport: &Viewport) {
        self.update_back_to_top(document, viewport);
        self.poll_reveal(document, viewport);
    }

    fn update_back_to_top(&self, document: &mut Document, viewport: &Viewport) {
        let Some(button) = self.back_to_top else {
            return;
        };
        if viewport.scroll_y >= self.settings.back_to_top_threshold {
            document.get_mut(button).add_class(ACTIVE_CLASS);
        } else {
            document.get_mut(button).remove_class(ACTIVE_CLASS);
        }
    }

    fn poll_reveal(&self, document: &mut Document, viewport: &Viewport) {
        let cutoff = viewport.height - self.settings.reveal_margin;
        for &node in &self.polled {
            let top = viewport.relative_top(document.get(node).offset_top);
            if top < cutoff {
                let style = &mut document.get_mut(node).style;
                style.opacity = Some(1.0);
                style.translate_y = Some(0.0);
            }
        }
    }
}

//! Scroll-triggered reveal animation.
//!
//! Watches `.about-content`, `.pdf-container`, `.contact-info`,
//! `.contact-item`, and `.section-title` and transitions each from hidden
//! (opacity 0, pushed 30 px
//! down) to visible (opacity 1, translate 0) the first time it crosses the
//! visibility threshold. The transition is one-way: an element that scrolls
//! back out of view stays revealed, and its subscription is released on first
//! fire so side effects cannot run twice.
//!
//! A revealed `contact-info` container additionally cascades its direct
//! `contact-item` children by giving the nth child a `0.1 × n` second
//! transition delay.
//!
//! When the visibility-detection capability is absent this component is not
//! constructed at all; the scroll dispatcher's polling check covers the same
//! elements (see [`crate::dispatch`]).

use crate::dom::{Document, NodeId};
use crate::viewport::Viewport;

/// Selectors enrolled for the reveal animation. The contact-info container
/// is watched so its reveal can trigger the child cascade.
pub const WATCHED_SELECTORS: &[&str] = &[
    ".about-content",
    ".pdf-container",
    ".contact-info",
    ".contact-item",
    ".section-title",
];

const HIDDEN_TRANSLATE_Y: f32 = 30.0;

/// Tuning knobs; defaults match the shipped page.
#[derive(Debug, Clone, Copy)]
pub struct RevealSettings {
    /// Minimum visible fraction before an element reveals.
    pub threshold: f32,
    /// Bottom viewport margin in px (elements reveal slightly before the edge).
    pub bottom_margin: f32,
    /// Transition duration in seconds.
    pub duration_secs: f32,
    /// Per-child stagger step in seconds for the contact-info cascade.
    pub stagger_secs: f32,
}

impl Default for RevealSettings {
    fn default() -> Self {
        RevealSettings {
            threshold: 0.1,
            bottom_margin: 50.0,
            duration_secs: 0.6,
            stagger_secs: 0.1,
        }
    }
}

/// Subscription-based reveal driver.
#[derive(Debug)]
pub struct RevealObserver {
    settings: RevealSettings,
    /// Live subscriptions; a node is removed the moment it reveals.
    active: Vec<NodeId>,
}

impl RevealObserver {
    /// Enroll every watched element, forcing each into the hidden state.
    pub fn init(document: &mut Document, settings: RevealSettings) -> Self {
        let active = document.query_any(WATCHED_SELECTORS);
        let transition = format!(
            "opacity {dur}s ease, transform {dur}s ease",
            dur = settings.duration_secs
        );
        for &node in &active {
            let style = &mut document.get_mut(node).style;
            style.opacity = Some(0.0);
            style.translate_y = Some(HIDDEN_TRANSLATE_Y);
            style.transition = Some(transition.clone());
        }
        RevealObserver { settings, active }
    }

    /// Re-evaluate visibility for all live subscriptions. Call on ready and
    /// on every scroll event (intersection delivery is not throttled).
    pub fn check(&mut self, document: &mut Document, viewport: &Viewport) {
        let settings = self.settings;
        let mut fired = Vec::new();
        self.active.retain(|&node| {
            let el = document.get(node);
            let fraction = viewport.visible_fraction(el.offset_top, el.height, settings.bottom_margin);
            if fraction >= settings.threshold {
                fired.push(node);
                false
            } else {
                true
            }
        });
        for node in fired {
            reveal(document, node, &settings);
        }
    }

    /// Number of still-hidden subscriptions.
    pub fn pending(&self) -> usize {
        self.active.len()
    }
}

fn reveal(document: &mut Document, node: NodeId, settings: &RevealSettings) {
    {
        let style = &mut document.get_mut(node).style;
        style.opacity = Some(1.0);
        style.translate_y = Some(0.0);
    }
    if document.get(node).has_class("contact-info") {
        stagger_children(document, node, settings.stagger_secs);
    }
}

/// Give each direct `contact-item` child an increasing transition delay so
/// the items cascade in.
fn stagger_children(document: &mut Document, parent: NodeId, step_secs: f32) {
    for (index, child) in document
        .children_matching(parent, ".contact-item")
        .into_iter()
        .enumerate()
    {
        let delay = format!("{:.1}s", index as f32 * step_secs);
        document.get_mut(child).style.transition_delay = Some(delay);
    }
}

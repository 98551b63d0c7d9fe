//! Hero parallax effect.
//!
//! Direct 1:1 mapping from scroll position to the hero's vertical
//! translation: `translate_y = scroll_y × rate` with a rate of −0.5, so the
//! hero drifts up at half scroll speed. Deliberately unthrottled — the effect
//! reads wrong if it lags the scroll position — and recomputed synchronously
//! on every scroll event.

use crate::dom::{Document, NodeId};

pub const DEFAULT_RATE: f32 = -0.5;

#[derive(Debug)]
pub struct ParallaxDriver {
    hero: Option<NodeId>,
    rate: f32,
}

impl ParallaxDriver {
    /// Bind to the `.hero` element if present. Absent hero means every update
    /// is a no-op.
    pub fn init(document: &Document, rate: f32) -> Self {
        ParallaxDriver {
            hero: document.query(".hero"),
            rate,
        }
    }

    pub fn on_scroll(&self, document: &mut Document, scroll_y: f32) {
        if let Some(hero) = self.hero {
            document.get_mut(hero).style.translate_y = Some(scroll_y * self.rate);
        }
    }
}

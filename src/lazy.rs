//! Deferred image loading.
//!
//! Images that ship with a `data-src` attribute instead of a real `src` are
//! loaded the first time any part of them enters the viewport: `src` is
//! assigned from `data-src` and the `lazy` marker class is removed. Each
//! node's subscription is released the moment it loads, so a source is
//! assigned at most once per node.
//!
//! In [`DetectionMode::Eager`] (no visibility detection available) every
//! deferred image loads synchronously at init, in document order.

use crate::dom::{Document, NodeId};
use crate::viewport::{DetectionMode, Viewport};

pub const DEFERRED_SRC_ATTR: &str = "data-src";
const LAZY_CLASS: &str = "lazy";

#[derive(Debug)]
pub struct LazyImageLoader {
    /// Nodes still awaiting their first viewport entry. Empty in eager mode.
    pending: Vec<NodeId>,
}

impl LazyImageLoader {
    /// Collect every `img[data-src]`. In eager mode all of them load here,
    /// synchronously, before this returns.
    pub fn init(document: &mut Document, mode: DetectionMode) -> Self {
        let deferred: Vec<NodeId> = document
            .query_all("img")
            .into_iter()
            .filter(|&n| document.get(n).attr(DEFERRED_SRC_ATTR).is_some())
            .collect();

        match mode {
            DetectionMode::Observer => LazyImageLoader { pending: deferred },
            DetectionMode::Eager => {
                for node in deferred {
                    load(document, node);
                }
                LazyImageLoader { pending: Vec::new() }
            }
        }
    }

    /// Load any pending image now visible (threshold 0: any overlap counts)
    /// and release its subscription.
    pub fn check(&mut self, document: &mut Document, viewport: &Viewport) {
        let mut fired = Vec::new();
        self.pending.retain(|&node| {
            let el = document.get(node);
            if viewport.visible_fraction(el.offset_top, el.height, 0.0) > 0.0 {
                fired.push(node);
                false
            } else {
                true
            }
        });
        for node in fired {
            load(document, node);
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

fn load(document: &mut Document, node: NodeId) {
    let el = document.get_mut(node);
    if let Some(src) = el.attrs.get(DEFERRED_SRC_ATTR).cloned() {
        el.set_attr("src", &src);
        el.remove_class(LAZY_CLASS);
    }
}

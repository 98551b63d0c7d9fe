//! Page-chrome interactions: mobile menu, anchor navigation, download button.
//!
//! These are the click-driven behaviors wired up once the header and footer
//! are injected. Each component binds to its element(s) at init, tolerates
//! their absence, and owns no state beyond what the spec calls transient DOM
//! state plus the tiny state machines below.
//!
//! ## Menu toggle
//!
//! `closed ⇄ open`. The toggle button click flips the nav menu's `active`
//! class and the button's `aria-expanded` attribute in lockstep; clicking any
//! nav link forces `closed` so the mobile menu never covers the section the
//! visitor just picked.
//!
//! ## Anchor navigation
//!
//! In-page anchor clicks scroll to the target section's offset minus the
//! header height and push the fragment onto the [`History`] list — the
//! address bar updates with no reload. A bare `#` href and missing targets
//! are ignored.
//!
//! ## Download button
//!
//! The menu-PDF button swaps into a disabled loading state on click, logs the
//! initiation, and restores itself via a 2 s timer. Clicks while disabled are
//! dropped.

use crate::dom::{Document, NodeId};
use crate::timer::{TimerId, TimerQueue};
use crate::viewport::Viewport;

// ============================================================================
// Menu toggle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
}

#[derive(Debug)]
pub struct MenuToggle {
    button: Option<NodeId>,
    menu: Option<NodeId>,
    state: MenuState,
}

impl MenuToggle {
    /// Bind to `.menu-toggle` / `.nav-menu` and normalize to closed.
    pub fn init(document: &mut Document) -> Self {
        let button = document.query(".menu-toggle");
        let menu = document.query(".nav-menu");
        if let Some(button) = button {
            document.get_mut(button).set_attr("aria-expanded", "false");
        }
        MenuToggle {
            button,
            menu,
            state: MenuState::Closed,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn owns(&self, node: NodeId) -> bool {
        self.button == Some(node)
    }

    /// Flip open/closed. No-op unless both elements exist.
    pub fn toggle(&mut self, document: &mut Document) {
        let (Some(button), Some(menu)) = (self.button, self.menu) else {
            return;
        };
        self.state = match self.state {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
        let open = self.state == MenuState::Open;
        if open {
            document.get_mut(menu).add_class("active");
        } else {
            document.get_mut(menu).remove_class("active");
        }
        document
            .get_mut(button)
            .set_attr("aria-expanded", if open { "true" } else { "false" });
    }

    /// Force closed (nav-link click). Harmless when already closed.
    pub fn close(&mut self, document: &mut Document) {
        if self.state == MenuState::Open {
            self.toggle(document);
        }
    }

    /// Whether `node` is a link inside the nav menu.
    pub fn contains_link(&self, document: &Document, node: NodeId) -> bool {
        let Some(menu) = self.menu else {
            return false;
        };
        let mut current = Some(node);
        while let Some(id) = current {
            if id == menu {
                return true;
            }
            current = document.parent(id);
        }
        false
    }
}

// ============================================================================
// Anchor navigation + history
// ============================================================================

/// Append-only model of the address bar: fragments pushed without a reload.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn push(&mut self, fragment: &str) {
        self.entries.push(fragment.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[derive(Debug)]
pub struct AnchorNav {
    header: Option<NodeId>,
}

impl AnchorNav {
    pub fn init(document: &Document) -> Self {
        AnchorNav {
            header: document.query("header"),
        }
    }

    /// Navigate to an in-page fragment like `"#about"`. On success the
    /// viewport jumps to the target offset minus the header height (clamped
    /// at the top) and one history entry is pushed. Returns whether the
    /// viewport moved.
    pub fn navigate(
        &self,
        document: &Document,
        viewport: &mut Viewport,
        history: &mut History,
        fragment: &str,
    ) -> bool {
        let Some(target_id) = fragment.strip_prefix('#') else {
            return false;
        };
        if target_id.is_empty() {
            return false;
        }
        let Some(target) = document.element_by_id(target_id) else {
            return false;
        };
        let header_height = self.header.map(|h| document.get(h).height).unwrap_or(0.0);
        let position = (document.get(target).offset_top - header_height).max(0.0);
        viewport.scroll_y = position;
        history.push(fragment);
        true
    }
}

// ============================================================================
// Download button
// ============================================================================

const LOADING_LABEL: &str = "Downloading...";

#[derive(Debug)]
pub struct DownloadButton {
    button: Option<NodeId>,
    restore_delay_ms: u64,
    saved_label: Option<String>,
    restore_timer: Option<TimerId>,
}

impl DownloadButton {
    pub fn init(document: &Document, restore_delay_ms: u64) -> Self {
        DownloadButton {
            button: document.query(".download-btn"),
            restore_delay_ms,
            saved_label: None,
            restore_timer: None,
        }
    }

    pub fn owns(&self, node: NodeId) -> bool {
        self.button == Some(node)
    }

    /// Enter the loading state and schedule the restore task. Returns `false`
    /// when there is no button or a download is already in flight.
    pub fn click<T>(&mut self, document: &mut Document, timers: &mut TimerQueue<T>, restore_task: T) -> bool {
        let Some(button) = self.button else {
            return false;
        };
        if self.saved_label.is_some() {
            return false;
        }
        let el = document.get_mut(button);
        self.saved_label = Some(std::mem::take(&mut el.text));
        el.text = LOADING_LABEL.to_string();
        el.set_attr("disabled", "true");
        self.restore_timer = Some(timers.schedule(self.restore_delay_ms, restore_task));
        true
    }

    /// Restore the original label. Called when the restore task fires.
    pub fn restore(&mut self, document: &mut Document) {
        let (Some(button), Some(label)) = (self.button, self.saved_label.take()) else {
            return;
        };
        self.restore_timer = None;
        let el = document.get_mut(button);
        el.text = label;
        el.remove_attr("disabled");
    }

    pub fn teardown<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(pending) = self.restore_timer.take() {
            timers.cancel(pending);
        }
    }
}

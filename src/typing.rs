//! Hero typing animation.
//!
//! Cycles through a list of strings in the hero heading: type forward one
//! character per tick, hold the full string, delete at double speed, pause
//! briefly at empty, move to the next string (wrapping). Each tick schedules
//! exactly one successor timer, and the pending timer is always cancellable,
//! so teardown can stop the chain mid-word.
//!
//! Shipped disabled; enabled via the `[typing]` config table.

use crate::dom::{Document, NodeId};
use crate::timer::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy)]
pub struct TypingSettings {
    /// Per-character delay while typing; deleting runs at half this.
    pub base_speed_ms: u64,
    /// Hold at a fully typed string before deleting.
    pub hold_ms: u64,
    /// Pause at empty before typing the next string.
    pub resume_ms: u64,
}

impl Default for TypingSettings {
    fn default() -> Self {
        TypingSettings {
            base_speed_ms: 100,
            hold_ms: 2000,
            resume_ms: 500,
        }
    }
}

#[derive(Debug)]
pub struct TypingAnimation {
    element: NodeId,
    texts: Vec<String>,
    settings: TypingSettings,
    text_index: usize,
    char_index: usize,
    deleting: bool,
    pending_timer: Option<TimerId>,
}

impl TypingAnimation {
    /// Start the chain against `element`, scheduling the first tick
    /// immediately. Returns `None` when there is nothing to type.
    pub fn start<T>(
        element: NodeId,
        texts: Vec<String>,
        settings: TypingSettings,
        timers: &mut TimerQueue<T>,
        tick_task: T,
    ) -> Option<Self> {
        if texts.is_empty() {
            return None;
        }
        let pending = timers.schedule(0, tick_task);
        Some(TypingAnimation {
            element,
            texts,
            settings,
            text_index: 0,
            char_index: 0,
            deleting: false,
            pending_timer: Some(pending),
        })
    }

    /// Advance one character and schedule the successor tick. Called when the
    /// pending tick task fires.
    pub fn tick<T>(&mut self, document: &mut Document, timers: &mut TimerQueue<T>, tick_task: T) {
        let full: Vec<char> = self.texts[self.text_index % self.texts.len()].chars().collect();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(full.len());
        }
        document.get_mut(self.element).text = full[..self.char_index].iter().collect();

        let mut delay = self.settings.base_speed_ms;
        if self.deleting {
            delay /= 2;
        }
        if !self.deleting && self.char_index == full.len() {
            delay = self.settings.hold_ms;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.text_index += 1;
            delay = self.settings.resume_ms;
        }
        self.pending_timer = Some(timers.schedule(delay, tick_task));
    }

    /// Cancel the pending tick; the chain stops where it is.
    pub fn teardown<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(pending) = self.pending_timer.take() {
            timers.cancel(pending);
        }
    }
}

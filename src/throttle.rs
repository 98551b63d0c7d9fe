//! Scroll-rate throttling.
//!
//! The page receives a scroll event for every pixel of movement; the heavier
//! handlers only need to run a few times a second. [`ThrottleGate`] lets the
//! first invocation through immediately, then drops everything until a reset
//! task it scheduled on the timer queue fires. Dropped invocations are gone —
//! nothing is queued or replayed — so a gated handler may observe stale
//! intermediate scroll positions by design.

use crate::timer::{TimerId, TimerQueue};

/// Leading-edge rate limiter: at most one pass per `interval_ms`.
#[derive(Debug)]
pub struct ThrottleGate {
    interval_ms: u64,
    in_cooldown: bool,
    reset_timer: Option<TimerId>,
}

impl ThrottleGate {
    pub fn new(interval_ms: u64) -> Self {
        ThrottleGate {
            interval_ms,
            in_cooldown: false,
            reset_timer: None,
        }
    }

    /// Ask the gate for passage. On the first call (or the first call after a
    /// cooldown expired) this returns `true` and schedules `reset_task` to
    /// end the new cooldown; during a cooldown it returns `false` and the
    /// invocation is dropped.
    pub fn try_pass<T>(&mut self, timers: &mut TimerQueue<T>, reset_task: T) -> bool {
        if self.in_cooldown {
            return false;
        }
        self.in_cooldown = true;
        self.reset_timer = Some(timers.schedule(self.interval_ms, reset_task));
        true
    }

    /// End the cooldown. Called when the scheduled reset task fires.
    pub fn end_cooldown(&mut self) {
        self.in_cooldown = false;
        self.reset_timer = None;
    }

    /// Cancel the pending reset, if any. Used on teardown so no stale task
    /// outlives the gate's owner.
    pub fn teardown<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(id) = self.reset_timer.take() {
            timers.cancel(id);
        }
        self.in_cooldown = false;
    }
}

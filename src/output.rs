//! Console model and CLI output formatting.
//!
//! # Console
//!
//! The page the runtime models reports through `console.log` /
//! `console.error`; here that is an owned, append-only [`Console`] the
//! components write into. The CLI prints it, tests assert on it, and the
//! top-level error handler funnels component failures into it instead of
//! letting them propagate.
//!
//! # Report format
//!
//! `simulate` prints a two-level display per the house style: a header line
//! per section, indented detail lines underneath.
//!
//! ```text
//! Page state @ 6200ms
//!     Scroll: 2250px (detection: observer)
//!     Menu: closed
//!     Back to top: active
//!     Reveals: 8 revealed, 0 pending
//!     Images: 2 loaded, 0 pending
//!     Form: success
//!     History: #about › #contact
//!
//! Console
//!     log: Ember & Oak page initialized
//!     log: Menu PDF download initiated
//!     log: Form submitted successfully
//! ```
//!
//! Format functions are pure (`Vec<String>`, no I/O); `print_*` wrappers
//! write to stdout.

use crate::page::PageSnapshot;
use serde::Serialize;

// ============================================================================
// Console
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Log,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsoleLine {
    pub level: Level,
    pub message: String,
}

/// Append-only log sink with document lifetime.
#[derive(Debug, Default, Serialize)]
pub struct Console {
    lines: Vec<ConsoleLine>,
}

impl Console {
    pub fn log(&mut self, message: impl Into<String>) {
        self.lines.push(ConsoleLine {
            level: Level::Log,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.lines.push(ConsoleLine {
            level: Level::Error,
            message: message.into(),
        });
    }

    pub fn lines(&self) -> &[ConsoleLine] {
        &self.lines
    }

    /// Messages at a given level, for assertions.
    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.level == level)
            .map(|l| l.message.as_str())
            .collect()
    }
}

// ============================================================================
// Report formatting
// ============================================================================

fn indent(line: impl Into<String>) -> String {
    format!("    {}", line.into())
}

/// Render a page snapshot as display lines.
pub fn format_snapshot(snapshot: &PageSnapshot) -> Vec<String> {
    let mut out = Vec::new();
    out.push(format!("Page state @ {}ms", snapshot.clock_ms));
    out.push(indent(format!(
        "Scroll: {:.0}px (detection: {})",
        snapshot.scroll_y, snapshot.detection
    )));
    out.push(indent(format!(
        "Menu: {}",
        if snapshot.menu_open { "open" } else { "closed" }
    )));
    out.push(indent(format!(
        "Back to top: {}",
        if snapshot.back_to_top_active { "active" } else { "hidden" }
    )));
    out.push(indent(format!(
        "Reveals: {} revealed, {} pending",
        snapshot.reveals_total - snapshot.reveals_pending,
        snapshot.reveals_pending
    )));
    out.push(indent(format!(
        "Images: {} loaded, {} pending",
        snapshot.images_total - snapshot.images_pending,
        snapshot.images_pending
    )));
    out.push(indent(format!("Form: {}", snapshot.form_state)));
    if snapshot.history.is_empty() {
        out.push(indent("History: (empty)"));
    } else {
        out.push(indent(format!("History: {}", snapshot.history.join(" › "))));
    }
    out
}

/// Render the console section as display lines. Empty console, no section.
pub fn format_console(lines: &[ConsoleLine]) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }
    let mut out = vec!["Console".to_string()];
    for line in lines {
        let tag = match line.level {
            Level::Log => "log",
            Level::Error => "error",
        };
        out.push(indent(format!("{}: {}", tag, line.message)));
    }
    out
}

pub fn print_report(snapshot: &PageSnapshot, console: &[ConsoleLine]) {
    for line in format_snapshot(snapshot) {
        println!("{line}");
    }
    let console_lines = format_console(console);
    if !console_lines.is_empty() {
        println!();
        for line in console_lines {
            println!("{line}");
        }
    }
}

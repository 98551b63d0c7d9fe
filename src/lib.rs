//! # Tableside
//!
//! The interactivity layer of a restaurant marketing page, rebuilt as a
//! headless, deterministic runtime. The same behaviors the live page wires up
//! on DOM-ready — mobile menu, scroll reveals, hero parallax, lazy images,
//! contact-form stub, back-to-top indicator — run here against an owned
//! document model and a virtual clock, so every timing property is exact and
//! testable.
//!
//! # Architecture: Events In, DOM State Out
//!
//! The runtime is single-threaded and run-to-completion. An embedder (the
//! `simulate` command, or the test suite) owns a [`page::Page`] and feeds it
//! two things:
//!
//! ```text
//! Event::{Scroll, Click, Submit}  →  dispatch()  →  DOM/state mutations
//! advance(ms)                     →  due timers  →  DOM/state mutations
//! ```
//!
//! Nothing happens between calls. Time only moves when `advance` is called,
//! and scheduled work fires at its exact deadline, which makes behaviors like
//! "the throttled handler runs at most once per 100 ms" or "the form settles
//! at exactly 2 s" assertable to the millisecond.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | Composition root — owns everything, routes events and timer tasks |
//! | [`dom`] | Owned element arena with a tiny selector subset and inline-style state |
//! | [`timer`] | Virtual millisecond clock and cancellable timer queue |
//! | [`viewport`] | Scroll position, visibility math, detection-strategy selection |
//! | [`throttle`] | Leading-edge rate gate for the scroll dispatcher |
//! | [`dispatch`] | Throttled scroll handler: back-to-top state + polling reveal |
//! | [`reveal`] | Subscription-based one-way reveal animation with contact cascade |
//! | [`parallax`] | Unthrottled hero translation at half scroll speed |
//! | [`lazy`] | Deferred `data-src` image loading with an eager fallback |
//! | [`nav`] | Menu toggle, in-page anchor navigation + history, download button |
//! | [`form`] | Contact-form submit stub state machine with generation tokens |
//! | [`typing`] | Optional hero typing animation (timer-chained) |
//! | [`markup`] | Maud templates and the fixed-geometry demo document |
//! | [`config`] | `tableside.toml` tuning: loading, validation, stock file |
//! | [`output`] | Console model and CLI report formatting |
//!
//! # Design Decisions
//!
//! ## No Layout Engine
//!
//! The runtime never computes where elements sit. Geometry (`offset_top`,
//! `height`) is an input on every [`dom::Element`], frozen in
//! [`markup::layout`] for the demo page. This is the narrowest faithful model:
//! the behaviors under test read positions the way page script reads
//! `getBoundingClientRect()`, they do not produce them.
//!
//! ## Cancellable Timers Over Fire-and-Forget
//!
//! Every `setTimeout` analog returns a [`timer::TimerId`]. The original
//! fire-and-forget chains leak callbacks into torn-down state; here a
//! re-submitted form cancels its stale settle task, teardown stops the typing
//! chain mid-word, and [`page::Page::close`] leaves zero live timers behind.
//!
//! ## Detection Strategy Chosen Once
//!
//! Whether visibility detection is available is decided a single time at page
//! open ([`viewport::DetectionMode::select`]) and handed to the components.
//! No call site ever re-checks the capability, mirroring the page's one
//! startup feature-detect branch.
//!
//! ## Maud Over Template Engines
//!
//! The `render` command generates HTML with
//! [Maud](https://maud.lambda.xyz/): compile-time checked, type-safe
//! interpolation, auto-escaped, zero runtime template files.

pub mod config;
pub mod dispatch;
pub mod dom;
pub mod form;
pub mod lazy;
pub mod markup;
pub mod nav;
pub mod output;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod throttle;
pub mod timer;
pub mod typing;
pub mod viewport;

//! Page wiring and event dispatch.
//!
//! [`Page`] is the composition root: it owns the document, viewport, virtual
//! clock, console, and every interactivity component, and it is the only
//! place events and timer tasks are routed. Components never talk to each
//! other — each reacts to the events the page forwards, exactly like the
//! independently-registered listeners it models.
//!
//! ## Lifecycle
//!
//! [`Page::open`] is the DOM-ready moment: header and footer are injected,
//! the detection strategy is selected from [`Capabilities`], every component
//! binds its elements, and one ungated scroll pass runs so the initial
//! viewport position is reflected. After that the embedder feeds
//! [`Event`]s via [`dispatch`](Page::dispatch) and moves time with
//! [`advance`](Page::advance), which drains due timer tasks
//! deadline-by-deadline (run-to-completion, schedule order within an
//! instant).
//!
//! ## Error handling
//!
//! A component failure never escapes: `dispatch` catches [`PageError`] at
//! the top level, writes an `Error occurred: …` console line, and the page
//! keeps running.

use crate::config::Tuning;
use crate::dispatch::ScrollDispatcher;
use crate::dom::{Document, NodeId};
use crate::form::{ContactForm, SubmitState, SubmitToken};
use crate::lazy::LazyImageLoader;
use crate::markup;
use crate::nav::{AnchorNav, DownloadButton, History, MenuState, MenuToggle};
use crate::output::Console;
use crate::parallax::ParallaxDriver;
use crate::reveal::RevealObserver;
use crate::timer::TimerQueue;
use crate::typing::TypingAnimation;
use crate::viewport::{Capabilities, DetectionMode, Viewport};
use serde::Serialize;
use thiserror::Error;

/// Browser-delivered events the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Scroll { y: f32 },
    Click(NodeId),
    Submit(NodeId),
}

/// Scheduled work. Every timer in the system is one of these, addressed by
/// a cancellable id on the queue.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    /// End the scroll dispatcher's throttle cooldown.
    ScrollCooldown,
    /// Complete a pending form submission.
    SettleSubmit {
        token: SubmitToken,
        outcome: Result<(), String>,
    },
    /// Restore the download button from its loading state.
    RestoreDownload,
    /// Next character of the typing animation.
    TypeTick,
}

#[derive(Error, Debug)]
pub enum PageError {
    #[error("submit event targeted a node that is not the contact form")]
    ForeignSubmitTarget,
}

pub struct Page {
    document: Document,
    viewport: Viewport,
    timers: TimerQueue<Task>,
    console: Console,
    history: History,
    detection: DetectionMode,
    reveal: Option<RevealObserver>,
    parallax: ParallaxDriver,
    lazy: LazyImageLoader,
    dispatcher: ScrollDispatcher,
    menu: MenuToggle,
    anchors: AnchorNav,
    download: DownloadButton,
    form: ContactForm,
    typing: Option<TypingAnimation>,
    reveals_total: usize,
    images_total: usize,
}

impl Page {
    /// The DOM-ready moment: inject chrome, bind components, run the initial
    /// scroll pass.
    pub fn open(mut document: Document, viewport_height: f32, caps: Capabilities, tuning: &Tuning) -> Self {
        markup::inject_header(&mut document);
        markup::inject_footer(&mut document);

        let viewport = Viewport::new(viewport_height);
        let mut timers = TimerQueue::new();
        let mut console = Console::default();
        let detection = DetectionMode::select(caps);

        let reveal = match detection {
            DetectionMode::Observer => Some(RevealObserver::init(&mut document, tuning.reveal_settings())),
            DetectionMode::Eager => None,
        };
        let reveals_total = reveal.as_ref().map(RevealObserver::pending).unwrap_or(0);

        let images_total = document
            .query_all("img")
            .into_iter()
            .filter(|&n| document.get(n).attr(crate::lazy::DEFERRED_SRC_ATTR).is_some())
            .count();
        let lazy = LazyImageLoader::init(&mut document, detection);

        let parallax = ParallaxDriver::init(&document, tuning.scroll.parallax_rate);
        let dispatcher = ScrollDispatcher::init(&document, tuning.dispatch_settings());
        let menu = MenuToggle::init(&mut document);
        let anchors = AnchorNav::init(&document);
        let download = DownloadButton::init(&document, tuning.download.restore_delay_ms);
        let form = ContactForm::init(&document, tuning.form.settle_delay_ms);

        let typing = if tuning.typing.enabled {
            document.query(".hero-title").and_then(|hero| {
                TypingAnimation::start(
                    hero,
                    tuning.typing.texts.clone(),
                    tuning.typing_settings(),
                    &mut timers,
                    Task::TypeTick,
                )
            })
        } else {
            None
        };

        console.log(format!("{} restaurant page initialized", markup::BRAND));

        let history = History::default();
        let mut page = Page {
            document,
            viewport,
            timers,
            console,
            history,
            detection,
            reveal,
            parallax,
            lazy,
            dispatcher,
            menu,
            anchors,
            download,
            form,
            typing,
            reveals_total,
            images_total,
        };
        // Initial pass: observers deliver their first intersection before any
        // scroll, and the back-to-top state reflects the restored position.
        page.scroll_effects_ungated();
        page
    }

    /// Route one event. Component errors land in the console, never here.
    pub fn dispatch(&mut self, event: Event) {
        if let Err(err) = self.handle_event(event) {
            self.console.error(format!("Error occurred: {err}"));
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<(), PageError> {
        match event {
            Event::Scroll { y } => {
                self.viewport.scroll_y = y;
                self.scroll_effects();
                Ok(())
            }
            Event::Click(node) => {
                self.handle_click(node);
                Ok(())
            }
            Event::Submit(node) => {
                if !self.form.owns(node) {
                    return Err(PageError::ForeignSubmitTarget);
                }
                self.form.submit(&self.document, &mut self.timers, |token| Task::SettleSubmit {
                    token,
                    outcome: Ok(()),
                });
                Ok(())
            }
        }
    }

    fn handle_click(&mut self, node: NodeId) {
        if self.menu.owns(node) {
            self.menu.toggle(&mut self.document);
            return;
        }
        if self.download.owns(node) {
            if self.download.click(&mut self.document, &mut self.timers, Task::RestoreDownload) {
                self.console.log("Menu PDF download initiated");
            }
            return;
        }
        let element = self.document.get(node);
        if element.tag == "a" {
            if let Some(href) = element.attr("href").map(str::to_string) {
                if href.starts_with('#') {
                    if self.menu.contains_link(&self.document, node) {
                        self.menu.close(&mut self.document);
                    }
                    if self
                        .anchors
                        .navigate(&self.document, &mut self.viewport, &mut self.history, &href)
                    {
                        // The viewport jump is a scroll like any other.
                        self.scroll_effects();
                    }
                }
            }
        }
    }

    /// Everything a scroll event drives. Parallax and the observers run
    /// unthrottled; the dispatcher goes through its gate.
    fn scroll_effects(&mut self) {
        self.parallax.on_scroll(&mut self.document, self.viewport.scroll_y);
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.check(&mut self.document, &self.viewport);
        }
        self.lazy.check(&mut self.document, &self.viewport);
        self.dispatcher
            .on_scroll(&mut self.document, &self.viewport, &mut self.timers, Task::ScrollCooldown);
    }

    /// Same work, but the dispatcher runs ungated (ready-time pass).
    fn scroll_effects_ungated(&mut self) {
        self.parallax.on_scroll(&mut self.document, self.viewport.scroll_y);
        if let Some(reveal) = self.reveal.as_mut() {
            reveal.check(&mut self.document, &self.viewport);
        }
        self.lazy.check(&mut self.document, &self.viewport);
        self.dispatcher.handle(&mut self.document, &self.viewport);
    }

    /// Advance the virtual clock, firing due tasks at their true deadlines
    /// (a task scheduled by another task fires at its own time, not at the
    /// end of the jump).
    pub fn advance(&mut self, delta_ms: u64) {
        let target = self.timers.now() + delta_ms;
        loop {
            match self.timers.next_deadline() {
                Some(due) if due <= target => {
                    let step = due - self.timers.now();
                    self.timers.advance(step);
                    while let Some(task) = self.timers.pop_due() {
                        self.run_task(task);
                    }
                }
                _ => break,
            }
        }
        self.timers.advance(target - self.timers.now());
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::ScrollCooldown => self.dispatcher.end_cooldown(),
            Task::SettleSubmit { token, outcome } => match self.form.settle(token, outcome) {
                Some(Ok(())) => self.console.log("Form submitted successfully"),
                Some(Err(reason)) => self.console.error(format!("Form submission error: {reason}")),
                None => {}
            },
            Task::RestoreDownload => self.download.restore(&mut self.document),
            Task::TypeTick => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.tick(&mut self.document, &mut self.timers, Task::TypeTick);
                }
            }
        }
    }

    /// Page teardown: cancel every pending timer so nothing fires into a
    /// dead page.
    pub fn close(&mut self) {
        self.dispatcher.teardown(&mut self.timers);
        self.download.teardown(&mut self.timers);
        self.form.teardown(&mut self.timers);
        if let Some(typing) = self.typing.as_mut() {
            typing.teardown(&mut self.timers);
        }
    }

    // ------------------------------------------------------------------
    // Read access for the CLI and tests
    // ------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn form_state(&self) -> &SubmitState {
        self.form.state()
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now()
    }

    /// Count of pending live timers, exposed for teardown tests.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let back_to_top_active = self
            .document
            .query(".back-to-top")
            .map(|n| self.document.get(n).has_class("active"))
            .unwrap_or(false);
        PageSnapshot {
            clock_ms: self.timers.now(),
            scroll_y: self.viewport.scroll_y,
            detection: self.detection,
            menu_open: self.menu.state() == MenuState::Open,
            back_to_top_active,
            reveals_total: self.reveals_total,
            reveals_pending: self.reveal.as_ref().map(RevealObserver::pending).unwrap_or(0),
            images_total: self.images_total,
            images_pending: self.lazy.pending(),
            form_state: describe_form_state(self.form.state()),
            history: self.history.entries().to_vec(),
        }
    }
}

fn describe_form_state(state: &SubmitState) -> String {
    match state {
        SubmitState::Idle => "idle".to_string(),
        SubmitState::Submitting => "submitting".to_string(),
        SubmitState::Success => "success".to_string(),
        SubmitState::Error(reason) => format!("error: {reason}"),
    }
}

/// Serializable page summary for the report and `simulate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub clock_ms: u64,
    pub scroll_y: f32,
    pub detection: DetectionMode,
    pub menu_open: bool,
    pub back_to_top_active: bool,
    pub reveals_total: usize,
    pub reveals_pending: usize,
    pub images_total: usize,
    pub images_pending: usize,
    pub form_state: String,
    pub history: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::demo_document;
    use crate::output::Level;

    fn open_default() -> Page {
        Page::open(
            demo_document(),
            markup::layout::VIEWPORT_HEIGHT,
            Capabilities::default(),
            &Tuning::default(),
        )
    }

    #[test]
    fn open_injects_chrome_and_logs() {
        let page = open_default();
        assert!(page.document().query(".menu-toggle").is_some());
        assert!(page.document().query(".footer-content").is_some());
        assert_eq!(
            page.console().messages(Level::Log),
            vec!["Ember & Oak restaurant page initialized"]
        );
    }

    #[test]
    fn scroll_event_moves_viewport_and_hero() {
        let mut page = open_default();
        page.dispatch(Event::Scroll { y: 200.0 });
        assert_eq!(page.viewport().scroll_y, 200.0);
        let hero = page.document().query(".hero").unwrap();
        assert_eq!(page.document().get(hero).style.translate_y, Some(-100.0));
    }

    #[test]
    fn menu_toggle_and_nav_link_round_trip() {
        let mut page = open_default();
        let toggle = page.document().query(".menu-toggle").unwrap();
        page.dispatch(Event::Click(toggle));
        assert!(page.snapshot().menu_open);

        // Click the "#about" nav link: menu closes, history gains an entry.
        let nav = page.document().query(".nav-menu").unwrap();
        let link = page.document().children(nav)[1];
        page.dispatch(Event::Click(link));
        let snap = page.snapshot();
        assert!(!snap.menu_open);
        assert_eq!(snap.history, vec!["#about".to_string()]);
        assert!(page.viewport().scroll_y > 0.0);
    }

    #[test]
    fn submit_flow_reaches_success_after_two_seconds() {
        let mut page = open_default();
        let form = page.document().element_by_id("contact-form").unwrap();
        page.dispatch(Event::Submit(form));
        assert_eq!(*page.form_state(), SubmitState::Submitting);
        page.advance(1999);
        assert_eq!(*page.form_state(), SubmitState::Submitting);
        page.advance(1);
        assert_eq!(*page.form_state(), SubmitState::Success);
        assert!(
            page.console()
                .messages(Level::Log)
                .contains(&"Form submitted successfully")
        );
    }

    #[test]
    fn foreign_submit_target_is_caught_and_logged() {
        let mut page = open_default();
        let hero = page.document().query(".hero").unwrap();
        page.dispatch(Event::Submit(hero));
        let errors = page.console().messages(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error occurred:"));
        assert_eq!(*page.form_state(), SubmitState::Idle);
    }

    #[test]
    fn download_click_logs_and_restores() {
        let mut page = open_default();
        let btn = page.document().query(".download-btn").unwrap();
        page.dispatch(Event::Click(btn));
        assert!(
            page.console()
                .messages(Level::Log)
                .contains(&"Menu PDF download initiated")
        );
        assert_eq!(page.document().get(btn).attr("disabled"), Some("true"));
        page.advance(2000);
        assert_eq!(page.document().get(btn).attr("disabled"), None);
        assert_eq!(page.document().get(btn).text, "Download Menu (PDF)");
    }

    #[test]
    fn eager_mode_loads_images_and_skips_observer() {
        let tuning = Tuning::default();
        let page = Page::open(
            demo_document(),
            markup::layout::VIEWPORT_HEIGHT,
            Capabilities {
                intersection_observer: false,
            },
            &tuning,
        );
        let snap = page.snapshot();
        assert_eq!(snap.detection, DetectionMode::Eager);
        assert_eq!(snap.images_pending, 0);
        assert_eq!(snap.reveals_total, 0);
        for img in page.document().query_all("img") {
            assert!(page.document().get(img).attr("src").is_some());
            assert!(!page.document().get(img).has_class("lazy"));
        }
    }

    #[test]
    fn eager_mode_polling_still_reveals_on_scroll() {
        let tuning = Tuning::default();
        let mut page = Page::open(
            demo_document(),
            markup::layout::VIEWPORT_HEIGHT,
            Capabilities {
                intersection_observer: false,
            },
            &tuning,
        );
        let about = page.document().query(".about-content").unwrap();
        assert_eq!(page.document().get(about).style.opacity, None);

        page.dispatch(Event::Scroll {
            y: markup::layout::ABOUT_CONTENT_TOP,
        });
        assert_eq!(page.document().get(about).style.opacity, Some(1.0));
        assert_eq!(page.document().get(about).style.translate_y, Some(0.0));
    }

    #[test]
    fn throttled_dispatch_observes_stale_position() {
        let mut page = open_default();
        let button = page.document().query(".back-to-top").unwrap();

        page.dispatch(Event::Scroll { y: 400.0 });
        assert!(page.document().get(button).has_class("active"));

        // Within the cooldown the gated handler drops the event; parallax
        // (ungated) still tracks it.
        page.dispatch(Event::Scroll { y: 0.0 });
        assert!(page.document().get(button).has_class("active"));
        let hero = page.document().query(".hero").unwrap();
        assert_eq!(page.document().get(hero).style.translate_y, Some(0.0));

        page.advance(100);
        page.dispatch(Event::Scroll { y: 0.0 });
        assert!(!page.document().get(button).has_class("active"));
    }

    #[test]
    fn typing_enabled_drives_hero_title() {
        let mut tuning = Tuning::default();
        tuning.typing.enabled = true;
        tuning.typing.texts = vec!["Hi".to_string()];
        let mut page = Page::open(
            demo_document(),
            markup::layout::VIEWPORT_HEIGHT,
            Capabilities::default(),
            &tuning,
        );
        let hero_title = page.document().query(".hero-title").unwrap();
        page.advance(0);
        assert_eq!(page.document().get(hero_title).text, "H");
        page.advance(100);
        assert_eq!(page.document().get(hero_title).text, "Hi");
    }

    #[test]
    fn close_cancels_all_pending_timers() {
        let mut page = open_default();
        let form = page.document().element_by_id("contact-form").unwrap();
        let btn = page.document().query(".download-btn").unwrap();
        page.dispatch(Event::Scroll { y: 100.0 });
        page.dispatch(Event::Click(btn));
        page.dispatch(Event::Submit(form));
        assert!(page.pending_timers() >= 3);
        page.close();
        assert_eq!(page.pending_timers(), 0);
        // Time passing after close changes nothing.
        page.advance(5000);
        assert_eq!(*page.form_state(), SubmitState::Submitting);
    }

    #[test]
    fn initial_pass_reveals_above_the_fold_content() {
        let page = open_default();
        // The About section title sits inside the initial viewport, so the
        // ready-time pass reveals exactly that one element.
        let snap = page.snapshot();
        assert_eq!(snap.reveals_total, 9);
        assert_eq!(snap.reveals_pending, 8);
        assert!(!snap.back_to_top_active);
    }
}

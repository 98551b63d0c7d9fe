//! End-to-end visits against the demo page.
//!
//! These tests drive a [`Page`] the way a visitor's browser would — scroll
//! events a few per frame, clicks, a form submission — and assert on the
//! externally visible outcome: DOM state, console lines, history entries,
//! and the virtual clock.

use tableside::config::Tuning;
use tableside::markup::{self, layout};
use tableside::output::Level;
use tableside::page::{Event, Page};
use tableside::viewport::{Capabilities, DetectionMode};

fn open_demo() -> Page {
    Page::open(
        markup::demo_document(),
        layout::VIEWPORT_HEIGHT,
        Capabilities::default(),
        &Tuning::default(),
    )
}

/// Scroll from the top to `target` in 100 px steps, waiting out the throttle
/// window between events so every step is handled.
fn scroll_down_to(page: &mut Page, target: f32) {
    let mut y = 0.0;
    while y < target {
        y = (y + 100.0).min(target);
        page.dispatch(Event::Scroll { y });
        page.advance(100);
    }
}

#[test]
fn full_scroll_through_reveals_everything() {
    let mut page = open_demo();
    scroll_down_to(&mut page, 2600.0);

    let snap = page.snapshot();
    assert_eq!(snap.detection, DetectionMode::Observer);
    assert_eq!(snap.reveals_pending, 0, "all watched elements revealed");
    assert_eq!(snap.images_pending, 0, "both deferred images loaded");
    assert!(snap.back_to_top_active);

    // Reveals are one-way: returning to the top leaves everything visible.
    page.dispatch(Event::Scroll { y: 0.0 });
    let about = page.document().query(".about-content").unwrap();
    assert_eq!(page.document().get(about).style.opacity, Some(1.0));
    assert!(!page.snapshot().back_to_top_active);
}

#[test]
fn contact_items_cascade_with_staggered_delays() {
    let mut page = open_demo();
    scroll_down_to(&mut page, 2600.0);

    let delays: Vec<_> = page
        .document()
        .query_all(".contact-item")
        .into_iter()
        .map(|n| page.document().get(n).style.transition_delay.clone())
        .collect();
    assert_eq!(
        delays,
        vec![
            Some("0.0s".to_string()),
            Some("0.1s".to_string()),
            Some("0.2s".to_string()),
        ]
    );
}

#[test]
fn rapid_scrolling_is_throttled_but_parallax_is_not() {
    let mut page = open_demo();

    // 10 events in one throttle window; only the first reaches the gated
    // handler, so the back-to-top button stays stale.
    for step in 1..=10 {
        page.dispatch(Event::Scroll {
            y: step as f32 * 60.0,
        });
        page.advance(5);
    }
    let snap = page.snapshot();
    assert_eq!(snap.scroll_y, 600.0);
    assert!(!snap.back_to_top_active, "gated handler saw only y=60");

    // The hero tracked every event.
    let hero = page.document().query(".hero").unwrap();
    assert_eq!(page.document().get(hero).style.translate_y, Some(-300.0));

    // Once the window expires the next event lands.
    page.advance(100);
    page.dispatch(Event::Scroll { y: 600.0 });
    assert!(page.snapshot().back_to_top_active);
}

#[test]
fn menu_visit_navigates_and_closes_the_menu() {
    let mut page = open_demo();

    let toggle = page.document().query(".menu-toggle").unwrap();
    page.dispatch(Event::Click(toggle));
    assert!(page.snapshot().menu_open);
    let nav_menu = page.document().query(".nav-menu").unwrap();
    assert!(page.document().get(nav_menu).has_class("active"));

    // Click the contact link: the menu closes and the viewport lands below
    // the header.
    let contact_link = *page.document().children(nav_menu).last().unwrap();
    page.dispatch(Event::Click(contact_link));

    let snap = page.snapshot();
    assert!(!snap.menu_open);
    assert_eq!(snap.history, vec!["#contact".to_string()]);
    assert_eq!(
        page.viewport().scroll_y,
        layout::CONTACT_TITLE_TOP - 60.0 - layout::HEADER_HEIGHT
    );
}

#[test]
fn download_and_submit_settle_on_their_own_clocks() {
    let mut page = open_demo();

    let button = page.document().query(".download-btn").unwrap();
    page.dispatch(Event::Click(button));
    assert_eq!(page.document().get(button).text, "Downloading...");

    // The form is submitted 500 ms into the download's loading state.
    page.advance(500);
    let form = page.document().element_by_id("contact-form").unwrap();
    page.dispatch(Event::Submit(form));
    assert_eq!(page.snapshot().form_state, "submitting");

    // Download restores at t=2000, form settles at t=2500.
    page.advance(1500);
    assert_eq!(page.document().get(button).text, "Download Menu (PDF)");
    assert_eq!(page.snapshot().form_state, "submitting");

    page.advance(500);
    assert_eq!(page.snapshot().form_state, "success");
    assert_eq!(page.now_ms(), 2500);

    let logs = page.console().messages(Level::Log);
    assert!(logs.contains(&"Menu PDF download initiated"));
    assert!(logs.contains(&"Form submitted successfully"));
}

#[test]
fn resubmission_supersedes_the_first_attempt() {
    let mut page = open_demo();
    let form = page.document().element_by_id("contact-form").unwrap();

    page.dispatch(Event::Submit(form));
    page.advance(1000);
    page.dispatch(Event::Submit(form));

    // The first attempt's deadline passes without a settle.
    page.advance(1000);
    assert_eq!(page.snapshot().form_state, "submitting");

    page.advance(1000);
    assert_eq!(page.snapshot().form_state, "success");
    assert_eq!(
        page.console().messages(Level::Log).iter().filter(|m| **m == "Form submitted successfully").count(),
        1
    );
}

#[test]
fn eager_fallback_loads_images_and_reveals_by_polling() {
    let mut page = Page::open(
        markup::demo_document(),
        layout::VIEWPORT_HEIGHT,
        Capabilities {
            intersection_observer: false,
        },
        &Tuning::default(),
    );
    let snap = page.snapshot();
    assert_eq!(snap.detection, DetectionMode::Eager);
    assert_eq!(snap.images_pending, 0, "deferred images load at open");

    // Polling reveal still brings the about section in on scroll.
    let about = page.document().query(".about-content").unwrap();
    assert_eq!(page.document().get(about).style.opacity, None);
    scroll_down_to(&mut page, layout::ABOUT_CONTENT_TOP);
    assert_eq!(page.document().get(about).style.opacity, Some(1.0));
}

#[test]
fn sparse_config_reshapes_timing() {
    let tuning: Tuning = toml::from_str(
        "[scroll]\nback_to_top_threshold = 100.0\n\n[form]\nsettle_delay_ms = 50\n",
    )
    .unwrap();
    tuning.validate().unwrap();

    let mut page = Page::open(
        markup::demo_document(),
        layout::VIEWPORT_HEIGHT,
        Capabilities::default(),
        &tuning,
    );
    page.dispatch(Event::Scroll { y: 100.0 });
    assert!(page.snapshot().back_to_top_active);

    let form = page.document().element_by_id("contact-form").unwrap();
    page.dispatch(Event::Submit(form));
    page.advance(50);
    assert_eq!(page.snapshot().form_state, "success");
}

#[test]
fn close_leaves_no_live_timers() {
    let mut page = open_demo();
    let form = page.document().element_by_id("contact-form").unwrap();
    let button = page.document().query(".download-btn").unwrap();

    page.dispatch(Event::Scroll { y: 500.0 });
    page.dispatch(Event::Click(button));
    page.dispatch(Event::Submit(form));
    assert!(page.pending_timers() >= 3);

    page.close();
    assert_eq!(page.pending_timers(), 0);
}

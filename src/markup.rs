//! Markup templates and the demo document.
//!
//! HTML is generated with [maud](https://maud.lambda.xyz/) — compile-time
//! checked, type-safe, auto-escaped — matching the rest of the stack's
//! zero-runtime-template approach.
//!
//! Two representations of the same page live here and must stay in sync:
//!
//! - **Templates** ([`render_page`], [`render_header`], [`render_footer`]):
//!   the HTML the `render` command writes to disk. Header and footer are the
//!   fixed fragments the runtime injects into the `#header` / `#footer`
//!   placeholders — brand block, menu toggle, nav links
//!   (`#home #about #menu #contact`), social link placeholders, copyright.
//! - **Demo document** ([`demo_document`], [`inject_header`],
//!   [`inject_footer`]): the same page as a [`Document`] node tree with
//!   hand-assigned geometry, used by the `simulate` command and the test
//!   suite. Geometry is written down once in [`layout`] so tests can scroll
//!   to known positions.

use crate::dom::{Document, Element, NodeId};
use maud::{DOCTYPE, Markup, html};

pub const BRAND: &str = "Ember & Oak";
const CSS: &str = include_str!("../static/style.css");

/// Demo page geometry, px from the document top. The interactivity layer
/// never computes layout; these are the numbers a browser would have handed
/// it, frozen so simulations and tests are deterministic.
pub mod layout {
    pub const VIEWPORT_HEIGHT: f32 = 800.0;
    pub const HEADER_HEIGHT: f32 = 80.0;
    pub const HERO_TOP: f32 = 0.0;
    pub const HERO_HEIGHT: f32 = 600.0;
    pub const ABOUT_TITLE_TOP: f32 = 660.0;
    pub const ABOUT_CONTENT_TOP: f32 = 740.0;
    pub const ABOUT_CONTENT_HEIGHT: f32 = 320.0;
    pub const MENU_TITLE_TOP: f32 = 1160.0;
    pub const PDF_TOP: f32 = 1240.0;
    pub const PDF_HEIGHT: f32 = 420.0;
    pub const DISH_IMG_TOP: f32 = 1700.0;
    pub const DISH_IMG_HEIGHT: f32 = 240.0;
    pub const CONTACT_TITLE_TOP: f32 = 2040.0;
    pub const CONTACT_INFO_TOP: f32 = 2120.0;
    pub const CONTACT_INFO_HEIGHT: f32 = 360.0;
    pub const CONTACT_ITEM_HEIGHT: f32 = 100.0;
    pub const FORM_TOP: f32 = 2560.0;
    pub const FORM_HEIGHT: f32 = 360.0;
    pub const INTERIOR_IMG_TOP: f32 = 2960.0;
    pub const INTERIOR_IMG_HEIGHT: f32 = 240.0;
    pub const FOOTER_TOP: f32 = 3240.0;
    pub const FOOTER_HEIGHT: f32 = 220.0;
}

// ============================================================================
// Templates
// ============================================================================

/// The injected header fragment: brand block, menu toggle, nav links.
pub fn render_header() -> Markup {
    html! {
        div.mobile-header {
            div.logo { (BRAND) }
            button.menu-toggle aria-label="Toggle navigation menu" aria-expanded="false" {
                span.menu-icon {}
            }
        }
        nav.nav-menu aria-label="Main navigation" {
            a href="#home" { "Home" }
            a href="#about" { "About" }
            a href="#menu" { "Menu" }
            a href="#contact" { "Contact" }
        }
    }
}

/// The injected footer fragment: brand, social placeholders, copyright.
pub fn render_footer() -> Markup {
    html! {
        div.footer-content {
            div.footer-logo { (BRAND) }
            div.social-links {
                a href="#" aria-label="Facebook" { span.icon-facebook {} }
                a href="#" aria-label="Instagram" { span.icon-instagram {} }
                a href="#" aria-label="Twitter" { span.icon-twitter {} }
            }
            p.copyright { "© 2026 " (BRAND) ". All rights reserved." }
        }
    }
}

/// Base HTML document shell shared by every rendered page.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (maud::PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// The full marketing page. Header and footer are rendered pre-injected —
/// the static file should look the way the page looks after script ran.
pub fn render_page() -> Markup {
    let content = html! {
        header #header { (render_header()) }
        main {
            section #home .hero {
                div.hero-content {
                    h1.hero-title { "Welcome to " (BRAND) }
                    p.hero-tagline { "Wood-fired cooking, neighborhood comfort." }
                }
            }
            section #about {
                h2.section-title { "About" }
                div.about-content {
                    p { "A small room, a big hearth, and a menu that follows the seasons." }
                }
            }
            section #menu {
                h2.section-title { "Menu" }
                div.pdf-container {
                    p { "Browse the current menu, updated weekly." }
                    a.download-btn href="/menu.pdf" { "Download Menu (PDF)" }
                }
                img.lazy data-src="images/dish-hearth.jpg" alt="Hearth-roasted vegetables";
            }
            section #contact {
                h2.section-title { "Contact" }
                div.contact-info {
                    div.contact-item { "12 Garrison Lane" }
                    div.contact-item { "Tue–Sun, 5pm–11pm" }
                    div.contact-item { "(555) 014-9072" }
                }
                form #contact-form {
                    input type="text" name="name" placeholder="Name";
                    input type="email" name="email" placeholder="Email";
                    textarea name="message" placeholder="Message" {}
                    button type="submit" { "Send" }
                }
                img.lazy data-src="images/dining-room.jpg" alt="Dining room";
            }
        }
        button.back-to-top aria-label="Back to top" { "↑" }
        footer #footer { (render_footer()) }
    };
    base_document(BRAND, content)
}

// ============================================================================
// Demo document
// ============================================================================

/// Inject the header fragment into the `#header` placeholder: brand block,
/// menu toggle button, nav menu with the four anchor links. No-op when the
/// placeholder is missing.
pub fn inject_header(document: &mut Document) {
    let Some(header) = document.element_by_id("header") else {
        return;
    };
    let wrap = document.append(header, Element::new("div").with_class("mobile-header"));
    document.append(wrap, Element::new("div").with_class("logo").with_text(BRAND));
    document.append(
        wrap,
        Element::new("button")
            .with_class("menu-toggle")
            .with_attr("aria-label", "Toggle navigation menu"),
    );
    let nav = document.append(
        header,
        Element::new("nav")
            .with_class("nav-menu")
            .with_attr("aria-label", "Main navigation"),
    );
    for (href, label) in [
        ("#home", "Home"),
        ("#about", "About"),
        ("#menu", "Menu"),
        ("#contact", "Contact"),
    ] {
        document.append(nav, Element::new("a").with_attr("href", href).with_text(label));
    }
}

/// Inject the footer fragment into the `#footer` placeholder.
pub fn inject_footer(document: &mut Document) {
    let Some(footer) = document.element_by_id("footer") else {
        return;
    };
    let wrap = document.append(footer, Element::new("div").with_class("footer-content"));
    document.append(wrap, Element::new("div").with_class("footer-logo").with_text(BRAND));
    let social = document.append(wrap, Element::new("div").with_class("social-links"));
    for label in ["Facebook", "Instagram", "Twitter"] {
        document.append(
            social,
            Element::new("a").with_attr("href", "#").with_attr("aria-label", label),
        );
    }
    document.append(
        wrap,
        Element::new("p")
            .with_class("copyright")
            .with_text(&format!("© 2026 {BRAND}. All rights reserved.")),
    );
}

/// Build the demo page as a document tree with [`layout`] geometry. Header
/// and footer placeholders start empty; [`inject_header`] / [`inject_footer`]
/// fill them on page ready, the way the live page does.
pub fn demo_document() -> Document {
    use layout::*;

    let mut doc = Document::new();
    let root = doc.root();

    doc.append(root, Element::new("header").with_id("header").with_box(0.0, HEADER_HEIGHT));

    let main = doc.append(root, Element::new("main"));

    let hero = doc.append(
        main,
        Element::new("section").with_id("home").with_class("hero").with_box(HERO_TOP, HERO_HEIGHT),
    );
    let hero_content = doc.append(hero, Element::new("div").with_class("hero-content"));
    doc.append(
        hero_content,
        Element::new("h1")
            .with_class("hero-title")
            .with_text(&format!("Welcome to {BRAND}"))
            .with_box(HERO_TOP + 200.0, 60.0),
    );

    let about = doc.append(
        main,
        Element::new("section").with_id("about").with_box(ABOUT_TITLE_TOP - 60.0, 500.0),
    );
    doc.append(
        about,
        Element::new("h2").with_class("section-title").with_text("About").with_box(ABOUT_TITLE_TOP, 40.0),
    );
    doc.append(
        about,
        Element::new("div")
            .with_class("about-content")
            .with_box(ABOUT_CONTENT_TOP, ABOUT_CONTENT_HEIGHT),
    );

    let menu = doc.append(
        main,
        Element::new("section").with_id("menu").with_box(MENU_TITLE_TOP - 60.0, 880.0),
    );
    doc.append(
        menu,
        Element::new("h2").with_class("section-title").with_text("Menu").with_box(MENU_TITLE_TOP, 40.0),
    );
    let pdf = doc.append(
        menu,
        Element::new("div").with_class("pdf-container").with_box(PDF_TOP, PDF_HEIGHT),
    );
    doc.append(
        pdf,
        Element::new("a")
            .with_class("download-btn")
            .with_attr("href", "/menu.pdf")
            .with_text("Download Menu (PDF)")
            .with_box(PDF_TOP + 300.0, 48.0),
    );
    doc.append(
        menu,
        Element::new("img")
            .with_class("lazy")
            .with_attr("data-src", "images/dish-hearth.jpg")
            .with_box(DISH_IMG_TOP, DISH_IMG_HEIGHT),
    );

    let contact = doc.append(
        main,
        Element::new("section").with_id("contact").with_box(CONTACT_TITLE_TOP - 60.0, 1160.0),
    );
    doc.append(
        contact,
        Element::new("h2")
            .with_class("section-title")
            .with_text("Contact")
            .with_box(CONTACT_TITLE_TOP, 40.0),
    );
    let info = doc.append(
        contact,
        Element::new("div")
            .with_class("contact-info")
            .with_box(CONTACT_INFO_TOP, CONTACT_INFO_HEIGHT),
    );
    for (i, text) in ["12 Garrison Lane", "Tue–Sun, 5pm–11pm", "(555) 014-9072"]
        .iter()
        .enumerate()
    {
        doc.append(
            info,
            Element::new("div")
                .with_class("contact-item")
                .with_text(text)
                .with_box(CONTACT_INFO_TOP + 20.0 + i as f32 * 110.0, CONTACT_ITEM_HEIGHT),
        );
    }
    let form = doc.append(
        contact,
        Element::new("form").with_id("contact-form").with_box(FORM_TOP, FORM_HEIGHT),
    );
    doc.append(form, Element::new("input").with_attr("name", "name"));
    doc.append(form, Element::new("input").with_attr("name", "email"));
    doc.append(form, Element::new("textarea").with_attr("name", "message"));
    doc.append(
        contact,
        Element::new("img")
            .with_class("lazy")
            .with_attr("data-src", "images/dining-room.jpg")
            .with_box(INTERIOR_IMG_TOP, INTERIOR_IMG_HEIGHT),
    );

    doc.append(
        root,
        Element::new("button").with_class("back-to-top").with_text("↑").with_box(0.0, 48.0),
    );
    doc.append(root, Element::new("footer").with_id("footer").with_box(FOOTER_TOP, FOOTER_HEIGHT));

    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_fragment_has_the_four_nav_links() {
        let html = render_header().into_string();
        for href in ["#home", "#about", "#menu", "#contact"] {
            assert!(html.contains(&format!(r#"href="{href}""#)), "missing {href}");
        }
        assert!(html.contains("menu-toggle"));
        assert!(html.contains(r#"aria-expanded="false""#));
    }

    #[test]
    fn footer_fragment_has_social_placeholders() {
        let html = render_footer().into_string();
        for label in ["Facebook", "Instagram", "Twitter"] {
            assert!(html.contains(label));
        }
        assert!(html.contains("All rights reserved"));
    }

    #[test]
    fn page_starts_with_doctype_and_embeds_styles() {
        let html = render_page().into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("back-to-top"));
    }

    #[test]
    fn embedded_stylesheet_is_not_entity_escaped() {
        // Quoted font names must survive into the <style> block verbatim;
        // an escaped stylesheet is silently dropped by the browser.
        let html = render_page().into_string();
        assert!(html.contains(r#"font-family: Georgia, "Times New Roman", serif;"#));
        assert!(!html.contains("&quot;"));
    }

    #[test]
    fn page_defers_image_sources() {
        let html = render_page().into_string();
        assert!(html.contains(r#"data-src="images/dish-hearth.jpg""#));
        assert!(html.contains(r#"class="lazy""#));
    }

    #[test]
    fn brand_is_escaped_correctly() {
        // "Ember & Oak" must render with an escaped ampersand.
        let html = render_header().into_string();
        assert!(html.contains("Ember &amp; Oak"));
    }

    #[test]
    fn demo_document_matches_template_structure() {
        let doc = demo_document();
        for selector in [
            "#header", "#footer", ".hero", ".back-to-top", ".download-btn",
            ".about-content", ".pdf-container", ".contact-info", ".section-title",
        ] {
            assert!(doc.query(selector).is_some(), "demo document missing {selector}");
        }
        assert_eq!(doc.query_all(".contact-item").len(), 3);
        assert_eq!(doc.query_all(".lazy").len(), 2);
    }

    #[test]
    fn placeholders_empty_until_injected() {
        let mut doc = demo_document();
        assert!(doc.query(".menu-toggle").is_none());
        inject_header(&mut doc);
        inject_footer(&mut doc);
        assert!(doc.query(".menu-toggle").is_some());
        let nav = doc.query(".nav-menu").unwrap();
        assert_eq!(doc.children(nav).len(), 4);
        assert!(doc.query(".social-links").is_some());
    }

    #[test]
    fn injection_tolerates_missing_placeholders() {
        let mut doc = Document::new();
        inject_header(&mut doc);
        inject_footer(&mut doc);
        assert!(doc.query(".nav-menu").is_none());
    }
}

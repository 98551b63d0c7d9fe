use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tableside::page::{Event, Page, PageSnapshot};
use tableside::viewport::Capabilities;
use tableside::{config, markup, output};

#[derive(Parser)]
#[command(name = "tableside")]
#[command(about = "Restaurant page interactivity runtime")]
#[command(long_about = "\
Restaurant page interactivity runtime

Runs the marketing page's front-end behaviors — header/footer injection,
mobile menu, scroll reveals, hero parallax, lazy images, contact-form stub,
back-to-top indicator — headlessly, against an owned document model and a
virtual millisecond clock. Scroll, click, and submit events go in; DOM and
state changes come out, deterministically.

Commands:

  render     Write the static page (HTML with embedded styles) to disk
  simulate   Drive the demo page through a scripted visit and print the
             resulting page state and console
  gen-config Print a documented tableside.toml with all tuning options

Timing constants (throttle interval, reveal thresholds, settle delays) come
from an optional tableside.toml; defaults match the shipped page.")]
#[command(version)]
struct Cli {
    /// Tuning config file (optional; defaults apply when absent)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the static page to the output directory
    Render {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Run a scripted visit against the demo page and report the outcome
    Simulate {
        /// Emit the final state as JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Disable visibility detection (exercise the eager fallback)
        #[arg(long)]
        no_observer: bool,
    },
    /// Print a stock tableside.toml with all options documented
    GenConfig,
}

#[derive(Serialize)]
struct SimulationResult<'a> {
    snapshot: PageSnapshot,
    console: &'a [output::ConsoleLine],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let tuning = match &cli.config {
        Some(path) => config::Tuning::load(path)?,
        None => config::Tuning::default(),
    };

    match cli.command {
        Command::Render { output } => {
            std::fs::create_dir_all(&output)?;
            let index = output.join("index.html");
            std::fs::write(&index, markup::render_page().into_string())?;
            println!("Wrote {}", index.display());
        }
        Command::Simulate { json, no_observer } => {
            let caps = Capabilities {
                intersection_observer: !no_observer,
            };
            let mut page = Page::open(
                markup::demo_document(),
                markup::layout::VIEWPORT_HEIGHT,
                caps,
                &tuning,
            );
            run_scripted_visit(&mut page);
            let snapshot = page.snapshot();
            if json {
                let result = SimulationResult {
                    snapshot,
                    console: page.console().lines(),
                };
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                output::print_report(&snapshot, page.console().lines());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// A typical visit: read the hero, scroll the page, open the mobile menu and
/// jump to the contact section, download the menu, send the form, scroll back
/// up. Scroll events arrive every 20 ms, well inside the throttle window.
fn run_scripted_visit(page: &mut Page) {
    for step in 1..=20 {
        page.dispatch(Event::Scroll {
            y: step as f32 * 100.0,
        });
        page.advance(20);
    }

    if let Some(toggle) = page.document().query(".menu-toggle") {
        page.dispatch(Event::Click(toggle));
        page.advance(200);
    }
    if let Some(nav) = page.document().query(".nav-menu") {
        // The last nav link is the contact anchor.
        if let Some(&contact_link) = page.document().children(nav).last() {
            page.dispatch(Event::Click(contact_link));
            page.advance(200);
        }
    }

    if let Some(button) = page.document().query(".download-btn") {
        page.dispatch(Event::Click(button));
    }
    if let Some(form) = page.document().element_by_id("contact-form") {
        page.dispatch(Event::Submit(form));
    }
    // Long enough for the download restore and the form settle.
    page.advance(2500);

    page.dispatch(Event::Scroll { y: 0.0 });
    page.advance(200);
}

//! Runtime tuning configuration.
//!
//! Every timing constant and threshold in the interactivity layer is
//! adjustable through an optional `tableside.toml`. Stock defaults are the
//! shipped page's behavior; a config file overrides just the values it
//! names — a sparse file with a single key is valid. Unknown keys are
//! rejected to catch typos early.
//!
//! ```toml
//! # All options are optional — defaults shown
//!
//! [scroll]
//! throttle_ms = 100              # Min interval between gated scroll passes
//! back_to_top_threshold = 300.0  # Button shows at and past this offset (px)
//! poll_reveal_margin = 150.0     # Polling reveal margin from viewport bottom
//! parallax_rate = -0.5           # Hero translation per scrolled px
//!
//! [reveal]
//! threshold = 0.1                # Visible fraction that triggers a reveal
//! bottom_margin = 50.0           # Viewport bottom shrink for detection (px)
//! duration_secs = 0.6            # Reveal transition duration
//! stagger_secs = 0.1             # Contact-item cascade step
//!
//! [form]
//! settle_delay_ms = 2000         # Simulated submission round-trip
//!
//! [download]
//! restore_delay_ms = 2000        # Loading state duration on the PDF button
//!
//! [typing]
//! enabled = false                # Hero typing animation
//! base_speed_ms = 100            # Per-character delay while typing
//! texts = ["Welcome to Ember & Oak", "Wood-Fired Cooking"]
//! ```

use crate::dispatch::DispatchSettings;
use crate::reveal::RevealSettings;
use crate::typing::TypingSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full tuning set. Each table and each field defaults independently, so
/// config files can be sparse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Tuning {
    pub scroll: ScrollTuning,
    pub reveal: RevealTuning,
    pub form: FormTuning,
    pub download: DownloadTuning,
    pub typing: TypingTuning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ScrollTuning {
    pub throttle_ms: u64,
    pub back_to_top_threshold: f32,
    pub poll_reveal_margin: f32,
    pub parallax_rate: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        ScrollTuning {
            throttle_ms: 100,
            back_to_top_threshold: 300.0,
            poll_reveal_margin: 150.0,
            parallax_rate: -0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RevealTuning {
    pub threshold: f32,
    pub bottom_margin: f32,
    pub duration_secs: f32,
    pub stagger_secs: f32,
}

impl Default for RevealTuning {
    fn default() -> Self {
        RevealTuning {
            threshold: 0.1,
            bottom_margin: 50.0,
            duration_secs: 0.6,
            stagger_secs: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct FormTuning {
    pub settle_delay_ms: u64,
}

impl Default for FormTuning {
    fn default() -> Self {
        FormTuning {
            settle_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct DownloadTuning {
    pub restore_delay_ms: u64,
}

impl Default for DownloadTuning {
    fn default() -> Self {
        DownloadTuning {
            restore_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct TypingTuning {
    pub enabled: bool,
    pub base_speed_ms: u64,
    pub texts: Vec<String>,
}

impl Default for TypingTuning {
    fn default() -> Self {
        TypingTuning {
            enabled: false,
            base_speed_ms: 100,
            texts: vec![
                "Welcome to Ember & Oak".to_string(),
                "Wood-Fired Cooking".to_string(),
            ],
        }
    }
}

impl Tuning {
    /// Load from a TOML file, validate, and return. Missing tables and keys
    /// fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let tuning: Tuning = toml::from_str(&content)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scroll.throttle_ms == 0 {
            return Err(ConfigError::Validation(
                "scroll.throttle_ms must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(format!(
                "reveal.threshold must be within 0.0–1.0, got {}",
                self.reveal.threshold
            )));
        }
        if self.reveal.duration_secs <= 0.0 {
            return Err(ConfigError::Validation(
                "reveal.duration_secs must be positive".to_string(),
            ));
        }
        if self.form.settle_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "form.settle_delay_ms must be positive".to_string(),
            ));
        }
        if self.typing.enabled && self.typing.base_speed_ms == 0 {
            return Err(ConfigError::Validation(
                "typing.base_speed_ms must be positive when typing is enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn reveal_settings(&self) -> RevealSettings {
        RevealSettings {
            threshold: self.reveal.threshold,
            bottom_margin: self.reveal.bottom_margin,
            duration_secs: self.reveal.duration_secs,
            stagger_secs: self.reveal.stagger_secs,
        }
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            throttle_ms: self.scroll.throttle_ms,
            back_to_top_threshold: self.scroll.back_to_top_threshold,
            reveal_margin: self.scroll.poll_reveal_margin,
        }
    }

    pub fn typing_settings(&self) -> TypingSettings {
        TypingSettings {
            base_speed_ms: self.typing.base_speed_ms,
            ..TypingSettings::default()
        }
    }
}

/// The documented stock config, printed by `tableside gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = Tuning::default();
    format!(
        "\
# tableside.toml — runtime tuning. All options optional; defaults shown.

[scroll]
# Minimum interval between gated scroll handler passes, in ms.
throttle_ms = {throttle}
# The back-to-top button shows at and past this scroll offset, in px.
back_to_top_threshold = {back_to_top:.1}
# Polling reveal fires when an element's top is this far above the
# viewport bottom, in px.
poll_reveal_margin = {poll_margin:.1}
# Hero translation per scrolled px (negative drifts the hero upward).
parallax_rate = {parallax:.1}

[reveal]
# Fraction of an element that must be visible before it reveals.
threshold = {threshold:.1}
# Viewport bottom shrink during visibility detection, in px.
bottom_margin = {bottom_margin:.1}
# Reveal transition duration, in seconds.
duration_secs = {duration:.1}
# Per-child delay step for the contact-item cascade, in seconds.
stagger_secs = {stagger:.1}

[form]
# Simulated submission round-trip, in ms.
settle_delay_ms = {settle}

[download]
# How long the PDF button stays in its loading state, in ms.
restore_delay_ms = {restore}

[typing]
# Hero typing animation (off on the shipped page).
enabled = {typing_enabled}
# Per-character delay while typing, in ms. Deleting runs at half this.
base_speed_ms = {typing_speed}
# Strings cycled through in the hero heading.
texts = [{texts}]
",
        throttle = defaults.scroll.throttle_ms,
        back_to_top = defaults.scroll.back_to_top_threshold,
        poll_margin = defaults.scroll.poll_reveal_margin,
        parallax = defaults.scroll.parallax_rate,
        threshold = defaults.reveal.threshold,
        bottom_margin = defaults.reveal.bottom_margin,
        duration = defaults.reveal.duration_secs,
        stagger = defaults.reveal.stagger_secs,
        settle = defaults.form.settle_delay_ms,
        restore = defaults.download.restore_delay_ms,
        typing_enabled = defaults.typing.enabled,
        typing_speed = defaults.typing.base_speed_ms,
        texts = defaults
            .typing
            .texts
            .iter()
            .map(|t| format!("{t:?}"))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

use std::path::PathBuf;

use lexipad_core::render::GlyphLayout;
use lexipad_hal_linux::platform::display::PanelPins;

const DEFAULT_FONT: &str = "unifont.bin";
const DEFAULT_DB: &str = "dict/ecdict.db";

/// Host settings, read from `LEXIPAD_*` environment variables.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostConfig {
    pub font_path: PathBuf,
    pub font_layout: GlyphLayout,
    pub db_path: PathBuf,
    pub pins: PanelPins,
    /// The panel's backlight line is on/off only; there is no dimming.
    pub backlight: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from(DEFAULT_FONT),
            font_layout: GlyphLayout::Unifont,
            db_path: PathBuf::from(DEFAULT_DB),
            pins: PanelPins::default(),
            backlight: true,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |name: &str, default: u32| {
            lookup(name)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(default)
        };

        Self {
            font_path: lookup("LEXIPAD_FONT").map_or(defaults.font_path, PathBuf::from),
            font_layout: lookup("LEXIPAD_FONT_LAYOUT")
                .and_then(|v| parse_layout(&v))
                .unwrap_or(defaults.font_layout),
            db_path: lookup("LEXIPAD_DB").map_or(defaults.db_path, PathBuf::from),
            pins: PanelPins {
                chip: lookup("LEXIPAD_GPIOCHIP").unwrap_or(defaults.pins.chip),
                sid: number("LEXIPAD_PIN_SID", defaults.pins.sid),
                sclk: number("LEXIPAD_PIN_SCLK", defaults.pins.sclk),
                backlight: number("LEXIPAD_PIN_BLA", defaults.pins.backlight),
            },
            backlight: lookup("LEXIPAD_BACKLIGHT")
                .and_then(|v| parse_switch(&v))
                .unwrap_or(defaults.backlight),
        }
    }
}

fn parse_layout(value: &str) -> Option<GlyphLayout> {
    match value.trim().to_ascii_lowercase().as_str() {
        "unifont" => Some(GlyphLayout::Unifont),
        "packed" => Some(GlyphLayout::Packed),
        _ => None,
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

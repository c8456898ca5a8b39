//! Viewer settings.
//!
//! Settings come from a TOML file (`ntview.toml` unless the binary is told
//! otherwise) and can be changed at runtime through the setters, which is
//! how a GUI's slider and scanline field feed in.
//!
//! ```toml
//! refresh_rate = 4        # redraw every 5th refresh
//! scanline = 120          # only redraw when asked at scanline 120
//! show_scroll_lines = true
//! attribute_view = false
//! hide_palette = false
//! honor_cache = false
//! ```

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_REFRESH_RATE: u8 = 25;
pub const MAX_SCANLINE: u16 = 999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Refreshes to skip between redraws, 0-25. Lower is faster.
    pub refresh_rate: u8,

    /// Scanline redraws are pinned to. `None` redraws whenever asked.
    pub scanline: Option<u16>,

    /// Overlay the current scroll position on the composed view.
    pub show_scroll_lines: bool,

    /// Replace every tile with a checkerboard to show attribute regions.
    #[serde(alias = "show_attributes")]
    pub attribute_view: bool,

    /// Draw with the forced greyscale palette instead of palette RAM.
    #[serde(alias = "ignore_palette")]
    pub hide_palette: bool,

    /// Skip tiles whose bytes are unchanged since the last pass. Off by
    /// default: every tile is redrawn on every pass.
    pub honor_cache: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            refresh_rate: 1,
            scanline: Some(0),
            show_scroll_lines: false,
            attribute_view: false,
            hide_palette: false,
            honor_cache: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let mut config: ViewerConfig = toml::from_str(text)?;
        config.set_refresh_rate(config.refresh_rate);
        if let Some(line) = config.scanline {
            config.set_scanline(line);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_toml(&fs::read_to_string(path)?)?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn set_refresh_rate(&mut self, rate: u8) {
        if rate > MAX_REFRESH_RATE {
            warn!("refresh rate {} clamped to {}", rate, MAX_REFRESH_RATE);
        }
        self.refresh_rate = rate.min(MAX_REFRESH_RATE);
    }

    pub fn set_scanline(&mut self, line: u16) {
        self.scanline = Some(if line > MAX_SCANLINE {
            warn!("scanline {} out of range, using 0", line);
            0
        } else {
            line
        });
    }

    /// Takes the scanline as typed. Empty text unpins the view; anything
    /// that isn't a scanline number pins it to 0.
    pub fn set_scanline_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.scanline = None;
            return;
        }
        match text.parse::<u16>() {
            Ok(line) => self.set_scanline(line),
            Err(_) => {
                warn!("invalid scanline {:?}, using 0", text);
                self.scanline = Some(0);
            }
        }
    }
}

use serde::{Deserialize, Serialize};

pub const MAX_PIXEL_SCALE: u16 = 16;

/// Persisted host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(rename = "pixelScale", default = "default_pixel_scale")]
    pub pixel_scale: u16,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(rename = "showOverlay", default = "default_show_overlay")]
    pub show_overlay: bool,
}

fn default_fps() -> u32 {
    60
}

fn default_pixel_scale() -> u16 {
    4
}

fn default_show_overlay() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            pixel_scale: default_pixel_scale(),
            seed: None,
            show_overlay: default_show_overlay(),
        }
    }
}

impl Config {
    /// Frame rate clamped to something a terminal can sensibly drive.
    pub fn frame_rate(&self) -> u32 {
        self.fps.clamp(1, 240)
    }

    /// Virtual pixels per cell column. Capped so a terminal-sized raster
    /// stays a few megabytes at most.
    pub fn pixel_scale(&self) -> u16 {
        self.pixel_scale.clamp(1, MAX_PIXEL_SCALE)
    }
}

/// Pixel dimensions of the drawable region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Perceived brightness in 0..=255.
    pub fn luma(self) -> u8 {
        let Rgb(r, g, b) = self;
        ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
    }
}

/// Lifecycle of the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoopState::Running => write!(f, "Running"),
            LoopState::Stopped => write!(f, "Stopped"),
        }
    }
}

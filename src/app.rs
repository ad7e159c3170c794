use crate::animation::{Animation, FrameQueue};
use crate::config::{self, LoadedConfig};
use crate::raster::Raster;
use crate::types::*;
use crate::ui::starfield::viewport_pixels;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

/// Top-level application state.
pub struct App {
    pub config: Config,
    pub animation: Animation<FrameQueue>,
    pub raster: Raster,
    pub show_overlay: bool,
    pub should_quit: bool,
    pub tick: u64,
    pub log_rx: Option<mpsc::UnboundedReceiver<String>>,
    /// Latest log line shown in the footer, auto-clears.
    pub flash_message: Option<String>,
    pub flash_until: u64,
    /// Terminal size in cells, as last reported.
    pub viewport: (u16, u16),
    pub config_path: PathBuf,
    /// Cleared when the file on disk could not be parsed.
    pub config_writable: bool,
    started_at: Instant,
}

impl App {
    pub fn new(config: Config, log_rx: Option<mpsc::UnboundedReceiver<String>>) -> Self {
        let animation = Animation::new(FrameQueue::new(), config.seed);
        Self {
            show_overlay: config.show_overlay,
            config,
            animation,
            raster: Raster::default(),
            should_quit: false,
            tick: 0,
            log_rx,
            flash_message: None,
            flash_until: 0,
            viewport: (0, 0),
            config_path: config::config_path(),
            config_writable: true,
            started_at: Instant::now(),
        }
    }

    pub fn from_loaded(
        loaded: LoadedConfig,
        log_rx: Option<mpsc::UnboundedReceiver<String>>,
    ) -> Self {
        let mut app = Self::new(loaded.config, log_rx);
        app.config_writable = loaded.writable;
        app
    }

    fn viewport_pixels(&self, cols: u16, rows: u16) -> (u32, u32) {
        viewport_pixels(Rect::new(0, 0, cols, rows), self.config.pixel_scale())
    }

    /// Start the star field on a terminal of `cols` x `rows` cells.
    pub fn start_animation(&mut self, cols: u16, rows: u16) {
        self.viewport = (cols, rows);
        let (width, height) = self.viewport_pixels(cols, rows);
        match self.animation.start(width, height, &mut self.raster) {
            Ok(()) => self.started_at = Instant::now(),
            Err(e) => log::warn!("Star field not started: {}", e),
        }
    }

    /// Terminal resized. A field that could not start on a zero-sized
    /// terminal gets another chance here.
    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        if self.animation.is_running() {
            self.viewport = (cols, rows);
            let (width, height) = self.viewport_pixels(cols, rows);
            self.animation.resize(width, height, &mut self.raster);
        } else if !self.should_quit {
            self.start_animation(cols, rows);
        }
    }

    pub fn restart_animation(&mut self) {
        match self.animation.restart(&mut self.raster) {
            Ok(()) => {
                self.started_at = Instant::now();
                self.flash("Star field restarted.".into());
            }
            Err(e) => log::warn!("Star field not restarted: {}", e),
        }
    }

    /// Milliseconds since the animation last started.
    pub fn frame_clock_ms(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }

    /// Called once per refresh tick: deliver the pending frame, if any.
    pub fn pump_frame(&mut self) -> bool {
        let Some(handle) = self.animation.scheduler_mut().take_due() else {
            return false;
        };
        let now = self.frame_clock_ms();
        self.animation.on_frame(handle, now, &mut self.raster)
    }

    pub fn toggle_overlay(&mut self) {
        self.show_overlay = !self.show_overlay;
        self.config.show_overlay = self.show_overlay;
        self.save_config();
    }

    pub fn save_config(&self) {
        if !self.config_writable {
            log::warn!(
                "Not saving settings, {} could not be parsed",
                self.config_path.display()
            );
            return;
        }
        if let Err(e) = config::save_config_to(&self.config_path, &self.config) {
            log::warn!("Failed to save config: {}", e);
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
        self.animation.stop();
    }

    pub fn flash(&mut self, message: String) {
        self.flash_message = Some(message);
        self.flash_until = self.tick + self.config.frame_rate() as u64 * 4;
    }

    /// Drain log records into the footer.
    pub fn poll_logs(&mut self) {
        let mut lines = Vec::new();
        let mut disconnected = false;
        if let Some(rx) = &mut self.log_rx {
            loop {
                match rx.try_recv() {
                    Ok(line) => lines.push(line),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }
        if let Some(line) = lines.pop() {
            self.flash(line);
        }
        if disconnected {
            self.log_rx = None;
        }
    }

    /// Footer text, if a message is still fresh.
    pub fn current_flash(&self) -> Option<&str> {
        match &self.flash_message {
            Some(msg) if self.tick < self.flash_until => Some(msg.as_str()),
            _ => None,
        }
    }
}

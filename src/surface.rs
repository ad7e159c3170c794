use crate::types::{Dimensions, Point, Rgb};

/// Drawing primitives the engine needs from its host.
pub trait Surface {
    /// Current pixel size of the drawable.
    fn dimensions(&self) -> Dimensions;

    /// Reallocate the drawable to `width` x `height` pixels.
    fn set_dimensions(&mut self, width: u32, height: u32);

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgb);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64);

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, alpha: f64, width: f64);

    /// Paint the whole drawable opaque black.
    fn clear(&mut self) {
        let Dimensions { width, height } = self.dimensions();
        self.fill_rect(Point::default(), width, height, Rgb::BLACK);
    }
}

/// Tracks the drawable's size and applies viewport changes to it.
#[derive(Debug, Clone)]
pub struct SurfaceManager {
    dimensions: Dimensions,
    listening: bool,
}

impl SurfaceManager {
    pub fn new() -> Self {
        Self {
            dimensions: Dimensions::new(0.0, 0.0),
            listening: true,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Resize the surface to the viewport and clear it to black.
    ///
    /// Returns false when resize handling has been detached.
    pub fn resize<S: Surface>(&mut self, width: u32, height: u32, surface: &mut S) -> bool {
        if !self.listening {
            return false;
        }
        surface.set_dimensions(width, height);
        self.dimensions = surface.dimensions();
        surface.clear();
        true
    }

    /// Stop reacting to resize notifications.
    pub fn detach(&mut self) {
        self.listening = false;
    }

    pub fn attach(&mut self) {
        self.listening = true;
    }
}

impl Default for SurfaceManager {
    fn default() -> Self {
        Self::new()
    }
}

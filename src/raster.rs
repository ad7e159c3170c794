use crate::surface::Surface;
use crate::types::{Dimensions, Point, Rgb};

/// An in-memory RGB canvas. Pixel `(x, y)` covers `[x, x+1) x [y, y+1)`.
#[derive(Debug, Clone, Default)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
        }
    }

    #[cfg(test)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[cfg(test)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Brightest pixel inside the clipped block `[x0, x1) x [y0, y1)`.
    pub fn max_in(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> Rgb {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let mut best = Rgb::BLACK;
        for y in y0..y1 {
            for x in x0..x1 {
                let px = self.pixels[self.index(x, y)];
                if px.luma() > best.luma() {
                    best = px;
                }
            }
        }
        best
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let idx = self.index(x as u32, y as u32);
        let dst = self.pixels[idx];
        let mix = |s: u8, d: u8| (s as f64 * alpha + d as f64 * (1.0 - alpha)).round() as u8;
        self.pixels[idx] = Rgb(mix(color.0, dst.0), mix(color.1, dst.1), mix(color.2, dst.2));
    }

    /// Pixel range whose centers may fall inside `[lo, hi]`, clipped to `limit`.
    fn span(lo: f64, hi: f64, limit: u32) -> (i64, i64) {
        let start = (lo - 0.5).ceil().max(0.0) as i64;
        let end = ((hi - 0.5).floor() as i64).min(limit as i64 - 1);
        (start, end)
    }
}

impl Surface for Raster {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width as f64, self.height as f64)
    }

    fn set_dimensions(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        *self = Raster::new(width, height);
    }

    fn fill_rect(&mut self, origin: Point, width: f64, height: f64, color: Rgb) {
        let (x0, x1) = Self::span(origin.x, origin.x + width, self.width);
        let (y0, y1) = Self::span(origin.y, origin.y + height, self.height);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let idx = self.index(x as u32, y as u32);
                self.pixels[idx] = color;
            }
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64) {
        let r = radius.max(0.0);
        let (x0, x1) = Self::span(center.x - r, center.x + r, self.width);
        let (y0, y1) = Self::span(center.y - r, center.y + r, self.height);
        let mut covered = false;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                if dx * dx + dy * dy <= r * r {
                    self.blend(x, y, color, alpha);
                    covered = true;
                }
            }
        }
        // Too small to cover a pixel center: fade the nearest pixel by area.
        if !covered {
            let coverage = (std::f64::consts::PI * r * r).min(1.0);
            self.blend(
                center.x.floor() as i64,
                center.y.floor() as i64,
                color,
                alpha * coverage,
            );
        }
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, alpha: f64, width: f64) {
        let half = (width / 2.0).max(0.5);
        let (x0, x1) = Self::span(from.x.min(to.x) - half, from.x.max(to.x) + half, self.width);
        let (y0, y1) = Self::span(from.y.min(to.y) - half, from.y.max(to.y) + half, self.height);
        let (vx, vy) = (to.x - from.x, to.y - from.y);
        let len_sq = vx * vx + vy * vy;

        for y in y0..=y1 {
            for x in x0..=x1 {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;
                let t = if len_sq > 0.0 {
                    (((px - from.x) * vx + (py - from.y) * vy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dx = px - (from.x + t * vx);
                let dy = py - (from.y + t * vy);
                if dx * dx + dy * dy <= half * half {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }
}

use crate::stars::uniform;
use crate::surface::Surface;
use crate::types::{Dimensions, Point, Rgb};
use rand::Rng;
use std::ops::Range;

pub const POOL_SIZE: usize = 5;
pub const LENGTH_RANGE: Range<f64> = 80.0..150.0;
pub const SPEED_RANGE: Range<f64> = 10.0..20.0;
pub const OPACITY_DECAY: f64 = 0.01;
pub const STROKE_WIDTH: f64 = 2.0;
/// Milliseconds between activation attempts.
pub const INTERVAL_RANGE: Range<f64> = 3000.0..6000.0;

/// One reusable streak slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    pub position: Point,
    pub length: f64,
    pub speed: f64,
    pub opacity: f64,
    pub active: bool,
}

impl ShootingStar {
    fn park<R: Rng>(&mut self, dims: Dimensions, band: f64, rng: &mut R) {
        self.position = Point::new(uniform(rng, dims.width), uniform(rng, dims.height / band));
    }

    fn tail(&self) -> Point {
        Point::new(self.position.x + self.length, self.position.y + self.length)
    }
}

/// Timer gating shooting star activations.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationClock {
    pub last_activation_ms: f64,
    pub interval_ms: f64,
}

impl ActivationClock {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            last_activation_ms: 0.0,
            interval_ms: rng.gen_range(INTERVAL_RANGE),
        }
    }

    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms - self.last_activation_ms >= self.interval_ms
    }

    fn reset<R: Rng>(&mut self, now_ms: f64, rng: &mut R) {
        self.last_activation_ms = now_ms;
        self.interval_ms = rng.gen_range(INTERVAL_RANGE);
    }
}

/// Fixed pool of shooting star slots.
#[derive(Debug, Clone)]
pub struct ShootingStarPool {
    slots: Vec<ShootingStar>,
}

impl ShootingStarPool {
    pub fn initialize<R: Rng>(dims: Dimensions, rng: &mut R) -> Self {
        let slots = (0..POOL_SIZE)
            .map(|_| {
                let mut slot = ShootingStar {
                    position: Point::default(),
                    length: rng.gen_range(LENGTH_RANGE),
                    speed: rng.gen_range(SPEED_RANGE),
                    opacity: 0.0,
                    active: false,
                };
                slot.park(dims, 2.0, rng);
                slot
            })
            .collect();
        Self { slots }
    }

    #[cfg(test)]
    pub fn slots(&self) -> &[ShootingStar] {
        &self.slots
    }

    #[cfg(test)]
    pub fn slots_mut(&mut self) -> &mut [ShootingStar] {
        &mut self.slots
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// Launch the first idle slot once the clock is due.
    ///
    /// The clock restarts whenever it is due, even if every slot is busy.
    /// Returns the index of the slot that was launched.
    pub fn try_activate<R: Rng>(
        &mut self,
        clock: &mut ActivationClock,
        now_ms: f64,
        dims: Dimensions,
        rng: &mut R,
    ) -> Option<usize> {
        if !clock.is_due(now_ms) {
            return None;
        }
        let launched = self.slots.iter().position(|s| !s.active);
        if let Some(index) = launched {
            let slot = &mut self.slots[index];
            slot.active = true;
            slot.opacity = 1.0;
            slot.park(dims, 3.0, rng);
        }
        clock.reset(now_ms, rng);
        launched
    }

    /// Move active streaks along the diagonal and fade them out.
    pub fn advance<R: Rng>(&mut self, dims: Dimensions, rng: &mut R) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.position.x += slot.speed;
            slot.position.y += slot.speed;
            slot.opacity -= OPACITY_DECAY;

            if slot.opacity <= 0.0 {
                slot.active = false;
                slot.opacity = 0.0;
                slot.park(dims, 3.0, rng);
            }
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for slot in self.slots.iter().filter(|s| s.active) {
            surface.stroke_line(
                slot.position,
                slot.tail(),
                Rgb::WHITE,
                slot.opacity,
                STROKE_WIDTH,
            );
        }
    }
}

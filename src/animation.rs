use crate::error::EngineError;
use crate::shooting::{ActivationClock, ShootingStarPool};
use crate::stars::StarField;
use crate::surface::{Surface, SurfaceManager};
use crate::types::LoopState;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-side "call me on the next display frame" primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Holds at most one pending frame until the host's refresh tick takes it.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    queued: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending frame, if any, for delivery on this tick.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.queued.take()
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.queued
    }

    #[cfg(test)]
    pub fn requested(&self) -> u64 {
        self.requested
    }

    #[cfg(test)]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.queued = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.queued == Some(handle) {
            self.queued = None;
            self.cancelled += 1;
        }
    }
}

/// Everything that lives only while the loop is running.
#[derive(Debug)]
struct Scene {
    stars: StarField,
    pool: ShootingStarPool,
    clock: ActivationClock,
}

/// The render loop: owns the surface size, both star populations, the
/// activation clock and the outstanding frame request.
pub struct Animation<S: FrameScheduler> {
    scheduler: S,
    state: LoopState,
    pending: Option<FrameHandle>,
    surface: SurfaceManager,
    scene: Option<Scene>,
    rng: StdRng,
    frames: u64,
}

impl<S: FrameScheduler> Animation<S> {
    /// A stopped animation. With `seed` the whole run is reproducible.
    pub fn new(scheduler: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            scheduler,
            state: LoopState::Stopped,
            pending: None,
            surface: SurfaceManager::new(),
            scene: None,
            rng,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    #[cfg(test)]
    pub fn dimensions(&self) -> crate::types::Dimensions {
        self.surface.dimensions()
    }

    #[cfg(test)]
    pub fn stars(&self) -> Option<&StarField> {
        self.scene.as_ref().map(|s| &s.stars)
    }

    pub fn pool(&self) -> Option<&ShootingStarPool> {
        self.scene.as_ref().map(|s| &s.pool)
    }

    #[cfg(test)]
    pub fn clock(&self) -> Option<&ActivationClock> {
        self.scene.as_ref().map(|s| &s.clock)
    }

    /// Frames rendered since the last start.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[cfg(test)]
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Size the surface to the viewport, seed fresh populations and request
    /// the first frame. Starting a running animation does nothing.
    pub fn start<T: Surface>(
        &mut self,
        width: u32,
        height: u32,
        target: &mut T,
    ) -> Result<(), EngineError> {
        if self.is_running() {
            return Ok(());
        }

        self.surface.attach();
        self.surface.resize(width, height, target);
        let dims = self.surface.dimensions();
        if dims.is_empty() {
            self.surface.detach();
            return Err(EngineError::SurfaceUnavailable {
                width: dims.width,
                height: dims.height,
            });
        }

        let stars = StarField::initialize(dims, &mut self.rng);
        let pool = ShootingStarPool::initialize(dims, &mut self.rng);
        let clock = ActivationClock::new(&mut self.rng);
        self.scene = Some(Scene { stars, pool, clock });
        self.frames = 0;
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.request_frame());

        log::info!(
            "Star field started at {}x{}",
            dims.width as u32,
            dims.height as u32
        );
        Ok(())
    }

    /// Forward a viewport change. Ignored once stopped.
    pub fn resize<T: Surface>(&mut self, width: u32, height: u32, target: &mut T) -> bool {
        if !self.is_running() {
            return false;
        }
        let resized = self.surface.resize(width, height, target);
        if resized {
            log::debug!("Surface resized to {}x{}", width, height);
        }
        resized
    }

    /// Run one frame for `handle`, stamped `now_ms` on the host's monotonic
    /// clock. Frames for stale or cancelled handles are dropped.
    pub fn on_frame<T: Surface>(&mut self, handle: FrameHandle, now_ms: f64, target: &mut T) -> bool {
        if !self.is_running() || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        let Some(scene) = self.scene.as_mut() else {
            return false;
        };
        let dims = self.surface.dimensions();
        let rng = &mut self.rng;

        target.clear();

        scene.stars.render(target);
        scene.stars.advance(dims, rng);

        if let Some(slot) = scene.pool.try_activate(&mut scene.clock, now_ms, dims, rng) {
            log::debug!("Shooting star launched from slot {}", slot);
        }

        scene.pool.render(target);
        scene.pool.advance(dims, rng);

        self.frames += 1;
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Tear down: cancel the pending frame, stop listening for resizes and
    /// drop all animation state. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.surface.detach();
        self.scene = None;
        self.state = LoopState::Stopped;
        log::info!("Star field stopped after {} frames", self.frames);
    }

    /// Stop and start again with brand new populations.
    pub fn restart<T: Surface>(&mut self, target: &mut T) -> Result<(), EngineError> {
        let dims = self.surface.dimensions();
        self.stop();
        self.start(dims.width as u32, dims.height as u32, target)
    }
}

impl<S: FrameScheduler> Drop for Animation<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shooting::POOL_SIZE;
    use crate::stars::STAR_COUNT;
    use crate::surface::testing::{DrawOp, RecordingSurface};
    use crate::types::{Dimensions, Point, Rgb};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn running() -> (Animation<FrameQueue>, RecordingSurface) {
        let mut surface = RecordingSurface::new(0, 0);
        let mut anim = Animation::new(FrameQueue::new(), Some(42));
        anim.start(800, 600, &mut surface).unwrap();
        surface.ops.clear();
        (anim, surface)
    }

    fn pump(anim: &mut Animation<FrameQueue>, now_ms: f64, surface: &mut RecordingSurface) -> bool {
        match anim.scheduler_mut().take_due() {
            Some(handle) => anim.on_frame(handle, now_ms, surface),
            None => false,
        }
    }

    #[test]
    fn start_enters_running_with_fresh_populations() {
        let (anim, _) = running();
        assert_eq!(anim.state(), LoopState::Running);
        assert_eq!(anim.stars().map(|s| s.stars().len()), Some(STAR_COUNT));
        assert_eq!(anim.pool().map(|p| p.slots().len()), Some(POOL_SIZE));
        assert_eq!(anim.scheduler().requested(), 1);
        assert_eq!(anim.pending_frame(), anim.scheduler().pending());
    }

    #[test]
    fn zero_sized_surface_never_starts() {
        let mut surface = RecordingSurface::new(0, 0);
        let mut anim = Animation::new(FrameQueue::new(), Some(1));

        let err = anim.start(0, 600, &mut surface).unwrap_err();

        assert_eq!(
            err,
            EngineError::SurfaceUnavailable {
                width: 0.0,
                height: 600.0
            }
        );
        assert_eq!(anim.state(), LoopState::Stopped);
        assert_eq!(anim.scheduler().requested(), 0);
        assert!(anim.stars().is_none());
    }

    #[test]
    fn frame_clears_then_draws_stars_and_reschedules() {
        let (mut anim, mut surface) = running();

        assert!(pump(&mut anim, 16.0, &mut surface));

        assert_eq!(
            surface.ops[0],
            DrawOp::Rect {
                origin: Point::default(),
                width: 800.0,
                height: 600.0,
                color: Rgb::BLACK,
            }
        );
        assert_eq!(surface.circles(), STAR_COUNT);
        assert!(surface.lines().is_empty());
        assert_eq!(anim.frames(), 1);
        assert_eq!(anim.scheduler().requested(), 2);
        assert!(anim.pending_frame().is_some());
    }

    #[test]
    fn shooting_star_appears_once_interval_elapses() {
        let (mut anim, mut surface) = running();
        let due = anim.clock().map(|c| c.interval_ms).unwrap();

        pump(&mut anim, due - 1.0, &mut surface);
        assert_eq!(anim.pool().map(|p| p.active_count()), Some(0));

        surface.ops.clear();
        pump(&mut anim, due, &mut surface);
        assert_eq!(anim.pool().map(|p| p.active_count()), Some(1));
        assert_eq!(surface.lines().len(), 1);
        assert_eq!(anim.clock().map(|c| c.last_activation_ms), Some(due));
    }

    #[test]
    fn stale_handle_is_ignored() {
        let (mut anim, mut surface) = running();
        let handle = anim.scheduler_mut().take_due().unwrap();
        assert!(anim.on_frame(handle, 16.0, &mut surface));
        assert!(!anim.on_frame(handle, 32.0, &mut surface));
        assert_eq!(anim.frames(), 1);
    }

    #[test]
    fn stop_twice_is_harmless_and_cancels_pending_frame() {
        let (mut anim, mut surface) = running();
        let handle = anim.pending_frame().unwrap();

        anim.stop();
        anim.stop();

        assert_eq!(anim.state(), LoopState::Stopped);
        assert_eq!(anim.scheduler().cancelled(), 1);
        assert_eq!(anim.scheduler().requested(), 1);
        assert!(anim.scheduler().pending().is_none());
        assert!(!anim.on_frame(handle, 16.0, &mut surface));
        assert!(!pump(&mut anim, 32.0, &mut surface));
        assert!(anim.stars().is_none());
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn resize_after_stop_is_ignored() {
        let (mut anim, mut surface) = running();
        assert!(anim.resize(400, 300, &mut surface));
        assert_eq!(anim.dimensions(), Dimensions::new(400.0, 300.0));

        anim.stop();

        assert!(!anim.resize(1024, 768, &mut surface));
        assert_eq!(anim.dimensions(), Dimensions::new(400.0, 300.0));
        assert_eq!(surface.width, 400);
    }

    #[test]
    fn frame_after_resize_uses_new_dimensions() {
        let (mut anim, mut surface) = running();
        anim.resize(200, 100, &mut surface);
        surface.ops.clear();

        pump(&mut anim, 16.0, &mut surface);

        assert_eq!(
            surface.ops[0],
            DrawOp::Rect {
                origin: Point::default(),
                width: 200.0,
                height: 100.0,
                color: Rgb::BLACK,
            }
        );
    }

    #[test]
    fn restart_reseeds_everything() {
        let (mut anim, mut surface) = running();
        for i in 1..=10 {
            pump(&mut anim, i as f64 * 16.0, &mut surface);
        }
        let before = anim.stars().unwrap().stars().to_vec();

        anim.restart(&mut surface).unwrap();

        assert!(anim.is_running());
        assert_eq!(anim.frames(), 0);
        assert_ne!(anim.stars().unwrap().stars(), &before[..]);
        assert_eq!(anim.scheduler().cancelled(), 1);
        assert!(pump(&mut anim, 16.0, &mut surface));
    }

    #[derive(Default, Clone)]
    struct SharedQueue(Rc<RefCell<FrameQueue>>);

    impl FrameScheduler for SharedQueue {
        fn request_frame(&mut self) -> FrameHandle {
            self.0.borrow_mut().request_frame()
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            self.0.borrow_mut().cancel_frame(handle)
        }
    }

    #[test]
    fn drop_cancels_pending_frame() {
        let queue = SharedQueue::default();
        let mut surface = RecordingSurface::new(0, 0);
        {
            let mut anim = Animation::new(queue.clone(), Some(3));
            anim.start(64, 64, &mut surface).unwrap();
            assert!(queue.0.borrow().pending().is_some());
        }
        assert!(queue.0.borrow().pending().is_none());
        assert_eq!(queue.0.borrow().cancelled(), 1);
    }
}

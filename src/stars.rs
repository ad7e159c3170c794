use crate::surface::Surface;
use crate::types::{Dimensions, Point, Rgb};
use rand::Rng;

pub const STAR_COUNT: usize = 300;
pub const MAX_RADIUS: f64 = 1.5;
pub const MIN_OPACITY: f64 = 0.5;
pub const MAX_VERTICAL_SPEED: f64 = 0.05;

/// A background star drifting slowly downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientStar {
    pub position: Point,
    pub radius: f64,
    pub opacity: f64,
    pub vertical_speed: f64,
}

impl AmbientStar {
    fn random<R: Rng>(dims: Dimensions, rng: &mut R) -> Self {
        Self {
            position: Point::new(uniform(rng, dims.width), uniform(rng, dims.height)),
            radius: rng.gen_range(0.0..MAX_RADIUS),
            opacity: rng.gen_range(MIN_OPACITY..1.0),
            vertical_speed: rng.gen_range(0.0..MAX_VERTICAL_SPEED),
        }
    }
}

/// Uniform sample in `[0, upper)`, or 0 when the range is empty.
pub(crate) fn uniform<R: Rng>(rng: &mut R, upper: f64) -> f64 {
    if upper > 0.0 {
        rng.gen_range(0.0..upper)
    } else {
        0.0
    }
}

/// The fixed population of ambient stars.
#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<AmbientStar>,
}

impl StarField {
    pub fn initialize<R: Rng>(dims: Dimensions, rng: &mut R) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| AmbientStar::random(dims, rng))
            .collect();
        Self { stars }
    }

    #[cfg(test)]
    pub fn stars(&self) -> &[AmbientStar] {
        &self.stars
    }

    #[cfg(test)]
    pub fn stars_mut(&mut self) -> &mut [AmbientStar] {
        &mut self.stars
    }

    /// Drift every star down; stars falling off the bottom re-enter at the top
    /// with a new column.
    pub fn advance<R: Rng>(&mut self, dims: Dimensions, rng: &mut R) {
        for star in &mut self.stars {
            star.position.y += star.vertical_speed;
            if star.position.y >= dims.height {
                star.position.y = 0.0;
                star.position.x = uniform(rng, dims.width);
            }
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for star in &self.stars {
            surface.fill_circle(star.position, star.radius, Rgb::WHITE, star.opacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::{DrawOp, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42_424_242)
    }

    #[test]
    fn initialize_respects_ranges() {
        let dims = Dimensions::new(640.0, 480.0);
        let field = StarField::initialize(dims, &mut rng());

        assert_eq!(field.stars().len(), STAR_COUNT);
        for star in field.stars() {
            assert!((0.0..640.0).contains(&star.position.x));
            assert!((0.0..480.0).contains(&star.position.y));
            assert!((0.0..MAX_RADIUS).contains(&star.radius));
            assert!((MIN_OPACITY..1.0).contains(&star.opacity));
            assert!((0.0..MAX_VERTICAL_SPEED).contains(&star.vertical_speed));
        }
    }

    #[test]
    fn advance_moves_only_vertically() {
        let dims = Dimensions::new(200.0, 100.0);
        let mut rng = rng();
        let mut field = StarField::initialize(dims, &mut rng);
        let star = &mut field.stars_mut()[0];
        star.position = Point::new(12.5, 10.0);
        star.vertical_speed = 0.04;

        field.advance(dims, &mut rng);

        let star = &field.stars()[0];
        assert_eq!(star.position.x, 12.5);
        assert!((star.position.y - 10.04).abs() < 1e-12);
    }

    #[test]
    fn star_at_bottom_wraps_to_top() {
        let dims = Dimensions::new(200.0, 100.0);
        let mut rng = rng();
        let mut field = StarField::initialize(dims, &mut rng);
        let star = &mut field.stars_mut()[3];
        star.position = Point::new(50.0, 100.0 - 0.01);
        star.vertical_speed = 0.05;

        field.advance(dims, &mut rng);

        let star = &field.stars()[3];
        assert_eq!(star.position.y, 0.0);
        assert!((0.0..200.0).contains(&star.position.x));
    }

    #[test]
    fn y_stays_in_bounds_over_many_frames() {
        let dims = Dimensions::new(50.0, 2.0);
        let mut rng = rng();
        let mut field = StarField::initialize(dims, &mut rng);
        for _ in 0..500 {
            field.advance(dims, &mut rng);
        }
        assert!(field
            .stars()
            .iter()
            .all(|s| (0.0..2.0).contains(&s.position.y)));
    }

    #[test]
    fn render_draws_white_circle_per_star() {
        let dims = Dimensions::new(100.0, 100.0);
        let field = StarField::initialize(dims, &mut rng());
        let mut surface = RecordingSurface::new(100, 100);

        field.render(&mut surface);

        assert_eq!(surface.circles(), STAR_COUNT);
        let first = &field.stars()[0];
        assert_eq!(
            surface.ops[0],
            DrawOp::Circle {
                center: first.position,
                radius: first.radius,
                color: Rgb::WHITE,
                alpha: first.opacity,
            }
        );
    }
}

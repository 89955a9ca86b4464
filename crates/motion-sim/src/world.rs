//! Flat test world implementing the navigation oracle.

use glam::Vec3;
use rand::{Rng, RngCore};

use motion_core::{NavOracle, Route};

/// Attempts at rejection-sampling one reachable point.
const POINT_ATTEMPTS: u32 = 10;

/// Circular no-go area on the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum WorldError {
    #[error("half extent {0} must be positive and finite")]
    InvalidExtent(f32),

    #[error("obstacle radius {0} must be positive and finite")]
    InvalidObstacle(f32),
}

/// Axis-aligned square world with circular obstacles.
///
/// Routing is straight-line: a segment is reachable when it ends inside the
/// bounds and crosses no obstacle. Enough to exercise every behavior
/// without a real navigation mesh.
#[derive(Clone, Debug)]
pub struct FlatWorld {
    half_extent: f32,
    obstacles: Vec<Obstacle>,
}

impl FlatWorld {
    pub fn new(half_extent: f32) -> Result<Self, WorldError> {
        if !half_extent.is_finite() || half_extent <= 0.0 {
            return Err(WorldError::InvalidExtent(half_extent));
        }
        Ok(Self {
            half_extent,
            obstacles: Vec::new(),
        })
    }

    pub fn with_obstacle(mut self, center: Vec3, radius: f32) -> Result<Self, WorldError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(WorldError::InvalidObstacle(radius));
        }
        self.obstacles.push(Obstacle { center, radius });
        Ok(self)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_extent && point.y.abs() <= self.half_extent
    }

    fn is_open(&self, point: Vec3) -> bool {
        self.contains(point)
            && self
                .obstacles
                .iter()
                .all(|o| point.distance_squared(o.center) > o.radius * o.radius)
    }

    /// True when the segment `a -> b` stays clear of every obstacle.
    ///
    /// Also serves as the line-of-sight test for actors in this world.
    pub fn segment_clear(&self, a: Vec3, b: Vec3) -> bool {
        self.obstacles.iter().all(|o| {
            let ab = b - a;
            let len_sq = ab.length_squared();
            let t = if len_sq <= f32::EPSILON {
                0.0
            } else {
                ((o.center - a).dot(ab) / len_sq).clamp(0.0, 1.0)
            };
            let closest = a + ab * t;
            closest.distance_squared(o.center) > o.radius * o.radius
        })
    }
}

impl NavOracle for FlatWorld {
    fn reachable_point_near(
        &self,
        rng: &mut dyn RngCore,
        origin: Vec3,
        radius: f32,
        vertical_bound: f32,
    ) -> Option<Vec3> {
        if !radius.is_finite() || radius <= 0.0 {
            return None;
        }

        for _ in 0..POINT_ATTEMPTS {
            // Uniform over the disc: sqrt keeps density even.
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let dist = radius * rng.gen_range(0.0f32..=1.0).sqrt();
            let dz = if vertical_bound > 0.0 {
                rng.gen_range(-vertical_bound..=vertical_bound)
            } else {
                0.0
            };
            let point = Vec3::new(
                origin.x + angle.cos() * dist,
                origin.y + angle.sin() * dist,
                origin.z + dz,
            );

            if self.is_open(point) {
                return Some(point);
            }
        }

        None
    }

    fn route(&self, from: Vec3, to: Vec3, max_length: Option<f32>) -> Route {
        if !self.contains(to) || !self.segment_clear(from, to) {
            return Route::unreachable();
        }

        let mut end = to;
        if let Some(cap) = max_length {
            let length = from.distance(to);
            if length > cap && length > 0.0 {
                end = from + (to - from) * (cap / length);
            }
        }

        Route {
            points: vec![from, end],
            reachable: true,
        }
    }
}

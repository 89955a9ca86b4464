//! Traits for the world-side collaborators.
//!
//! [`NavOracle`] exposes the navigation service; [`NavEnv`] bundles it with
//! the caller's RNG so one behavior update can both query the world and draw
//! random values without threading two borrows through every signature.

mod nav;

pub use nav::{NavOracle, Route};

use glam::Vec3;
use rand::{Rng, RngCore};

/// Aggregates the collaborators a single behavior update needs.
pub struct NavEnv<'a> {
    nav: &'a dyn NavOracle,
    rng: &'a mut dyn RngCore,
}

impl<'a> NavEnv<'a> {
    pub fn new(nav: &'a dyn NavOracle, rng: &'a mut dyn RngCore) -> Self {
        Self { nav, rng }
    }

    pub fn reachable_point_near(
        &mut self,
        origin: Vec3,
        radius: f32,
        vertical_bound: f32,
    ) -> Option<Vec3> {
        self.nav
            .reachable_point_near(self.rng, origin, radius, vertical_bound)
    }

    pub fn route(&self, from: Vec3, to: Vec3, max_length: Option<f32>) -> Route {
        self.nav.route(from, to, max_length)
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        self.rng
    }

    /// Uniform draw in `[lo, hi]`, used by the flee band radii.
    pub fn roll_f32(&mut self, lo: f32, hi: f32) -> f32 {
        self.rng.gen_range(lo..=hi)
    }
}

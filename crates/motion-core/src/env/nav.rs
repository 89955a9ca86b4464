use glam::Vec3;
use rand::RngCore;

/// Result of one routing query.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Waypoints starting at the query origin when non-empty. An
    /// unreachable route may still carry a partial shortcut; callers decide
    /// whether to use it.
    pub points: Vec<Vec3>,
    pub reachable: bool,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            points: Vec::new(),
            reachable: false,
        }
    }
}

/// Navigation service consumed as a black box.
///
/// Implementations answer reachability and routing questions against
/// whatever world representation they own (navmesh, grid, analytic
/// geometry). Randomized point selection draws from the caller's RNG so a
/// seeded run replays exactly.
pub trait NavOracle: Send + Sync {
    /// Proposes a reachable random position within `radius` of `origin`,
    /// deviating vertically by at most `vertical_bound`. `None` when nothing
    /// reachable was found.
    fn reachable_point_near(
        &self,
        rng: &mut dyn RngCore,
        origin: Vec3,
        radius: f32,
        vertical_bound: f32,
    ) -> Option<Vec3>;

    /// Computes a route between two points, optionally capped at
    /// `max_length` total distance.
    fn route(&self, from: Vec3, to: Vec3, max_length: Option<f32>) -> Route;
}

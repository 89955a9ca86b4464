//! Hands finished waypoint sequences to the motion executor.

use glam::Vec3;
use tracing::debug;

use crate::agent::{Agent, MoveState, PathPlan};

/// Launches `points` on the owner's executor and marks the entity as in
/// motion when the executor accepted the plan.
///
/// The returned duration is an estimate only; re-arm cadence stays with the
/// behavior's own randomized bounds.
pub(crate) fn launch(
    owner: &mut dyn Agent,
    points: Vec<Vec3>,
    walk: bool,
    motion_bit: MoveState,
) -> u32 {
    debug_assert!(points.len() >= 2, "dispatch requires at least two waypoints");

    let plan = PathPlan { points, walk };
    let duration_ms = owner.motor().begin_path(&plan);

    if duration_ms > 0 {
        owner.add_move_state(motion_bit);
    } else {
        debug!(points = plan.points.len(), "motion executor rejected path");
    }

    duration_ms
}

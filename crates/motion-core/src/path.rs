//! Path composer: chains routing queries into one waypoint sequence.

use arrayvec::ArrayVec;
use glam::Vec3;
use tracing::trace;

use crate::agent::Agent;
use crate::config::MotionConfig;
use crate::env::NavEnv;
use crate::intent::MotionIntent;
use crate::sample::SamplePolicy;

/// Collects up to `attempts` candidates and stitches them into one
/// duplicate-free waypoint sequence starting at the owner's position.
///
/// Failed proposals and unroutable segments are skipped rather than
/// aborting the whole composition; `None` means fewer than two points
/// survived and nothing should be dispatched this cycle.
pub(crate) fn compose(
    owner: &dyn Agent,
    env: &mut NavEnv<'_>,
    intent: &mut MotionIntent,
    attempts: u8,
    policy: &mut dyn SamplePolicy,
) -> Option<Vec<Vec3>> {
    let mut candidates: ArrayVec<Vec3, { MotionConfig::MAX_CYCLE_POINTS }> = ArrayVec::new();

    for _ in 0..attempts {
        if candidates.is_full() {
            break;
        }
        if let Some(point) = policy.propose(owner, env, intent) {
            candidates.push(point);
        }
    }

    stitch(owner.position(), &candidates, env, intent.path_cap)
}

/// Issues one routing query per candidate: current position to the first,
/// then candidate to candidate. Every appended segment after the first
/// drops its leading point so the shared junction is not duplicated.
fn stitch(
    origin: Vec3,
    candidates: &[Vec3],
    env: &NavEnv<'_>,
    path_cap: Option<f32>,
) -> Option<Vec<Vec3>> {
    let mut path: Vec<Vec3> = Vec::new();

    for &dest in candidates {
        let from = path.last().copied().unwrap_or(origin);
        let route = env.route(from, dest, path_cap);
        if !route.reachable {
            trace!(?dest, "segment unroutable, dropping candidate");
            continue;
        }

        let skip = usize::from(!path.is_empty());
        path.extend(route.points.into_iter().skip(skip));
    }

    (path.len() >= 2).then_some(path)
}

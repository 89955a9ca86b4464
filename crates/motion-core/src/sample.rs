//! Per-behavior destination sampling policies.

use glam::Vec3;

use crate::agent::Agent;
use crate::config::MotionConfig;
use crate::env::NavEnv;
use crate::intent::MotionIntent;

/// Proposes zero or one candidate destination per call.
///
/// Policies only differ in where they center the query and how they size
/// the radius; the acceptance rule is shared.
pub trait SamplePolicy {
    fn propose(
        &mut self,
        owner: &dyn Agent,
        env: &mut NavEnv<'_>,
        intent: &mut MotionIntent,
    ) -> Option<Vec3>;
}

/// A candidate is accepted unless a client-driven owner cannot see it;
/// client-driven entities must never be walked through unseen obstacles.
fn accept(owner: &dyn Agent, point: Vec3) -> bool {
    !owner.is_client_driven() || owner.in_line_of_sight(point)
}

/// Base policy: sample around the intent anchor with the configured radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchorSampler;

impl SamplePolicy for AnchorSampler {
    fn propose(
        &mut self,
        owner: &dyn Agent,
        env: &mut NavEnv<'_>,
        intent: &mut MotionIntent,
    ) -> Option<Vec3> {
        let point =
            env.reachable_point_near(intent.anchor, intent.radius, intent.vertical_bound)?;
        accept(owner, point).then_some(point)
    }
}

/// Flee policy: pull the owner into the quiet stand-off band around the
/// threat anchor.
///
/// The radius is recomputed before every attempt from the owner's *current*
/// distance to the anchor, and the query is centered on the owner rather
/// than the anchor, so consecutive samples keep widening the gap.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuietBandSampler;

/// Radius for the next flee sample given the current anchor distance.
fn quiet_band_radius(env: &mut NavEnv<'_>, distance: f32) -> f32 {
    let band = MotionConfig::MAX_QUIET_DISTANCE - MotionConfig::MIN_QUIET_DISTANCE;

    if distance < MotionConfig::MIN_QUIET_DISTANCE {
        env.roll_f32(0.4, 1.3) * (MotionConfig::MIN_QUIET_DISTANCE - distance)
    } else if distance > MotionConfig::MAX_QUIET_DISTANCE {
        env.roll_f32(0.4, 1.0) * band
    } else {
        // Inside the band: roam broadly so the entity does not stall.
        env.roll_f32(0.6, 1.2) * band
    }
}

impl SamplePolicy for QuietBandSampler {
    fn propose(
        &mut self,
        owner: &dyn Agent,
        env: &mut NavEnv<'_>,
        intent: &mut MotionIntent,
    ) -> Option<Vec3> {
        intent.radius = quiet_band_radius(env, owner.distance_to(intent.anchor));

        let point =
            env.reachable_point_near(owner.position(), intent.radius, intent.vertical_bound)?;
        accept(owner, point).then_some(point)
    }
}

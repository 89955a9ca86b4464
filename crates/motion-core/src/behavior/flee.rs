use glam::Vec3;

use super::{BehaviorCore, BehaviorKind, MotionBehavior};
use crate::agent::{Agent, MoveState};
use crate::config::MotionConfig;
use crate::env::NavEnv;
use crate::intent::MotionIntent;
use crate::sample::QuietBandSampler;

/// Scrambling away from a threat into the quiet stand-off band.
///
/// The anchor is the threat's position at activation; the sampling radius
/// is rewritten by [`QuietBandSampler`] before every attempt, and composed
/// paths are capped so one dispatch never runs clear across the map.
pub struct FleeMotion {
    core: BehaviorCore,
    policy: QuietBandSampler,
}

impl FleeMotion {
    pub fn new(threat: Vec3) -> Self {
        let intent = MotionIntent {
            anchor: threat,
            // Rewritten by the quiet-band policy before every sample.
            radius: 0.0,
            vertical_bound: 0.0,
            path_cap: Some(MotionConfig::FLEE_PATH_CAP),
            walk: false,
            cycle_points_max: 1,
        };

        Self {
            core: BehaviorCore::new(
                MoveState::FLEEING,
                MoveState::FLEEING_MOVE,
                MotionConfig::FLEE_DELAY_MS,
                intent,
            ),
            policy: QuietBandSampler,
        }
    }
}

impl MotionBehavior for FleeMotion {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Flee
    }

    fn initialize(&mut self, owner: &mut dyn Agent) {
        self.core.initialize(owner);
    }

    fn reset(&mut self, owner: &mut dyn Agent) {
        self.core.reset(owner);
    }

    fn interrupt(&mut self, owner: &mut dyn Agent) {
        self.core.interrupt(owner);
    }

    fn finalize(&mut self, owner: &mut dyn Agent) {
        self.core.finalize(owner);
    }

    fn update(&mut self, owner: &mut dyn Agent, env: &mut NavEnv<'_>, dt_ms: u32) -> bool {
        self.core.update(owner, env, dt_ms, &mut self.policy)
    }
}

use glam::Vec3;

use super::{BehaviorCore, BehaviorKind, MotionBehavior};
use crate::agent::{Agent, MoveState};
use crate::config::MotionConfig;
use crate::env::NavEnv;
use crate::intent::{IntentError, MotionIntent};
use crate::sample::AnchorSampler;

/// Roaming a leash radius around a home point.
///
/// The home point and radius usually come from spawn data, so construction
/// validates them. On teardown the walk/run display is re-synced with the
/// entity's persistent pace, since roaming may have left it walking.
pub struct WanderMotion {
    core: BehaviorCore,
    policy: AnchorSampler,
}

impl WanderMotion {
    pub fn new(home: Vec3, radius: f32, vertical_bound: f32) -> Result<Self, IntentError> {
        let intent = MotionIntent::new(home, radius, vertical_bound)?
            .with_cycle_points(MotionConfig::WANDER_CYCLE_POINTS);

        Ok(Self {
            core: BehaviorCore::new(
                MoveState::ROAMING,
                MoveState::ROAMING_MOVE,
                MotionConfig::WANDER_DELAY_MS,
                intent,
            ),
            policy: AnchorSampler,
        })
    }

    /// Restores the pace the entity displays outside this behavior.
    fn sync_pace(owner: &mut dyn Agent) {
        owner.set_walk_display(!owner.move_state().contains(MoveState::ALWAYS_RUN));
    }
}

impl MotionBehavior for WanderMotion {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Wander
    }

    fn initialize(&mut self, owner: &mut dyn Agent) {
        self.core.initialize(owner);
    }

    fn reset(&mut self, owner: &mut dyn Agent) {
        self.core.reset(owner);
    }

    fn interrupt(&mut self, owner: &mut dyn Agent) {
        self.core.interrupt(owner);
        Self::sync_pace(owner);
    }

    fn finalize(&mut self, owner: &mut dyn Agent) {
        self.core.finalize(owner);
        Self::sync_pace(owner);
    }

    fn update(&mut self, owner: &mut dyn Agent, env: &mut NavEnv<'_>, dt_ms: u32) -> bool {
        self.core.update(owner, env, dt_ms, &mut self.policy)
    }
}

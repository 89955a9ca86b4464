use glam::Vec3;

use super::{BehaviorCore, BehaviorKind, MotionBehavior};
use crate::agent::{Agent, MoveState};
use crate::config::MotionConfig;
use crate::env::NavEnv;
use crate::intent::MotionIntent;
use crate::sample::AnchorSampler;

/// Aimless milling around the spot where the behavior started.
pub struct ConfusedMotion {
    core: BehaviorCore,
    policy: AnchorSampler,
}

impl ConfusedMotion {
    pub fn new(anchor: Vec3) -> Self {
        let intent = MotionIntent {
            anchor,
            radius: MotionConfig::CONFUSED_RADIUS,
            vertical_bound: 0.0,
            path_cap: None,
            walk: true,
            cycle_points_max: 1,
        };

        Self {
            core: BehaviorCore::new(
                MoveState::CONFUSED,
                MoveState::CONFUSED_MOVE,
                MotionConfig::CONFUSED_DELAY_MS,
                intent,
            ),
            policy: AnchorSampler,
        }
    }

    /// Anchors at the owner's position at activation time.
    pub fn from_owner(owner: &dyn Agent) -> Self {
        Self::new(owner.position())
    }
}

impl MotionBehavior for ConfusedMotion {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Confused
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

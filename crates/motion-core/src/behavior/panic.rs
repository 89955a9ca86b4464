use glam::Vec3;

use super::{BehaviorKind, FleeMotion, MotionBehavior};
use crate::agent::{Agent, MoveState, PublicFlags};
use crate::env::NavEnv;
use crate::timer::CycleTimer;

/// Time-boxed flee.
///
/// Runs the flee machinery under a dedicated `PANICKED` bit and an
/// independent duration timer; once that timer elapses, `update` reports
/// teardown regardless of the movement-retry cadence. Panic and plain
/// fleeing are mutually exclusive, so this variant alone clears the shared
/// public fleeing flag and tells the AI that timed fleeing ended.
pub struct PanicMotion {
    flee: FleeMotion,
    duration: CycleTimer,
}

impl PanicMotion {
    pub fn new(threat: Vec3, duration_ms: u32) -> Self {
        Self {
            flee: FleeMotion::new(threat),
            duration: CycleTimer::new(duration_ms),
        }
    }

    fn notify_ai(owner: &mut dyn Agent) {
        if owner.has_ai() {
            owner.notify_flee_timeout();
        }
    }
}

impl MotionBehavior for PanicMotion {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Panic
    }

    fn initialize(&mut self, owner: &mut dyn Agent) {
        owner.add_move_state(MoveState::PANICKED);
        self.flee.initialize(owner);
    }

    fn reset(&mut self, owner: &mut dyn Agent) {
        owner.add_move_state(MoveState::PANICKED);
        self.flee.reset(owner);
    }

    fn interrupt(&mut self, owner: &mut dyn Agent) {
        self.flee.interrupt(owner);
        Self::notify_ai(owner);
    }

    fn finalize(&mut self, owner: &mut dyn Agent) {
        owner.clear_move_state(MoveState::PANICKED);
        // Nobody else clears the shared display flag for us.
        owner.set_public_flag(PublicFlags::FLEEING, false);

        self.flee.finalize(owner);
        Self::notify_ai(owner);
    }

    fn update(&mut self, owner: &mut dyn Agent, env: &mut NavEnv<'_>, dt_ms: u32) -> bool {
        self.duration.update(dt_ms);
        if self.duration.passed() {
            return false;
        }

        self.flee.update(owner, env, dt_ms)
    }
}

//! Shared machinery behind every behavior variant.

use tracing::trace;

use crate::agent::{Agent, MoveState};
use crate::dispatch;
use crate::env::NavEnv;
use crate::intent::{MotionIntent, RetryCounter};
use crate::path;
use crate::sample::SamplePolicy;
use crate::timer::CycleTimer;

/// Outcome of one sampling + composition + dispatch cycle.
#[derive(Clone, Copy, Debug)]
enum CycleOutcome {
    /// The executor accepted a path and the motion bit is set.
    Dispatched { duration_ms: u32 },
    /// A valid path was composed but the executor refused it.
    Rejected,
    /// Fewer than two waypoints survived composition.
    NoRoute,
}

/// Flag bookkeeping, dispatch cadence, and catch-up accounting common to
/// all four behaviors. Variants wrap this and contribute their sampling
/// policy plus any auxiliary state of their own.
pub(crate) struct BehaviorCore {
    /// Bit marking the behavior as active on the entity.
    active_bit: MoveState,
    /// Bit marking an in-flight dispatched path.
    motion_bit: MoveState,
    /// Randomized re-arm bounds in milliseconds; the lower bound doubles as
    /// the short fixed retry delay when nothing was reachable.
    delay_ms: (u32, u32),
    timer: CycleTimer,
    queued: RetryCounter,
    intent: MotionIntent,
}

impl BehaviorCore {
    pub(crate) fn new(
        active_bit: MoveState,
        motion_bit: MoveState,
        delay_ms: (u32, u32),
        intent: MotionIntent,
    ) -> Self {
        Self {
            active_bit,
            motion_bit,
            delay_ms,
            // Expired from the start: the first update samples immediately.
            timer: CycleTimer::expired(),
            queued: RetryCounter::new(intent.cycle_points_max),
            intent,
        }
    }

    pub(crate) fn initialize(&self, owner: &mut dyn Agent) {
        owner.add_move_state(self.active_bit);

        if owner.is_client_driven() {
            owner.grant_client_control(false);
        } else if owner.has_ai() {
            owner.clear_attack_target();
        }

        self.halt_motion(owner);
    }

    pub(crate) fn finalize(&self, owner: &mut dyn Agent) {
        owner.clear_move_state(self.active_bit | self.motion_bit);

        if owner.is_client_driven() {
            owner.grant_client_control(true);
        }

        self.halt_motion(owner);
    }

    pub(crate) fn interrupt(&self, owner: &mut dyn Agent) {
        owner.motor().stop(false);
        owner.clear_move_state(self.motion_bit);
    }

    pub(crate) fn reset(&mut self, owner: &mut dyn Agent) {
        self.timer.reset(0);
        self.initialize(owner);
    }

    /// Stops any non-finalized motion, hard for client-driven owners.
    fn halt_motion(&self, owner: &mut dyn Agent) {
        if !owner.motor_ref().is_finalized() {
            let hard = owner.is_client_driven();
            owner.motor().stop(hard);
        }
    }

    pub(crate) fn update(
        &mut self,
        owner: &mut dyn Agent,
        env: &mut NavEnv<'_>,
        dt_ms: u32,
        policy: &mut dyn SamplePolicy,
    ) -> bool {
        if !owner.is_alive() {
            return false;
        }

        // Another hold forbids free movement (external root, or a competing
        // behavior's active bit): keep ticking so elapsed time is not lost,
        // but do not sample.
        let holds = MoveState::FREE_MOVE_DENIED & !self.active_bit;
        if owner.move_state().intersects(holds) {
            self.timer.update(dt_ms);
            owner.clear_move_state(self.motion_bit);
            return true;
        }

        self.timer.update(dt_ms);
        if self.timer.passed() {
            self.queued.accrue();

            // While a previous dispatch is still in flight the allowance
            // keeps accruing and the cadence stays randomized.
            if owner.motor_ref().is_finalized() {
                match self.run_cycle(owner, env, policy) {
                    CycleOutcome::Dispatched { duration_ms } => {
                        trace!(duration_ms, "dispatched new path");
                    }
                    CycleOutcome::Rejected => {
                        trace!("executor rejected composed path");
                    }
                    CycleOutcome::NoRoute => {
                        // Nothing reachable: recheck sooner than the normal
                        // cadence, without a full-speed retry loop.
                        self.timer.reset(self.delay_ms.0);
                        return true;
                    }
                }
            }

            self.timer
                .reset_range(env.rng(), self.delay_ms.0, self.delay_ms.1);
        }

        true
    }

    fn run_cycle(
        &mut self,
        owner: &mut dyn Agent,
        env: &mut NavEnv<'_>,
        policy: &mut dyn SamplePolicy,
    ) -> CycleOutcome {
        let attempts = self.queued.drain();

        let Some(points) = path::compose(owner, env, &mut self.intent, attempts, policy) else {
            return CycleOutcome::NoRoute;
        };

        let duration_ms = dispatch::launch(owner, points, self.intent.walk, self.motion_bit);
        if duration_ms > 0 {
            CycleOutcome::Dispatched { duration_ms }
        } else {
            CycleOutcome::Rejected
        }
    }
}

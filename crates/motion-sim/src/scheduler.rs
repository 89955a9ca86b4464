//! Per-actor behavior slots and the swap discipline.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use motion_core::{Agent, BehaviorKind, MotionBehavior, NavEnv};

/// Identifies one simulated actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("actor {0} has no scheduled behavior")]
    UnknownActor(ActorId),
}

/// Owns at most one random-movement behavior per actor and funnels every
/// swap through the proper lifecycle calls, which is what keeps the
/// entity-side flag invariants intact.
#[derive(Default)]
pub struct MotionScheduler {
    slots: HashMap<ActorId, Box<dyn MotionBehavior>>,
}

impl MotionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a behavior, finalizing any previous one first.
    pub fn start(&mut self, id: ActorId, owner: &mut dyn Agent, mut behavior: Box<dyn MotionBehavior>) {
        if let Some(mut previous) = self.slots.remove(&id) {
            debug!(actor = %id, kind = %previous.kind(), "replacing active behavior");
            previous.finalize(owner);
        }

        behavior.initialize(owner);
        self.slots.insert(id, behavior);
    }

    /// Temporarily halts an actor's behavior without discarding it.
    pub fn preempt(&mut self, id: ActorId, owner: &mut dyn Agent) -> Result<(), SchedulerError> {
        let behavior = self
            .slots
            .get_mut(&id)
            .ok_or(SchedulerError::UnknownActor(id))?;
        behavior.interrupt(owner);
        Ok(())
    }

    /// Resumes a previously preempted behavior; it samples again on the
    /// very next update.
    pub fn resume(&mut self, id: ActorId, owner: &mut dyn Agent) -> Result<(), SchedulerError> {
        let behavior = self
            .slots
            .get_mut(&id)
            .ok_or(SchedulerError::UnknownActor(id))?;
        behavior.reset(owner);
        Ok(())
    }

    /// Finalizes and removes an actor's behavior.
    pub fn stop(&mut self, id: ActorId, owner: &mut dyn Agent) -> Result<(), SchedulerError> {
        let mut behavior = self
            .slots
            .remove(&id)
            .ok_or(SchedulerError::UnknownActor(id))?;
        behavior.finalize(owner);
        Ok(())
    }

    /// Ticks one actor. Returns `Ok(false)` when the behavior expired and
    /// was torn down.
    pub fn update(
        &mut self,
        id: ActorId,
        owner: &mut dyn Agent,
        env: &mut NavEnv<'_>,
        dt_ms: u32,
    ) -> Result<bool, SchedulerError> {
        let Some(behavior) = self.slots.get_mut(&id) else {
            return Err(SchedulerError::UnknownActor(id));
        };

        if behavior.update(owner, env, dt_ms) {
            return Ok(true);
        }

        if let Some(mut finished) = self.slots.remove(&id) {
            debug!(actor = %id, kind = %finished.kind(), "behavior expired");
            finished.finalize(owner);
        }
        Ok(false)
    }

    pub fn kind(&self, id: ActorId) -> Option<BehaviorKind> {
        self.slots.get(&id).map(|behavior| behavior.kind())
    }

    pub fn is_scheduled(&self, id: ActorId) -> bool {
        self.slots.contains_key(&id)
    }
}

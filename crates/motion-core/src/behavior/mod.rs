//! The four interruptible random-movement behaviors.
//!
//! Each variant is its own struct composing the shared [`BehaviorCore`]
//! machinery with a sampling policy, rather than a class hierarchy: state
//! ownership stays explicit and the one genuinely shared responsibility
//! (clearing the public fleeing flag) has a single deterministic owner,
//! [`PanicMotion`].

mod confused;
mod driver;
mod flee;
mod panic;
mod wander;

pub use confused::ConfusedMotion;
pub use flee::FleeMotion;
pub use panic::PanicMotion;
pub use wander::WanderMotion;

pub(crate) use driver::BehaviorCore;

use crate::agent::Agent;
use crate::env::NavEnv;

/// Identifies one of the stochastic behaviors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum BehaviorKind {
    Confused,
    Wander,
    Flee,
    Panic,
}

/// Lifecycle contract shared by every random-movement behavior.
///
/// The caller owns the swap discipline: at most one behavior is active per
/// entity, and replacing one goes through `finalize` first. All five
/// methods are safe to call at any point, including mid-cycle; `interrupt`
/// and `finalize` always halt executor-side motion before returning.
pub trait MotionBehavior {
    fn kind(&self) -> BehaviorKind;

    /// Claims the entity: sets the active bit, revokes client control or
    /// drops the AI's combat target, and cancels any in-flight motion.
    fn initialize(&mut self, owner: &mut dyn Agent);

    /// Re-entry after temporary supersession: the next update samples
    /// immediately, then initialization runs again.
    fn reset(&mut self, owner: &mut dyn Agent);

    /// Temporary preemption: halts motion but leaves the behavior active.
    fn interrupt(&mut self, owner: &mut dyn Agent);

    /// Releases the entity: clears the active and motion bits and restores
    /// client control when it was revoked.
    fn finalize(&mut self, owner: &mut dyn Agent);

    /// Advances the behavior by `dt_ms`. Returns `false` when the behavior
    /// should be torn down (owner dead, or a panic duration elapsed).
    fn update(&mut self, owner: &mut dyn Agent, env: &mut NavEnv<'_>, dt_ms: u32) -> bool;
}

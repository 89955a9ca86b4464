//! Entity-side collaborator surface.
//!
//! The subsystem never owns an entity; it drives one through the [`Agent`]
//! trait and the [`MotionExecutor`] hanging off it. State lives on the entity
//! as two bitsets: [`MoveState`] for internal movement bookkeeping and
//! [`PublicFlags`] for what observers are shown.

use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Movement-state bits tracked per entity.
    ///
    /// Behavior bits come in pairs: the plain bit marks the behavior as
    /// active, the `_MOVE` bit marks an in-flight dispatched path. Both are
    /// mutated only through the behavior lifecycle so the "at most one active
    /// random-movement behavior" invariant stays checkable.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MoveState: u16 {
        const CONFUSED      = 1 << 0;
        const CONFUSED_MOVE = 1 << 1;
        const ROAMING       = 1 << 2;
        const ROAMING_MOVE  = 1 << 3;
        const FLEEING       = 1 << 4;
        const FLEEING_MOVE  = 1 << 5;
        const PANICKED      = 1 << 6;

        /// Externally applied hold: the entity may not move at all.
        const ROOTED        = 1 << 7;
        const STUNNED       = 1 << 8;

        /// Persistent pace: the entity runs unless something slows it down.
        const ALWAYS_RUN    = 1 << 9;

        /// States that forbid free movement. A behavior masks out its own
        /// active bit before testing, so it only yields to *other* holds.
        const FREE_MOVE_DENIED = Self::CONFUSED.bits()
            | Self::FLEEING.bits()
            | Self::ROOTED.bits()
            | Self::STUNNED.bits();

        /// Every in-flight dispatch bit.
        const ANY_MOVE = Self::CONFUSED_MOVE.bits()
            | Self::ROAMING_MOVE.bits()
            | Self::FLEEING_MOVE.bits();
    }
}

bitflags! {
    /// Flags mirrored to observers of the entity.
    ///
    /// `FLEEING` is shared between the plain flee behavior and panic; since
    /// the two are mutually exclusive, clearing it on teardown is owned by
    /// panic alone. Setting it is the caller's job when fear is applied.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PublicFlags: u8 {
        /// An external client steers this entity.
        const CLIENT_DRIVEN = 1 << 0;
        const FLEEING       = 1 << 1;
    }
}

/// One executable trajectory handed to the motion executor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPlan {
    /// Ordered, duplicate-free waypoints; always at least two points.
    pub points: Vec<Vec3>,
    pub walk: bool,
}

/// Advances an entity's position over time along a dispatched path.
///
/// External collaborator: the subsystem only starts, stops, and polls it.
pub trait MotionExecutor {
    /// Starts traversal of `plan` and returns the estimated duration in
    /// milliseconds, or 0 when the executor rejects the plan.
    fn begin_path(&mut self, plan: &PathPlan) -> u32;

    /// Halts traversal. `hard` drops the path in place with no easing; soft
    /// stops let the executor settle however it likes.
    fn stop(&mut self, hard: bool);

    /// True when no dispatched path remains in flight.
    fn is_finalized(&self) -> bool;
}

/// The entity a behavior drives.
///
/// Object safe: behaviors hold no entity references and receive
/// `&mut dyn Agent` on every lifecycle call.
pub trait Agent {
    fn position(&self) -> Vec3;

    fn is_alive(&self) -> bool;

    /// True when an external client steers this entity. Client-driven
    /// entities must never be routed through unseen obstacles, so sampling
    /// demands line of sight for them.
    fn is_client_driven(&self) -> bool;

    /// Revokes (`false`) or restores (`true`) the external client's control.
    fn grant_client_control(&mut self, enabled: bool);

    fn has_ai(&self) -> bool;

    /// Drops the current combat target and halts any in-progress attack.
    fn clear_attack_target(&mut self);

    fn in_line_of_sight(&self, point: Vec3) -> bool;

    fn distance_to(&self, point: Vec3) -> f32 {
        self.position().distance(point)
    }

    fn move_state(&self) -> MoveState;
    fn add_move_state(&mut self, state: MoveState);
    fn clear_move_state(&mut self, state: MoveState);

    fn public_flags(&self) -> PublicFlags;
    fn set_public_flag(&mut self, flag: PublicFlags, enabled: bool);

    /// Mirrors the walk/run pace to observers.
    fn set_walk_display(&mut self, walk: bool);

    /// AI hook: a timed flee has ended.
    fn notify_flee_timeout(&mut self);

    fn motor(&mut self) -> &mut dyn MotionExecutor;
    fn motor_ref(&self) -> &dyn MotionExecutor;
}

//! Stochastic navigation and motion dispatch for autonomous actors.
//!
//! Tick-driven behaviors (wander, confused, flee, panic) decide where a
//! simulated entity moves next: each cycle they sample candidate
//! destinations around an anchor, stitch them into one duplicate-free
//! waypoint sequence through a navigation oracle, and hand the result to a
//! motion executor. Pathfinding, spline execution, and the owning entity
//! are external collaborators reached through the traits in [`env`] and
//! [`agent`]; everything here runs synchronously inside one `update` call
//! per simulation tick.

pub mod agent;
pub mod behavior;
pub mod config;
pub mod env;
pub mod intent;
pub mod sample;
pub mod timer;

mod dispatch;
mod path;

pub use agent::{Agent, MotionExecutor, MoveState, PathPlan, PublicFlags};
pub use behavior::{
    BehaviorKind, ConfusedMotion, FleeMotion, MotionBehavior, PanicMotion, WanderMotion,
};
pub use config::MotionConfig;
pub use env::{NavEnv, NavOracle, Route};
pub use intent::{IntentError, MotionIntent, RetryCounter};
pub use sample::{AnchorSampler, QuietBandSampler, SamplePolicy};
pub use timer::CycleTimer;

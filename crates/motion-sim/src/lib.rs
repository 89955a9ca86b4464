//! Concrete collaborators for driving `motion-core` behaviors in a
//! self-contained simulated world.
//!
//! [`FlatWorld`] answers navigation queries over a plane with obstacle
//! discs, [`SimActor`]/[`PathMotor`] implement the entity and executor
//! side, and [`MotionScheduler`] enforces the one-active-behavior-per-actor
//! caller contract.

pub mod actor;
pub mod scheduler;
pub mod world;

pub use actor::{ActorTelemetry, PathMotor, SimActor};
pub use scheduler::{ActorId, MotionScheduler, SchedulerError};
pub use world::{FlatWorld, Obstacle, WorldError};

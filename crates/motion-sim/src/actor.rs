//! Simulated actor: a kinematic path motor plus the entity-side trait.

use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec3;

use motion_core::{Agent, MotionExecutor, MoveState, PathPlan, PublicFlags};

use crate::world::FlatWorld;

/// Pace in world units per second.
const WALK_SPEED: f32 = 2.5;
const RUN_SPEED: f32 = 7.0;

/// Kinematic executor sliding a position along the dispatched plan.
#[derive(Clone, Debug, Default)]
pub struct PathMotor {
    position: Vec3,
    targets: VecDeque<Vec3>,
    walk: bool,
}

impl PathMotor {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            targets: VecDeque::new(),
            walk: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    fn speed(&self) -> f32 {
        if self.walk { WALK_SPEED } else { RUN_SPEED }
    }

    /// Integrates `dt_ms` of traversal, consuming waypoints as they are
    /// reached.
    pub fn advance(&mut self, dt_ms: u32) {
        let mut budget = self.speed() * dt_ms as f32 / 1_000.0;

        while budget > 0.0 {
            let Some(&target) = self.targets.front() else {
                break;
            };
            let distance = self.position.distance(target);

            if distance <= budget {
                self.position = target;
                self.targets.pop_front();
                budget -= distance;
            } else {
                self.position += (target - self.position) / distance * budget;
                break;
            }
        }
    }
}

impl MotionExecutor for PathMotor {
    fn begin_path(&mut self, plan: &PathPlan) -> u32 {
        self.walk = plan.walk;

        let mut length = 0.0;
        let mut prev = self.position;
        for &point in &plan.points {
            length += prev.distance(point);
            prev = point;
        }
        if length <= 0.0 {
            // Degenerate plan: nowhere to go.
            return 0;
        }

        self.targets = plan.points.iter().copied().collect();
        (length / self.speed() * 1_000.0).ceil() as u32
    }

    fn stop(&mut self, _hard: bool) {
        // No easing modeled: soft and hard stops both drop the plan here.
        self.targets.clear();
    }

    fn is_finalized(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Counters the integration tests inspect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActorTelemetry {
    pub control_revoked: u32,
    pub control_restored: u32,
    pub targets_cleared: u32,
    pub flee_timeouts: u32,
}

/// Demo/test actor wiring the whole entity-side collaborator surface.
pub struct SimActor {
    world: Rc<FlatWorld>,
    motor: PathMotor,
    alive: bool,
    ai: bool,
    state: MoveState,
    flags: PublicFlags,
    walk_display: bool,
    pub telemetry: ActorTelemetry,
}

impl SimActor {
    /// AI-driven actor, the common case.
    pub fn new(world: Rc<FlatWorld>, position: Vec3) -> Self {
        Self {
            world,
            motor: PathMotor::at(position),
            alive: true,
            ai: true,
            state: MoveState::empty(),
            flags: PublicFlags::empty(),
            walk_display: true,
            telemetry: ActorTelemetry::default(),
        }
    }

    /// Client-driven actor: no AI, line-of-sight enforced on samples.
    pub fn client_driven(world: Rc<FlatWorld>, position: Vec3) -> Self {
        let mut actor = Self::new(world, position);
        actor.ai = false;
        actor.flags.insert(PublicFlags::CLIENT_DRIVEN);
        actor
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Runs the motor for one tick.
    pub fn advance(&mut self, dt_ms: u32) {
        self.motor.advance(dt_ms);
    }

    pub fn walk_display(&self) -> bool {
        self.walk_display
    }
}

impl Agent for SimActor {
    fn position(&self) -> Vec3 {
        self.motor.position()
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_client_driven(&self) -> bool {
        self.flags.contains(PublicFlags::CLIENT_DRIVEN)
    }

    fn grant_client_control(&mut self, enabled: bool) {
        if enabled {
            self.telemetry.control_restored += 1;
        } else {
            self.telemetry.control_revoked += 1;
        }
    }

    fn has_ai(&self) -> bool {
        self.ai
    }

    fn clear_attack_target(&mut self) {
        self.telemetry.targets_cleared += 1;
    }

    fn in_line_of_sight(&self, point: Vec3) -> bool {
        self.world.segment_clear(self.position(), point)
    }

    fn move_state(&self) -> MoveState {
        self.state
    }

    fn add_move_state(&mut self, state: MoveState) {
        self.state.insert(state);
    }

    fn clear_move_state(&mut self, state: MoveState) {
        self.state.remove(state);
    }

    fn public_flags(&self) -> PublicFlags {
        self.flags
    }

    fn set_public_flag(&mut self, flag: PublicFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    fn set_walk_display(&mut self, walk: bool) {
        self.walk_display = walk;
    }

    fn notify_flee_timeout(&mut self) {
        self.telemetry.flee_timeouts += 1;
    }

    fn motor(&mut self) -> &mut dyn MotionExecutor {
        &mut self.motor
    }

    fn motor_ref(&self) -> &dyn MotionExecutor {
        &self.motor
    }
}

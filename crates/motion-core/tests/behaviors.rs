//! Lifecycle and dispatch-cycle coverage for the behavior family, driven
//! through scripted collaborators.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec3;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use motion_core::{
    Agent, ConfusedMotion, FleeMotion, MotionBehavior, MotionExecutor, MotionIntent, MoveState,
    NavEnv, NavOracle, PanicMotion, PathPlan, PublicFlags, QuietBandSampler, Route, SamplePolicy,
    WanderMotion,
};

/// Scripted navigation: pops pre-seeded sampling answers and routes every
/// segment as a straight line. Records what it was asked.
#[derive(Default)]
struct ScriptNav {
    samples: Mutex<VecDeque<Option<Vec3>>>,
    sample_calls: AtomicU32,
    sample_origins: Mutex<Vec<Vec3>>,
    sample_radii: Mutex<Vec<f32>>,
}

impl ScriptNav {
    fn with_samples(samples: impl IntoIterator<Item = Option<Vec3>>) -> Self {
        Self {
            samples: Mutex::new(samples.into_iter().collect()),
            ..Self::default()
        }
    }

    fn push(&self, sample: Option<Vec3>) {
        self.samples.lock().unwrap().push_back(sample);
    }

    fn calls(&self) -> u32 {
        self.sample_calls.load(Ordering::Relaxed)
    }

    fn last_origin(&self) -> Option<Vec3> {
        self.sample_origins.lock().unwrap().last().copied()
    }

    fn last_radius(&self) -> Option<f32> {
        self.sample_radii.lock().unwrap().last().copied()
    }
}

impl NavOracle for ScriptNav {
    fn reachable_point_near(
        &self,
        _rng: &mut dyn RngCore,
        origin: Vec3,
        radius: f32,
        _vertical_bound: f32,
    ) -> Option<Vec3> {
        self.sample_calls.fetch_add(1, Ordering::Relaxed);
        self.sample_origins.lock().unwrap().push(origin);
        self.sample_radii.lock().unwrap().push(radius);
        self.samples.lock().unwrap().pop_front().flatten()
    }

    fn route(&self, from: Vec3, to: Vec3, _max_length: Option<f32>) -> Route {
        Route {
            points: vec![from, to],
            reachable: true,
        }
    }
}

/// Executor stub: records launches and stop hardness, reports busy until
/// the test finishes the move by hand.
struct StubMotor {
    accept: bool,
    busy: bool,
    launched: Vec<PathPlan>,
    stops: Vec<bool>,
}

impl Default for StubMotor {
    fn default() -> Self {
        Self {
            accept: true,
            busy: false,
            launched: Vec::new(),
            stops: Vec::new(),
        }
    }
}

impl MotionExecutor for StubMotor {
    fn begin_path(&mut self, plan: &PathPlan) -> u32 {
        self.launched.push(plan.clone());
        if self.accept {
            self.busy = true;
            1_000
        } else {
            0
        }
    }

    fn stop(&mut self, hard: bool) {
        self.stops.push(hard);
        self.busy = false;
    }

    fn is_finalized(&self) -> bool {
        !self.busy
    }
}

struct TestAgent {
    position: Vec3,
    alive: bool,
    ai: bool,
    state: MoveState,
    flags: PublicFlags,
    motor: StubMotor,
    /// Points the owner cannot see.
    los_blocked: Vec<Vec3>,
    control_revoked: u32,
    control_restored: u32,
    targets_cleared: u32,
    flee_timeouts: u32,
    walk_display: Option<bool>,
}

impl TestAgent {
    fn ai_driven(position: Vec3) -> Self {
        Self {
            position,
            alive: true,
            ai: true,
            state: MoveState::empty(),
            flags: PublicFlags::empty(),
            motor: StubMotor::default(),
            los_blocked: Vec::new(),
            control_revoked: 0,
            control_restored: 0,
            targets_cleared: 0,
            flee_timeouts: 0,
            walk_display: None,
        }
    }

    fn client_driven(position: Vec3) -> Self {
        Self {
            ai: false,
            flags: PublicFlags::CLIENT_DRIVEN,
            ..Self::ai_driven(position)
        }
    }
}

impl Agent for TestAgent {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_client_driven(&self) -> bool {
        self.flags.contains(PublicFlags::CLIENT_DRIVEN)
    }

    fn grant_client_control(&mut self, enabled: bool) {
        if enabled {
            self.control_restored += 1;
        } else {
            self.control_revoked += 1;
        }
    }

    fn has_ai(&self) -> bool {
        self.ai
    }

    fn clear_attack_target(&mut self) {
        self.targets_cleared += 1;
    }

    fn in_line_of_sight(&self, point: Vec3) -> bool {
        !self.los_blocked.contains(&point)
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
        self.walk_display = Some(walk);
    }

    fn notify_flee_timeout(&mut self) {
        self.flee_timeouts += 1;
    }

    fn motor(&mut self) -> &mut dyn MotionExecutor {
        &mut self.motor
    }

    fn motor_ref(&self) -> &dyn MotionExecutor {
        &self.motor
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(0xC0FFEE)
}

#[test]
fn initialize_then_finalize_restores_client_control() {
    let mut owner = TestAgent::client_driven(Vec3::ZERO);
    let mut behavior = ConfusedMotion::from_owner(&owner);

    behavior.initialize(&mut owner);
    assert!(owner.state.contains(MoveState::CONFUSED));
    assert_eq!(owner.control_revoked, 1);
    assert_eq!(owner.targets_cleared, 0);

    behavior.finalize(&mut owner);
    assert!(owner.state.is_empty());
    assert_eq!(owner.control_restored, 1);
}

#[test]
fn initialize_drops_ai_target_and_interrupt_keeps_control() {
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    let mut behavior = ConfusedMotion::from_owner(&owner);

    behavior.initialize(&mut owner);
    assert_eq!(owner.targets_cleared, 1);
    assert_eq!(owner.control_revoked, 0);

    behavior.interrupt(&mut owner);
    assert!(owner.state.contains(MoveState::CONFUSED));
    assert!(!owner.state.intersects(MoveState::ANY_MOVE));
    assert_eq!(owner.control_restored, 0);
}

#[test]
fn initialize_halts_unfinished_motion_hard_for_clients() {
    let mut client = TestAgent::client_driven(Vec3::ZERO);
    client.motor.busy = true;
    ConfusedMotion::from_owner(&client).initialize(&mut client);
    assert_eq!(client.motor.stops, vec![true]);

    let mut npc = TestAgent::ai_driven(Vec3::ZERO);
    npc.motor.busy = true;
    ConfusedMotion::from_owner(&npc).initialize(&mut npc);
    assert_eq!(npc.motor.stops, vec![false]);
}

#[test]
fn wander_dispatches_two_point_path_and_sets_motion() {
    let nav = ScriptNav::with_samples([Some(Vec3::new(3.0, 4.0, 0.0))]);
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    let mut behavior = WanderMotion::new(Vec3::ZERO, 5.0, 0.0).unwrap();

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 100));

    assert_eq!(owner.motor.launched.len(), 1);
    let plan = &owner.motor.launched[0];
    assert_eq!(plan.points, vec![Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)]);
    assert!(plan.walk);
    assert!(owner.state.contains(MoveState::ROAMING_MOVE));
}

#[test]
fn confused_failure_rearms_with_short_retry() {
    // Empty script: every sampling attempt comes back unreachable.
    let nav = ScriptNav::default();
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::new(1.0, 2.0, 0.0));
    let mut behavior = ConfusedMotion::from_owner(&owner);

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 100));

    assert_eq!(nav.calls(), 1);
    assert!(owner.motor.launched.is_empty());
    assert!(!owner.state.intersects(MoveState::ANY_MOVE));

    // The retry interval is the fixed lower delay bound, not a random draw.
    assert!(behavior.update(&mut owner, &mut env, 499));
    assert_eq!(nav.calls(), 1);
    assert!(behavior.update(&mut owner, &mut env, 1));
    assert_eq!(nav.calls(), 2);
}

#[test]
fn flee_samples_from_current_position_with_band_radius() {
    let candidate = Vec3::new(25.0, 0.0, 0.0);
    let nav = ScriptNav::with_samples([Some(candidate)]);
    let mut rng = rng();
    let owner = TestAgent::ai_driven(Vec3::new(10.0, 0.0, 0.0));

    let mut intent = MotionIntent {
        anchor: Vec3::ZERO,
        radius: 0.0,
        vertical_bound: 0.0,
        path_cap: None,
        walk: false,
        cycle_points_max: 1,
    };

    let mut env = NavEnv::new(&nav, &mut rng);
    let proposed = QuietBandSampler.propose(&owner, &mut env, &mut intent);

    // Distance 10 is below the quiet band: the radius pushes outward and
    // the query is centered on the owner, not the threat anchor.
    assert_eq!(proposed, Some(candidate));
    assert_eq!(nav.last_origin(), Some(owner.position()));
    let radius = nav.last_radius().unwrap();
    assert!(radius > 0.0);
    assert!(intent.radius > 0.0);
    assert!(candidate.distance(intent.anchor) > owner.position().distance(intent.anchor));
}

#[test]
fn flee_dispatches_running_capped_path() {
    let nav = ScriptNav::with_samples([Some(Vec3::new(40.0, 0.0, 0.0))]);
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::new(10.0, 0.0, 0.0));
    let mut behavior = FleeMotion::new(Vec3::ZERO);

    behavior.initialize(&mut owner);
    assert!(owner.state.contains(MoveState::FLEEING));

    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 100));

    let plan = &owner.motor.launched[0];
    assert!(!plan.walk);
    assert_eq!(plan.points.first().copied(), Some(owner.position));
    assert!(owner.state.contains(MoveState::FLEEING_MOVE));
}

#[test]
fn panic_expires_on_own_clock_and_notifies_per_teardown_call() {
    let nav = ScriptNav::default();
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::new(5.0, 0.0, 0.0));
    owner.flags.insert(PublicFlags::FLEEING);

    let mut behavior = PanicMotion::new(Vec3::ZERO, 1_000);
    behavior.initialize(&mut owner);
    assert!(owner.state.contains(MoveState::PANICKED | MoveState::FLEEING));

    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 400));
    assert!(behavior.update(&mut owner, &mut env, 400));
    assert!(!behavior.update(&mut owner, &mut env, 200));
    assert_eq!(owner.flee_timeouts, 0);

    behavior.finalize(&mut owner);
    assert_eq!(owner.flee_timeouts, 1);
    assert!(!owner.flags.contains(PublicFlags::FLEEING));
    assert!(!owner.state.contains(MoveState::PANICKED));
    assert!(!owner.state.contains(MoveState::FLEEING));

    behavior.interrupt(&mut owner);
    assert_eq!(owner.flee_timeouts, 2);
}

#[test]
fn panic_skips_ai_notification_without_ai() {
    let mut owner = TestAgent::client_driven(Vec3::ZERO);
    let mut behavior = PanicMotion::new(Vec3::ZERO, 1_000);

    behavior.initialize(&mut owner);
    behavior.finalize(&mut owner);
    assert_eq!(owner.flee_timeouts, 0);
}

#[test]
fn rooted_owner_keeps_ticking_without_sampling() {
    let nav = ScriptNav::with_samples([Some(Vec3::new(2.0, 0.0, 0.0))]);
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    let mut behavior = WanderMotion::new(Vec3::ZERO, 10.0, 0.0).unwrap();

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 100));
    assert_eq!(nav.calls(), 1);
    owner.motor.busy = false;

    owner.state.insert(MoveState::ROOTED);
    assert!(behavior.update(&mut owner, &mut env, 20_000));
    assert_eq!(nav.calls(), 1);
    assert!(!owner.state.intersects(MoveState::ANY_MOVE));

    // The hold consumed the whole interval, so release fires immediately.
    owner.state.remove(MoveState::ROOTED);
    nav.push(Some(Vec3::new(4.0, 0.0, 0.0)));
    assert!(behavior.update(&mut owner, &mut env, 0));
    assert_eq!(nav.calls(), 2);
}

#[test]
fn executor_rejection_is_nonfatal_and_keeps_motion_unset() {
    let nav = ScriptNav::with_samples([Some(Vec3::new(3.0, 0.0, 0.0))]);
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    owner.motor.accept = false;
    let mut behavior = WanderMotion::new(Vec3::ZERO, 10.0, 0.0).unwrap();

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 100));

    assert_eq!(owner.motor.launched.len(), 1);
    assert!(!owner.state.intersects(MoveState::ANY_MOVE));
}

#[test]
fn blocked_cycles_accrue_into_one_longer_path() {
    let nav = ScriptNav::with_samples([Some(Vec3::new(1.0, 0.0, 0.0))]);
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    let mut behavior = WanderMotion::new(Vec3::ZERO, 10.0, 0.0).unwrap();

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);

    // First cycle dispatches one candidate and the executor stays busy.
    assert!(behavior.update(&mut owner, &mut env, 100));
    assert_eq!(owner.motor.launched[0].points.len(), 2);

    // Three expiries while in motion: the allowance accrues to its cap.
    for _ in 0..3 {
        assert!(behavior.update(&mut owner, &mut env, 10_000));
    }
    assert_eq!(nav.calls(), 1);

    // Motion finishes; the next cycle drains the full allowance.
    owner.motor.busy = false;
    nav.push(Some(Vec3::new(2.0, 0.0, 0.0)));
    nav.push(Some(Vec3::new(3.0, 0.0, 0.0)));
    nav.push(Some(Vec3::new(4.0, 0.0, 0.0)));
    assert!(behavior.update(&mut owner, &mut env, 10_000));

    assert_eq!(nav.calls(), 4);
    let plan = owner.motor.launched.last().unwrap();
    assert_eq!(
        plan.points,
        vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ]
    );
}

#[test]
fn client_driven_owner_rejects_unseen_candidates() {
    let hidden = Vec3::new(6.0, 0.0, 0.0);

    let nav = ScriptNav::with_samples([Some(hidden)]);
    let mut rng_first = rng();
    let mut owner = TestAgent::client_driven(Vec3::ZERO);
    owner.los_blocked.push(hidden);
    let mut behavior = ConfusedMotion::from_owner(&owner);

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng_first);
    assert!(behavior.update(&mut owner, &mut env, 100));
    assert!(owner.motor.launched.is_empty());

    // The same candidate is fine for an AI-driven owner.
    let nav = ScriptNav::with_samples([Some(hidden)]);
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    owner.los_blocked.push(hidden);
    let mut behavior = ConfusedMotion::from_owner(&owner);

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 100));
    assert_eq!(owner.motor.launched.len(), 1);
}

#[test]
fn reset_forces_immediate_sampling() {
    let nav = ScriptNav::with_samples([Some(Vec3::new(1.0, 0.0, 0.0))]);
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    let mut behavior = WanderMotion::new(Vec3::ZERO, 10.0, 0.0).unwrap();

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(behavior.update(&mut owner, &mut env, 100));
    assert_eq!(nav.calls(), 1);
    owner.motor.busy = false;

    behavior.reset(&mut owner);
    assert_eq!(owner.targets_cleared, 2);

    nav.push(Some(Vec3::new(2.0, 0.0, 0.0)));
    assert!(behavior.update(&mut owner, &mut env, 0));
    assert_eq!(nav.calls(), 2);
}

#[test]
fn wander_teardown_syncs_walk_display() {
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    let mut behavior = WanderMotion::new(Vec3::ZERO, 10.0, 0.0).unwrap();
    behavior.initialize(&mut owner);
    behavior.finalize(&mut owner);
    assert_eq!(owner.walk_display, Some(true));

    let mut runner = TestAgent::ai_driven(Vec3::ZERO);
    runner.state.insert(MoveState::ALWAYS_RUN);
    let mut behavior = WanderMotion::new(Vec3::ZERO, 10.0, 0.0).unwrap();
    behavior.initialize(&mut runner);
    behavior.interrupt(&mut runner);
    assert_eq!(runner.walk_display, Some(false));
}

#[test]
fn dead_owner_signals_teardown() {
    let nav = ScriptNav::default();
    let mut rng = rng();
    let mut owner = TestAgent::ai_driven(Vec3::ZERO);
    owner.alive = false;
    let mut behavior = ConfusedMotion::from_owner(&owner);

    behavior.initialize(&mut owner);
    let mut env = NavEnv::new(&nav, &mut rng);
    assert!(!behavior.update(&mut owner, &mut env, 100));
}

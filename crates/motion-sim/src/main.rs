//! Demo: a handful of actors roaming a flat obstacle course.
//!
//! Run with `RUST_LOG=debug` to watch individual dispatch cycles.

use std::rc::Rc;

use anyhow::Result;
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use motion_core::{Agent, ConfusedMotion, NavEnv, PanicMotion, PublicFlags, WanderMotion};
use motion_sim::{ActorId, FlatWorld, MotionScheduler, SimActor};

const TICK_MS: u32 = 100;
const TICKS: u32 = 600;

fn main() -> Result<()> {
    setup_logging();

    let world = Rc::new(
        FlatWorld::new(100.0)?
            .with_obstacle(Vec3::new(20.0, 0.0, 0.0), 6.0)?
            .with_obstacle(Vec3::new(-15.0, 25.0, 0.0), 4.0)?,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut scheduler = MotionScheduler::new();

    let wanderer_id = ActorId(1);
    let mut wanderer = SimActor::new(Rc::clone(&world), Vec3::ZERO);
    scheduler.start(
        wanderer_id,
        &mut wanderer,
        Box::new(WanderMotion::new(Vec3::ZERO, 25.0, 0.0)?),
    );

    let confused_id = ActorId(2);
    let mut confused = SimActor::new(Rc::clone(&world), Vec3::new(-30.0, 10.0, 0.0));
    let confused_motion = Box::new(ConfusedMotion::from_owner(&confused));
    scheduler.start(confused_id, &mut confused, confused_motion);

    // The caller applying fear sets the public flag; panic clears it on
    // teardown.
    let panicked_id = ActorId(3);
    let threat = Vec3::new(42.0, 40.0, 0.0);
    let mut panicked = SimActor::new(Rc::clone(&world), Vec3::new(40.0, 40.0, 0.0));
    panicked.set_public_flag(PublicFlags::FLEEING, true);
    scheduler.start(
        panicked_id,
        &mut panicked,
        Box::new(PanicMotion::new(threat, 20_000)),
    );

    for tick in 0..TICKS {
        let mut env = NavEnv::new(world.as_ref(), &mut rng);

        scheduler.update(wanderer_id, &mut wanderer, &mut env, TICK_MS)?;
        scheduler.update(confused_id, &mut confused, &mut env, TICK_MS)?;
        if scheduler.is_scheduled(panicked_id)
            && !scheduler.update(panicked_id, &mut panicked, &mut env, TICK_MS)?
        {
            info!(tick, position = ?panicked.position(), "panic ran its course");
        }

        wanderer.advance(TICK_MS);
        confused.advance(TICK_MS);
        panicked.advance(TICK_MS);
    }

    info!(
        wanderer = ?wanderer.position(),
        confused = ?confused.position(),
        panicked = ?panicked.position(),
        "simulation finished"
    );

    scheduler.stop(wanderer_id, &mut wanderer)?;
    scheduler.stop(confused_id, &mut confused)?;

    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Tuning constants for the stochastic motion subsystem.
///
/// Values are expressed in world distance units and milliseconds. They are
/// deliberately compile-time constants: behaviors bake them into their
/// [`MotionIntent`](crate::intent::MotionIntent) at construction, so there is
/// no per-tick configuration lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionConfig;

impl MotionConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard cap on candidate points gathered in one sampling cycle, including
    /// catch-up points accrued while the executor was busy.
    pub const MAX_CYCLE_POINTS: usize = 8;

    // ===== confused milling =====
    /// Fixed sampling radius around the activation spot.
    pub const CONFUSED_RADIUS: f32 = 10.0;
    /// Dispatch cadence bounds in milliseconds.
    pub const CONFUSED_DELAY_MS: (u32, u32) = (500, 1_500);

    // ===== roaming around a home point =====
    pub const WANDER_DELAY_MS: (u32, u32) = (3_000, 10_000);
    /// Catch-up allowance: a wanderer blocked for several cycles may chain up
    /// to this many candidates into one longer path.
    pub const WANDER_CYCLE_POINTS: u8 = 3;

    // ===== fleeing and panicking =====
    pub const FLEE_DELAY_MS: (u32, u32) = (500, 1_500);
    /// Total-length cap on a composed flee path.
    pub const FLEE_PATH_CAP: f32 = 30.0;
    /// Stand-off band a fleeing entity keeps from its threat anchor. Below
    /// the band it samples outward, above it the radius is bounded by the
    /// band width.
    pub const MIN_QUIET_DISTANCE: f32 = 28.0;
    pub const MAX_QUIET_DISTANCE: f32 = 43.0;
}

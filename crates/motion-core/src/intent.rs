//! Sampling brief and catch-up accounting for one active behavior.

use glam::Vec3;

use crate::config::MotionConfig;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum IntentError {
    #[error("sampling radius {0} must be positive and finite")]
    InvalidRadius(f32),

    #[error("vertical bound {0} must be non-negative and finite")]
    InvalidVerticalBound(f32),
}

/// Where and how a behavior samples candidate destinations.
///
/// Owned exclusively by the active behavior instance. Immutable after
/// construction except for the anchor refresh on reset and the fleeing
/// policy rewriting `radius` before every sampling attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionIntent {
    /// Reference point candidate destinations are sampled around.
    pub anchor: Vec3,
    pub radius: f32,
    /// Maximum vertical deviation from the anchor height.
    pub vertical_bound: f32,
    /// Optional cap on a composed path's total length.
    pub path_cap: Option<f32>,
    pub walk: bool,
    /// Upper bound on candidate points chained into one cycle's path.
    pub cycle_points_max: u8,
}

impl MotionIntent {
    /// Validated constructor for caller-supplied geometry (home points and
    /// leash radii usually come from scenario data).
    pub fn new(anchor: Vec3, radius: f32, vertical_bound: f32) -> Result<Self, IntentError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(IntentError::InvalidRadius(radius));
        }
        if !vertical_bound.is_finite() || vertical_bound < 0.0 {
            return Err(IntentError::InvalidVerticalBound(vertical_bound));
        }

        Ok(Self {
            anchor,
            radius,
            vertical_bound,
            path_cap: None,
            walk: true,
            cycle_points_max: 1,
        })
    }

    pub fn with_path_cap(mut self, cap: f32) -> Self {
        self.path_cap = Some(cap);
        self
    }

    pub fn with_walk(mut self, walk: bool) -> Self {
        self.walk = walk;
        self
    }

    pub fn with_cycle_points(mut self, max: u8) -> Self {
        self.cycle_points_max = max.clamp(1, MotionConfig::MAX_CYCLE_POINTS as u8);
        self
    }

    /// Re-centers sampling, used when a behavior restarts around a fresh
    /// position.
    pub fn rebase(&mut self, anchor: Vec3) {
        self.anchor = anchor;
    }
}

/// Moves accumulated since the last successful dispatch.
///
/// One unit accrues per expired cycle, capped so a long block does not turn
/// into an absurd chain. Draining hands the whole allowance to one sampling
/// cycle, which is how a temporarily blocked entity catches up with a
/// longer multi-point path once movement is possible again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetryCounter {
    queued: u8,
    cap: u8,
}

impl RetryCounter {
    pub fn new(cap: u8) -> Self {
        Self {
            queued: 0,
            cap: cap.max(1),
        }
    }

    /// Records one expired cycle, saturating at the cap.
    pub fn accrue(&mut self) {
        if self.queued < self.cap {
            self.queued += 1;
        }
    }

    /// Takes the entire allowance for one sampling cycle.
    pub fn drain(&mut self) -> u8 {
        std::mem::take(&mut self.queued)
    }

    pub fn queued(&self) -> u8 {
        self.queued
    }
}

//! Closed-form damped spring curves.
//!
//! A spring is released from displacement `1` and settles at `0`; the reported progress is
//! `1 - displacement`, so it starts at `0` and converges to `1`. Every value is computed directly
//! from elapsed time, which makes sampling order irrelevant (seeking and scrubbing are free).

use crate::{
    foundation::core::Fps,
    foundation::error::{ReeltimeError, ReeltimeResult},
};

const CRITICAL_EPSILON: f64 = 1e-6;

/// Frames a spring must stay inside the threshold before it counts as settled.
const SETTLE_WINDOW_FRAMES: u64 = 20;

/// Upper bound for [`measure_spring`] before giving up.
const MAX_MEASURE_FRAMES: u64 = 100_000;

/// Physical parameters of a spring.
///
/// `damping` is the viscous damping coefficient `c` (not the ratio), so the damping ratio is
/// `c / (2 * sqrt(stiffness * mass))`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Damping coefficient.
    pub damping: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// Mass of the attached body.
    pub mass: f64,
    /// Initial velocity toward the target, in progress units per second.
    pub initial_velocity: f64,
    /// Clamp progress into `[0, 1]` instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            initial_velocity: 0.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Default stiffness and mass with the given damping coefficient.
    pub fn with_damping(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    /// Unit mass with the given damping and stiffness.
    pub fn new(damping: f64, stiffness: f64) -> Self {
        Self {
            damping,
            stiffness,
            ..Self::default()
        }
    }

    /// Build from a damping ratio instead of a coefficient.
    pub fn from_damping_ratio(ratio: f64, stiffness: f64, mass: f64) -> Self {
        Self {
            damping: ratio * 2.0 * (stiffness * mass).sqrt(),
            stiffness,
            mass,
            ..Self::default()
        }
    }

    /// Critically damped spring with default stiffness: the fastest settle without overshoot.
    pub fn critical() -> Self {
        let base = Self::default();
        Self::from_damping_ratio(1.0, base.stiffness, base.mass)
    }

    /// `zeta`; below 1 the spring overshoots and oscillates.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Undamped angular frequency in rad/s.
    pub fn natural_frequency(&self) -> f64 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Reject parameters the closed form cannot evaluate.
    pub fn validate(&self) -> ReeltimeResult<()> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ReeltimeError::invalid_range(format!(
                "spring mass must be finite and > 0, got {}",
                self.mass
            )));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            return Err(ReeltimeError::invalid_range(format!(
                "spring stiffness must be finite and > 0, got {}",
                self.stiffness
            )));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ReeltimeError::invalid_range(format!(
                "spring damping must be finite and >= 0, got {}",
                self.damping
            )));
        }
        if !self.initial_velocity.is_finite() {
            return Err(ReeltimeError::invalid_range(
                "spring initial velocity must be finite",
            ));
        }
        Ok(())
    }

    /// Displacement from rest `t` seconds after release, starting at `1`.
    fn displacement(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        let omega0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        let v0 = -self.initial_velocity;

        if zeta < 1.0 - CRITICAL_EPSILON {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            let (sin, cos) = (omega_d * t).sin_cos();
            envelope * (cos + ((zeta * omega0 + v0) / omega_d) * sin)
        } else if zeta <= 1.0 + CRITICAL_EPSILON {
            (-omega0 * t).exp() * (1.0 + (omega0 + v0) * t)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega0 * (zeta - root);
            let r2 = -omega0 * (zeta + root);
            let a = (v0 - r2) / (r1 - r2);
            a * (r1 * t).exp() + (1.0 - a) * (r2 * t).exp()
        }
    }

    fn progress_at_secs(&self, t: f64) -> f64 {
        let p = 1.0 - self.displacement(t);
        if self.overshoot_clamping {
            p.clamp(0.0, 1.0)
        } else {
            p
        }
    }
}

/// Normalized spring progress at `frame`, held at `0` until `delay_frames` have elapsed.
///
/// The config is assumed valid (see [`SpringConfig::validate`]).
pub fn spring_value(frame: f64, fps: Fps, config: &SpringConfig, delay_frames: f64) -> f64 {
    let effective = (frame - delay_frames).max(0.0);
    config.progress_at_secs(fps.frames_to_secs(effective))
}

/// A spring with a start delay and an output range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    /// Physical parameters.
    #[serde(default)]
    pub config: SpringConfig,
    /// Frames to wait before release.
    #[serde(default)]
    pub delay_frames: f64,
    /// Output at progress `0`.
    #[serde(default)]
    pub from: f64,
    /// Output at progress `1`.
    #[serde(default = "default_to")]
    pub to: f64,
}

fn default_to() -> f64 {
    1.0
}

impl Spring {
    /// Validated spring from `0` to `1` without delay.
    pub fn new(config: SpringConfig) -> ReeltimeResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            delay_frames: 0.0,
            from: 0.0,
            to: 1.0,
        })
    }

    /// Hold at `from` for `frames` frames before releasing.
    pub fn delayed(mut self, frames: f64) -> Self {
        self.delay_frames = frames;
        self
    }

    /// Remap the output so progress `0..1` maps to `from..to`.
    pub fn between(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Re-check invariants on a deserialized value.
    pub fn validate(&self) -> ReeltimeResult<()> {
        self.config.validate()?;
        if !(self.delay_frames.is_finite() && self.from.is_finite() && self.to.is_finite()) {
            return Err(ReeltimeError::invalid_range(
                "spring delay and output range must be finite",
            ));
        }
        Ok(())
    }

    /// Normalized progress at `frame`.
    pub fn progress(&self, frame: f64, fps: Fps) -> f64 {
        spring_value(frame, fps, &self.config, self.delay_frames)
    }

    /// Output value at `frame`.
    pub fn value(&self, frame: f64, fps: Fps) -> f64 {
        let p = self.progress(frame, fps);
        self.from + (self.to - self.from) * p
    }
}

/// First frame from which the spring stays within `threshold` of its target.
///
/// The curve is sampled frame by frame; it only counts as settled after remaining inside the
/// threshold for a short window, so bouncing springs are not cut off at a zero crossing.
pub fn measure_spring(fps: Fps, config: &SpringConfig, threshold: f64) -> ReeltimeResult<u64> {
    config.validate()?;
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(ReeltimeError::invalid_range(
            "spring settle threshold must be finite and > 0",
        ));
    }

    let mut settled_since: Option<u64> = None;
    for frame in 0..MAX_MEASURE_FRAMES {
        let diff = (1.0 - spring_value(frame as f64, fps, config, 0.0)).abs();
        if diff >= threshold {
            settled_since = None;
            continue;
        }
        let since = *settled_since.get_or_insert(frame);
        if frame - since >= SETTLE_WINDOW_FRAMES {
            return Ok(since);
        }
    }
    Err(ReeltimeError::invalid_range(format!(
        "spring does not settle within {MAX_MEASURE_FRAMES} frames"
    )))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;

//! Engine configuration.
//!
//! Every tunable lives in [`EngineConfig`] so that several engines can run
//! side by side and tests can inject exact values. Defaults come from
//! [`crate::constants`].

use crate::constants::*;
use crate::error::{FlowError, FlowResult};
use crate::geometry::ArcPlacement;
use crate::scaling::ScalingPolicy;
use glam::Vec2;
use std::time::Duration;

/// Closed interval used for randomized tuning values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Both ends equal; useful for deterministic tuning.
    pub const fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &str, allow_negative: bool) -> FlowResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(FlowError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.min > self.max {
            return Err(FlowError::InvalidConfig(format!(
                "{name}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if !allow_negative && self.min < 0.0 {
            return Err(FlowError::InvalidConfig(format!(
                "{name} must not be negative"
            )));
        }
        Ok(())
    }
}

/// Layout of the scene relative to the reference resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryConfig {
    pub reference: Vec2,
    pub scaling_policy: ScalingPolicy,
    pub source_radius: f32,
    /// Arc (radians) kept free of sources.
    pub excluded_arc: f32,
    pub arc_placement: ArcPlacement,
    pub hub_size: f32,
    pub tray_reserve: f32,
    pub tube_bend: f32,
    pub tube_sway: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            reference: Vec2::new(REFERENCE_WIDTH, REFERENCE_HEIGHT),
            scaling_policy: ScalingPolicy::default(),
            source_radius: SOURCE_RADIUS,
            excluded_arc: EXCLUDED_ARC_DEG.to_radians(),
            arc_placement: ArcPlacement::default(),
            hub_size: HUB_SIZE,
            tray_reserve: TRAY_RESERVE,
            tube_bend: TUBE_BEND,
            tube_sway: TUBE_SWAY,
        }
    }
}

/// Randomized attributes of source-side particles.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleTuning {
    pub scale: Range,
    pub opacity: Range,
    /// Travel time along the path, seconds.
    pub duration: Range,
    pub end_scale: f32,
    /// Delay between spawn attempts of one source, seconds.
    pub frequency: Range,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            scale: Range::new(PARTICLE_SCALE_MIN, PARTICLE_SCALE_MAX),
            opacity: Range::new(PARTICLE_OPACITY_MIN, PARTICLE_OPACITY_MAX),
            duration: Range::new(PARTICLE_DURATION_MIN, PARTICLE_DURATION_MAX),
            end_scale: PARTICLE_END_SCALE,
            frequency: Range::new(SPAWN_FREQUENCY_MIN, SPAWN_FREQUENCY_MAX),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceTuning {
    /// Per-index multiplier for the first spawn of each source, seconds.
    pub start_delay: Range,
}

impl Default for SourceTuning {
    fn default() -> Self {
        Self {
            start_delay: Range::new(START_DELAY_MIN, START_DELAY_MAX),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticleLimits {
    pub max_per_source: usize,
    pub max_output: usize,
}

impl Default for ParticleLimits {
    fn default() -> Self {
        Self {
            max_per_source: MAX_PARTICLES_PER_SOURCE,
            max_output: MAX_OUTPUT_PARTICLES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutputTuning {
    pub base_duration: f32,
    /// Upper bound of the random extra added to `base_duration`.
    pub duration_jitter: f32,
    /// Period of the automatic output emitter; `None` leaves output spawning
    /// entirely to the host.
    pub emit_interval: Option<f32>,
}

impl Default for OutputTuning {
    fn default() -> Self {
        Self {
            base_duration: OUTPUT_BASE_DURATION,
            duration_jitter: OUTPUT_DURATION_JITTER,
            emit_interval: Some(OUTPUT_EMIT_INTERVAL),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub geometry: GeometryConfig,
    pub particles: ParticleTuning,
    pub sources: SourceTuning,
    pub limits: ParticleLimits,
    pub output: OutputTuning,
    pub cycle_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            particles: ParticleTuning::default(),
            sources: SourceTuning::default(),
            limits: ParticleLimits::default(),
            output: OutputTuning::default(),
            cycle_interval: Duration::from_secs_f32(OUTPUT_CYCLE_INTERVAL),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> FlowResult<()> {
        let g = &self.geometry;
        if !(g.reference.x > 0.0 && g.reference.y > 0.0) {
            return Err(FlowError::InvalidConfig(
                "reference resolution must be positive".into(),
            ));
        }
        if !(0.0..std::f32::consts::TAU).contains(&g.excluded_arc) {
            return Err(FlowError::InvalidConfig(
                "excluded arc must be in [0, 2π)".into(),
            ));
        }
        if g.source_radius < 0.0 || g.hub_size < 0.0 || g.tray_reserve < 0.0 {
            return Err(FlowError::InvalidConfig(
                "layout lengths must not be negative".into(),
            ));
        }

        let p = &self.particles;
        p.scale.validate("particles.scale", false)?;
        p.opacity.validate("particles.opacity", false)?;
        if p.opacity.max > 1.0 {
            return Err(FlowError::InvalidConfig(
                "particles.opacity must not exceed 1".into(),
            ));
        }
        p.duration.validate("particles.duration", false)?;
        if p.duration.min <= 0.0 {
            return Err(FlowError::InvalidConfig(
                "particles.duration must be positive".into(),
            ));
        }
        // A zero spawn delay would let one source spin inside a single tick.
        p.frequency.validate("particles.frequency", false)?;
        if p.frequency.min <= 0.0 {
            return Err(FlowError::InvalidConfig(
                "particles.frequency must be positive".into(),
            ));
        }
        self.sources.start_delay.validate("sources.start_delay", false)?;

        if self.limits.max_per_source == 0 || self.limits.max_output == 0 {
            return Err(FlowError::InvalidConfig(
                "particle limits must be at least 1".into(),
            ));
        }

        let o = &self.output;
        if !(o.base_duration > 0.0) || o.duration_jitter < 0.0 {
            return Err(FlowError::InvalidConfig(
                "output durations must be positive".into(),
            ));
        }
        if let Some(interval) = o.emit_interval {
            if !(interval > 0.0) {
                return Err(FlowError::InvalidConfig(
                    "output.emit_interval must be positive".into(),
                ));
            }
        }
        if self.cycle_interval.is_zero() {
            return Err(FlowError::InvalidConfig(
                "cycle interval must be positive".into(),
            ));
        }
        Ok(())
    }
}

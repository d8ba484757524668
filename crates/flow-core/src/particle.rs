use crate::catalog::OutputCategory;
use crate::ease::Ease;
use crate::geometry::{PathId, PathSpec};
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Source { index: usize },
    Output { category: OutputCategory },
}

/// One unit of "data flowing" along a path. Traverses its path once.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    pub path: PathId,
    pub start_scale: f32,
    pub end_scale: f32,
    pub start_opacity: f32,
    pub end_opacity: f32,
    pub spawned_at: Duration,
    pub duration: Duration,
    pub ease: Ease,
}

/// Render state of a particle at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFrame {
    pub position: Vec2,
    /// Heading of the path tangent, degrees.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Particle {
    pub fn completes_at(&self) -> Duration {
        self.spawned_at + self.duration
    }

    /// Linear time progress in `[0, 1]`.
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.spawned_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Position and tween values at `now`, or `None` if the bound path is
    /// not part of `paths`.
    pub fn sample(&self, now: Duration, paths: &PathSpec) -> Option<ParticleFrame> {
        let curve = paths.get(self.path)?;
        let t = self.ease.apply(self.progress(now));
        Some(ParticleFrame {
            position: curve.point_at(t),
            rotation: curve.angle_at(t),
            scale: lerp(self.start_scale, self.end_scale, t),
            opacity: lerp(self.start_opacity, self.end_opacity, t),
        })
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

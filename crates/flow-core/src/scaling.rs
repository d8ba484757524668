use glam::Vec2;

/// How the per-axis ratios against the reference resolution are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScalingPolicy {
    /// Smaller ratio: the whole scene stays visible, may letterbox.
    #[default]
    Fit,
    /// Larger ratio: the scene always covers the viewport, may crop.
    Cover,
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Hosts report zero sizes before layout; geometry must wait for this.
    #[inline]
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Unitless scale of the viewport relative to `reference`.
///
/// Non-positive viewports give a degenerate factor; hosts only call this
/// with laid-out dimensions.
pub fn compute_scaling_factor(viewport: Viewport, reference: Vec2, policy: ScalingPolicy) -> f32 {
    let width_ratio = viewport.width / reference.x;
    let height_ratio = viewport.height / reference.y;
    match policy {
        ScalingPolicy::Fit => width_ratio.min(height_ratio),
        ScalingPolicy::Cover => width_ratio.max(height_ratio),
    }
}

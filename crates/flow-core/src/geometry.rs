//! Path geometry between the source ring, the hub and the output tray.
//!
//! All coordinates are in container pixels with the SVG convention (y grows
//! downwards), so an angle of `-π/2` points at 12 o'clock and increasing
//! angles sweep clockwise on screen.

use crate::config::GeometryConfig;
use crate::constants::CONTROL_NEAR_WEIGHT;
use crate::scaling::{compute_scaling_factor, Viewport};
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::fmt;

/// Stable identifier of a rendered path element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathId {
    Source(usize),
    Tube,
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(i) => write!(f, "path-{i}"),
            Self::Tube => f.write_str("tube-path"),
        }
    }
}

/// A single cubic bezier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub start: Vec2,
    pub c1: Vec2,
    pub c2: Vec2,
    pub end: Vec2,
}

impl CubicBezier {
    pub const fn new(start: Vec2, c1: Vec2, c2: Vec2, end: Vec2) -> Self {
        Self { start, c1, c2, end }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start * (u * u * u)
            + self.c1 * (3.0 * u * u * t)
            + self.c2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// First derivative at `t`. Zero for fully degenerate segments.
    pub fn tangent_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        (self.c1 - self.start) * (3.0 * u * u)
            + (self.c2 - self.c1) * (6.0 * u * t)
            + (self.end - self.c2) * (3.0 * t * t)
    }

    /// Heading in degrees at `t`, as used for rotate-to-path.
    ///
    /// Falls back to the chord direction where the derivative vanishes
    /// (coincident endpoint and control point), and to 0 for a point.
    pub fn angle_at(&self, t: f32) -> f32 {
        let mut d = self.tangent_at(t);
        if d.length_squared() <= f32::EPSILON {
            d = self.end - self.start;
        }
        if d.length_squared() <= f32::EPSILON {
            return 0.0;
        }
        d.y.atan2(d.x).to_degrees()
    }

    /// SVG `d` attribute for this segment.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M{},{} C{},{} {},{} {},{}",
            self.start.x,
            self.start.y,
            self.c1.x,
            self.c1.y,
            self.c2.x,
            self.c2.y,
            self.end.x,
            self.end.y
        )
    }
}

impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_svg_path())
    }
}

/// Where the excluded arc sits on the source ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArcPlacement {
    /// Gap centred on 6 o'clock, above the output tray. The first source
    /// follows the gap clockwise, and the ring is symmetric about the
    /// vertical axis (odd counts put the middle source at 12 o'clock).
    #[default]
    Bottom,
    /// First source at 12 o'clock; the gap is the end of the clockwise sweep.
    EndOfSweep,
}

/// Angles of `count` sources stepping clockwise by
/// `(2π - excluded_arc) / count`. Angles increase monotonically and may
/// exceed `2π`.
pub fn source_angles(count: usize, excluded_arc: f32, placement: ArcPlacement) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = (TAU - excluded_arc) / count as f32;
    let first = match placement {
        ArcPlacement::Bottom => FRAC_PI_2 + excluded_arc / 2.0 + step / 2.0,
        ArcPlacement::EndOfSweep => -FRAC_PI_2,
    };
    (0..count).map(|i| first + step * i as f32).collect()
}

/// Sector `(start, end)` of the excluded arc, `start` in `[-π/2, 3π/2)` and
/// `end = start + excluded_arc`.
pub fn excluded_sector(excluded_arc: f32, placement: ArcPlacement) -> (f32, f32) {
    let start = match placement {
        ArcPlacement::Bottom => FRAC_PI_2 - excluded_arc / 2.0,
        ArcPlacement::EndOfSweep => 3.0 * FRAC_PI_2 - excluded_arc,
    };
    (start, start + excluded_arc)
}

/// Point on the source ring for `angle`.
#[inline]
pub fn ring_point(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// One bezier per source, from its ring position into the container center.
///
/// Control points blend 80/20 and 20/80 between the source and the center so
/// the path curves gently inwards. The end point is exactly `(w/2, h/2)`.
pub fn compute_source_paths(
    width: f32,
    height: f32,
    radius: f32,
    count: usize,
    excluded_arc: f32,
    placement: ArcPlacement,
) -> Vec<CubicBezier> {
    let center = Vec2::new(width / 2.0, height / 2.0);
    let near = CONTROL_NEAR_WEIGHT;
    let far = 1.0 - near;
    source_angles(count, excluded_arc, placement)
        .into_iter()
        .map(|angle| {
            let p = ring_point(center, radius, angle);
            CubicBezier::new(p, p * near + center * far, p * far + center * near, center)
        })
        .collect()
}

/// Bezier from just below the hub footprint to the output tray.
pub fn compute_tube_path(
    width: f32,
    height: f32,
    scaling_factor: f32,
    layout: &GeometryConfig,
) -> CubicBezier {
    let s = scaling_factor;
    let x = width / 2.0;
    let start_y = height / 2.0 + layout.hub_size * s / 2.0;
    let end_y = height - layout.tray_reserve * s;
    let sway = layout.tube_sway * s;
    let bend = layout.tube_bend * s;
    CubicBezier::new(
        Vec2::new(x, start_y),
        Vec2::new(x + sway, start_y + bend),
        Vec2::new(x - sway, end_y - bend),
        Vec2::new(x, end_y),
    )
}

/// Every path of the scene for one viewport. Replaced as a whole on resize.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSpec {
    pub viewport: Viewport,
    pub scaling_factor: f32,
    pub sources: Vec<CubicBezier>,
    pub tube: CubicBezier,
}

impl PathSpec {
    pub fn compute(viewport: Viewport, source_count: usize, layout: &GeometryConfig) -> Self {
        let scaling_factor =
            compute_scaling_factor(viewport, layout.reference, layout.scaling_policy);
        let sources = compute_source_paths(
            viewport.width,
            viewport.height,
            layout.source_radius * scaling_factor,
            source_count,
            layout.excluded_arc,
            layout.arc_placement,
        );
        let tube = compute_tube_path(viewport.width, viewport.height, scaling_factor, layout);
        Self {
            viewport,
            scaling_factor,
            sources,
            tube,
        }
    }

    pub fn get(&self, id: PathId) -> Option<&CubicBezier> {
        match id {
            PathId::Source(i) => self.sources.get(i),
            PathId::Tube => Some(&self.tube),
        }
    }

    /// Ids and segments in render order: sources first, then the tube.
    pub fn iter(&self) -> impl Iterator<Item = (PathId, &CubicBezier)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, b)| (PathId::Source(i), b))
            .chain(std::iter::once((PathId::Tube, &self.tube)))
    }
}

// CSS transforms and class names derived from engine state.
//
// Pure string building, no DOM access, so it can be exercised on the host.

use super::constants::*;
use flow_core::{
    DataSource, OutputCategory, ParticleFrame, ParticleKind, PathSpec, SourceKind,
};
use glam::Vec2;

/// Centre an element on `pos` (container pixels) and scale it.
pub fn centered_transform(pos: Vec2, scale: f32) -> String {
    format!(
        "translate({:.2}px, {:.2}px) translate(-50%, -50%) scale({:.4})",
        pos.x, pos.y, scale
    )
}

pub fn particle_transform(frame: &ParticleFrame) -> String {
    format!(
        "translate({:.2}px, {:.2}px) translate(-50%, -50%) rotate({:.2}deg) scale({:.4})",
        frame.position.x, frame.position.y, frame.rotation, frame.scale
    )
}

pub fn particle_style(frame: &ParticleFrame, color: Option<&str>) -> String {
    let mut style = format!(
        "position:absolute;left:0;top:0;transform:{};opacity:{:.3};",
        particle_transform(frame),
        frame.opacity.clamp(0.0, 1.0)
    );
    if let Some(c) = color {
        style.push_str(&format!("background-color:{c};"));
    }
    style
}

/// Source icons sit where their path starts.
pub fn source_icon_positions(paths: &PathSpec) -> Vec<Vec2> {
    paths.sources.iter().map(|b| b.start).collect()
}

pub fn hub_position(paths: &PathSpec) -> Vec2 {
    paths.viewport.center()
}

/// The tray is centred just below the end of the tube.
pub fn tray_position(paths: &PathSpec) -> Vec2 {
    paths.tube.end
}

pub fn source_class(kind: SourceKind) -> String {
    format!("{SOURCE_PARTICLE_CLASS} source-{}", kind.tag())
}

pub fn output_class(category: OutputCategory) -> String {
    format!("{OUTPUT_PARTICLE_CLASS} {}", category.class_name())
}

/// Class list and optional colour for a new particle element.
pub fn particle_appearance(
    kind: ParticleKind,
    sources: &[DataSource],
) -> (String, Option<&'static str>) {
    match kind {
        ParticleKind::Source { index } => match sources.get(index) {
            Some(src) => (source_class(src.kind), Some(src.color)),
            None => (SOURCE_PARTICLE_CLASS.to_string(), None),
        },
        ParticleKind::Output { category } => (output_class(category), None),
    }
}

/// Stroke width and opacity of tunnel glow layer `index`.
pub fn tunnel_layer(index: usize) -> (f32, f32) {
    let i = index as f32;
    (
        TUNNEL_BASE_STROKE - i * TUNNEL_STROKE_STEP,
        (TUNNEL_BASE_OPACITY - i * TUNNEL_OPACITY_STEP).max(0.0),
    )
}

pub fn tunnel_layer_id(index: usize) -> String {
    format!("{TUNNEL_GROUP_ID}-layer-{index}")
}

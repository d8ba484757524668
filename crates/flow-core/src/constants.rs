// Default tuning for the data machine animation.
// Times are in seconds, lengths in CSS pixels at the reference resolution.

// Reference design resolution used by the scaling calculator
pub const REFERENCE_WIDTH: f32 = 1920.0;
pub const REFERENCE_HEIGHT: f32 = 1080.0;

// Source ring
pub const SOURCE_RADIUS: f32 = 260.0; // scaled by the scaling factor
pub const EXCLUDED_ARC_DEG: f32 = 120.0; // gap left for the output tray
pub const CONTROL_NEAR_WEIGHT: f32 = 0.8; // first control point blend towards the source

// Hub and tube
pub const HUB_SIZE: f32 = 256.0;
pub const TRAY_RESERVE: f32 = 180.0; // distance from viewport bottom to the tube end
pub const TUBE_BEND: f32 = 50.0; // vertical reach of the tube control points
pub const TUBE_SWAY: f32 = 20.0; // horizontal offset of the tube control points

// Source particles
pub const PARTICLE_SCALE_MIN: f32 = 0.2;
pub const PARTICLE_SCALE_MAX: f32 = 0.5;
pub const PARTICLE_OPACITY_MIN: f32 = 0.8;
pub const PARTICLE_OPACITY_MAX: f32 = 1.0;
pub const PARTICLE_DURATION_MIN: f32 = 2.0;
pub const PARTICLE_DURATION_MAX: f32 = 5.0;
pub const PARTICLE_END_SCALE: f32 = 1.0;
pub const SPAWN_FREQUENCY_MIN: f32 = 2.0;
pub const SPAWN_FREQUENCY_MAX: f32 = 4.0;
pub const START_DELAY_MIN: f32 = 1.0;
pub const START_DELAY_MAX: f32 = 2.0;

// Capacity
pub const MAX_PARTICLES_PER_SOURCE: usize = 2;
pub const MAX_OUTPUT_PARTICLES: usize = 8;

// Output side
pub const OUTPUT_BASE_DURATION: f32 = 1.5;
pub const OUTPUT_DURATION_JITTER: f32 = 0.4;
pub const OUTPUT_EMIT_INTERVAL: f32 = 0.25;
pub const OUTPUT_CYCLE_INTERVAL: f32 = 3.0;

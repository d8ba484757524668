// Element ids and classes shared with index.html.

pub const CONTAINER_ID: &str = "data-machine";
pub const SVG_ID: &str = "flow-paths";
pub const TUNNEL_GROUP_ID: &str = "tunnel";
pub const HUB_ID: &str = "hub";
pub const TRAY_ID: &str = "output-tray";
pub const SOURCE_ICON_CLASS: &str = "data-source";
pub const OUTPUT_ICON_ATTR: &str = "data-output-index";

pub const SOURCE_PARTICLE_CLASS: &str = "particle";
pub const OUTPUT_PARTICLE_CLASS: &str = "output-particle";
pub const ACTIVE_CLASS: &str = "active";

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

// Tunnel styling: three glow layers plus a dashed flow line
pub const TUNNEL_LAYERS: usize = 3;
pub const TUNNEL_BASE_STROKE: f32 = 20.0;
pub const TUNNEL_STROKE_STEP: f32 = 2.0;
pub const TUNNEL_BASE_OPACITY: f32 = 0.6;
pub const TUNNEL_OPACITY_STEP: f32 = 0.15;
pub const TUNNEL_FLOW_STROKE: f32 = 15.0;
pub const TUNNEL_FLOW_DASH: &str = "4 12";

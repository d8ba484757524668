//! Headless particle/path animation engine for the data machine visual.
//!
//! Nothing in this crate touches a render tree. The engine owns geometry,
//! particle lifetimes and timers, and reports what changed through
//! [`FlowEvent`]s that a rendering layer applies.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod cycler;
pub mod ease;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod particle;
pub mod registry;
pub mod rng;
pub mod scaling;
pub mod scheduler;

pub use catalog::*;
pub use config::*;
pub use constants::*;
pub use cycler::*;
pub use ease::*;
pub use engine::*;
pub use error::*;
pub use geometry::*;
pub use particle::*;
pub use registry::*;
pub use rng::*;
pub use scaling::*;
pub use scheduler::*;

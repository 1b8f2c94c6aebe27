//! Radial layout and animation engine.
//!
//! Places shapes on circles and drives an orbit/rotation pair of animations
//! from a host-supplied frame tick. Nothing here depends on a UI toolkit.

mod macros;

pub mod animation;
pub mod config;
pub mod control;
pub mod engine;
pub mod geometry;
pub mod scene;

pub use animation::{Clock, CycleCount, ParallelTransition, Sample, Status, Transition};
pub use control::{ControlCommand, Layer};
pub use engine::{Frame, OrbitEngine, Visibility};
pub use geometry::{CircleLayout, Degrees, Line, Point, Radians};
pub use scene::{Scene, Stage};

//! 2.5D grid raycaster: a top-down tile map on the left, a shaded
//! first-person projection of the same map on the right.

pub mod caster;
pub mod config;
pub mod grid;
pub mod input;
pub mod player;
pub mod projector;
pub mod ray;
pub mod session;

pub use caster::RayCaster;
pub use config::{Config, Rgb};
pub use grid::GridModel;
pub use player::PlayerState;
pub use projector::{DrawCommand, Projector};
pub use ray::{RayHit, RayResult};
pub use session::Session;

//! Placement strategies that turn an instance index into a relative offset.
//!
//! This module defines the [`PlacementRule`] trait and the concrete
//! strategies the planner combines along a modifier chain.
use mint::Vector3;

use crate::scene::bounds::Bounds;

pub mod circular;
pub mod linear;

pub use circular::CircularPlacement;
pub use linear::LinearPlacement;

/// Trait for per-index placement.
///
/// Implementations are pure: the offset is a function of the index, the
/// rule's own parameters, the instance count of the owning rule, and the
/// template bounds. No side effects, no per-call state.
pub trait PlacementRule: Send + Sync {
    fn relative_offset(&self, index: usize, count: usize, bounds: &Bounds) -> Vector3<f32>;
}

//! Circular placement: instances on a ring in the XZ plane.
use std::f32::consts::TAU;

use glam::Vec3;
use mint::Vector3;

use crate::rules::PlacementRule;
use crate::scene::bounds::Bounds;

/// Places instances evenly on a circle around the base position.
///
/// The full circle is divided by the owning rule's instance count; the
/// angular offset rotates the whole ring. Unlike [`crate::rules::LinearPlacement`],
/// index 0 is not special: it sits on the ring at the angular offset, not on
/// the base position.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircularPlacement {
    /// Ring radius in world units.
    pub radius: f32,
    /// Rotation of the whole ring, in radians.
    pub angular_offset: f32,
}

impl CircularPlacement {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            angular_offset: 0.0,
        }
    }

    pub fn with_angular_offset(mut self, angular_offset: f32) -> Self {
        self.angular_offset = angular_offset;
        self
    }
}

impl PlacementRule for CircularPlacement {
    fn relative_offset(&self, index: usize, count: usize, _bounds: &Bounds) -> Vector3<f32> {
        let alpha = (TAU / count.max(1) as f32) * index as f32 + self.angular_offset;

        Vec3::new(self.radius * alpha.cos(), 0.0, self.radius * alpha.sin()).into()
    }
}

//! Linear placement: instances in a row, spaced by bounds and/or a constant.
use glam::Vec3;
use mint::Vector3;

use crate::rules::PlacementRule;
use crate::scene::bounds::Bounds;

/// Places instances along a line.
///
/// The per-step offset is the sum of a relative part (template bounds size
/// scaled component-wise by [`relative_offset`](Self::with_relative_offset))
/// and a constant part, multiplied by the instance index. Index 0 always
/// lands on the base position.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearPlacement {
    /// Scale the step by the template bounds size.
    pub use_relative_offset: bool,
    /// Per-axis factor applied to the bounds size.
    pub relative_offset: Vec3,
    /// Add a fixed world-unit step.
    pub use_constant_offset: bool,
    /// The fixed step in world units.
    pub constant_offset: Vec3,
}

impl Default for LinearPlacement {
    fn default() -> Self {
        Self {
            use_relative_offset: true,
            relative_offset: Vec3::X,
            use_constant_offset: false,
            constant_offset: Vec3::ZERO,
        }
    }
}

impl LinearPlacement {
    /// A row along +X, one bounds-width apart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the relative per-axis factor and enables the relative part.
    pub fn with_relative_offset(mut self, factor: Vec3) -> Self {
        self.use_relative_offset = true;
        self.relative_offset = factor;
        self
    }

    /// Sets the constant step and enables the constant part.
    pub fn with_constant_offset(mut self, offset: Vec3) -> Self {
        self.use_constant_offset = true;
        self.constant_offset = offset;
        self
    }

    /// Disables the relative part.
    pub fn without_relative_offset(mut self) -> Self {
        self.use_relative_offset = false;
        self
    }
}

impl PlacementRule for LinearPlacement {
    fn relative_offset(&self, index: usize, _count: usize, bounds: &Bounds) -> Vector3<f32> {
        let relative = if self.use_relative_offset {
            bounds.size * self.relative_offset
        } else {
            Vec3::ZERO
        };
        let constant = if self.use_constant_offset {
            self.constant_offset
        } else {
            Vec3::ZERO
        };

        ((relative + constant) * index as f32).into()
    }
}

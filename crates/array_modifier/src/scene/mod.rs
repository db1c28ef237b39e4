//! Host capability seam for scene-graph access.
//!
//! The engine never talks to a concrete scene graph. Everything it needs from
//! the host environment goes through [`SceneHost`]: spawning and despawning
//! nodes, walking and reordering children, writing local transforms, and
//! querying bounding volumes. [`MemoryScene`] is a self-contained reference
//! host used by tests, benches, and the examples crate.
use glam::Vec3;

pub mod bounds;
pub mod host;
pub mod memory;
pub mod probe;

pub use bounds::{resolve_bounds, Bounds, VolumeKind};
pub use host::SceneHost;
pub use memory::MemoryScene;
pub use probe::VolatileProbe;

/// Opaque handle to a node in the host scene graph.
///
/// Handles are issued by the host and carry no meaning to the engine beyond
/// identity. A handle may dangle after the host despawns the node; the engine
/// only holds on to the chain root and the template, both owned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

/// Linear RGBA color written to an instance's base material.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Component-wise linear interpolation; `t` is not clamped.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Local transform of a scene node as the engine writes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: glam::Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: glam::Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_lerp_hits_endpoints() {
        let a = Color::new(0.0, 0.2, 0.4, 1.0);
        let b = Color::new(1.0, 0.8, 0.6, 0.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn color_lerp_midpoint() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn local_transform_default_is_identity() {
        let tf = LocalTransform::default();
        assert_eq!(tf.position, Vec3::ZERO);
        assert_eq!(tf.rotation, glam::Quat::IDENTITY);
        assert_eq!(tf.scale, Vec3::ONE);
    }
}

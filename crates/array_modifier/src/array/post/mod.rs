//! Per-instance decoration run after placement.
//!
//! Post-processors run strictly after positions are committed, strictly in
//! attachment order, in a single forward pass over the instances: a later
//! post-processor sees the earlier ones' writes, never the other way
//! around. Pass-local running state belongs in the implementor and is reset
//! in `before_execute`.
use crate::array::InstanceInfo;
use crate::scene::SceneHost;

pub mod color;
pub mod look_at;
pub mod rotation;

pub use color::ColorPostProcessor;
pub use look_at::LookAtPostProcessor;
pub use rotation::RotationPostProcessor;

/// Trait for per-instance decoration.
pub trait PostProcessor: Send + Sync {
    /// Called once before a pass; reset accumulated state here.
    fn before_execute(&mut self) {}

    /// Called once per live instance, in child-index order.
    fn execute(&mut self, host: &mut dyn SceneHost, info: InstanceInfo);

    /// Called once after the pass.
    fn after_execute(&mut self) {}
}

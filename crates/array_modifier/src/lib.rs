#![forbid(unsafe_code)]
//! array_modifier: Modifier-chain engine for arraying scene objects.
//!
//! Modules:
//! - scene: host capability seam (spawning, transforms, bounds probing) and an in-memory reference host
//! - rules: placement strategies (linear rows, circular layouts)
//! - array: chain model, position planning, instance pooling, post-processing, baking
//!
//! A chain of placement rules hangs off one root node. Each rule arrays the
//! previous rule's positions; the last active rule owns the pool of live
//! instances and replans it whenever a property changes.
pub mod array;
pub mod error;
pub mod rules;
pub mod scene;

/// Convenient re-exports for common types. Import with `use array_modifier::prelude::*;`.
pub mod prelude {
    pub use crate::array::bake::{BakeSettings, MeshBaker};
    pub use crate::array::chain::{ModifierChain, Rule};
    pub use crate::array::planner::plan_positions;
    pub use crate::array::pool::InstancePool;
    pub use crate::array::post::{
        ColorPostProcessor, LookAtPostProcessor, PostProcessor, RotationPostProcessor,
    };
    pub use crate::array::{InstanceInfo, RuleState, DEFAULT_COUNT};
    pub use crate::error::{Error, Result};
    pub use crate::rules::{CircularPlacement, LinearPlacement, PlacementRule};
    pub use crate::scene::bounds::{resolve_bounds, Bounds, VolumeKind};
    pub use crate::scene::{Color, MemoryScene, NodeId, SceneHost, VolatileProbe};
}

//! Bake settings and the mesh-baking collaborator seam.
use crate::error::Result;
use crate::scene::{NodeId, SceneHost};

/// Chain-shared baking configuration.
///
/// Baking is irreversible within a pass: merged geometry cannot be
/// repositioned per instance, so every replan under bake mode rebuilds the
/// pool from scratch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BakeSettings {
    /// Replace live instances with merged static geometry after each pass.
    pub bake_meshes: bool,
    /// Ask the baker to attach a box collider to each baked node.
    pub add_collider: bool,
    /// Ask the baker to generate secondary lightmap UVs.
    pub generate_lightmap_uvs: bool,
}

impl BakeSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bake_meshes(mut self, enabled: bool) -> Self {
        self.bake_meshes = enabled;
        self
    }

    pub fn with_add_collider(mut self, enabled: bool) -> Self {
        self.add_collider = enabled;
        self
    }

    pub fn with_generate_lightmap_uvs(mut self, enabled: bool) -> Self {
        self.generate_lightmap_uvs = enabled;
        self
    }
}

/// Collaborator that merges the live instances under `root` into static
/// geometry, grouped by material.
///
/// The returned nodes replace the pool: the engine reparents them out,
/// clears the source instances, and reparents the baked nodes under the
/// chain root. The result is consumed once per bake call and is not
/// restartable. How colliders and lightmap UVs are realized is the host's
/// business; the engine only forwards the settings.
pub trait MeshBaker {
    fn bake(
        &mut self,
        host: &mut dyn SceneHost,
        root: NodeId,
        settings: &BakeSettings,
    ) -> Result<Vec<NodeId>>;
}

//! Scoped lifetime for a throwaway template instance.
use crate::error::Result;
use crate::scene::host::SceneHost;
use crate::scene::NodeId;

/// A hidden, short-lived instance of a template, despawned on drop.
///
/// The guard borrows the host for its whole lifetime, so the instance cannot
/// leak into a later mutation of the scene: whatever path leaves the
/// enclosing scope, the probe is despawned first.
pub struct VolatileProbe<'a> {
    host: &'a mut dyn SceneHost,
    node: NodeId,
}

impl<'a> VolatileProbe<'a> {
    /// Spawns a hidden instance of `template` at the scene root.
    pub fn spawn(host: &'a mut dyn SceneHost, template: NodeId) -> Result<Self> {
        let node = host.spawn(template, None)?;
        host.set_visible(node, false);
        Ok(Self { host, node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn host(&self) -> &dyn SceneHost {
        self.host
    }
}

impl Drop for VolatileProbe<'_> {
    fn drop(&mut self) {
        self.host.despawn(self.node);
    }
}

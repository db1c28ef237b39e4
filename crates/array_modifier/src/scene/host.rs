//! The [`SceneHost`] trait: everything the engine asks of a host scene graph.
use glam::{Quat, Vec3};

use crate::error::Result;
use crate::scene::bounds::{Bounds, VolumeKind};
use crate::scene::{Color, NodeId};

/// Synchronous capability contract with the host scene graph.
///
/// All operations run on one logical thread of control and complete before
/// returning; nothing here blocks or suspends. Child indices are stable
/// between calls as long as only the engine mutates the children of a chain
/// root. External code reparenting or destroying pool children between
/// planning passes desyncs the pool accounting (documented precondition, not
/// enforced).
pub trait SceneHost {
    /// Instantiates a copy of `template` (including its descendants) under
    /// `parent`, appended after any existing children.
    fn spawn(&mut self, template: NodeId, parent: Option<NodeId>) -> Result<NodeId>;

    /// Destroys `node` and its descendants. Unknown handles are ignored.
    fn despawn(&mut self, node: NodeId);

    /// Moves `node` under `parent` (or to the scene root), appended after any
    /// existing children.
    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>);

    fn child_count(&self, node: NodeId) -> usize;

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId>;

    fn set_local_position(&mut self, node: NodeId, position: Vec3);

    fn set_local_rotation(&mut self, node: NodeId, rotation: Quat);

    fn set_local_scale(&mut self, node: NodeId, scale: Vec3);

    fn local_position(&self, node: NodeId) -> Vec3;

    fn world_position(&self, node: NodeId) -> Vec3;

    /// Hides or shows a node. Probes are hidden so a measurement pass never
    /// flickers in the visible scene.
    fn set_visible(&mut self, node: NodeId, visible: bool);

    fn is_visible(&self, node: NodeId) -> bool;

    /// Returns the bounding volume of the given `kind` found on `node` or the
    /// first of its descendants that carries one, in the node's local space.
    fn volume_bounds(&self, node: NodeId, kind: VolumeKind) -> Option<Bounds>;

    fn base_color(&self, node: NodeId) -> Option<Color>;

    fn set_base_color(&mut self, node: NodeId, color: Color);
}

//! In-memory reference implementation of [`SceneHost`].
//!
//! [`MemoryScene`] keeps a flat registry of nodes with parent/child links and
//! local transforms. It exists so the full pipeline can run headless: tests,
//! benches, and the examples crate drive it instead of a real engine.
//! Spawning clones the template's whole subtree; despawning drops it again.
use std::collections::HashMap;

use glam::{Quat, Vec3};

use crate::error::{Error, Result};
use crate::scene::bounds::{Bounds, VolumeKind};
use crate::scene::host::SceneHost;
use crate::scene::{Color, LocalTransform, NodeId};

#[derive(Clone)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transform: LocalTransform,
    visible: bool,
    volumes: Vec<(VolumeKind, Bounds)>,
    color: Option<Color>,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: LocalTransform::default(),
            visible: true,
            volumes: Vec::new(),
            color: None,
        }
    }
}

/// A self-contained scene graph backing the [`SceneHost`] contract.
#[derive(Default)]
pub struct MemoryScene {
    nodes: HashMap<NodeId, NodeData>,
    next_id: u64,
    spawn_budget: Option<usize>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty node at the scene root.
    pub fn create_node(&mut self) -> NodeId {
        self.alloc(NodeData::default())
    }

    /// Number of live nodes in the scene.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Attaches a bounding volume of the given kind to a node, replacing a
    /// previous volume of the same kind.
    pub fn set_volume(&mut self, node: NodeId, kind: VolumeKind, bounds: Bounds) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.volumes.retain(|(k, _)| *k != kind);
            data.volumes.push((kind, bounds));
        }
    }

    /// When set, every subsequent [`SceneHost::spawn`] fails. Used to test
    /// partial pool reconciliation.
    pub fn set_fail_spawns(&mut self, fail: bool) {
        self.spawn_budget = fail.then_some(0);
    }

    /// Allows `budget` more successful spawns, then fails the rest.
    pub fn set_spawn_budget(&mut self, budget: usize) {
        self.spawn_budget = Some(budget);
    }

    pub fn local_rotation(&self, node: NodeId) -> Quat {
        self.nodes
            .get(&node)
            .map(|n| n.transform.rotation)
            .unwrap_or(Quat::IDENTITY)
    }

    pub fn local_scale(&self, node: NodeId) -> Vec3 {
        self.nodes
            .get(&node)
            .map(|n| n.transform.scale)
            .unwrap_or(Vec3::ONE)
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, data);
        id
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_data) = self.nodes.get_mut(&parent) {
            parent_data.children.retain(|c| *c != node);
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = None;
        }
    }

    fn clone_subtree(&mut self, source: NodeId, parent: Option<NodeId>) -> Option<NodeId> {
        let mut data = self.nodes.get(&source)?.clone();
        let child_sources = std::mem::take(&mut data.children);
        data.parent = parent;

        let id = self.alloc(data);
        if let Some(parent) = parent {
            if let Some(parent_data) = self.nodes.get_mut(&parent) {
                parent_data.children.push(id);
            }
        }

        for child in child_sources {
            self.clone_subtree(child, Some(id));
        }

        Some(id)
    }

    fn drop_subtree(&mut self, node: NodeId) {
        let Some(data) = self.nodes.remove(&node) else {
            return;
        };
        for child in data.children {
            self.drop_subtree(child);
        }
    }

    fn world_transform(&self, node: NodeId) -> LocalTransform {
        let Some(data) = self.nodes.get(&node) else {
            return LocalTransform::default();
        };
        let local = data.transform;
        match data.parent {
            None => local,
            Some(parent) => {
                let up = self.world_transform(parent);
                LocalTransform {
                    position: up.position + up.rotation * (up.scale * local.position),
                    rotation: up.rotation * local.rotation,
                    scale: up.scale * local.scale,
                }
            }
        }
    }
}

impl SceneHost for MemoryScene {
    fn spawn(&mut self, template: NodeId, parent: Option<NodeId>) -> Result<NodeId> {
        if let Some(budget) = self.spawn_budget.as_mut() {
            if *budget == 0 {
                return Err(Error::Spawn("spawn failure injected".into()));
            }
            *budget -= 1;
        }
        self.clone_subtree(template, parent)
            .ok_or_else(|| Error::Spawn(format!("unknown template node {template:?}")))
    }

    fn despawn(&mut self, node: NodeId) {
        self.detach(node);
        self.drop_subtree(node);
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        if !self.nodes.contains_key(&node) {
            return;
        }
        self.detach(node);
        if let Some(parent) = parent {
            if let Some(parent_data) = self.nodes.get_mut(&parent) {
                parent_data.children.push(node);
            } else {
                return;
            }
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = parent;
        }
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    fn child_at(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.children(node).get(index).copied()
    }

    fn set_local_position(&mut self, node: NodeId, position: Vec3) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.transform.position = position;
        }
    }

    fn set_local_rotation(&mut self, node: NodeId, rotation: Quat) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.transform.rotation = rotation;
        }
    }

    fn set_local_scale(&mut self, node: NodeId, scale: Vec3) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.transform.scale = scale;
        }
    }

    fn local_position(&self, node: NodeId) -> Vec3 {
        self.nodes
            .get(&node)
            .map(|n| n.transform.position)
            .unwrap_or(Vec3::ZERO)
    }

    fn world_position(&self, node: NodeId) -> Vec3 {
        self.world_transform(node).position
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.visible = visible;
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|n| n.visible).unwrap_or(false)
    }

    fn volume_bounds(&self, node: NodeId, kind: VolumeKind) -> Option<Bounds> {
        let data = self.nodes.get(&node)?;
        if let Some((_, bounds)) = data.volumes.iter().find(|(k, _)| *k == kind) {
            return Some(*bounds);
        }
        data.children
            .iter()
            .find_map(|child| self.volume_bounds(*child, kind))
    }

    fn base_color(&self, node: NodeId) -> Option<Color> {
        self.nodes.get(&node).and_then(|n| n.color)
    }

    fn set_base_color(&mut self, node: NodeId, color: Color) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.color = Some(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_clones_the_whole_subtree() {
        let mut scene = MemoryScene::new();
        let template = scene.create_node();
        let child = scene.create_node();
        let grandchild = scene.create_node();
        scene.set_parent(child, Some(template));
        scene.set_parent(grandchild, Some(child));
        scene.set_base_color(grandchild, Color::BLACK);

        let root = scene.create_node();
        let instance = scene.spawn(template, Some(root)).unwrap();

        assert_eq!(scene.children(root), &[instance]);
        assert_eq!(scene.child_count(instance), 1);
        let cloned_child = scene.child_at(instance, 0).unwrap();
        let cloned_grandchild = scene.child_at(cloned_child, 0).unwrap();
        assert_eq!(scene.base_color(cloned_grandchild), Some(Color::BLACK));
        // The source subtree is untouched.
        assert_eq!(scene.children(template), &[child]);
    }

    #[test]
    fn despawn_removes_node_and_descendants() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node();
        let template = scene.create_node();
        let instance = scene.spawn(template, Some(root)).unwrap();

        scene.despawn(instance);

        assert!(!scene.contains(instance));
        assert_eq!(scene.child_count(root), 0);
    }

    #[test]
    fn children_keep_append_order() {
        let mut scene = MemoryScene::new();
        let root = scene.create_node();
        let template = scene.create_node();
        let a = scene.spawn(template, Some(root)).unwrap();
        let b = scene.spawn(template, Some(root)).unwrap();
        let c = scene.spawn(template, Some(root)).unwrap();
        assert_eq!(scene.children(root), &[a, b, c]);
    }

    #[test]
    fn reparenting_moves_between_child_lists() {
        let mut scene = MemoryScene::new();
        let a = scene.create_node();
        let b = scene.create_node();
        let node = scene.create_node();

        scene.set_parent(node, Some(a));
        assert_eq!(scene.children(a), &[node]);

        scene.set_parent(node, Some(b));
        assert_eq!(scene.children(a), &[] as &[NodeId]);
        assert_eq!(scene.children(b), &[node]);
        assert_eq!(scene.parent(node), Some(b));

        scene.set_parent(node, None);
        assert_eq!(scene.children(b), &[] as &[NodeId]);
        assert_eq!(scene.parent(node), None);
    }

    #[test]
    fn world_position_accumulates_parent_transforms() {
        let mut scene = MemoryScene::new();
        let parent = scene.create_node();
        let child = scene.create_node();
        scene.set_parent(child, Some(parent));

        scene.set_local_position(parent, Vec3::new(1.0, 0.0, 0.0));
        scene.set_local_position(child, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(scene.world_position(child), Vec3::new(1.0, 2.0, 0.0));

        scene.set_local_rotation(parent, Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        scene.set_local_position(child, Vec3::new(0.0, 0.0, 1.0));
        let world = scene.world_position(child);
        assert!((world - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn injected_spawn_failure_surfaces_as_spawn_error() {
        let mut scene = MemoryScene::new();
        let template = scene.create_node();
        scene.set_fail_spawns(true);
        let err = scene.spawn(template, None).unwrap_err();
        assert!(matches!(err, Error::Spawn(_)));
    }
}

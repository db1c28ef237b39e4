//! Count reconciliation for the live instances under a chain root.
use std::cmp::Ordering;

use tracing::debug;

use crate::error::{Error, Result};
use crate::scene::{NodeId, SceneHost};

/// Grows and shrinks the child list under a root node to a target count.
///
/// The pool owns no position data and keeps no bookkeeping of its own: the
/// host's child list is the single source of truth. Growth appends fresh
/// template instances, shrinking despawns strictly from the tail, so the
/// identity and order of surviving prefix children are never disturbed.
#[derive(Clone, Copy, Debug)]
pub struct InstancePool {
    root: NodeId,
}

impl InstancePool {
    pub fn new(root: NodeId) -> Self {
        Self { root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current number of live instances.
    pub fn size(&self, host: &dyn SceneHost) -> usize {
        host.child_count(self.root)
    }

    /// Reconciles the child count against `target`.
    ///
    /// Fails with [`Error::NoTemplate`] when growth is needed without a
    /// template, and with the host's spawn error when instantiation fails
    /// mid-growth. In both cases the already-spawned prefix stays and the
    /// pool is left short; callers must not apply positions to a short pool.
    pub fn set_size(
        &self,
        host: &mut dyn SceneHost,
        template: Option<NodeId>,
        target: usize,
    ) -> Result<()> {
        let current = host.child_count(self.root);
        match current.cmp(&target) {
            Ordering::Equal => Ok(()),
            Ordering::Greater => {
                self.shrink_to(host, target);
                Ok(())
            }
            Ordering::Less => self.grow_to(host, template, target),
        }
    }

    /// Despawns every instance.
    pub fn clear(&self, host: &mut dyn SceneHost) {
        self.shrink_to(host, 0);
    }

    fn shrink_to(&self, host: &mut dyn SceneHost, target: usize) {
        let removed = host.child_count(self.root).saturating_sub(target);
        while host.child_count(self.root) > target {
            let index = host.child_count(self.root) - 1;
            match host.child_at(self.root, index) {
                Some(child) => host.despawn(child),
                None => break,
            }
        }
        if removed > 0 {
            debug!("removed {removed} instances from the pool tail");
        }
    }

    fn grow_to(&self, host: &mut dyn SceneHost, template: Option<NodeId>, target: usize) -> Result<()> {
        let template = template.ok_or(Error::NoTemplate)?;
        while host.child_count(self.root) < target {
            host.spawn(template, Some(self.root))?;
        }
        Ok(())
    }
}

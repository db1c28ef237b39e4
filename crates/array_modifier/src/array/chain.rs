//! The modifier chain: ordered rules, shared parameters, and lifecycle.
//!
//! Rules are kept in attachment order and are never reordered. Parameters
//! shared by the whole chain (the template and the bake settings) are stored
//! once, here, instead of being mirrored into every rule. Property setters
//! follow an edit-triggers-execute discipline: changing a value replans the
//! chain immediately, unchanged writes are ignored.
use tracing::debug;

use crate::array::bake::BakeSettings;
use crate::array::pool::InstancePool;
use crate::array::post::PostProcessor;
use crate::array::{RuleState, DEFAULT_COUNT};
use crate::rules::PlacementRule;
use crate::scene::{NodeId, SceneHost};

/// One placement rule attached to a chain.
pub struct Rule {
    pub(crate) placement: Box<dyn PlacementRule>,
    pub(crate) count: u32,
    pub(crate) state: RuleState,
}

impl Rule {
    /// Creates an active rule with the default instance count.
    pub fn new(placement: Box<dyn PlacementRule>) -> Self {
        Self {
            placement,
            count: DEFAULT_COUNT,
            state: RuleState::Active,
        }
    }

    /// Creates an active rule from a concrete placement strategy.
    pub fn new_with<P: PlacementRule + 'static>(placement: P) -> Self {
        Self::new(Box::new(placement))
    }

    /// Sets the instance count. A count of 0 collapses this rule's
    /// contribution to an empty set downstream.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn state(&self) -> RuleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn placement(&self) -> &dyn PlacementRule {
        self.placement.as_ref()
    }
}

/// A chain of placement rules attached to one root node.
pub struct ModifierChain {
    pub(crate) root: NodeId,
    pub(crate) template: Option<NodeId>,
    pub(crate) bake: BakeSettings,
    pub(crate) rules: Vec<Rule>,
    pub(crate) post_processors: Vec<Box<dyn PostProcessor>>,
    pub(crate) baker: Option<Box<dyn crate::array::bake::MeshBaker>>,
    pub(crate) pool: InstancePool,
}

impl ModifierChain {
    /// Creates an empty chain owning the instances under `root`.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            template: None,
            bake: BakeSettings::default(),
            rules: Vec::new(),
            post_processors: Vec::new(),
            baker: None,
            pool: InstancePool::new(root),
        }
    }

    /// Sets the shared template during construction.
    pub fn with_template(mut self, template: NodeId) -> Self {
        self.template = Some(template);
        self
    }

    /// Sets the bake settings during construction.
    pub fn with_bake_settings(mut self, bake: BakeSettings) -> Self {
        self.bake = bake;
        self
    }

    /// Attaches the bake collaborator.
    pub fn with_baker(mut self, baker: Box<dyn crate::array::bake::MeshBaker>) -> Self {
        self.baker = Some(baker);
        self
    }

    /// Attaches a post-processor; they run in attachment order.
    pub fn with_post_processor(mut self, post: Box<dyn PostProcessor>) -> Self {
        self.post_processors.push(post);
        self
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn template(&self) -> Option<NodeId> {
        self.template
    }

    pub fn bake_settings(&self) -> &BakeSettings {
        &self.bake
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Number of live instances currently under the root.
    pub fn instance_count(&self, host: &dyn SceneHost) -> usize {
        self.pool.size(host)
    }

    // --- chain traversal -------------------------------------------------

    /// Indices of rules participating in planning, in attachment order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.is_active())
            .map(|(index, _)| index)
            .collect()
    }

    /// Whether `index` is the first active rule of the chain.
    pub fn is_first_active(&self, index: usize) -> bool {
        self.active_indices().first() == Some(&index)
    }

    /// The active rule preceding `index`, if any. Returns `None` when
    /// `index` is not active, is the lone active rule, or sits at the head.
    pub fn previous_active(&self, index: usize) -> Option<usize> {
        self.neighbor_active(index, true)
    }

    /// The active rule following `index`; boundary behavior mirrors
    /// [`previous_active`](Self::previous_active). No wrap-around.
    pub fn next_active(&self, index: usize) -> Option<usize> {
        self.neighbor_active(index, false)
    }

    /// The last active rule: the only one that owns the instance pool.
    pub fn terminal_active(&self) -> Option<usize> {
        self.active_indices().last().copied()
    }

    fn neighbor_active(&self, index: usize, backwards: bool) -> Option<usize> {
        let active = self.active_indices();
        if active.len() <= 1 {
            return None;
        }
        let position = active.iter().position(|&i| i == index)?;
        if backwards {
            position.checked_sub(1).map(|p| active[p])
        } else {
            active.get(position + 1).copied()
        }
    }

    // --- lifecycle -------------------------------------------------------

    /// Attaches a rule at the end of the chain and returns its index.
    ///
    /// Only a rule that lands as the first active member triggers an initial
    /// execute, and only while baking is off.
    pub fn push_rule(&mut self, host: &mut dyn SceneHost, rule: Rule) -> usize {
        let index = self.rules.len();
        self.rules.push(rule);
        if self.is_first_active(index) && !self.bake.bake_meshes {
            self.execute(host);
        }
        index
    }

    /// Excludes a rule from planning without removing it.
    pub fn disable_rule(&mut self, index: usize) {
        if let Some(rule) = self.rules.get_mut(index) {
            if rule.state == RuleState::Active {
                rule.state = RuleState::Disabled;
            }
        }
    }

    /// Brings a disabled rule back. Re-enabling the first active member
    /// replays the initial execute.
    pub fn enable_rule(&mut self, host: &mut dyn SceneHost, index: usize) {
        let Some(rule) = self.rules.get_mut(index) else {
            return;
        };
        if rule.state != RuleState::Disabled {
            return;
        }
        rule.state = RuleState::Active;
        if self.is_first_active(index) && !self.bake.bake_meshes {
            self.execute(host);
        }
    }

    /// Tears a rule down and drops it from the chain.
    ///
    /// The rule is excluded from traversal immediately; removing the sole
    /// rule clears the pool, otherwise the surviving chain replans once
    /// without the removed rule's contribution.
    pub fn remove_rule(&mut self, host: &mut dyn SceneHost, index: usize) {
        let Some(rule) = self.rules.get_mut(index) else {
            return;
        };
        if rule.state == RuleState::Destroying {
            return;
        }
        rule.state = RuleState::Destroying;

        if self.rules.len() == 1 {
            self.pool.clear(host);
        } else if self.terminal_active().is_some() {
            self.execute(host);
        } else {
            debug!("no active rule left after removal; instances stay as placed");
        }

        self.rules.remove(index);
    }

    /// Materializes the current instances: drops every rule and
    /// post-processor while leaving the placed children in the scene.
    pub fn apply(&mut self) {
        self.rules.clear();
        self.post_processors.clear();
    }

    // --- property edits --------------------------------------------------

    /// Swaps the shared template; a changed value replans the chain.
    pub fn set_template(&mut self, host: &mut dyn SceneHost, template: Option<NodeId>) {
        if self.template == template {
            return;
        }
        self.template = template;
        self.execute(host);
    }

    /// Changes a rule's instance count; a changed value replans the chain.
    pub fn set_count(&mut self, host: &mut dyn SceneHost, index: usize, count: u32) {
        let Some(rule) = self.rules.get_mut(index) else {
            return;
        };
        if rule.count == count {
            return;
        }
        rule.count = count;
        self.execute(host);
    }

    /// Replaces a rule's placement strategy and replans the chain.
    ///
    /// Strategy parameters live inside the strategy value, so edits are
    /// expressed by swapping in an updated strategy; no equality check is
    /// possible across `dyn` strategies and the replan is unconditional.
    pub fn set_placement(
        &mut self,
        host: &mut dyn SceneHost,
        index: usize,
        placement: Box<dyn PlacementRule>,
    ) {
        let Some(rule) = self.rules.get_mut(index) else {
            return;
        };
        rule.placement = placement;
        self.execute(host);
    }

    /// Toggles bake mode; a changed value replans the chain.
    pub fn set_bake_meshes(&mut self, host: &mut dyn SceneHost, enabled: bool) {
        if self.bake.bake_meshes == enabled {
            return;
        }
        self.bake.bake_meshes = enabled;
        self.execute(host);
    }

    /// Attaches a post-processor after construction and replans so the
    /// decoration shows up immediately.
    pub fn push_post_processor(&mut self, host: &mut dyn SceneHost, post: Box<dyn PostProcessor>) {
        self.post_processors.push(post);
        self.execute(host);
    }
}

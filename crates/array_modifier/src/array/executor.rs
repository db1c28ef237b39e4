//! Pipeline orchestration: plan, reconcile, place, decorate, bake.
use glam::{Quat, Vec3};
use tracing::{debug, warn};

use crate::array::chain::ModifierChain;
use crate::array::planner::plan_positions;
use crate::array::InstanceInfo;
use crate::error::Error;
use crate::scene::SceneHost;

impl ModifierChain {
    /// Replans the chain and reconciles the live instances.
    ///
    /// All planning and pooling happens on the terminal rule: every upstream
    /// rule's positions feed into it, so running anything but the last active
    /// rule would place a stale prefix of the chain. Planning failures leave
    /// the existing instances untouched; the next property edit or explicit
    /// `execute` is the retry mechanism.
    pub fn execute(&mut self, host: &mut dyn SceneHost) {
        let Some(terminal) = self.terminal_active() else {
            debug!("Chain has no active rules; nothing to execute.");
            return;
        };

        let positions = match plan_positions(self, host, terminal) {
            Ok(positions) => positions,
            Err(Error::NoTemplate) => {
                debug!("Chain has no template; instances left untouched.");
                return;
            }
            Err(Error::NoBoundingVolume) => {
                warn!("Template has no measurable bounding volume; instances left untouched.");
                return;
            }
            Err(e) => {
                warn!("Planning failed: {e}; instances left untouched.");
                return;
            }
        };

        // Baked geometry cannot be repositioned per instance, so bake mode
        // rebuilds the pool from scratch on every pass.
        if self.bake.bake_meshes {
            self.pool.clear(host);
        }

        if let Err(e) = self.pool.set_size(host, self.template, positions.len()) {
            warn!("Pool resize incomplete: {e}.");
        }

        self.apply_positions(host, &positions);
        self.run_post_processors(host);
        self.run_bake(host);
    }

    fn apply_positions(&self, host: &mut dyn SceneHost, positions: &[Vec3]) {
        let live = host.child_count(self.root);
        if live != positions.len() {
            warn!(
                "Live instance count {live} does not match {} planned positions; skipping application.",
                positions.len()
            );
            return;
        }

        for (index, position) in positions.iter().enumerate() {
            let Some(child) = host.child_at(self.root, index) else {
                break;
            };
            host.set_local_rotation(child, Quat::IDENTITY);
            host.set_local_scale(child, Vec3::ONE);
            host.set_local_position(child, *position);
        }
    }

    fn run_post_processors(&mut self, host: &mut dyn SceneHost) {
        let root = self.root;
        for post in &mut self.post_processors {
            post.before_execute();
            let total_count = host.child_count(root);
            for index in 0..total_count {
                let Some(instance) = host.child_at(root, index) else {
                    break;
                };
                post.execute(
                    host,
                    InstanceInfo {
                        instance,
                        root,
                        total_count,
                        index,
                    },
                );
            }
            post.after_execute();
        }
    }

    fn run_bake(&mut self, host: &mut dyn SceneHost) {
        if !self.bake.bake_meshes {
            return;
        }
        let Some(baker) = self.baker.as_mut() else {
            warn!("Bake mode is enabled but no baker is attached; skipping bake.");
            return;
        };

        let baked = match baker.bake(host, self.root, &self.bake) {
            Ok(baked) => baked,
            Err(e) => {
                warn!("Bake failed: {e}; keeping live instances.");
                return;
            }
        };

        for node in &baked {
            host.set_parent(*node, None);
        }
        self.pool.clear(host);
        for node in &baked {
            host.set_parent(*node, Some(self.root));
        }
        debug!("Baked {} nodes under the chain root.", baked.len());
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::array::bake::{BakeSettings, MeshBaker};
    use crate::array::chain::{ModifierChain, Rule};
    use crate::array::post::{ColorPostProcessor, PostProcessor, RotationPostProcessor};
    use crate::array::InstanceInfo;
    use crate::error::Result;
    use crate::rules::{CircularPlacement, LinearPlacement};
    use crate::scene::bounds::{Bounds, VolumeKind};
    use crate::scene::{Color, MemoryScene, NodeId, SceneHost};

    fn scene_with_template(size: Vec3) -> (MemoryScene, NodeId, NodeId) {
        let mut scene = MemoryScene::new();
        let root = scene.create_node();
        let template = scene.create_node();
        scene.set_volume(template, VolumeKind::Volume3d, Bounds::from_size(size));
        (scene, root, template)
    }

    fn child_positions(scene: &MemoryScene, root: NodeId) -> Vec<Vec3> {
        scene
            .children(root)
            .iter()
            .map(|c| scene.local_position(*c))
            .collect()
    }

    #[test]
    fn pushing_the_first_rule_populates_the_pool() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);

        chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(3));

        assert_eq!(chain.instance_count(&scene), 3);
        assert_eq!(
            child_positions(&scene, root),
            vec![
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0)
            ]
        );
    }

    #[test]
    fn execute_is_idempotent_without_property_changes() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        chain.push_rule(&mut scene, Rule::new_with(CircularPlacement::new(2.0)).with_count(4));

        let children_before: Vec<_> = scene.children(root).to_vec();
        let positions_before = child_positions(&scene, root);

        chain.execute(&mut scene);
        chain.execute(&mut scene);

        assert_eq!(scene.children(root), children_before.as_slice());
        assert_eq!(child_positions(&scene, root), positions_before);
    }

    #[test]
    fn count_edits_replan_and_resize() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        let rule = chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(2));

        let survivors: Vec<_> = scene.children(root).to_vec();
        chain.set_count(&mut scene, rule, 5);
        assert_eq!(chain.instance_count(&scene), 5);
        // Growth appended; the original two instances kept their identity.
        assert_eq!(&scene.children(root)[..2], survivors.as_slice());

        chain.set_count(&mut scene, rule, 5);
        assert_eq!(chain.instance_count(&scene), 5);
    }

    #[test]
    fn missing_bounding_volume_leaves_instances_untouched() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(3));
        assert_eq!(chain.instance_count(&scene), 3);

        // Swap in a template that cannot be measured.
        let bare = scene.create_node();
        chain.set_template(&mut scene, Some(bare));

        assert_eq!(chain.instance_count(&scene), 3);
    }

    #[test]
    fn partial_spawn_failure_skips_position_application() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        let rule = chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(2));
        let positions_before = child_positions(&scene, root);

        // One spawn for the bounds probe, one for the pool; the rest fail.
        scene.set_spawn_budget(2);
        chain.set_count(&mut scene, rule, 6);

        // The pool came up short and no positions were written: the
        // survivors keep their old slots, the fresh instance its default.
        assert_eq!(chain.instance_count(&scene), 3);
        assert_eq!(&child_positions(&scene, root)[..2], &positions_before[..]);

        // An explicit execute is the retry mechanism.
        scene.set_fail_spawns(false);
        chain.execute(&mut scene);
        assert_eq!(chain.instance_count(&scene), 6);
        assert_eq!(
            child_positions(&scene, root)[5],
            Vec3::new(5.0, 0.0, 0.0)
        );
    }

    #[test]
    fn removing_the_sole_rule_clears_the_pool() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        let rule = chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(4));
        assert_eq!(chain.instance_count(&scene), 4);

        chain.remove_rule(&mut scene, rule);

        assert_eq!(chain.instance_count(&scene), 0);
        assert!(chain.rules().is_empty());
    }

    #[test]
    fn removing_one_of_two_rules_replans_without_it() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        let first = chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(2));
        chain.push_rule(
            &mut scene,
            Rule::new_with(LinearPlacement::new().with_relative_offset(Vec3::Z)).with_count(3),
        );
        chain.execute(&mut scene);
        assert_eq!(chain.instance_count(&scene), 6);

        chain.remove_rule(&mut scene, first);

        assert_eq!(chain.rules().len(), 1);
        assert_eq!(chain.instance_count(&scene), 3);
        assert_eq!(
            child_positions(&scene, root),
            vec![
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(0.0, 0.0, 2.0)
            ]
        );
    }

    #[test]
    fn disabling_the_terminal_rule_hands_the_pool_to_the_survivor() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(2));
        let second = chain.push_rule(
            &mut scene,
            Rule::new_with(LinearPlacement::new().with_relative_offset(Vec3::Z)).with_count(2),
        );
        chain.execute(&mut scene);
        assert_eq!(chain.instance_count(&scene), 4);

        chain.disable_rule(second);
        chain.execute(&mut scene);
        assert_eq!(chain.instance_count(&scene), 2);

        chain.enable_rule(&mut scene, second);
        chain.execute(&mut scene);
        assert_eq!(chain.instance_count(&scene), 4);
        assert_eq!(scene.child_count(root), 4);
    }

    #[test]
    fn post_processors_run_in_attachment_order_after_placement() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        scene.set_base_color(template, Color::WHITE);
        let mut chain = ModifierChain::new(root)
            .with_template(template)
            .with_post_processor(Box::new(ColorPostProcessor::new(
                Color::BLACK,
                Color::WHITE,
            )))
            .with_post_processor(Box::new(RotationPostProcessor::new(Vec3::new(
                0.0, 90.0, 0.0,
            ))));

        chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(4));

        let children: Vec<_> = scene.children(root).to_vec();
        assert_eq!(scene.base_color(children[0]), Some(Color::BLACK));
        let mid = scene.base_color(children[2]).unwrap();
        assert!((mid.r - 0.5).abs() < 1e-6);

        // Rotation ran after placement's identity reset, not before.
        let expected = glam::Quat::from_rotation_y(90f32.to_radians());
        assert!(scene.local_rotation(children[0]).angle_between(expected) < 1e-5);
    }

    #[test]
    fn apply_materializes_instances_and_detaches_behavior() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(3));

        chain.apply();
        chain.execute(&mut scene);

        assert!(chain.rules().is_empty());
        assert_eq!(chain.instance_count(&scene), 3);
    }

    struct CountingPost {
        passes: usize,
        instances_seen: usize,
    }

    impl PostProcessor for CountingPost {
        fn before_execute(&mut self) {
            self.passes += 1;
            self.instances_seen = 0;
        }

        fn execute(&mut self, _host: &mut dyn SceneHost, info: InstanceInfo) {
            assert_eq!(info.total_count, 3);
            assert_eq!(info.index, self.instances_seen);
            self.instances_seen += 1;
        }

        fn after_execute(&mut self) {
            assert_eq!(self.passes, 1);
            assert_eq!(self.instances_seen, 3);
        }
    }

    #[test]
    fn instance_info_carries_pass_totals() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root).with_template(template);
        chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(3));

        // Attaching runs one pass; the assertions live in the post itself.
        chain.push_post_processor(
            &mut scene,
            Box::new(CountingPost {
                passes: 0,
                instances_seen: 0,
            }),
        );
    }

    struct MergeBaker;

    impl MeshBaker for MergeBaker {
        fn bake(
            &mut self,
            host: &mut dyn SceneHost,
            root: NodeId,
            _settings: &BakeSettings,
        ) -> Result<Vec<NodeId>> {
            // Stand-in for material-grouped merging: one combined node.
            assert!(host.child_count(root) > 0);
            let first = host.child_at(root, 0).unwrap();
            let merged = host.spawn(first, None)?;
            Ok(vec![merged])
        }
    }

    #[test]
    fn bake_replaces_the_pool_with_baked_nodes() {
        let (mut scene, root, template) = scene_with_template(Vec3::ONE);
        let mut chain = ModifierChain::new(root)
            .with_template(template)
            .with_bake_settings(BakeSettings::new().with_bake_meshes(true))
            .with_baker(Box::new(MergeBaker));

        chain.push_rule(&mut scene, Rule::new_with(LinearPlacement::new()).with_count(3));
        // Bake mode suppresses the initial execute on attach.
        assert_eq!(chain.instance_count(&scene), 0);

        chain.execute(&mut scene);

        // The live pool of 3 was replaced by the single baked node.
        assert_eq!(scene.child_count(root), 1);

        // A second pass rebuilds from scratch instead of pooling baked nodes.
        chain.execute(&mut scene);
        assert_eq!(scene.child_count(root), 1);
    }
}

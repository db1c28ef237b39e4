use std::collections::HashMap;

use array_modifier::prelude::*;
use array_modifier_examples::init_tracing;
use glam::Vec3;

/// Demo baker: merges instances into one node per distinct base color, the
/// way a real host merges meshes grouped by material.
struct ColorGroupBaker;

impl MeshBaker for ColorGroupBaker {
    fn bake(
        &mut self,
        host: &mut dyn SceneHost,
        root: NodeId,
        settings: &BakeSettings,
    ) -> Result<Vec<NodeId>> {
        let mut groups: HashMap<[u32; 3], Vec<NodeId>> = HashMap::new();
        for index in 0..host.child_count(root) {
            let Some(instance) = host.child_at(root, index) else {
                break;
            };
            let key = host
                .base_color(instance)
                .map(|c| [c.r.to_bits(), c.g.to_bits(), c.b.to_bits()])
                .unwrap_or([0; 3]);
            groups.entry(key).or_default().push(instance);
        }

        let mut baked = Vec::with_capacity(groups.len());
        for (_, members) in groups {
            let merged = host.spawn(members[0], None)?;
            if settings.add_collider {
                tracing::debug!("baker would attach a box collider here");
            }
            baked.push(merged);
        }
        Ok(baked)
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut scene = MemoryScene::new();
    let root = scene.create_node();
    let template = scene.create_node();
    scene.set_volume(
        template,
        VolumeKind::Volume3d,
        Bounds::from_size(Vec3::ONE),
    );

    let mut chain = ModifierChain::new(root)
        .with_template(template)
        .with_bake_settings(BakeSettings::new().with_bake_meshes(true).with_add_collider(true))
        .with_baker(Box::new(ColorGroupBaker))
        .with_post_processor(Box::new(ColorPostProcessor::new(
            Color::BLACK,
            Color::WHITE,
        )));

    chain.push_rule(
        &mut scene,
        Rule::new_with(LinearPlacement::new()).with_count(6),
    );
    // Bake mode suppresses the execute-on-attach; run the pipeline once.
    chain.execute(&mut scene);

    println!(
        "baked down to {} static nodes under the root",
        scene.child_count(root)
    );

    Ok(())
}

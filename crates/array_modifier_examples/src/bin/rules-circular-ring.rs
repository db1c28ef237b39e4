use std::f32::consts::FRAC_PI_8;

use array_modifier::prelude::*;
use array_modifier_examples::{init_tracing, render_instances_to_png, RenderConfig};
use glam::Vec3;

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

    // 12 instances on a ring of radius 6, rotated by a half step so the
    // seam does not sit on the +X axis, every instance facing the center.
    let mut chain = ModifierChain::new(root)
        .with_template(template)
        .with_post_processor(Box::new(LookAtPostProcessor::new(Vec3::ZERO)));
    chain.push_rule(
        &mut scene,
        Rule::new_with(CircularPlacement::new(6.0).with_angular_offset(FRAC_PI_8)).with_count(12),
    );

    println!("placed {} instances", chain.instance_count(&scene));

    let config = RenderConfig::new((800, 800), 16.0);
    render_instances_to_png(&scene, root, &config, "rules-circular-ring.png")?;

    Ok(())
}

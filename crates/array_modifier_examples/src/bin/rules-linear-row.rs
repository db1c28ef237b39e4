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

    // A row of 8 instances, one bounds-width plus half a unit apart.
    let mut chain = ModifierChain::new(root).with_template(template);
    chain.push_rule(
        &mut scene,
        Rule::new_with(
            LinearPlacement::new().with_constant_offset(Vec3::new(0.5, 0.0, 0.0)),
        )
        .with_count(8),
    );

    println!("placed {} instances", chain.instance_count(&scene));

    let config = RenderConfig::new((800, 800), 24.0);
    render_instances_to_png(&scene, root, &config, "rules-linear-row.png")?;

    Ok(())
}

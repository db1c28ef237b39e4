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

    // First rule steps 3 bases along +X; the second arrays a ring around
    // every base, so the result is a row of rings.
    let mut chain = ModifierChain::new(root).with_template(template);
    chain.push_rule(
        &mut scene,
        Rule::new_with(
            LinearPlacement::new()
                .without_relative_offset()
                .with_constant_offset(Vec3::new(8.0, 0.0, 0.0)),
        )
        .with_count(3),
    );
    chain.push_rule(
        &mut scene,
        Rule::new_with(CircularPlacement::new(3.0)).with_count(10),
    );
    // The second rule attached after the first, so an explicit execute
    // replans the whole chain through the new terminal.
    chain.execute(&mut scene);

    println!("placed {} instances", chain.instance_count(&scene));

    let config = RenderConfig::new((1200, 600), 48.0).with_dot_radius(3);
    render_instances_to_png(&scene, root, &config, "chains-row-of-rings.png")?;

    Ok(())
}

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

    // A ring tinted from warm to cold, every instance twisted a little
    // further than the previous one. The rotation runs last, so it owns the
    // final orientation.
    let mut chain = ModifierChain::new(root)
        .with_template(template)
        .with_post_processor(Box::new(ColorPostProcessor::new(
            Color::new(0.95, 0.55, 0.15, 1.0),
            Color::new(0.2, 0.5, 0.95, 1.0),
        )))
        .with_post_processor(Box::new(RotationPostProcessor::new(Vec3::new(
            0.0, 10.0, 0.0,
        ))));

    chain.push_rule(
        &mut scene,
        Rule::new_with(CircularPlacement::new(7.0)).with_count(16),
    );

    println!("placed {} instances", chain.instance_count(&scene));

    let config = RenderConfig::new((800, 800), 20.0).with_dot_radius(6);
    render_instances_to_png(&scene, root, &config, "posts-color-gradient.png")?;

    Ok(())
}

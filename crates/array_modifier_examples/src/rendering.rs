//! Shared helpers for the examples: tracing setup and a top-down plotter.
use anyhow::Result;
use array_modifier::scene::{MemoryScene, NodeId, SceneHost};
use image::{Rgb, RgbImage};

/// Installs a plain stdout tracing subscriber for the examples.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();
}

/// Configuration for rendering placed instances to a PNG.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image size in pixels (width, height).
    pub image_size: (u32, u32),
    /// World-unit extent mapped onto the image, centered on the origin.
    pub world_extent: f32,
    /// Background color.
    pub background: [u8; 3],
    /// Dot radius per instance, in pixels.
    pub dot_radius: i32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), world_extent: f32) -> Self {
        Self {
            image_size,
            world_extent,
            background: [26, 26, 26],
            dot_radius: 4,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_dot_radius(mut self, dot_radius: i32) -> Self {
        self.dot_radius = dot_radius;
        self
    }
}

/// Plots the instances under `root` top-down (X right, Z up) into a PNG.
///
/// Each instance becomes a dot at its world position, tinted with its base
/// color when one is set.
pub fn render_instances_to_png(
    scene: &MemoryScene,
    root: NodeId,
    config: &RenderConfig,
    path: &str,
) -> Result<()> {
    let (width, height) = config.image_size;
    let mut image = RgbImage::from_pixel(width, height, Rgb(config.background));

    for index in 0..scene.child_count(root) {
        let Some(instance) = scene.child_at(root, index) else {
            break;
        };
        let position = scene.world_position(instance);
        let color = scene
            .base_color(instance)
            .map(|c| {
                [
                    (c.r.clamp(0.0, 1.0) * 255.0) as u8,
                    (c.g.clamp(0.0, 1.0) * 255.0) as u8,
                    (c.b.clamp(0.0, 1.0) * 255.0) as u8,
                ]
            })
            .unwrap_or([235, 235, 235]);

        let px = ((position.x / config.world_extent + 0.5) * width as f32) as i32;
        let py = ((0.5 - position.z / config.world_extent) * height as f32) as i32;
        draw_dot(&mut image, px, py, config.dot_radius, Rgb(color));
    }

    image.save(path)?;
    Ok(())
}

fn draw_dot(image: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

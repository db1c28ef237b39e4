//! Per-instance color gradient.
use crate::array::post::PostProcessor;
use crate::array::InstanceInfo;
use crate::scene::{Color, SceneHost};

/// Tints each instance's base color along a gradient over the index range.
///
/// The interpolation factor is `index / total_count`, so the end color is
/// approached but never reached; the last instance sits one step short.
#[derive(Clone, Debug)]
pub struct ColorPostProcessor {
    start: Color,
    end: Color,
}

impl ColorPostProcessor {
    pub fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }
}

impl PostProcessor for ColorPostProcessor {
    fn execute(&mut self, host: &mut dyn SceneHost, info: InstanceInfo) {
        let t = info.index as f32 / info.total_count as f32;
        host.set_base_color(info.instance, self.start.lerp(self.end, t));
    }
}

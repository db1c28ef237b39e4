//! Cumulative per-instance rotation.
use glam::{EulerRot, Quat, Vec3};

use crate::array::post::PostProcessor;
use crate::array::InstanceInfo;
use crate::scene::SceneHost;

/// Rotates each instance a fixed Euler step further than the previous one.
///
/// Instance 0 gets one step, instance 1 two steps, and so on. The
/// accumulator resets at the start of every pass, so repeated executes do
/// not wind the instances up further.
#[derive(Clone, Debug, Default)]
pub struct RotationPostProcessor {
    step_degrees: Vec3,
    accumulated: Vec3,
}

impl RotationPostProcessor {
    /// Per-instance Euler step in degrees (applied yaw-pitch-roll).
    pub fn new(step_degrees: Vec3) -> Self {
        Self {
            step_degrees,
            accumulated: Vec3::ZERO,
        }
    }
}

impl PostProcessor for RotationPostProcessor {
    fn before_execute(&mut self) {
        self.accumulated = Vec3::ZERO;
    }

    fn execute(&mut self, host: &mut dyn SceneHost, info: InstanceInfo) {
        self.accumulated += self.step_degrees;
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.accumulated.y.to_radians(),
            self.accumulated.x.to_radians(),
            self.accumulated.z.to_radians(),
        );
        host.set_local_rotation(info.instance, rotation);
    }
}

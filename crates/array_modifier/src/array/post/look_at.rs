//! Orients instances toward a shared focus point.
use glam::{Quat, Vec3};

use crate::array::post::PostProcessor;
use crate::array::InstanceInfo;
use crate::scene::SceneHost;

/// Turns each instance to face a target point, yaw only.
///
/// The target is evaluated at the instance's own height, so instances never
/// pitch up or down; a ring of instances around the target all face inward.
/// The default target is the world origin, which coincides with the chain
/// root for an unmoved root.
#[derive(Clone, Debug, Default)]
pub struct LookAtPostProcessor {
    target: Vec3,
}

impl LookAtPostProcessor {
    pub fn new(target: Vec3) -> Self {
        Self { target }
    }
}

impl PostProcessor for LookAtPostProcessor {
    fn execute(&mut self, host: &mut dyn SceneHost, info: InstanceInfo) {
        let position = host.world_position(info.instance);
        let leveled = Vec3::new(self.target.x, position.y, self.target.z);
        let direction = leveled - position;
        if direction.length_squared() < f32::EPSILON {
            return;
        }
        let yaw = direction.x.atan2(direction.z);
        host.set_local_rotation(info.instance, Quat::from_rotation_y(yaw));
    }
}

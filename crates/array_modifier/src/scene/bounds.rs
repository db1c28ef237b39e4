//! Bounding volumes and the transient measurement probe pass.
//!
//! Placement rules size their offsets from the template's bounding volume.
//! The volume is measured fresh on every planning pass: a disposable, hidden
//! instance of the template is spawned, queried for the first volume-capable
//! component in a fixed priority order, and despawned again. The probe never
//! outlives the call, see [`crate::scene::probe::VolatileProbe`].
use glam::Vec3;

use crate::error::{Error, Result};
use crate::scene::host::SceneHost;
use crate::scene::probe::VolatileProbe;
use crate::scene::NodeId;

/// Axis-aligned bounding box in the local space of the measured node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub center: Vec3,
    pub size: Vec3,
}

impl Bounds {
    pub fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }

    /// Box with the given size centered on the local origin.
    pub fn from_size(size: Vec3) -> Self {
        Self {
            center: Vec3::ZERO,
            size,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }
}

/// The closed set of bounding-volume capabilities a host can expose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolumeKind {
    Volume3d,
    Volume2d,
}

impl VolumeKind {
    /// Query order for [`resolve_bounds`]: 3D volumes win over 2D ones.
    pub const PRIORITY: [VolumeKind; 2] = [VolumeKind::Volume3d, VolumeKind::Volume2d];
}

/// Measures the bounding volume of `template` through a transient probe.
///
/// Fails with [`Error::NoTemplate`] if no template is set, and with
/// [`Error::NoBoundingVolume`] if neither the probe nor any of its
/// descendants carries a volume. The probe is despawned on every exit path.
pub fn resolve_bounds(host: &mut dyn SceneHost, template: Option<NodeId>) -> Result<Bounds> {
    let template = template.ok_or(Error::NoTemplate)?;
    let probe = VolatileProbe::spawn(host, template)?;

    for kind in VolumeKind::PRIORITY {
        if let Some(bounds) = probe.host().volume_bounds(probe.node(), kind) {
            return Ok(bounds);
        }
    }

    Err(Error::NoBoundingVolume)
}

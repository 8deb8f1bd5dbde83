//! Surface normal refinement against the external collision service.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::params::Params;

/// A bitmask over collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// A mask matching every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing exactly one layer bit.
    pub fn single(layer: u32) -> Self {
        Self(1 << layer)
    }

    /// Whether `layer` (a bit index) is included in this mask.
    pub fn contains(&self, layer: u32) -> bool {
        (1u32 << layer) & self.0 != 0
    }
}

/// One raycast hit from the collision service.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// World-space hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

/// Short-range directed probe into the external collision service.
///
/// The simulation never owns collision geometry; this trait is the seam the
/// engine plugs into.
pub trait Raycaster {
    /// Casts a ray and returns the nearest hit within `max_distance` on a
    /// layer included in `mask`, if any.
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask)
    -> Option<RayHit>;
}

/// A raycaster that never hits anything. Refinement falls back to the raw
/// contact normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeometry;

impl Raycaster for NoGeometry {
    fn cast(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> {
        None
    }
}

/// Refines a collision-reported contact normal against the true geometry.
///
/// Per-triangle contact normals on curved or mesh-approximated targets can
/// point the wrong way; re-querying along the inverse normal from a point
/// just off the surface returns the interpolated mesh normal instead. When
/// the probe misses, the raw contact normal is kept.
pub fn refine_normal(
    raycaster: &impl Raycaster,
    contact: Vec3,
    normal: Vec3,
    mask: LayerMask,
    params: &Params,
) -> Vec3 {
    let origin = contact + normal * params.probe_offset;
    match raycaster.cast(origin, -normal, params.probe_distance, mask) {
        Some(hit) => hit.normal,
        None => normal,
    }
}

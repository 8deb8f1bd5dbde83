//! Dart targets, scoring zones, and stuck-dart tracking.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::geometric_utils::Pose;
use super::params::Params;
use super::surface::LayerMask;

/// Axis-aligned bounding volume of a scoring zone, in world space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneBounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl ZoneBounds {
    /// Creates bounds from a center point and full extents.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether `point` lies inside the bounds (boundaries inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// One scoring zone of a target.
///
/// Zones are tested in their configured order; the first zone containing the
/// hit point wins, so inner (higher-value) zones must be listed first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetZone {
    /// Bounding region of the zone.
    pub bounds: ZoneBounds,
    /// Points awarded for a hit inside this zone.
    pub score_value: i32,
}

/// Score awarded when the hit point is outside every configured zone.
pub const MISS_ZONE_SCORE: i32 = 1;

/// A physical dart target.
///
/// Tracks which physical darts are already embedded (by collider identity)
/// so one dart can never be scored twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Stable target identifier.
    pub id: usize,
    /// World pose of the target.
    pub pose: Pose,
    /// Per-target override of the minimum impact speed needed to stick.
    pub min_stick_velocity: Option<f32>,
    /// Layers this target accepts darts from.
    pub dart_mask: LayerMask,
    /// Scoring zones in resolution order.
    pub zones: Vec<TargetZone>,
    /// Remaining hit-flash time, for the visual feedback stub.
    pub hit_flash: f32,
    stuck_darts: HashMap<usize, usize>,
}

impl Target {
    /// Creates a target with no zones, accepting all layers.
    pub fn new(id: usize, pose: Pose) -> Self {
        Self {
            id,
            pose,
            min_stick_velocity: None,
            dart_mask: LayerMask::ALL,
            zones: Vec::new(),
            hit_flash: 0.0,
            stuck_darts: HashMap::new(),
        }
    }

    /// Resolves the score for a world-space hit point.
    ///
    /// First containing zone in configured order wins; a hit outside every
    /// zone still lands in the target and scores [`MISS_ZONE_SCORE`].
    pub fn resolve_score(&self, hit_point: Vec3) -> i32 {
        self.zones
            .iter()
            .find(|zone| zone.bounds.contains(hit_point))
            .map_or(MISS_ZONE_SCORE, |zone| zone.score_value)
    }

    /// Registers a stuck dart by collider identity.
    ///
    /// Returns `false` without modifying the map when the collider is
    /// already registered, so double-counting one physical dart is
    /// impossible.
    pub fn register_dart(&mut self, collider: usize, dart_id: usize) -> bool {
        if self.stuck_darts.contains_key(&collider) {
            return false;
        }
        self.stuck_darts.insert(collider, dart_id);
        true
    }

    /// Whether a collider identity is already registered.
    pub fn contains_collider(&self, collider: usize) -> bool {
        self.stuck_darts.contains_key(&collider)
    }

    /// Number of darts currently stuck in this target.
    pub fn stuck_count(&self) -> usize {
        self.stuck_darts.len()
    }

    /// Empties the tracking map and returns the ids of every tracked dart
    /// so the owner can despawn them. Used at round/session reset.
    pub fn clear_darts(&mut self) -> Vec<usize> {
        self.stuck_darts.drain().map(|(_, dart_id)| dart_id).collect()
    }

    /// Lights the hit flash. Visual feedback stub, decays in `update`.
    pub fn flash(&mut self, params: &Params) {
        self.hit_flash = params.hit_flash_duration;
    }
}

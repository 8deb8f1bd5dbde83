//! Trait for entities that have a position and can be updated.
//!
//! This trait provides a common interface for all entities in the range
//! that have a world position and need per-frame housekeeping (Dart,
//! Target).

use glam::Vec3;

use super::dart::Dart;
use super::target::Target;

/// Trait for entities with a position that can be updated over time.
///
/// Any type that implements this trait:
/// - Has a position in 3D space
/// - Can be updated with a time delta
pub trait Locatable {
    /// Returns the entity's world position.
    fn pos(&self) -> Vec3;

    /// Returns a mutable reference to the entity's world position.
    fn pos_mut(&mut self) -> &mut Vec3;

    /// Updates the entity's state based on the time delta.
    ///
    /// # Arguments
    ///
    /// * `dt` - Time delta since the last update in seconds.
    fn update(&mut self, dt: f32);
}

impl Locatable for Dart {
    fn pos(&self) -> Vec3 {
        self.pos
    }

    fn pos_mut(&mut self) -> &mut Vec3 {
        &mut self.pos
    }

    /// Advances the stick transition, when one is running.
    fn update(&mut self, dt: f32) {
        self.tick_transition(dt);
    }
}

impl Locatable for Target {
    fn pos(&self) -> Vec3 {
        self.pose.position
    }

    fn pos_mut(&mut self) -> &mut Vec3 {
        &mut self.pose.position
    }

    /// Decays the hit-flash timer.
    fn update(&mut self, dt: f32) {
        self.hit_flash = (self.hit_flash - dt).max(0.0);
    }
}

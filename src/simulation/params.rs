use serde::{Deserialize, Serialize};

/// Where the throw velocity comes from when a held dart is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrowMode {
    /// Use the tracking service's directly sampled hand velocity.
    Tracked,
    /// Use the per-frame `(position - previous_position) / dt` estimate.
    Estimated,
}

/// Simulation parameters that control dart and target behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Multiplier applied to the hand velocity when a dart is thrown.
    pub throw_multiplier: f32,
    /// How far the dart tip embeds into a surface on stick, in world units.
    pub stick_depth: f32,
    /// Minimum relative impact speed for a dart to stick. Slower impacts
    /// bounce. Targets may override this per instance.
    pub min_stick_velocity: f32,
    /// Seconds after a release during which collisions are ignored, so a
    /// just-thrown dart cannot stick to the throwing hand or body.
    pub release_grace: f32,
    /// Squared speed below which free-flight orientation alignment is skipped.
    pub min_align_speed_sq: f32,
    /// Duration of the eased move into the final stuck pose, in seconds.
    pub stick_duration: f32,
    /// Per-frame blend factor for a held dart following its hand.
    pub held_blend: f32,
    /// Distance along the contact normal from which the refinement probe
    /// is cast back at the surface.
    pub probe_offset: f32,
    /// Maximum length of the surface refinement probe.
    pub probe_distance: f32,
    /// Hard cap on dart angular speed, applied at release.
    pub max_angular_velocity: f32,
    /// How long a target's hit flash stays lit, in seconds.
    pub hit_flash_duration: f32,
    /// Which throw-velocity source releases use.
    pub throw_mode: ThrowMode,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            throw_multiplier: 1.5,
            stick_depth: 0.03,
            min_stick_velocity: 1.5,
            release_grace: 0.15,
            min_align_speed_sq: 0.1,
            stick_duration: 0.08,
            held_blend: 0.5,
            probe_offset: 0.1,
            probe_distance: 0.2,
            max_angular_velocity: 50.0,
            hit_flash_duration: 0.2,
            throw_mode: ThrowMode::Tracked,
        }
    }
}

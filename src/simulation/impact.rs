//! Impact classification for dart collisions.
//!
//! Turns a raw collision event into ignore / bounce / stick. Bounce needs no
//! extra work here: the external physics engine already applies the normal
//! collision response, so a bouncing dart simply stays free.

use super::dart::Dart;
use super::params::Params;

/// Outcome of classifying one collision event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactResponse {
    /// Drop the event entirely (stuck/kinematic body, or inside the
    /// post-release grace window).
    Ignore,
    /// Too slow to stick; the dart remains free and bounces off.
    Bounce,
    /// Fast enough to stick; run the stick transition.
    Stick,
}

/// Classifies a collision against a dart.
///
/// `min_stick_velocity` lets a target override the global threshold;
/// pass `None` to use the configured default.
pub fn classify(
    dart: &Dart,
    relative_speed: f32,
    now: f32,
    min_stick_velocity: Option<f32>,
    params: &Params,
) -> ImpactResponse {
    if dart.is_stuck() || dart.kinematic {
        return ImpactResponse::Ignore;
    }

    // A dart leaving the hand grazes the thrower for a few frames.
    if let Some(released_at) = dart.time_of_last_release {
        if now - released_at < params.release_grace {
            return ImpactResponse::Ignore;
        }
    }

    let threshold = min_stick_velocity.unwrap_or(params.min_stick_velocity);
    if relative_speed < threshold {
        return ImpactResponse::Bounce;
    }

    ImpactResponse::Stick
}

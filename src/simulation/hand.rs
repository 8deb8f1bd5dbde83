//! Hand/controller tracking abstraction.
//!
//! The real pose source is an external tracking service; the simulation only
//! sees per-frame samples pushed into the [`Range`](super::range::Range).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometric_utils::Pose;

/// One frame's sample of a tracked hand or controller.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HandSample {
    /// World-space pose of the hand.
    pub pose: Pose,
    /// Linear velocity reported by the tracking service.
    pub velocity: Vec3,
    /// Angular velocity reported by the tracking service.
    pub angular_velocity: Vec3,
}

/// A tracked grabbing source.
///
/// Holds the most recent sample; the input layer overwrites it every frame
/// before the simulation steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hand {
    /// Stable hand identifier.
    pub id: usize,
    /// Latest tracking sample.
    pub sample: HandSample,
}

impl Hand {
    /// Creates a hand with an identity pose and zero velocities.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            sample: HandSample::default(),
        }
    }
}

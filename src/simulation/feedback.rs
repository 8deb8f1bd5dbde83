//! Haptic and visual feedback hooks fired on stick events.
//!
//! The core only defines the deterministic call points; real controller
//! rumble and particle effects plug in externally.

use glam::Vec3;

/// Everything a feedback implementation needs about one accepted stick.
#[derive(Debug, Clone, Copy)]
pub struct StickFeedback {
    /// Dart that stuck.
    pub dart_id: usize,
    /// Target it stuck to.
    pub target_id: usize,
    /// Hand that threw the dart, when known.
    pub hand: Option<usize>,
    /// World-space contact point.
    pub point: Vec3,
    /// Score awarded for the hit.
    pub score: i32,
}

/// Sink for stick feedback. All methods default to no-ops.
pub trait FeedbackSink {
    /// Rumble the controller that threw the dart.
    fn haptic_pulse(&mut self, _event: &StickFeedback) {}

    /// Play a visual hit effect at the contact point.
    fn visual_hit(&mut self, _event: &StickFeedback) {}
}

/// Feedback sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {}

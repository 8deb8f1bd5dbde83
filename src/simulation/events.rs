//! Event plumbing between the external physics/tracking services and the
//! range.
//!
//! The engine pushes raw events into a queue during its own update; the
//! range drains and applies them serially inside `step`, so all state
//! mutation happens in one place in a fixed order.

use glam::Vec3;

use super::dart::DartState;
use super::event_log::EventKind;
use super::feedback::{FeedbackSink, StickFeedback};
use super::impact::{ImpactResponse, classify};
use super::params::Params;
use super::range::Range;
use super::surface::{Raycaster, refine_normal};

/// Events delivered by the external services.
#[derive(Debug, Clone)]
pub enum RangeEvent {
    /// The physics engine reported a dart touching a target.
    CollisionEnter {
        /// Id of the colliding dart.
        dart_id: usize,
        /// Id of the target that was hit.
        target_id: usize,
        /// Collider identity of the dart, for duplicate tracking.
        collider: usize,
        /// Collision layer bit index of the dart.
        layer: u32,
        /// World-space contact point.
        point: Vec3,
        /// Collision-reported contact normal.
        normal: Vec3,
        /// Magnitude of the relative impact velocity.
        relative_speed: f32,
    },
    /// The tracking service attached a hand to a dart.
    HandAttached {
        /// Id of the grabbing hand.
        hand_id: usize,
        /// Id of the grabbed dart.
        dart_id: usize,
    },
    /// The tracking service detached a hand (trigger released).
    HandDetached {
        /// Id of the hand that let go.
        hand_id: usize,
    },
}

/// Queue for collecting range events from the external services.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<RangeEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: RangeEvent) {
        self.events.push(event);
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, RangeEvent> {
        self.events.drain(..)
    }
}

/// Applies all queued events to the range state.
pub fn apply_events(
    state: &mut Range,
    params: &Params,
    mut queue: EventQueue,
    raycaster: &impl Raycaster,
    feedback: &mut impl FeedbackSink,
) {
    for event in queue.drain() {
        match event {
            RangeEvent::CollisionEnter {
                dart_id,
                target_id,
                collider,
                layer,
                point,
                normal,
                relative_speed,
            } => {
                apply_collision(
                    state,
                    params,
                    raycaster,
                    feedback,
                    Contact {
                        dart_id,
                        target_id,
                        collider,
                        layer,
                        point,
                        normal,
                        relative_speed,
                    },
                );
            }
            RangeEvent::HandAttached { hand_id, dart_id } => {
                state.grab(dart_id, hand_id);
            }
            RangeEvent::HandDetached { hand_id } => {
                state.release_hand(hand_id, params);
            }
        }
    }
}

struct Contact {
    dart_id: usize,
    target_id: usize,
    collider: usize,
    layer: u32,
    point: Vec3,
    normal: Vec3,
    relative_speed: f32,
}

fn apply_collision(
    state: &mut Range,
    params: &Params,
    raycaster: &impl Raycaster,
    feedback: &mut impl FeedbackSink,
    contact: Contact,
) {
    let now = state.time;

    let Some(target_idx) = state.targets.iter().position(|t| t.id == contact.target_id) else {
        return;
    };
    if !state.targets[target_idx].dart_mask.contains(contact.layer) {
        return;
    }
    // One physical dart registers at most once.
    if state.targets[target_idx].contains_collider(contact.collider) {
        return;
    }

    let Some(dart_idx) = state.darts.iter().position(|d| d.id == contact.dart_id) else {
        return;
    };

    let response = classify(
        &state.darts[dart_idx],
        contact.relative_speed,
        now,
        state.targets[target_idx].min_stick_velocity,
        params,
    );

    match response {
        ImpactResponse::Ignore => {}
        ImpactResponse::Bounce => {
            state.log.log(
                now,
                format!(
                    "dart {} bounced off target {}",
                    contact.dart_id, contact.target_id
                ),
                EventKind::Bounce,
            );
        }
        ImpactResponse::Stick => {
            let mask = state.targets[target_idx].dart_mask;
            let normal = refine_normal(raycaster, contact.point, contact.normal, mask, params);

            let dart = &mut state.darts[dart_idx];
            let hand = match dart.state() {
                DartState::Held { hand } => Some(hand),
                _ => dart.last_hand,
            };
            dart.stick_to(contact.target_id, contact.point, normal, params);

            let target = &mut state.targets[target_idx];
            target.register_dart(contact.collider, contact.dart_id);
            let score = target.resolve_score(contact.point);
            target.flash(params);

            state.total_score += score;

            let stick = StickFeedback {
                dart_id: contact.dart_id,
                target_id: contact.target_id,
                hand,
                point: contact.point,
                score,
            };
            feedback.haptic_pulse(&stick);
            feedback.visual_hit(&stick);

            state.log.log(
                now,
                format!(
                    "dart {} stuck in target {} for {} points",
                    contact.dart_id, contact.target_id, score
                ),
                EventKind::Stick,
            );
        }
    }
}

//! Dart lifecycle state machine.
//!
//! A dart is either in free flight, held by a tracked hand, or stuck in a
//! target. `Stuck` is terminal: once a dart lands it never responds to
//! gravity, velocity or tracking updates again.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::geometric_utils::{Pose, look_rotation, smooth_step, stick_rotation};
use super::hand::HandSample;
use super::params::{Params, ThrowMode};

/// Lifecycle state of a dart. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DartState {
    /// Ballistic flight under the external physics engine.
    Free,
    /// Attached to a tracked hand.
    Held {
        /// Id of the grabbing hand.
        hand: usize,
    },
    /// Embedded in a target. Terminal.
    Stuck,
}

/// Rigid constraint record binding a held dart to its hand.
///
/// Break thresholds are unbounded: the constraint never separates under
/// force, only an explicit release removes it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FixedConstraint {
    /// Id of the hand the constraint is connected to.
    pub connected_hand: usize,
    /// Force needed to break the constraint.
    pub break_force: f32,
    /// Torque needed to break the constraint.
    pub break_torque: f32,
}

impl FixedConstraint {
    fn unbreakable(hand: usize) -> Self {
        Self {
            connected_hand: hand,
            break_force: f32::INFINITY,
            break_torque: f32::INFINITY,
        }
    }
}

/// Per-frame bookkeeping while a dart is held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeldState {
    /// The constraint attaching the dart to the hand.
    pub constraint: FixedConstraint,
    /// Position at the previous frame, for the velocity estimate.
    previous_position: Vec3,
    /// `(position - previous_position) / dt` from the latest frame.
    pub estimated_velocity: Vec3,
    /// Last sample received from the tracking service.
    pub source: HandSample,
}

/// Cooperative eased move into the final stuck pose.
///
/// Advanced once per tick by real frame delta; always runs to completion
/// once started (`Stuck` prevents re-entry, so nothing can cancel it).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StickTransition {
    /// Pose at the moment of impact.
    pub start: Pose,
    /// Computed rest pose in the surface.
    pub target: Pose,
    /// Accumulated real time since the transition started.
    pub elapsed: f32,
    /// Total transition duration in seconds.
    pub duration: f32,
}

/// A throwable dart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dart {
    /// Stable dart identifier.
    pub id: usize,
    /// Identity of the dart's physics collider, used by targets to avoid
    /// double-registering one physical dart.
    pub collider: usize,
    /// Collision layer bit index.
    pub layer: u32,
    /// World-space position.
    pub pos: Vec3,
    /// World-space rotation.
    pub rot: Quat,
    /// Linear velocity (current while free, last-known otherwise).
    pub velocity: Vec3,
    /// Angular velocity (current while free, last-known otherwise).
    pub angular_velocity: Vec3,
    /// Whether the external physics engine applies gravity to this body.
    pub use_gravity: bool,
    /// Whether the body is kinematic (not integrated by the engine).
    pub kinematic: bool,
    /// Whether the collider participates in collision detection.
    pub collider_enabled: bool,
    /// Fixed euler correction (radians) between the model's forward axis
    /// and its velocity-aligned facing.
    pub rotation_offset: Vec3,
    /// Local grab offset relative to the hand. When unset, grabbing skips
    /// snapping and hand-following.
    pub grab_point: Option<Pose>,
    /// Simulation time of the most recent release, if any.
    pub time_of_last_release: Option<f32>,
    /// Target this dart is stuck in, if any.
    pub attached_target: Option<usize>,
    /// Hand that most recently held this dart, for feedback routing.
    pub last_hand: Option<usize>,
    state: DartState,
    held: Option<HeldState>,
    transition: Option<StickTransition>,
}

impl Dart {
    /// Creates a free dart at the given pose.
    ///
    /// # Arguments
    ///
    /// * `id` - Stable dart identifier
    /// * `collider` - Physics collider identity
    /// * `pos` - Spawn position
    /// * `rot` - Spawn rotation
    pub fn new(id: usize, collider: usize, pos: Vec3, rot: Quat) -> Self {
        Self {
            id,
            collider,
            layer: 0,
            pos,
            rot,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            use_gravity: true,
            kinematic: false,
            collider_enabled: true,
            rotation_offset: Vec3::ZERO,
            grab_point: Some(Pose::IDENTITY),
            time_of_last_release: None,
            attached_target: None,
            last_hand: None,
            state: DartState::Free,
            held: None,
            transition: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DartState {
        self.state
    }

    /// Whether the dart is stuck in a target.
    pub fn is_stuck(&self) -> bool {
        self.state == DartState::Stuck
    }

    /// Whether the dart is currently held.
    pub fn is_held(&self) -> bool {
        matches!(self.state, DartState::Held { .. })
    }

    /// Held-phase bookkeeping, if the dart is held.
    pub fn held(&self) -> Option<&HeldState> {
        self.held.as_ref()
    }

    /// The in-flight stick transition, if one is running.
    pub fn transition(&self) -> Option<&StickTransition> {
        self.transition.as_ref()
    }

    /// World pose of the dart.
    pub fn pose(&self) -> Pose {
        Pose::new(self.pos, self.rot)
    }

    /// Grabs the dart with a tracked hand.
    ///
    /// No-op if the dart is stuck. Creates an unbreakable constraint to the
    /// hand, disables gravity, and snaps the dart to its grab point when one
    /// is configured.
    pub fn grab(&mut self, hand: usize, sample: &HandSample) {
        if self.is_stuck() {
            return;
        }

        self.use_gravity = false;

        if let Some(grab_point) = &self.grab_point {
            let snapped = sample.pose.compose(grab_point);
            self.pos = snapped.position;
            self.rot = snapped.rotation;
        }

        self.state = DartState::Held { hand };
        self.last_hand = Some(hand);
        self.held = Some(HeldState {
            constraint: FixedConstraint::unbreakable(hand),
            previous_position: self.pos,
            estimated_velocity: Vec3::ZERO,
            source: *sample,
        });
    }

    /// Advances the held-phase follow for one frame.
    ///
    /// Blends the dart toward the hand's grab pose (framerate-dependent
    /// fixed-factor smoothing, intentionally simple) and refreshes the
    /// per-frame velocity estimate. No-op unless held.
    pub fn update_held(&mut self, sample: &HandSample, dt: f32, params: &Params) {
        if !self.is_held() {
            return;
        }

        if let Some(grab_point) = &self.grab_point {
            let target = sample.pose.compose(grab_point);
            let mut pose = self.pose();
            pose.blend_toward(&target, params.held_blend);
            self.pos = pose.position;
            self.rot = pose.rotation;
        }

        if let Some(held) = &mut self.held {
            if dt > 0.0 {
                held.estimated_velocity = (self.pos - held.previous_position) / dt;
            }
            held.previous_position = self.pos;
            held.source = *sample;
        }
    }

    /// Releases a held dart, launching it with the throw velocity.
    ///
    /// No-op unless held. The throw velocity is the hand velocity (sampled
    /// or frame-estimated per [`ThrowMode`]) scaled by the throw multiplier;
    /// angular velocity is scaled the same way and clamped.
    pub fn release(&mut self, params: &Params, now: f32) {
        if !self.is_held() {
            return;
        }

        let Some(held) = self.held.take() else {
            return;
        };

        self.use_gravity = true;

        let source_velocity = match params.throw_mode {
            ThrowMode::Tracked => held.source.velocity,
            ThrowMode::Estimated => held.estimated_velocity,
        };

        self.velocity = source_velocity * params.throw_multiplier;
        self.angular_velocity = (held.source.angular_velocity * params.throw_multiplier)
            .clamp_length_max(params.max_angular_velocity);

        self.time_of_last_release = Some(now);
        self.state = DartState::Free;
    }

    /// Embeds the dart in a target surface.
    ///
    /// No-op if already stuck. A held dart is detached first without any
    /// throw velocity. The body goes kinematic with its collider disabled,
    /// ownership moves to the target, and an eased transition toward the
    /// computed rest pose begins.
    pub fn stick_to(&mut self, target: usize, contact: Vec3, normal: Vec3, params: &Params) {
        if self.is_stuck() {
            return;
        }

        // Forced detach: no throw velocity on this path.
        self.held = None;

        self.state = DartState::Stuck;
        self.kinematic = true;
        self.collider_enabled = false;
        self.use_gravity = false;
        self.velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.attached_target = Some(target);

        let rest = Pose::new(contact + normal * params.stick_depth, stick_rotation(normal));
        self.transition = Some(StickTransition {
            start: self.pose(),
            target: rest,
            elapsed: 0.0,
            duration: params.stick_duration,
        });
    }

    /// Advances the stick transition by one frame's real delta.
    ///
    /// Elapsed time accumulates by `dt`, not tick count, so the move
    /// completes on schedule even across delayed frames.
    pub fn tick_transition(&mut self, dt: f32) {
        let Some(transition) = &mut self.transition else {
            return;
        };

        transition.elapsed += dt;

        if transition.elapsed >= transition.duration {
            self.pos = transition.target.position;
            self.rot = transition.target.rotation;
            self.transition = None;
        } else {
            let t = smooth_step(transition.elapsed / transition.duration);
            self.pos = transition.start.position.lerp(transition.target.position, t);
            self.rot = transition.start.rotation.slerp(transition.target.rotation, t);
        }
    }

    /// Rotates a free-flying dart to face its velocity.
    ///
    /// Suspended while held, stuck or kinematic, and below the minimum
    /// speed so a resting dart does not jitter.
    pub fn align_to_velocity(&mut self, params: &Params) {
        if self.state != DartState::Free || self.kinematic {
            return;
        }
        if self.velocity.length_squared() <= params.min_align_speed_sq {
            return;
        }

        let forward = self.velocity.normalize();
        // Near-vertical flight would degenerate against the world-up hint.
        let up = if forward.dot(Vec3::Y).abs() > 0.99 {
            Vec3::Z
        } else {
            Vec3::Y
        };

        let offset = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_offset.x,
            self.rotation_offset.y,
            self.rotation_offset.z,
        );
        self.rot = look_rotation(forward, up) * offset;
    }
}

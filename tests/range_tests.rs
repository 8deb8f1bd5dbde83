#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use bullseye::simulation::dart::DartState;
use bullseye::simulation::event_log::EventKind;
use bullseye::simulation::events::{EventQueue, RangeEvent};
use bullseye::simulation::feedback::{FeedbackSink, NullFeedback, StickFeedback};
use bullseye::simulation::geometric_utils::{Pose, stick_rotation};
use bullseye::simulation::hand::HandSample;
use bullseye::simulation::params::Params;
use bullseye::simulation::range::Range;
use bullseye::simulation::surface::{LayerMask, NoGeometry, RayHit, Raycaster, refine_normal};
use bullseye::simulation::target::{Target, TargetZone, ZoneBounds};
use glam::{Quat, Vec3};
use std::cell::Cell;

const BOARD_CENTER: Vec3 = Vec3::new(0.0, 1.0, 4.0);

fn create_test_range() -> Range {
    let mut range = Range::new();

    let mut target = Target::new(0, Pose::new(BOARD_CENTER, Quat::IDENTITY));
    target.zones = vec![
        TargetZone {
            bounds: ZoneBounds::from_center_size(BOARD_CENTER, Vec3::splat(0.2)),
            score_value: 50,
        },
        TargetZone {
            bounds: ZoneBounds::from_center_size(BOARD_CENTER, Vec3::splat(1.0)),
            score_value: 10,
        },
    ];
    range.targets.push(target);

    range
}

fn hand_at(position: Vec3, velocity: Vec3) -> HandSample {
    HandSample {
        pose: Pose::new(position, Quat::IDENTITY),
        velocity,
        angular_velocity: Vec3::ZERO,
    }
}

fn bull_hit(dart_id: usize, collider: usize, speed: f32) -> RangeEvent {
    RangeEvent::CollisionEnter {
        dart_id,
        target_id: 0,
        collider,
        layer: 0,
        point: BOARD_CENTER,
        normal: Vec3::NEG_Z,
        relative_speed: speed,
    }
}

fn step_with(range: &mut Range, params: &Params, dt: f32, events: Vec<RangeEvent>) {
    let mut queue = EventQueue::new();
    for event in events {
        queue.push(event);
    }
    range.step(params, dt, &NoGeometry, &mut NullFeedback, queue);
}

#[test]
fn test_collision_event_sticks_and_scores() {
    let params = Params::default();
    let mut range = create_test_range();
    let dart_id = range.spawn_dart(Vec3::new(0.0, 1.0, 3.5), Quat::IDENTITY);

    step_with(&mut range, &params, 0.1, vec![bull_hit(dart_id, dart_id, 8.0)]);

    let dart = range.dart(dart_id).unwrap();
    assert_eq!(dart.state(), DartState::Stuck);
    assert_eq!(dart.attached_target, Some(0));
    // dt exceeded the transition duration, so the dart is at rest already
    assert_eq!(dart.pos, BOARD_CENTER + Vec3::NEG_Z * params.stick_depth);

    assert_eq!(range.total_score, 50);
    assert_eq!(range.target(0).unwrap().stuck_count(), 1);
    assert!(range.target(0).unwrap().hit_flash > 0.0);
    assert_eq!(range.log.events()[0].kind, EventKind::Stick);
}

#[test]
fn test_slow_impact_bounces_in_step() {
    let params = Params::default();
    let mut range = create_test_range();
    let dart_id = range.spawn_dart(Vec3::new(0.0, 1.0, 3.5), Quat::IDENTITY);

    step_with(&mut range, &params, 0.1, vec![bull_hit(dart_id, dart_id, 1.0)]);

    let dart = range.dart(dart_id).unwrap();
    assert_eq!(dart.state(), DartState::Free);
    assert_eq!(range.total_score, 0);
    assert_eq!(range.target(0).unwrap().stuck_count(), 0);
    assert_eq!(range.log.events()[0].kind, EventKind::Bounce);
}

#[test]
fn test_release_grace_suppresses_early_collision() {
    let params = Params::default();
    let mut range = create_test_range();
    range.set_hand_sample(0, hand_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 6.0)));
    let dart_id = range.spawn_dart(Vec3::ZERO, Quat::IDENTITY);

    range.grab(dart_id, 0);
    range.release(dart_id, &params);

    // 0.1s after release: even a fast hit is ignored
    step_with(&mut range, &params, 0.1, vec![bull_hit(dart_id, dart_id, 10.0)]);
    assert_eq!(range.dart(dart_id).unwrap().state(), DartState::Free);
    assert_eq!(range.target(0).unwrap().stuck_count(), 0);

    // 0.2s after release: accepted
    step_with(&mut range, &params, 0.1, vec![bull_hit(dart_id, dart_id, 10.0)]);
    assert_eq!(range.dart(dart_id).unwrap().state(), DartState::Stuck);
}

#[test]
fn test_duplicate_collider_scored_once() {
    let params = Params::default();
    let mut range = create_test_range();
    let dart_id = range.spawn_dart(Vec3::new(0.0, 1.0, 3.5), Quat::IDENTITY);

    step_with(
        &mut range,
        &params,
        0.1,
        vec![
            bull_hit(dart_id, dart_id, 8.0),
            bull_hit(dart_id, dart_id, 8.0),
        ],
    );

    assert_eq!(range.total_score, 50);
    assert_eq!(range.target(0).unwrap().stuck_count(), 1);
}

#[test]
fn test_layer_mask_gates_collisions() {
    let params = Params::default();
    let mut range = create_test_range();
    range.targets[0].dart_mask = LayerMask::single(3);
    let dart_id = range.spawn_dart(Vec3::new(0.0, 1.0, 3.5), Quat::IDENTITY);

    // dart is on layer 0, target only accepts layer 3
    step_with(&mut range, &params, 0.1, vec![bull_hit(dart_id, dart_id, 8.0)]);
    assert_eq!(range.dart(dart_id).unwrap().state(), DartState::Free);

    range.dart_mut(dart_id).unwrap().layer = 3;
    step_with(&mut range, &params, 0.1, vec![bull_hit(dart_id, dart_id, 8.0)]);
    assert_eq!(range.dart(dart_id).unwrap().state(), DartState::Stuck);
}

#[test]
fn test_held_follow_runs_before_collision_resolution() {
    let params = Params::default();
    let mut range = create_test_range();
    range.set_hand_sample(0, hand_at(Vec3::ZERO, Vec3::ZERO));
    let dart_id = range.spawn_dart(Vec3::new(2.0, 2.0, 2.0), Quat::IDENTITY);
    range.grab(dart_id, 0);

    // the hand moved this frame; the follow must land before the stick
    range.set_hand_sample(0, hand_at(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO));
    step_with(&mut range, &params, 0.01, vec![bull_hit(dart_id, dart_id, 9.0)]);

    let dart = range.dart(dart_id).unwrap();
    assert_eq!(dart.state(), DartState::Stuck);
    let transition = dart.transition().unwrap();
    // blended halfway to the hand before the transition snapshot was taken
    assert!((transition.start.position - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_hand_attach_detach_events_drive_grab_and_throw() {
    let params = Params::default();
    let mut range = create_test_range();
    range.set_hand_sample(0, hand_at(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0)));
    let dart_id = range.spawn_dart(Vec3::ZERO, Quat::IDENTITY);

    step_with(
        &mut range,
        &params,
        0.016,
        vec![RangeEvent::HandAttached { hand_id: 0, dart_id }],
    );
    assert_eq!(range.dart(dart_id).unwrap().state(), DartState::Held { hand: 0 });

    step_with(
        &mut range,
        &params,
        0.016,
        vec![RangeEvent::HandDetached { hand_id: 0 }],
    );

    let dart = range.dart(dart_id).unwrap();
    assert_eq!(dart.state(), DartState::Free);
    assert_eq!(dart.velocity, Vec3::new(0.0, 3.0, 0.0));
    assert_eq!(dart.time_of_last_release, Some(range.time));
}

struct ProbeRecorder {
    last_cast: Cell<Option<(Vec3, Vec3, f32)>>,
    refined: Vec3,
}

impl Raycaster for ProbeRecorder {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        _mask: LayerMask,
    ) -> Option<RayHit> {
        self.last_cast.set(Some((origin, direction, max_distance)));
        Some(RayHit {
            point: origin + direction * 0.1,
            normal: self.refined,
        })
    }
}

#[test]
fn test_surface_normal_refinement_feeds_stick_rotation() {
    let params = Params::default();
    let mut range = create_test_range();
    let dart_id = range.spawn_dart(Vec3::new(0.0, 1.0, 3.5), Quat::IDENTITY);

    // collision reports a skewed per-triangle normal; the probe corrects it
    let raw_normal = Vec3::new(0.6, 0.0, -0.8);
    let raycaster = ProbeRecorder {
        last_cast: Cell::new(None),
        refined: Vec3::NEG_Z,
    };

    let mut queue = EventQueue::new();
    queue.push(RangeEvent::CollisionEnter {
        dart_id,
        target_id: 0,
        collider: dart_id,
        layer: 0,
        point: BOARD_CENTER,
        normal: raw_normal,
        relative_speed: 8.0,
    });
    range.step(&params, 0.001, &raycaster, &mut NullFeedback, queue);

    let (origin, direction, max_distance) = raycaster.last_cast.get().unwrap();
    assert!((origin - (BOARD_CENTER + raw_normal * params.probe_offset)).length() < 1e-5);
    assert!((direction - (-raw_normal)).length() < 1e-5);
    assert_eq!(max_distance, params.probe_distance);

    let dart = range.dart(dart_id).unwrap();
    let transition = dart.transition().unwrap();
    assert!((transition.target.rotation * Vec3::Z - stick_rotation(Vec3::NEG_Z) * Vec3::Z).length() < 1e-5);
    // final position uses the refined normal too
    assert!((transition.target.position - (BOARD_CENTER + Vec3::NEG_Z * params.stick_depth)).length() < 1e-5);
}

#[test]
fn test_probe_miss_keeps_contact_normal() {
    let params = Params::default();
    let normal = Vec3::new(0.0, 1.0, 0.0);

    let refined = refine_normal(&NoGeometry, Vec3::ZERO, normal, LayerMask::ALL, &params);

    assert_eq!(refined, normal);
}

#[test]
fn test_clear_darts_despawns_and_reaccepts() {
    let params = Params::default();
    let mut range = create_test_range();
    let dart_id = range.spawn_dart(Vec3::new(0.0, 1.0, 3.5), Quat::IDENTITY);
    let collider = range.dart(dart_id).unwrap().collider;

    step_with(&mut range, &params, 0.1, vec![bull_hit(dart_id, collider, 8.0)]);
    assert_eq!(range.darts.len(), 1);

    range.clear_darts(0);

    assert!(range.darts.is_empty());
    assert_eq!(range.target(0).unwrap().stuck_count(), 0);
    assert_eq!(range.log.events()[0].kind, EventKind::Reset);

    // a fresh dart reusing the old collider identity sticks fine
    let next = range.spawn_dart(Vec3::new(0.0, 1.0, 3.5), Quat::IDENTITY);
    range.dart_mut(next).unwrap().collider = collider;
    step_with(&mut range, &params, 0.1, vec![bull_hit(next, collider, 8.0)]);
    assert_eq!(range.dart(next).unwrap().state(), DartState::Stuck);
    assert_eq!(range.total_score, 100);
}

#[derive(Default)]
struct CountingFeedback {
    haptics: Vec<StickFeedback>,
    visuals: usize,
}

impl FeedbackSink for CountingFeedback {
    fn haptic_pulse(&mut self, event: &StickFeedback) {
        self.haptics.push(*event);
    }

    fn visual_hit(&mut self, _event: &StickFeedback) {
        self.visuals += 1;
    }
}

#[test]
fn test_feedback_hooks_fire_once_per_stick() {
    let params = Params::default();
    let mut range = create_test_range();
    range.set_hand_sample(0, hand_at(Vec3::ZERO, Vec3::ZERO));
    let dart_id = range.spawn_dart(Vec3::ZERO, Quat::IDENTITY);
    range.grab(dart_id, 0);

    let mut feedback = CountingFeedback::default();
    let mut queue = EventQueue::new();
    // hand-stab variant: the dart sticks straight out of the hand
    queue.push(bull_hit(dart_id, dart_id, 8.0));
    queue.push(bull_hit(dart_id, dart_id, 8.0));
    range.step(&params, 0.016, &NoGeometry, &mut feedback, queue);

    assert_eq!(feedback.haptics.len(), 1);
    assert_eq!(feedback.visuals, 1);
    let stick = &feedback.haptics[0];
    assert_eq!(stick.dart_id, dart_id);
    assert_eq!(stick.target_id, 0);
    assert_eq!(stick.hand, Some(0));
    assert_eq!(stick.score, 50);
}

#[test]
fn test_unknown_ids_are_silent_noops() {
    let params = Params::default();
    let mut range = create_test_range();

    range.grab(99, 0);
    range.release(99, &params);
    range.clear_darts(42);
    step_with(&mut range, &params, 0.1, vec![bull_hit(99, 99, 8.0)]);

    assert!(range.darts.is_empty());
    assert_eq!(range.total_score, 0);
}

//! Demo binary: an automated thrower lobbing darts at a board.
//!
//! Everything in here is glue standing in for the external services: a
//! one-plane "physics engine", a scripted hand, and macroquad rendering.
//! The simulation core lives in the library.

use bullseye::simulation::events::{EventQueue, RangeEvent};
use bullseye::simulation::feedback::NullFeedback;
use bullseye::simulation::geometric_utils::Pose;
use bullseye::simulation::hand::HandSample;
use bullseye::simulation::params::Params;
use bullseye::simulation::range::Range;
use bullseye::simulation::surface::{LayerMask, RayHit, Raycaster};
use bullseye::simulation::target::{Target, TargetZone, ZoneBounds};

use glam::{Quat, Vec3};
use macroquad::prelude::{
    BLACK, Camera3D, DARKGRAY, KeyCode, LIGHTGRAY, clear_background, draw_text, get_frame_time,
    is_key_down, is_key_pressed, measure_text, next_frame, screen_height, screen_width, set_camera,
    set_default_camera, vec3,
};
use rand::Rng;

mod graphics;

const BOARD_CENTER: Vec3 = Vec3::new(0.0, 1.4, 4.0);
const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
const HAND_START: Vec3 = Vec3::new(0.0, 1.2, 0.0);

/// The demo's entire collision geometry: the front face of the board.
struct FlatBoard {
    plane_z: f32,
}

impl Raycaster for FlatBoard {
    fn cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        _mask: LayerMask,
    ) -> Option<RayHit> {
        if direction.z.abs() < f32::EPSILON {
            return None;
        }
        let t = (self.plane_z - origin.z) / direction.z;
        if t <= 0.0 || t > max_distance {
            return None;
        }
        Some(RayHit {
            point: origin + direction * t,
            normal: Vec3::NEG_Z,
        })
    }
}

fn setup_range() -> Range {
    let mut range = Range::new();

    let mut target = Target::new(0, Pose::new(BOARD_CENTER, Quat::IDENTITY));
    // inner zones first: first containing zone wins
    target.zones = vec![
        TargetZone {
            bounds: ZoneBounds::from_center_size(BOARD_CENTER, Vec3::new(0.1, 0.1, 0.3)),
            score_value: 50,
        },
        TargetZone {
            bounds: ZoneBounds::from_center_size(BOARD_CENTER, Vec3::new(0.35, 0.35, 0.3)),
            score_value: 25,
        },
        TargetZone {
            bounds: ZoneBounds::from_center_size(BOARD_CENTER, Vec3::new(0.9, 0.9, 0.3)),
            score_value: 10,
        },
    ];
    range.targets.push(target);

    range
}

/// Scripted stand-in for the hand tracking service.
struct Thrower {
    hand_id: usize,
    dart: Option<usize>,
    hold_time: f32,
    spawn_cooldown: f32,
    swing: Vec3,
    hand_pos: Vec3,
}

impl Thrower {
    fn new() -> Self {
        Self {
            hand_id: 0,
            dart: None,
            hold_time: 0.0,
            spawn_cooldown: 0.5,
            swing: Vec3::ZERO,
            hand_pos: HAND_START,
        }
    }

    fn update(&mut self, range: &mut Range, params: &Params, dt: f32) {
        match self.dart {
            None => {
                self.spawn_cooldown -= dt;
                if self.spawn_cooldown > 0.0 {
                    return;
                }

                let mut rng = rand::rng();
                self.hand_pos = HAND_START;

                // aim at the board with some scatter; slow swings bounce off
                let jitter = Vec3::new(
                    rng.random_range(-0.5..0.5),
                    rng.random_range(-0.2..0.6),
                    0.0,
                );
                let speed = rng.random_range(1.2..5.0);
                let direction = (BOARD_CENTER + jitter - self.hand_pos + Vec3::Y).normalize();
                self.swing = direction * speed;

                self.push_sample(range);
                let dart_id = range.spawn_dart(self.hand_pos, Quat::IDENTITY);
                range.pick_up(dart_id, self.hand_id);

                self.dart = Some(dart_id);
                self.hold_time = 0.0;
            }
            Some(dart_id) => {
                self.hold_time += dt;
                self.hand_pos += self.swing * dt;
                self.push_sample(range);

                if self.hold_time >= 0.3 {
                    range.release(dart_id, params);
                    self.dart = None;
                    self.spawn_cooldown = 1.2;
                }
            }
        }
    }

    fn push_sample(&self, range: &mut Range) {
        range.set_hand_sample(
            self.hand_id,
            HandSample {
                pose: Pose::new(self.hand_pos, Quat::IDENTITY),
                velocity: self.swing,
                angular_velocity: Vec3::ZERO,
            },
        );
    }
}

/// Minimal ballistic integration plus board-plane collision detection,
/// standing in for the external physics engine.
fn fake_physics(range: &mut Range, dt: f32, queue: &mut EventQueue) {
    let board = &range.targets[0];
    let target_id = board.id;
    let center = board.pose.position;
    let plane_z = center.z;

    for dart in &mut range.darts {
        if dart.kinematic || dart.is_held() {
            continue;
        }
        if dart.use_gravity {
            dart.velocity += GRAVITY * dt;
        }

        let prev = dart.pos;
        dart.pos += dart.velocity * dt;

        let crossed = prev.z < plane_z && dart.pos.z >= plane_z;
        if crossed && dart.collider_enabled {
            let t = (plane_z - prev.z) / (dart.pos.z - prev.z);
            let point = prev.lerp(dart.pos, t);
            let on_board = (point.x - center.x).abs() < 0.6 && (point.y - center.y).abs() < 0.6;

            if on_board {
                queue.push(RangeEvent::CollisionEnter {
                    dart_id: dart.id,
                    target_id,
                    collider: dart.collider,
                    layer: dart.layer,
                    point,
                    normal: Vec3::NEG_Z,
                    relative_speed: dart.velocity.length(),
                });
            } else {
                // wall behind the board: plain bounce
                dart.pos = prev;
                dart.velocity.z = -dart.velocity.z * 0.3;
            }
        }
    }

    // sweep up darts that fell to the floor
    range.darts.retain(|d| d.is_held() || d.pos.y > -0.5);
}

#[macroquad::main("Bullseye Darts")]
async fn main() {
    let mut genesis = true;

    let params = Params::default();
    let board = FlatBoard {
        plane_z: BOARD_CENTER.z,
    };
    let mut feedback = NullFeedback;

    let mut range = setup_range();
    let mut thrower = Thrower::new();

    println!("Starting darts range simulation");

    loop {
        if genesis {
            clear_background(LIGHTGRAY);
            let text = "Start throwing by pressing Enter";
            let font_size = 30.0;

            let text_size = measure_text(text, None, font_size as _, 1.0);
            draw_text(
                text,
                screen_width() / 2. - text_size.width / 2.,
                screen_height() / 2. - text_size.height / 2.,
                font_size,
                DARKGRAY,
            );

            if is_key_down(KeyCode::Enter) {
                genesis = false;
            }
            next_frame().await;
            continue;
        }

        clear_background(LIGHTGRAY);

        let dt = get_frame_time().min(0.05);
        let mut queue = EventQueue::new();

        thrower.update(&mut range, &params, dt);
        fake_physics(&mut range, dt, &mut queue);
        range.step(&params, dt, &board, &mut feedback, queue);

        if is_key_pressed(KeyCode::C) {
            range.clear_darts(0);
        }

        set_camera(&Camera3D {
            position: vec3(0.0, 1.8, -2.2),
            target: vec3(BOARD_CENTER.x, BOARD_CENTER.y, BOARD_CENTER.z),
            up: vec3(0.0, 1.0, 0.0),
            ..Default::default()
        });

        graphics::draw_targets(&range);
        graphics::draw_darts(&range);

        set_default_camera();
        graphics::draw_overlay(&range);
        draw_text("C: clear board", 20.0, screen_height() - 20.0, 16.0, BLACK);

        next_frame().await
    }
}

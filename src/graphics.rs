//! Immediate-mode drawing for the demo binary.

use bullseye::simulation::dart::DartState;
use bullseye::simulation::event_log::EventKind;
use bullseye::simulation::range::Range;
use macroquad::prelude::*;

/// Converts a simulation vector into macroquad's math type.
fn mq(v: glam::Vec3) -> Vec3 {
    vec3(v.x, v.y, v.z)
}

pub fn draw_targets(range: &Range) {
    for target in &range.targets {
        let center = mq(target.pose.position);

        // board backing
        let flash = (target.hit_flash * 5.0).clamp(0.0, 1.0);
        let board_color = Color::new(0.55 + 0.4 * flash, 0.42, 0.28, 1.0);
        draw_cube(center, vec3(1.2, 1.2, 0.05), None, board_color);

        // zones, outermost last so inner rings stay visible
        for (i, zone) in target.zones.iter().enumerate().rev() {
            let size = zone.bounds.max - zone.bounds.min;
            let zone_center = (zone.bounds.min + zone.bounds.max) * 0.5;
            let shade = 0.3 + 0.2 * i as f32;
            draw_cube(
                mq(zone_center) - vec3(0.0, 0.0, 0.01 + 0.005 * i as f32),
                vec3(size.x, size.y, 0.01),
                None,
                Color::new(shade, 0.1, 0.1, 1.0),
            );
        }
    }
}

pub fn draw_darts(range: &Range) {
    for dart in &range.darts {
        let tip = mq(dart.pos);
        // shaft extends backwards along the dart's local -Z
        let tail = mq(dart.pos - dart.rot * glam::Vec3::Z * 0.18);

        let color = match dart.state() {
            DartState::Free => DARKGRAY,
            DartState::Held { .. } => BLUE,
            DartState::Stuck => GOLD,
        };

        draw_line_3d(tail, tip, color);
        draw_sphere(tip, 0.015, None, color);
        // flights
        draw_cube(tail, vec3(0.04, 0.04, 0.02), None, GREEN);
    }
}

pub fn draw_overlay(range: &Range) {
    draw_text(
        &format!("Score: {}", range.total_score),
        20.0,
        30.0,
        30.0,
        BLACK,
    );
    draw_text(
        &format!("Darts: {}", range.darts.len()),
        20.0,
        55.0,
        20.0,
        DARKGRAY,
    );

    for (i, event) in range.log.events().iter().take(8).enumerate() {
        let color = match event.kind {
            EventKind::Stick => GOLD,
            EventKind::Bounce => RED,
            EventKind::Throw => BLUE,
            EventKind::Grab => DARKGRAY,
            EventKind::Reset => BLACK,
        };
        draw_text(
            &format!("[{:6.1}] {}", event.time, event.description),
            20.0,
            85.0 + 18.0 * i as f32,
            16.0,
            color,
        );
    }
}

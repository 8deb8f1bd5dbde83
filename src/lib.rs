//! # Bullseye - VR Darts Simulation Core
//!
//! A frame-stepped simulation of throwable darts: grab a dart with a
//! tracked hand, throw it with physically-derived velocity, watch it fly
//! nose-first, and stick it into a scored target - or bounce off if the
//! throw was too soft.
//!
//! ## Features
//!
//! - Free / Held / Stuck dart lifecycle state machine
//! - Throw velocity captured from hand tracking (sampled or frame-estimated)
//! - Orientation-follows-velocity free flight
//! - Impact classification (ignore / bounce / stick) with a post-release grace window
//! - Surface normal refinement against mesh geometry
//! - First-match scoring zones with duplicate-dart protection
//! - Eased multi-frame stick transitions
//! - Haptic/visual feedback hooks and an event log
//! - Save/load range state
//!
//! ## Core Modules
//!
//! - [`simulation::dart`] - Dart state machine and stick resolution
//! - [`simulation::target`] - Targets, scoring zones, stuck-dart tracking
//! - [`simulation::impact`] - Collision classification
//! - [`simulation::surface`] - Surface normal refinement
//! - [`simulation::range`] - The scene owning all entities
//! - [`simulation::events`] - Event plumbing from the external services

/// Core simulation logic and data structures.
pub mod simulation {
    /// Dart lifecycle state machine and stick transitions.
    pub mod dart;
    /// Event logging for the demo overlay.
    pub mod event_log;
    /// Event queue fed by the physics and tracking services.
    pub mod events;
    /// Haptic and visual feedback hooks.
    pub mod feedback;
    /// Geometric utilities: poses, look rotations, easing.
    pub mod geometric_utils;
    /// Hand/controller tracking samples.
    pub mod hand;
    /// Impact classification (ignore / bounce / stick).
    pub mod impact;
    /// Trait for locatable entities that can be updated.
    ///
    /// The [`locatable::Locatable`] trait is implemented by all entities
    /// that have a position in 3D space and per-frame housekeeping
    /// (Dart, Target).
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// The dart range owning darts, targets and hands.
    pub mod range;
    /// Surface normal refinement against the collision service.
    pub mod surface;
    /// Targets and scoring zones.
    pub mod target;
}

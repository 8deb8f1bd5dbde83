//! The dart range: owns all darts, targets and tracked hands.
//!
//! The range is the root of the simulation. External services drive it
//! through three channels each frame: hand samples pushed in before the
//! step, queued [`RangeEvent`](super::events::RangeEvent)s from the physics
//! and tracking layers, and the `step` call itself. Within one step, held
//! darts follow their hands first, then queued collisions are resolved,
//! then stick transitions and free-flight alignment tick - the standard
//! fixed-timestep ordering of update-then-resolve.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::dart::{Dart, DartState};
use super::event_log::{EventKind, EventLog};
use super::events::{self, EventQueue};
use super::feedback::FeedbackSink;
use super::hand::{Hand, HandSample};
use super::locatable::Locatable;
use super::params::Params;
use super::surface::Raycaster;
use super::target::Target;

/// The complete range state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Range {
    /// All darts, in spawn order.
    pub darts: Vec<Dart>,
    /// All targets.
    pub targets: Vec<Target>,
    /// Tracked hands.
    pub hands: Vec<Hand>,
    /// Total simulation time elapsed.
    pub time: f32,
    /// Accumulated score across all sticks.
    pub total_score: i32,
    /// Recent events for the demo overlay.
    pub log: EventLog,
    next_dart_id: usize,
}

impl Default for Range {
    fn default() -> Self {
        Self::new()
    }
}

impl Range {
    /// Creates an empty range.
    pub fn new() -> Self {
        Self {
            darts: Vec::new(),
            targets: Vec::new(),
            hands: Vec::new(),
            time: 0.0,
            total_score: 0,
            log: EventLog::default(),
            next_dart_id: 0,
        }
    }

    /// Spawns a new free dart and returns its id.
    ///
    /// The collider identity defaults to the dart id; callers modelling
    /// multiple colliders per dart can adjust the spawned dart afterwards.
    pub fn spawn_dart(&mut self, pos: Vec3, rot: Quat) -> usize {
        let id = self.next_dart_id;
        self.next_dart_id += 1;
        self.darts.push(Dart::new(id, id, pos, rot));
        id
    }

    /// Looks up a dart by id.
    pub fn dart(&self, dart_id: usize) -> Option<&Dart> {
        self.darts.iter().find(|d| d.id == dart_id)
    }

    /// Looks up a dart by id, mutably.
    pub fn dart_mut(&mut self, dart_id: usize) -> Option<&mut Dart> {
        self.darts.iter_mut().find(|d| d.id == dart_id)
    }

    /// Looks up a target by id.
    pub fn target(&self, target_id: usize) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == target_id)
    }

    /// Records the latest tracking sample for a hand, creating the hand on
    /// first sight.
    pub fn set_hand_sample(&mut self, hand_id: usize, sample: HandSample) {
        match self.hands.iter_mut().find(|h| h.id == hand_id) {
            Some(hand) => hand.sample = sample,
            None => {
                let mut hand = Hand::new(hand_id);
                hand.sample = sample;
                self.hands.push(hand);
            }
        }
    }

    /// Grabs a dart with a hand. Silent no-op if either is missing or the
    /// dart is already stuck.
    pub fn grab(&mut self, dart_id: usize, hand_id: usize) {
        let now = self.time;
        let Some(sample) = self.hands.iter().find(|h| h.id == hand_id).map(|h| h.sample) else {
            return;
        };
        let Some(dart) = self.darts.iter_mut().find(|d| d.id == dart_id) else {
            return;
        };
        if dart.is_stuck() {
            return;
        }

        dart.grab(hand_id, &sample);
        self.log.log(
            now,
            format!("dart {dart_id} grabbed by hand {hand_id}"),
            EventKind::Grab,
        );
    }

    /// Pick-up entry point for the input layer. Same semantics as `grab`.
    pub fn pick_up(&mut self, dart_id: usize, hand_id: usize) {
        self.grab(dart_id, hand_id);
    }

    /// Releases a held dart, applying the throw velocity. Silent no-op if
    /// the dart is missing or not held.
    pub fn release(&mut self, dart_id: usize, params: &Params) {
        let now = self.time;
        let Some(dart) = self.darts.iter_mut().find(|d| d.id == dart_id) else {
            return;
        };
        if !dart.is_held() {
            return;
        }

        dart.release(params, now);
        let speed = dart.velocity.length();
        self.log.log(
            now,
            format!("dart {dart_id} thrown at {speed:.1} u/s"),
            EventKind::Throw,
        );
    }

    /// Releases whatever dart a hand is holding, if any.
    pub fn release_hand(&mut self, hand_id: usize, params: &Params) {
        let held = self
            .darts
            .iter()
            .find(|d| d.state() == DartState::Held { hand: hand_id })
            .map(|d| d.id);
        if let Some(dart_id) = held {
            self.release(dart_id, params);
        }
    }

    /// Advances the range by one frame.
    ///
    /// `queue` carries this frame's events from the physics and tracking
    /// services; `raycaster` is the collision service used for surface
    /// normal refinement.
    pub fn step(
        &mut self,
        params: &Params,
        dt: f32,
        raycaster: &impl Raycaster,
        feedback: &mut impl FeedbackSink,
        queue: EventQueue,
    ) {
        self.time += dt;

        // Held darts follow their hands before any collision resolution.
        for dart in &mut self.darts {
            if let DartState::Held { hand } = dart.state() {
                if let Some(sample) = self.hands.iter().find(|h| h.id == hand).map(|h| h.sample) {
                    dart.update_held(&sample, dt, params);
                }
            }
        }

        events::apply_events(self, params, queue, raycaster, feedback);

        for dart in &mut self.darts {
            dart.update(dt);
            dart.align_to_velocity(params);
        }

        for target in &mut self.targets {
            target.update(dt);
        }
    }

    /// Destroys every dart stuck in a target and empties its tracking map.
    /// Used at round/session reset; previously-used collider identities are
    /// accepted again afterwards.
    pub fn clear_darts(&mut self, target_id: usize) {
        let now = self.time;
        let Some(target) = self.targets.iter_mut().find(|t| t.id == target_id) else {
            return;
        };

        let removed = target.clear_darts();
        if removed.is_empty() {
            return;
        }

        self.darts.retain(|d| !removed.contains(&d.id));
        self.log.log(
            now,
            format!("target {target_id} cleared {} darts", removed.len()),
            EventKind::Reset,
        );
    }

    /// Saves the range state to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads a range state from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let range = serde_json::from_str(&json)?;
        Ok(range)
    }
}

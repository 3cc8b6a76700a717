//! Simulation state passed to every tick
//!
//! Owns the strikers, the board, the tunables and any collision events
//! produced since the caller last drained them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::remote::Remote;
use crate::settings::Settings;

/// Two strikers bumped into each other
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemoteCollisionEvent {
    pub remote0: u32,
    /// Momentum change of `remote0` (kg·m/s)
    pub impulse0: Vec2,
    pub remote1: u32,
    /// Momentum change of `remote1` (kg·m/s)
    pub impulse1: Vec2,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub settings: Settings,
    pub board: Board,
    /// Strikers in spawn order. The first two collide with each other.
    pub remotes: Vec<Remote>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Collision events not yet drained
    #[serde(skip)]
    events: Vec<RemoteCollisionEvent>,
    next_id: u32,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SimState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            board: Board::default(),
            remotes: Vec::new(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a striker at rest and return its ID
    pub fn spawn_remote(&mut self, position: Vec2, heading: f32) -> u32 {
        let id = self.next_entity_id();
        self.remotes.push(Remote::new(id, position, heading));
        id
    }

    /// Spawn `count` strikers at seeded random spots on the board, each with
    /// a random target
    pub fn scatter(&mut self, seed: u64, count: usize) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (min, max) = (self.board.min, self.board.max);
        let random_point = |rng: &mut Pcg32| {
            Vec2::new(rng.random_range(min.x..=max.x), rng.random_range(min.y..=max.y))
        };
        for _ in 0..count {
            let position = random_point(&mut rng);
            let heading = rng.random_range(-std::f32::consts::PI..std::f32::consts::PI);
            let target = random_point(&mut rng);
            let id = self.spawn_remote(position, heading);
            self.set_target(id, Some(target));
        }
    }

    pub fn remote(&self, id: u32) -> Option<&Remote> {
        self.remotes.iter().find(|r| r.id == id)
    }

    pub fn remote_mut(&mut self, id: u32) -> Option<&mut Remote> {
        self.remotes.iter_mut().find(|r| r.id == id)
    }

    /// Point a striker at a target (or clear it). Unknown IDs are ignored.
    pub fn set_target(&mut self, id: u32, target: Option<Vec2>) {
        if let Some(remote) = self.remote_mut(id) {
            remote.target = target;
        }
    }

    pub(crate) fn push_event(&mut self, event: RemoteCollisionEvent) {
        log::info!(
            "Remote collision {} <-> {}: impulse {:?} / {:?}",
            event.remote0,
            event.remote1,
            event.impulse0,
            event.impulse1
        );
        self.events.push(event);
    }

    pub fn pending_events(&self) -> &[RemoteCollisionEvent] {
        &self.events
    }

    /// Take every collision event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<RemoteCollisionEvent> {
        std::mem::take(&mut self.events)
    }
}

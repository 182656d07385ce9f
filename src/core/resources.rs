//! Core domain: shared resources for run configuration and randomness.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Per-run configuration supplied by the host before the first level loads.
#[derive(Resource, Debug)]
pub struct RunConfig {
    /// Seed for [`CombatRng`]. Identical seeds replay identical crits,
    /// wander points, path samples and spawn placements.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Deterministic random source shared by every combat system.
#[derive(Resource, Debug)]
pub struct CombatRng(pub ChaCha8Rng);

impl CombatRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl FromWorld for CombatRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<RunConfig>().map_or(0, |config| config.seed);
        Self::from_seed(seed)
    }
}

/// How the current level ended, if it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Cleared,
    Defeated,
}

/// The level currently being fought. Absent between levels.
#[derive(Resource, Debug, Clone)]
pub struct ActiveLevel {
    pub number: u32,
    /// Hostiles spawned for this level, split minions included.
    pub hostiles_spawned: u32,
    pub outcome: Option<LevelOutcome>,
}

impl ActiveLevel {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            hostiles_spawned: 0,
            outcome: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Run condition: the simulation advances until the level has an outcome.
/// With no level loaded the host drives entities directly, so it stays active.
pub fn encounter_active(level: Option<Res<ActiveLevel>>) -> bool {
    level.is_none_or(|level| !level.is_finished())
}

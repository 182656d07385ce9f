//! Level domain: level-scoped entity ownership and level outcome.

mod events;
mod systems;
#[cfg(test)]
mod tests;

pub use events::{LevelClearedEvent, LoadLevelRequest, TeardownLevelRequest};

use bevy::prelude::*;

use crate::core::CombatSet;
use crate::level::systems::{detect_level_cleared, handle_level_requests};

/// Marker for entities owned by the current level. Removed on teardown.
#[derive(Component, Debug, Default)]
pub struct LevelEntity;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LoadLevelRequest>()
            .add_message::<TeardownLevelRequest>()
            .add_message::<LevelClearedEvent>()
            .add_systems(
                Update,
                (
                    handle_level_requests.in_set(CombatSet::Level),
                    detect_level_cleared.in_set(CombatSet::Outcome),
                ),
            );
    }
}

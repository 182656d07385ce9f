//! Core domain: run configuration, shared randomness and tick ordering.

mod resources;

pub use resources::{ActiveLevel, CombatRng, LevelOutcome, RunConfig, encounter_active};

use bevy::prelude::*;

/// Per-tick ordering of the combat core. Chained in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Level load and teardown requests.
    Level,
    /// Clone lifetimes and fade. Runs after the encounter ends too.
    Expiry,
    /// Deadlines: cooldowns and boss phase windows.
    Timers,
    /// AI and player actions. Only ever request damage.
    Intent,
    /// Damage, heals and knockback.
    Resolve,
    /// Deaths, splits and loot.
    Lifecycle,
    /// Level cleared detection, after split minions exist.
    Outcome,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunConfig>()
            .init_resource::<CombatRng>()
            .configure_sets(
                Update,
                (
                    CombatSet::Level,
                    CombatSet::Expiry,
                    CombatSet::Timers.run_if(encounter_active),
                    CombatSet::Intent.run_if(encounter_active),
                    CombatSet::Resolve,
                    CombatSet::Lifecycle,
                    CombatSet::Outcome,
                )
                    .chain(),
            );
    }
}

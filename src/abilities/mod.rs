//! Abilities domain: cooldown-gated player abilities.

mod cooldowns;
mod systems;

pub use cooldowns::{AbilityCooldowns, AbilityKind, AbilityRequest};

use bevy::prelude::*;

use crate::abilities::systems::{handle_ability_requests, tick_ability_cooldowns};
use crate::core::CombatSet;

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AbilityRequest>().add_systems(
            Update,
            (
                tick_ability_cooldowns.in_set(CombatSet::Timers),
                handle_ability_requests.in_set(CombatSet::Intent),
            ),
        );
    }
}

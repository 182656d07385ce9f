//! Real-time combat and creature AI for a 3D arena action game.
//!
//! Add [`ArenaCombatPlugins`] to an app that already provides `Time`, spawn
//! the player with [`combat::spawn_player`], then drive everything through
//! messages: [`level::LoadLevelRequest`], [`combat::PlayerAttackRequest`]
//! and [`abilities::AbilityRequest`] in; damage numbers, deaths, spawns,
//! phase changes and loot requests out.

pub mod abilities;
pub mod collision;
pub mod combat;
pub mod content;
pub mod core;
pub mod level;
pub mod navigation;

#[cfg(test)]
pub(crate) mod testing;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

/// Every combat-core plugin, in dependency order.
pub struct ArenaCombatPlugins;

impl PluginGroup for ArenaCombatPlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(core::CorePlugin)
            .add(content::ContentPlugin::default())
            .add(collision::CollisionPlugin)
            .add(combat::CombatPlugin)
            .add(abilities::AbilitiesPlugin)
            .add(level::LevelPlugin)
    }
}

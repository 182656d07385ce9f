//! Combat domain: combatants, damage resolution and entity AI.

pub mod ai;
mod components;
mod events;
mod resolver;
mod spawn;
mod systems;

pub use ai::{
    Boss, BossKind, BossPhase, Creature, CreatureProfile, CreatureState, SummonedClone,
};
pub use components::{
    CombatStats, Enemy, Equipment, EquipmentSlot, Facing, Health, HealthChange, ItemStats,
    Opacity, Player,
};
pub use events::{
    BossPhaseChangeEvent, BossSplitEvent, DamageKind, DamageNumberEvent, DamageRequest,
    DeathEvent, EntityExpiredEvent, EntitySpawnedEvent, KnockbackEvent, LootDropRequestedEvent,
    PlayerAttackRequest, PlayerDefeatedEvent, SpawnKind,
};
pub use resolver::{
    DamageRoll, apply_lifesteal, apply_magic_resist, crossed_threshold, find_targets_in_cone,
    in_cone, phase_capped_damage, resolve_damage, roll_critical,
};
pub use spawn::{
    random_spawn_position, ring_positions, spawn_boss, spawn_clone, spawn_creature, spawn_player,
};

use bevy::prelude::*;

use crate::combat::ai::{
    expire_clones, update_boss_flash, update_boss_phases, update_clone_ai, update_creature_ai,
};
use crate::combat::systems::{
    apply_damage, apply_knockback, process_deaths, process_player_attacks, refresh_combat_stats,
};
use crate::core::CombatSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageRequest>()
            .add_message::<DamageNumberEvent>()
            .add_message::<DeathEvent>()
            .add_message::<EntitySpawnedEvent>()
            .add_message::<EntityExpiredEvent>()
            .add_message::<BossPhaseChangeEvent>()
            .add_message::<BossSplitEvent>()
            .add_message::<LootDropRequestedEvent>()
            .add_message::<KnockbackEvent>()
            .add_message::<PlayerAttackRequest>()
            .add_message::<PlayerDefeatedEvent>()
            .add_systems(
                Update,
                (
                    expire_clones.in_set(CombatSet::Expiry),
                    // Phase deadlines are read before any other boss effect this tick.
                    (update_boss_phases, update_boss_flash, refresh_combat_stats)
                        .chain()
                        .in_set(CombatSet::Timers),
                    (process_player_attacks, update_creature_ai, update_clone_ai)
                        .chain()
                        .in_set(CombatSet::Intent),
                    (apply_damage, apply_knockback)
                        .chain()
                        .in_set(CombatSet::Resolve),
                    process_deaths.in_set(CombatSet::Lifecycle),
                ),
            );
    }
}

//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::ai::BossPhase;

/// Where a damage request came from. Decides which modifiers apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    Melee,
    Explosion,
    /// Capped against full bosses above their phase threshold.
    AreaStrike,
}

/// A hit waiting to be applied in the resolve step.
#[derive(Debug, Clone)]
pub struct DamageRequest {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub is_critical: bool,
    /// Flat heal granted to `source` when the hit lands.
    pub lifesteal: f32,
    pub kind: DamageKind,
}

impl Message for DamageRequest {}

/// Floating-number feed for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageNumberEvent {
    pub target: Entity,
    pub amount: f32,
    pub is_critical: bool,
    pub is_heal: bool,
}

impl Message for DamageNumberEvent {}

#[derive(Debug, Clone)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Creature,
    Boss,
    MinionBoss,
    Clone,
}

#[derive(Debug, Clone)]
pub struct EntitySpawnedEvent {
    pub entity: Entity,
    pub kind: SpawnKind,
}

impl Message for EntitySpawnedEvent {}

/// A summoned clone reached the end of its lifetime and was removed.
#[derive(Debug, Clone)]
pub struct EntityExpiredEvent {
    pub entity: Entity,
}

impl Message for EntityExpiredEvent {}

#[derive(Debug, Clone)]
pub struct BossPhaseChangeEvent {
    pub boss: Entity,
    pub phase: BossPhase,
}

impl Message for BossPhaseChangeEvent {}

#[derive(Debug, Clone)]
pub struct BossSplitEvent {
    pub boss: Entity,
    pub position: Vec3,
    pub minions: Vec<Entity>,
}

impl Message for BossSplitEvent {}

/// Ask the host to generate and drop equipment for `level`.
#[derive(Debug, Clone)]
pub struct LootDropRequestedEvent {
    pub level: u32,
}

impl Message for LootDropRequestedEvent {}

/// Explosion knockback. The core applies `displacement` to the target's
/// position; `upward_velocity` is for the host's physics to pick up.
#[derive(Debug, Clone)]
pub struct KnockbackEvent {
    pub source: Entity,
    pub target: Entity,
    pub displacement: Vec3,
    pub upward_velocity: f32,
}

impl Message for KnockbackEvent {}

/// Player swings their basic attack along their current facing.
#[derive(Debug, Clone, Default)]
pub struct PlayerAttackRequest;

impl Message for PlayerAttackRequest {}

#[derive(Debug, Clone)]
pub struct PlayerDefeatedEvent {
    pub player: Entity,
}

impl Message for PlayerDefeatedEvent {}

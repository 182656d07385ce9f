//! Combat domain: player, creature, boss and clone spawning helpers.

use std::f32::consts::TAU;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::abilities::AbilityCooldowns;
use crate::collision::CollisionOracle;
use crate::combat::ai::{Boss, BossKind, Creature, CreatureProfile, SummonedClone};
use crate::combat::components::{Enemy, Equipment, Facing, Health, Opacity, Player};
use crate::content::{CloneConfig, CombatConfig, LevelConfig, secs};
use crate::level::LevelEntity;

/// Spawn the player. The player outlives levels, so it is not level-scoped.
pub fn spawn_player(commands: &mut Commands, position: Vec3, config: &CombatConfig) -> Entity {
    let equipment = Equipment::default();
    let stats = equipment.combat_stats(config.player.base_lifesteal);
    commands
        .spawn((
            Player,
            Transform::from_translation(position),
            Facing::default(),
            Health::new(config.player.max_health),
            stats,
            equipment,
            AbilityCooldowns::default(),
        ))
        .id()
}

pub fn spawn_creature(commands: &mut Commands, position: Vec3, config: &CombatConfig) -> Entity {
    commands
        .spawn((
            Enemy,
            LevelEntity,
            Creature::new(position, CreatureProfile::from(&config.creature)),
            Transform::from_translation(position),
            Facing::default(),
            Health::new(config.creature.max_health),
        ))
        .id()
}

pub fn spawn_boss(
    commands: &mut Commands,
    kind: BossKind,
    level: u32,
    position: Vec3,
    config: &CombatConfig,
) -> Entity {
    let minion = kind == BossKind::Minion;
    let profile = CreatureProfile::for_boss(&config.creature, &config.boss, minion);
    let max_health = if minion {
        config.boss.minion_max_health
    } else {
        config.boss.max_health
    };

    commands
        .spawn((
            (Enemy, LevelEntity),
            Boss::new(kind, level, profile.move_speed, profile.attack_damage),
            Creature::new(position, profile),
            Transform::from_translation(position),
            Facing::default(),
            Health::new(max_health),
            Opacity::default(),
        ))
        .id()
}

pub fn spawn_clone(
    commands: &mut Commands,
    position: Vec3,
    now: Duration,
    config: &CloneConfig,
) -> Entity {
    commands
        .spawn((
            LevelEntity,
            SummonedClone::new(now, secs(config.lifetime)),
            Transform::from_translation(position),
            Facing::default(),
            Health::new(config.max_health),
            Opacity::default(),
        ))
        .id()
}

/// Evenly spaced points on a circle around `center`, starting on +X.
pub fn ring_positions(center: Vec3, count: u32, distance: f32) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            center + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
        })
        .collect()
}

/// Random valid position inside the level bounds, or the configured
/// fallback once every attempt lands inside an obstacle.
pub fn random_spawn_position<R: Rng + ?Sized>(
    oracle: &CollisionOracle,
    config: &LevelConfig,
    body_radius: f32,
    rng: &mut R,
) -> Vec3 {
    let extent = config.spawn_extent.max(0.0);
    for _ in 0..config.spawn_attempts {
        let candidate = Vec3::new(
            rng.random_range(-extent..=extent),
            config.spawn_height,
            rng.random_range(-extent..=extent),
        );
        if oracle.is_valid_position(candidate, body_radius) {
            return candidate;
        }
    }
    config.fallback_position()
}

//! Level domain: populate, tear down and watch for the level being cleared.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::abilities::AbilityCooldowns;
use crate::collision::CollisionOracle;
use crate::combat::{
    BossKind, Enemy, EntitySpawnedEvent, Health, Player, SpawnKind, random_spawn_position,
    spawn_boss, spawn_creature,
};
use crate::content::CombatConfig;
use crate::core::{ActiveLevel, CombatRng, LevelOutcome};
use crate::level::LevelEntity;
use crate::level::events::{LevelClearedEvent, LoadLevelRequest, TeardownLevelRequest};

/// Handle teardown and load requests. A load always tears the previous
/// level down first; if several loads arrive in one tick the last wins.
pub(crate) fn handle_level_requests(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut rng: ResMut<CombatRng>,
    mut oracle: ResMut<CollisionOracle>,
    mut teardown_requests: MessageReader<TeardownLevelRequest>,
    mut load_requests: MessageReader<LoadLevelRequest>,
    mut spawned_events: MessageWriter<EntitySpawnedEvent>,
    level_query: Query<Entity, With<LevelEntity>>,
    mut player_query: Query<(&mut Health, &mut AbilityCooldowns), With<Player>>,
) {
    let teardown = teardown_requests.read().count() > 0;
    let load = load_requests.read().last().cloned();
    if !teardown && load.is_none() {
        return;
    }

    // Deadlines live on the entities themselves, so despawning them drops
    // every pending timer in the same flush.
    let removed = level_query.iter().count();
    for entity in &level_query {
        commands.entity(entity).despawn();
    }
    oracle.clear();
    commands.remove_resource::<ActiveLevel>();

    let Some(request) = load else {
        info!("Level torn down ({removed} entities removed)");
        return;
    };

    oracle.rebuild(request.obstacles);
    let mut level = ActiveLevel::new(request.number);
    let radius = config.creature.body_radius;

    for _ in 0..config.level.creature_count {
        let position = random_spawn_position(&oracle, &config.level, radius, &mut rng.0);
        let entity = spawn_creature(&mut commands, position, &config);
        spawned_events.write(EntitySpawnedEvent {
            entity,
            kind: SpawnKind::Creature,
        });
        level.hostiles_spawned += 1;
    }

    let position = random_spawn_position(&oracle, &config.level, radius, &mut rng.0);
    let boss = spawn_boss(&mut commands, BossKind::Full, request.number, position, &config);
    spawned_events.write(EntitySpawnedEvent {
        entity: boss,
        kind: SpawnKind::Boss,
    });
    level.hostiles_spawned += 1;

    for (mut health, mut cooldowns) in &mut player_query {
        health.restore();
        cooldowns.reset();
    }

    info!(
        "Level {} loaded: {} hostiles, {} obstacles",
        level.number,
        level.hostiles_spawned,
        oracle.obstacles().len()
    );
    commands.insert_resource(level);
}

pub(crate) fn detect_level_cleared(
    level: Option<ResMut<ActiveLevel>>,
    enemy_query: Query<&Health, With<Enemy>>,
    mut cleared_events: MessageWriter<LevelClearedEvent>,
) {
    let Some(mut level) = level else {
        return;
    };
    // Skip if an outcome is already recorded
    if level.is_finished() || level.hostiles_spawned == 0 {
        return;
    }
    if enemy_query.iter().any(Health::is_alive) {
        return;
    }

    level.outcome = Some(LevelOutcome::Cleared);
    info!("Level {} cleared - all hostiles defeated", level.number);
    cleared_events.write(LevelClearedEvent {
        level: level.number,
    });
}

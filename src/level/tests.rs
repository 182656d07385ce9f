use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::abilities::{AbilityCooldowns, AbilityKind, AbilityRequest};
use crate::collision::{CollisionOracle, obstacle_from_corners};
use crate::combat::{
    Boss, BossKind, DamageKind, DamageRequest, Enemy, EntityExpiredEvent, EntitySpawnedEvent,
    Health, Opacity, PlayerDefeatedEvent, SpawnKind, SummonedClone, random_spawn_position,
    spawn_clone, spawn_player,
};
use crate::content::{CombatConfig, LevelConfig};
use crate::core::{ActiveLevel, LevelOutcome};
use crate::testing::{
    FRAME, capture, captured, run_for, send, spawn_with, step, test_app, test_app_with,
};

fn obstacles() -> Vec<bevy::math::bounding::Aabb3d> {
    vec![
        obstacle_from_corners(Vec3::new(-2.0, 0.0, 8.0), Vec3::new(2.0, 3.0, 10.0)),
        obstacle_from_corners(Vec3::new(12.0, 0.0, -4.0), Vec3::new(14.0, 3.0, 4.0)),
    ]
}

fn load(number: u32) -> LoadLevelRequest {
    LoadLevelRequest {
        number,
        obstacles: obstacles(),
    }
}

fn enemies(app: &mut App) -> Vec<(Entity, Vec3)> {
    app.world_mut()
        .query_filtered::<(Entity, &Transform), With<Enemy>>()
        .iter(app.world())
        .map(|(entity, transform)| (entity, transform.translation))
        .collect()
}

fn clone_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&SummonedClone>()
        .iter(app.world())
        .count()
}

fn spawn_test_player(app: &mut App) -> Entity {
    spawn_with(app, |commands, config| {
        spawn_player(commands, Vec3::new(0.0, 0.5, 0.0), config)
    })
}

fn kill_all(app: &mut App, source: Entity) {
    for (target, _) in enemies(app) {
        send(
            app,
            DamageRequest {
                source,
                target,
                amount: 10_000.0,
                is_critical: false,
                lifesteal: 0.0,
                kind: DamageKind::Melee,
            },
        );
    }
}

// -----------------------------------------------------------------------------
// Loading
// -----------------------------------------------------------------------------

#[test]
fn test_load_spawns_creatures_and_boss_at_valid_positions() {
    let mut app = test_app();
    capture::<EntitySpawnedEvent>(&mut app);
    spawn_test_player(&mut app);

    send(&mut app, load(2));
    step(&mut app, FRAME);

    let level = app.world().resource::<ActiveLevel>();
    assert_eq!(level.number, 2);
    assert_eq!(level.hostiles_spawned, 6);
    assert_eq!(level.outcome, None);

    let spawned = captured::<EntitySpawnedEvent>(&app);
    assert_eq!(
        spawned
            .iter()
            .filter(|event| event.kind == SpawnKind::Creature)
            .count(),
        5
    );
    assert_eq!(
        spawned
            .iter()
            .filter(|event| event.kind == SpawnKind::Boss)
            .count(),
        1
    );

    let bosses: Vec<&Boss> = app
        .world_mut()
        .query::<&Boss>()
        .iter(app.world())
        .collect();
    assert_eq!(bosses.len(), 1);
    assert_eq!(bosses[0].kind, BossKind::Full);
    assert_eq!(bosses[0].level, 2);

    let found = enemies(&mut app);
    assert_eq!(found.len(), 6);
    let oracle = app.world().resource::<CollisionOracle>();
    assert_eq!(oracle.obstacles().len(), 2);
    for (entity, position) in found {
        assert!(
            oracle.is_valid_position(position, 0.6),
            "{entity} spawned inside an obstacle at {position:?}"
        );
    }
}

#[test]
fn test_load_restores_player_and_resets_cooldowns() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);
    {
        let mut entity = app.world_mut().entity_mut(player);
        entity.get_mut::<Health>().unwrap().take_damage(100.0);
        entity
            .get_mut::<AbilityCooldowns>()
            .unwrap()
            .start(AbilityKind::SummonAllies, Duration::from_secs(30));
    }

    send(&mut app, load(1));
    step(&mut app, FRAME);

    let health = app.world().get::<Health>(player).unwrap();
    assert!(health.is_alive());
    assert_eq!(health.current, 100.0);
    assert!(
        app.world()
            .get::<AbilityCooldowns>(player)
            .unwrap()
            .is_ready(AbilityKind::SummonAllies)
    );
}

#[test]
fn test_reload_replaces_previous_level() {
    let mut app = test_app();
    spawn_test_player(&mut app);

    send(&mut app, load(1));
    step(&mut app, FRAME);
    let first: Vec<Entity> = enemies(&mut app).into_iter().map(|(e, _)| e).collect();

    send(&mut app, load(2));
    step(&mut app, FRAME);
    let second: Vec<Entity> = enemies(&mut app).into_iter().map(|(e, _)| e).collect();

    assert_eq!(second.len(), 6);
    assert!(first.iter().all(|entity| !second.contains(entity)));
    assert_eq!(app.world().resource::<ActiveLevel>().number, 2);
}

#[test]
fn test_last_load_in_a_tick_wins() {
    let mut app = test_app();
    send(&mut app, load(1));
    send(&mut app, load(4));
    step(&mut app, FRAME);

    assert_eq!(enemies(&mut app).len(), 6);
    assert_eq!(app.world().resource::<ActiveLevel>().number, 4);
}

// -----------------------------------------------------------------------------
// Teardown
// -----------------------------------------------------------------------------

#[test]
fn test_teardown_removes_level_entities_but_keeps_player() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);
    send(&mut app, load(1));
    step(&mut app, FRAME);
    let clone = spawn_with(&mut app, |commands, config| {
        spawn_clone(
            commands,
            Vec3::new(1.0, 0.5, 0.0),
            Duration::ZERO,
            &config.clone,
        )
    });

    send(&mut app, TeardownLevelRequest);
    step(&mut app, FRAME);

    assert!(enemies(&mut app).is_empty());
    assert!(app.world().get::<SummonedClone>(clone).is_none());
    assert!(app.world().get::<Health>(player).is_some());
    assert!(app.world().get_resource::<ActiveLevel>().is_none());
    assert!(
        app.world()
            .resource::<CollisionOracle>()
            .obstacles()
            .is_empty()
    );
}

#[test]
fn test_teardown_with_nothing_loaded_is_harmless() {
    let mut app = test_app();
    send(&mut app, TeardownLevelRequest);
    step(&mut app, FRAME);
    assert!(app.world().get_resource::<ActiveLevel>().is_none());
}

// -----------------------------------------------------------------------------
// Outcome
// -----------------------------------------------------------------------------

#[test]
fn test_level_cleared_after_boss_minions_die() {
    let mut app = test_app();
    capture::<LevelClearedEvent>(&mut app);
    let player = spawn_test_player(&mut app);
    send(&mut app, load(3));
    step(&mut app, FRAME);

    kill_all(&mut app, player);
    step(&mut app, FRAME);

    // The boss split, so its minions keep the level open.
    assert_eq!(enemies(&mut app).len(), 4);
    assert_eq!(app.world().resource::<ActiveLevel>().hostiles_spawned, 10);
    assert!(captured::<LevelClearedEvent>(&app).is_empty());

    kill_all(&mut app, player);
    step(&mut app, FRAME);
    run_for(&mut app, FRAME * 5);

    let cleared = captured::<LevelClearedEvent>(&app);
    assert_eq!(cleared.len(), 1);
    assert_eq!(cleared[0].level, 3);
    assert_eq!(
        app.world().resource::<ActiveLevel>().outcome,
        Some(LevelOutcome::Cleared)
    );
}

#[test]
fn test_player_defeat_freezes_encounter() {
    let mut app = test_app();
    capture::<PlayerDefeatedEvent>(&mut app);
    let player = spawn_test_player(&mut app);
    send(&mut app, load(1));
    step(&mut app, FRAME);

    let attacker = enemies(&mut app)[0].0;
    send(
        &mut app,
        DamageRequest {
            source: attacker,
            target: player,
            amount: 1000.0,
            is_critical: false,
            lifesteal: 0.0,
            kind: DamageKind::Melee,
        },
    );
    step(&mut app, FRAME);

    let defeated = captured::<PlayerDefeatedEvent>(&app);
    assert_eq!(defeated.len(), 1);
    assert_eq!(defeated[0].player, player);
    assert!(app.world().get::<Health>(player).is_some());
    assert_eq!(
        app.world().resource::<ActiveLevel>().outcome,
        Some(LevelOutcome::Defeated)
    );

    let before = enemies(&mut app);
    run_for(&mut app, FRAME * 10);
    assert_eq!(enemies(&mut app), before);
}

#[test]
fn test_clones_expire_after_level_is_cleared() {
    let mut config = CombatConfig::default();
    config.level.creature_count = 0;
    let mut app = test_app_with(config);
    capture::<EntityExpiredEvent>(&mut app);
    let player = spawn_test_player(&mut app);

    send(&mut app, load(1));
    send(
        &mut app,
        AbilityRequest {
            ability: AbilityKind::SummonAllies,
        },
    );
    step(&mut app, FRAME);
    assert_eq!(clone_count(&mut app), 5);

    kill_all(&mut app, player);
    step(&mut app, FRAME);
    kill_all(&mut app, player);
    step(&mut app, FRAME);
    assert_eq!(
        app.world().resource::<ActiveLevel>().outcome,
        Some(LevelOutcome::Cleared)
    );
    assert_eq!(clone_count(&mut app), 5);

    // Summoned at 16ms with a 20s lifetime; the encounter is frozen by now.
    run_for(&mut app, Duration::from_millis(18_500));
    let faded: Vec<f32> = app
        .world_mut()
        .query_filtered::<&Opacity, With<SummonedClone>>()
        .iter(app.world())
        .map(|opacity| opacity.0)
        .collect();
    assert_eq!(faded.len(), 5);
    assert!(faded.iter().all(|&opacity| opacity < 1.0));

    run_for(&mut app, Duration::from_millis(1_500));
    assert_eq!(clone_count(&mut app), 0);
    assert_eq!(captured::<EntityExpiredEvent>(&app).len(), 5);
}

// -----------------------------------------------------------------------------
// Spawn placement
// -----------------------------------------------------------------------------

#[test]
fn test_spawn_position_stays_inside_extent() {
    let oracle = CollisionOracle::new(obstacles(), 1.8);
    let config = LevelConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..50 {
        let position = random_spawn_position(&oracle, &config, 0.6, &mut rng);
        assert!(position.x.abs() <= config.spawn_extent);
        assert!(position.z.abs() <= config.spawn_extent);
        assert_eq!(position.y, config.spawn_height);
        assert!(oracle.is_valid_position(position, 0.6));
    }
}

#[test]
fn test_spawn_position_falls_back_when_blocked() {
    let oracle = CollisionOracle::new(
        vec![obstacle_from_corners(
            Vec3::new(-100.0, -1.0, -100.0),
            Vec3::new(100.0, 5.0, 100.0),
        )],
        1.8,
    );
    let config = LevelConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    assert_eq!(
        random_spawn_position(&oracle, &config, 0.6, &mut rng),
        Vec3::new(10.0, 0.5, 10.0)
    );
}

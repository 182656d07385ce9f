use std::time::Duration;

use arena_combat::ArenaCombatPlugins;
use arena_combat::abilities::{AbilityKind, AbilityRequest};
use arena_combat::collision::obstacle_from_corners;
use arena_combat::combat::{
    BossPhaseChangeEvent, BossSplitEvent, Enemy, Facing, Health, LootDropRequestedEvent, Player,
    PlayerAttackRequest, PlayerDefeatedEvent, spawn_player,
};
use arena_combat::content::CombatConfig;
use arena_combat::level::{LevelClearedEvent, LoadLevelRequest};
use bevy::app::ScheduleRunnerPlugin;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::log::LogPlugin;
use bevy::prelude::*;

/// Demo length before the app exits on its own.
const DEMO_DURATION: Duration = Duration::from_secs(120);
const PLAYER_SPEED: f32 = 4.0;

/// Headless scripted fight: the player walks at the nearest hostile,
/// swings whenever something is in reach and fires both abilities off
/// cooldown.
fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(ArenaCombatPlugins)
        .add_systems(Startup, setup_demo)
        .add_systems(Update, (drive_player, report_outcomes))
        .run();
}

fn setup_demo(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut load_requests: MessageWriter<LoadLevelRequest>,
) {
    spawn_player(&mut commands, Vec3::new(0.0, 0.5, 0.0), &config);
    load_requests.write(LoadLevelRequest {
        number: 1,
        obstacles: vec![
            obstacle_from_corners(Vec3::new(-8.0, 0.0, 6.0), Vec3::new(8.0, 4.0, 7.0)),
            obstacle_from_corners(Vec3::new(12.0, 0.0, -12.0), Vec3::new(14.0, 4.0, 12.0)),
            obstacle_from_corners(Vec3::new(-20.0, 0.0, -20.0), Vec3::new(-16.0, 6.0, -16.0)),
        ],
    });
}

fn drive_player(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut attacks: MessageWriter<PlayerAttackRequest>,
    mut abilities: MessageWriter<AbilityRequest>,
    mut player_query: Query<(&mut Transform, &mut Facing, &Health), With<Player>>,
    enemy_query: Query<(&Transform, &Health), (With<Enemy>, Without<Player>)>,
) {
    let Ok((mut transform, mut facing, health)) = player_query.single_mut() else {
        return;
    };
    if health.is_dead() {
        return;
    }

    let position = transform.translation;
    let Some(nearest) = enemy_query
        .iter()
        .filter(|(_, health)| health.is_alive())
        .map(|(enemy, _)| enemy.translation)
        .min_by(|a, b| a.distance(position).total_cmp(&b.distance(position)))
    else {
        return;
    };

    let offset = Vec3::new(nearest.x - position.x, 0.0, nearest.z - position.z);
    facing.face(offset);
    if offset.length() > config.player_attack.range * 0.8 {
        transform.translation += offset.normalize_or_zero() * PLAYER_SPEED * time.delta_secs();
        return;
    }

    attacks.write(PlayerAttackRequest);
    abilities.write(AbilityRequest {
        ability: AbilityKind::AreaStrike,
    });
    abilities.write(AbilityRequest {
        ability: AbilityKind::SummonAllies,
    });
}

fn report_outcomes(
    time: Res<Time>,
    mut phase_events: MessageReader<BossPhaseChangeEvent>,
    mut split_events: MessageReader<BossSplitEvent>,
    mut loot_events: MessageReader<LootDropRequestedEvent>,
    mut cleared_events: MessageReader<LevelClearedEvent>,
    mut defeated_events: MessageReader<PlayerDefeatedEvent>,
    mut exit: MessageWriter<AppExit>,
) {
    for event in phase_events.read() {
        info!("[demo] boss {} entered {:?}", event.boss, event.phase);
    }
    for event in split_events.read() {
        info!("[demo] boss split into {} minions", event.minions.len());
    }
    for event in loot_events.read() {
        info!("[demo] loot requested for level {}", event.level);
    }

    let finished = cleared_events.read().count() > 0 || defeated_events.read().count() > 0;
    if finished || time.elapsed() >= DEMO_DURATION {
        info!("[demo] finished after {:.1}s", time.elapsed_secs());
        exit.write(AppExit::Success);
    }
}

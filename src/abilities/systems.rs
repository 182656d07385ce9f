//! Abilities domain: cooldown ticking and activation.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::abilities::cooldowns::{AbilityCooldowns, AbilityKind, AbilityRequest};
use crate::combat::{
    DamageKind, DamageRequest, Enemy, EntitySpawnedEvent, Facing, Health, Player, SpawnKind,
    find_targets_in_cone, ring_positions, spawn_clone,
};
use crate::content::{CombatConfig, secs};

pub(crate) fn tick_ability_cooldowns(time: Res<Time>, mut query: Query<&mut AbilityCooldowns>) {
    let delta = time.delta();
    for mut cooldowns in &mut query {
        cooldowns.tick(delta);
    }
}

pub(crate) fn handle_ability_requests(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut ability_requests: MessageReader<AbilityRequest>,
    mut damage_requests: MessageWriter<DamageRequest>,
    mut spawned_events: MessageWriter<EntitySpawnedEvent>,
    mut player_query: Query<(Entity, &Transform, &Facing, &Health, &mut AbilityCooldowns), With<Player>>,
    enemy_query: Query<(Entity, &Transform, &Health), (With<Enemy>, Without<Player>)>,
) {
    let now = time.elapsed();
    let tuning = &config.abilities;

    for request in ability_requests.read() {
        let Ok((player, transform, facing, health, mut cooldowns)) = player_query.single_mut()
        else {
            warn!("{:?} requested with no single player entity", request.ability);
            continue;
        };
        if health.is_dead() {
            continue;
        }
        if !cooldowns.is_ready(request.ability) {
            debug!(
                "{:?} on cooldown for {}s",
                request.ability,
                cooldowns.remaining_whole_secs(request.ability)
            );
            continue;
        }

        let origin = transform.translation;
        match request.ability {
            AbilityKind::SummonAllies => {
                let clones = ring_positions(origin, config.clone.count, config.clone.spawn_distance);
                for position in clones {
                    let entity = spawn_clone(&mut commands, position, now, &config.clone);
                    spawned_events.write(EntitySpawnedEvent {
                        entity,
                        kind: SpawnKind::Clone,
                    });
                }
                cooldowns.start(AbilityKind::SummonAllies, secs(tuning.summon_cooldown));
                info!("Summoned {} clones", config.clone.count);
            }
            AbilityKind::AreaStrike => {
                let targets = find_targets_in_cone(
                    origin,
                    facing.direction(),
                    enemy_query
                        .iter()
                        .filter(|(_, _, health)| health.is_alive())
                        .map(|(entity, transform, _)| (entity, transform.translation)),
                    tuning.area_strike_range,
                    tuning.area_strike_half_angle_degrees.to_radians(),
                );
                info!("Area strike hit {} targets", targets.len());
                for target in targets {
                    damage_requests.write(DamageRequest {
                        source: player,
                        target,
                        amount: tuning.area_strike_damage,
                        is_critical: false,
                        lifesteal: 0.0,
                        kind: DamageKind::AreaStrike,
                    });
                }
                cooldowns.start(AbilityKind::AreaStrike, secs(tuning.area_strike_cooldown));
            }
        }
    }
}

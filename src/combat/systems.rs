//! Combat domain: player attacks, damage resolution and death handling.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::ai::{Boss, BossKind, BossPhase, SummonedClone};
use crate::combat::components::{CombatStats, Enemy, Equipment, Facing, Health, HealthChange, Player};
use crate::combat::events::{
    BossPhaseChangeEvent, BossSplitEvent, DamageKind, DamageNumberEvent, DamageRequest,
    DeathEvent, EntitySpawnedEvent, KnockbackEvent, LootDropRequestedEvent, PlayerAttackRequest,
    PlayerDefeatedEvent, SpawnKind,
};
use crate::combat::resolver::{
    apply_lifesteal, apply_magic_resist, find_targets_in_cone, phase_capped_damage,
    resolve_damage,
};
use crate::combat::spawn::{ring_positions, spawn_boss};
use crate::content::{CombatConfig, secs};
use crate::core::{ActiveLevel, CombatRng, LevelOutcome};

/// Keep derived stats in step with whatever the player is wearing.
pub(crate) fn refresh_combat_stats(
    config: Res<CombatConfig>,
    mut query: Query<(&Equipment, &mut CombatStats), Changed<Equipment>>,
) {
    for (equipment, mut stats) in &mut query {
        *stats = equipment.combat_stats(config.player.base_lifesteal);
    }
}

pub(crate) fn process_player_attacks(
    config: Res<CombatConfig>,
    mut rng: ResMut<CombatRng>,
    mut attack_requests: MessageReader<PlayerAttackRequest>,
    mut damage_requests: MessageWriter<DamageRequest>,
    player_query: Query<(Entity, &Transform, &Facing, &CombatStats, &Health), With<Player>>,
    enemy_query: Query<(Entity, &Transform, &Health), (With<Enemy>, Without<Player>)>,
) {
    let tuning = &config.player_attack;

    for _ in attack_requests.read() {
        let Ok((player, transform, facing, stats, health)) = player_query.single() else {
            warn!("Player attack requested with no single player entity");
            continue;
        };
        if health.is_dead() {
            continue;
        }

        let targets = find_targets_in_cone(
            transform.translation,
            facing.direction(),
            enemy_query
                .iter()
                .filter(|(_, _, health)| health.is_alive())
                .map(|(entity, transform, _)| (entity, transform.translation)),
            tuning.range,
            tuning.half_angle_degrees.to_radians(),
        );

        for target in targets {
            let roll = resolve_damage(tuning.base_damage, stats, &mut rng.0);
            damage_requests.write(DamageRequest {
                source: player,
                target,
                amount: roll.amount,
                is_critical: roll.is_critical,
                lifesteal: stats.lifesteal_flat,
                kind: DamageKind::Melee,
            });
        }
    }
}

pub(crate) fn apply_damage(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut damage_requests: MessageReader<DamageRequest>,
    mut damage_numbers: MessageWriter<DamageNumberEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut phase_events: MessageWriter<BossPhaseChangeEvent>,
    mut query: Query<(&mut Health, Option<&CombatStats>, Option<&mut Boss>)>,
) {
    let now = time.elapsed();
    let tuning = &config.boss;

    for request in damage_requests.read() {
        let Ok((mut health, stats, mut boss)) = query.get_mut(request.target) else {
            continue;
        };
        if health.is_dead() {
            debug!("Discarded damage to dead target {}", request.target);
            continue;
        }

        let shielded = boss.as_ref().is_some_and(|boss| boss.is_invincible(now));
        if shielded {
            debug!("Boss {} is invincible; hit discarded", request.target);
        } else {
            let mut amount = request.amount;
            if let Some(stats) = stats {
                amount = apply_magic_resist(amount, stats.magic_resist);
            }
            if request.kind == DamageKind::AreaStrike
                && boss.as_ref().is_some_and(|boss| boss.kind == BossKind::Full)
            {
                amount = phase_capped_damage(amount, &health, tuning.phase_threshold);
            }

            let before = health.current;
            let change = health.take_damage(amount);

            if let Some(boss) = boss.as_mut()
                && boss.try_begin_phase_transition(
                    before,
                    &health,
                    tuning.phase_threshold,
                    now,
                    secs(tuning.invincibility),
                )
            {
                info!(
                    "Boss {} crossed its phase threshold at {:.0}/{:.0}",
                    request.target, health.current, health.max
                );
                phase_events.write(BossPhaseChangeEvent {
                    boss: request.target,
                    phase: BossPhase::Invincible,
                });
            }

            match change {
                HealthChange::Ignored => {}
                HealthChange::Damaged(dealt) | HealthChange::Killed(dealt) => {
                    damage_numbers.write(DamageNumberEvent {
                        target: request.target,
                        amount: dealt,
                        is_critical: request.is_critical,
                        is_heal: false,
                    });
                }
            }
            if matches!(change, HealthChange::Killed(_)) {
                death_events.write(DeathEvent {
                    entity: request.target,
                });
            }
        }

        if request.lifesteal > 0.0
            && let Ok((mut attacker, _, _)) = query.get_mut(request.source)
        {
            let healed = apply_lifesteal(&mut attacker, request.lifesteal);
            if healed > 0.0 {
                damage_numbers.write(DamageNumberEvent {
                    target: request.source,
                    amount: healed,
                    is_critical: false,
                    is_heal: true,
                });
            }
        }
    }
}

pub(crate) fn apply_knockback(
    config: Res<CombatConfig>,
    mut knockback_events: MessageReader<KnockbackEvent>,
    mut query: Query<(&mut Transform, Has<Player>)>,
) {
    let min_height = config.boss.knockback_min_height;

    for event in knockback_events.read() {
        if let Ok((mut transform, is_player)) = query.get_mut(event.target) {
            transform.translation += event.displacement;
            // Only the player has a physics layer to bring it back down.
            if is_player {
                transform.translation.y = transform.translation.y.max(min_height);
            }

            debug!(
                "Knockback applied: displacement={:?}, final_position={:?}",
                event.displacement, transform.translation
            );
        }
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    config: Res<CombatConfig>,
    mut level: Option<ResMut<ActiveLevel>>,
    mut death_events: MessageReader<DeathEvent>,
    mut spawned_events: MessageWriter<EntitySpawnedEvent>,
    mut split_events: MessageWriter<BossSplitEvent>,
    mut loot_events: MessageWriter<LootDropRequestedEvent>,
    mut defeated_events: MessageWriter<PlayerDefeatedEvent>,
    query: Query<(&Transform, Option<&Boss>, Has<Player>, Has<SummonedClone>)>,
) {
    for event in death_events.read() {
        let entity = event.entity;
        let Ok((transform, boss, is_player, is_clone)) = query.get(entity) else {
            continue;
        };

        if is_player {
            info!("Player {entity} was defeated");
            if let Some(level) = level.as_deref_mut() {
                level.outcome = Some(LevelOutcome::Defeated);
            }
            defeated_events.write(PlayerDefeatedEvent { player: entity });
            continue;
        }

        if let Some(boss) = boss.filter(|boss| boss.is_full()) {
            match level.as_deref_mut() {
                Some(level) => {
                    let position = transform.translation;
                    let minions: Vec<Entity> = ring_positions(
                        position,
                        config.boss.minion_count,
                        config.boss.minion_spawn_distance,
                    )
                    .into_iter()
                    .map(|spot| {
                        let minion =
                            spawn_boss(&mut commands, BossKind::Minion, level.number, spot, &config);
                        spawned_events.write(EntitySpawnedEvent {
                            entity: minion,
                            kind: SpawnKind::MinionBoss,
                        });
                        minion
                    })
                    .collect();
                    level.hostiles_spawned += minions.len() as u32;

                    info!("Boss {entity} split into {} minions", minions.len());
                    split_events.write(BossSplitEvent {
                        boss: entity,
                        position,
                        minions,
                    });
                    loot_events.write(LootDropRequestedEvent { level: boss.level });
                }
                None => warn!("Boss {entity} died with no active level; split and loot skipped"),
            }
        } else if is_clone {
            debug!("Clone {entity} destroyed");
        }

        commands.entity(entity).despawn();
    }
}

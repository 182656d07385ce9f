//! Combat domain: wander / aggro / attack state machine shared by creatures
//! and bosses.

use std::f32::consts::TAU;
use std::time::Duration;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::collision::CollisionOracle;
use crate::combat::ai::clone::SummonedClone;
use crate::combat::components::{Enemy, Facing, Health, Player};
use crate::combat::events::{DamageKind, DamageRequest};
use crate::content::{BossConfig, CreatureConfig, secs};
use crate::core::CombatRng;

/// Where a creature is in its behaviour loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CreatureState {
    Wandering {
        destination: Vec3,
        retarget_at: Duration,
    },
    Aggroed {
        target: Entity,
    },
    /// Set on the tick a strike is issued. The next tick re-evaluates from
    /// `Aggroed`.
    Attacking {
        target: Entity,
        cooldown_until: Duration,
    },
}

impl CreatureState {
    pub fn target(&self) -> Option<Entity> {
        match *self {
            CreatureState::Wandering { .. } => None,
            CreatureState::Aggroed { target } | CreatureState::Attacking { target, .. } => {
                Some(target)
            }
        }
    }
}

/// Tuning that drives a single creature. Bosses mutate speed and damage when
/// they enrage.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatureProfile {
    pub move_speed: f32,
    pub attack_damage: f32,
    pub aggro_radius: f32,
    pub attack_radius: f32,
    pub attack_cooldown: Duration,
    pub wander_radius: f32,
    pub wander_interval: Duration,
    pub arrival_tolerance: f32,
    pub body_radius: f32,
}

impl From<&CreatureConfig> for CreatureProfile {
    fn from(config: &CreatureConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            attack_damage: config.attack_damage,
            aggro_radius: config.aggro_radius,
            attack_radius: config.attack_radius,
            attack_cooldown: secs(config.attack_cooldown),
            wander_radius: config.wander_radius,
            wander_interval: secs(config.wander_interval),
            arrival_tolerance: config.arrival_tolerance,
            body_radius: config.body_radius,
        }
    }
}

impl CreatureProfile {
    /// Creature defaults with the boss overrides for speed, damage and reach.
    pub fn for_boss(creature: &CreatureConfig, boss: &BossConfig, minion: bool) -> Self {
        let (move_speed, attack_damage) = if minion {
            (boss.minion_move_speed, boss.minion_attack_damage)
        } else {
            (boss.move_speed, boss.attack_damage)
        };
        Self {
            move_speed,
            attack_damage,
            attack_radius: boss.attack_radius,
            ..Self::from(creature)
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Creature {
    pub state: CreatureState,
    /// Spawn point wander destinations are drawn around.
    pub anchor: Vec3,
    pub profile: CreatureProfile,
    pub attack_ready_at: Duration,
}

impl Creature {
    /// A fresh creature with no destination; it picks one on its first tick.
    pub fn new(anchor: Vec3, profile: CreatureProfile) -> Self {
        Self {
            state: CreatureState::Wandering {
                destination: anchor,
                retarget_at: Duration::ZERO,
            },
            anchor,
            profile,
            attack_ready_at: Duration::ZERO,
        }
    }
}

/// Something a creature may pursue: the player or a summoned clone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Vec3,
}

/// What the creature wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CreatureAction {
    Idle,
    Move { direction: Vec3 },
    /// In reach but still on cooldown.
    Face { direction: Vec3 },
    Strike { target: Entity, direction: Vec3 },
}

fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Nearest candidate within `radius`. Ties keep the earlier candidate.
pub fn nearest_target(
    position: Vec3,
    candidates: &[TargetCandidate],
    radius: f32,
) -> Option<TargetCandidate> {
    candidates
        .iter()
        .map(|candidate| (candidate, position.distance(candidate.position)))
        .filter(|(_, distance)| *distance <= radius)
        .fold(None, |best: Option<(&TargetCandidate, f32)>, (candidate, distance)| {
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((candidate, distance)),
            }
        })
        .map(|(candidate, _)| *candidate)
}

/// Uniform point in the disc of `radius` around `anchor`, at height `y`.
pub fn random_wander_point<R: Rng + ?Sized>(anchor: Vec3, radius: f32, y: f32, rng: &mut R) -> Vec3 {
    let angle = rng.random_range(0.0..TAU);
    let distance = radius.max(0.0) * rng.random::<f32>().sqrt();
    Vec3::new(
        anchor.x + angle.cos() * distance,
        y,
        anchor.z + angle.sin() * distance,
    )
}

/// Advance the state machine one tick. `candidates` must only hold living
/// targets.
pub fn think<R: Rng + ?Sized>(
    creature: &mut Creature,
    position: Vec3,
    now: Duration,
    candidates: &[TargetCandidate],
    rng: &mut R,
) -> CreatureAction {
    let profile = &creature.profile;

    let Some(target) = nearest_target(position, candidates, profile.aggro_radius) else {
        return wander(creature, position, now, rng);
    };

    let to_target = target.position - position;
    let direction = planar(to_target).normalize_or_zero();
    let in_reach = to_target.length() <= profile.attack_radius;

    if in_reach && now >= creature.attack_ready_at {
        let cooldown_until = now + profile.attack_cooldown;
        creature.attack_ready_at = cooldown_until;
        creature.state = CreatureState::Attacking {
            target: target.entity,
            cooldown_until,
        };
        return CreatureAction::Strike {
            target: target.entity,
            direction,
        };
    }

    creature.state = CreatureState::Aggroed {
        target: target.entity,
    };
    if in_reach || direction == Vec3::ZERO {
        CreatureAction::Face { direction }
    } else {
        CreatureAction::Move { direction }
    }
}

fn wander<R: Rng + ?Sized>(
    creature: &mut Creature,
    position: Vec3,
    now: Duration,
    rng: &mut R,
) -> CreatureAction {
    let profile = creature.profile.clone();
    let (mut destination, mut retarget_at) = match creature.state {
        CreatureState::Wandering {
            destination,
            retarget_at,
        } => (destination, retarget_at),
        // Dropping out of a chase starts a fresh wander leg.
        _ => (position, Duration::ZERO),
    };

    if now >= retarget_at {
        destination = random_wander_point(creature.anchor, profile.wander_radius, position.y, rng);
        retarget_at = now + profile.wander_interval;
    } else if planar(destination - position).length() <= profile.arrival_tolerance {
        destination = random_wander_point(creature.anchor, profile.wander_radius, position.y, rng);
    }

    creature.state = CreatureState::Wandering {
        destination,
        retarget_at,
    };

    let direction = planar(destination - position).normalize_or_zero();
    if direction == Vec3::ZERO {
        CreatureAction::Idle
    } else {
        CreatureAction::Move { direction }
    }
}

pub(crate) fn update_creature_ai(
    time: Res<Time>,
    oracle: Res<CollisionOracle>,
    mut rng: ResMut<CombatRng>,
    mut damage_requests: MessageWriter<DamageRequest>,
    player_query: Query<(Entity, &Transform, &Health), (With<Player>, Without<Enemy>)>,
    clone_query: Query<(Entity, &Transform, &Health), (With<SummonedClone>, Without<Enemy>)>,
    mut creature_query: Query<
        (Entity, &mut Transform, &mut Facing, &mut Creature, &Health),
        With<Enemy>,
    >,
) {
    let now = time.elapsed();
    let dt = time.delta_secs();

    let candidates: Vec<TargetCandidate> = player_query
        .iter()
        .chain(clone_query.iter())
        .filter(|(_, _, health)| health.is_alive())
        .map(|(entity, transform, _)| TargetCandidate {
            entity,
            position: transform.translation,
        })
        .collect();

    for (entity, mut transform, mut facing, mut creature, health) in &mut creature_query {
        if health.is_dead() {
            continue;
        }

        let position = transform.translation;
        match think(&mut creature, position, now, &candidates, &mut rng.0) {
            CreatureAction::Idle => {}
            CreatureAction::Face { direction } => facing.face(direction),
            CreatureAction::Move { direction } => {
                facing.face(direction);
                let next = position + direction * creature.profile.move_speed * dt;
                if oracle.is_valid_position(next, creature.profile.body_radius) {
                    transform.translation = next;
                } else {
                    debug!("Creature {entity} blocked at {position:?}");
                }
            }
            CreatureAction::Strike { target, direction } => {
                facing.face(direction);
                damage_requests.write(DamageRequest {
                    source: entity,
                    target,
                    amount: creature.profile.attack_damage,
                    is_critical: false,
                    lifesteal: 0.0,
                    kind: DamageKind::Melee,
                });
            }
        }
    }
}

//! Combat domain: summoned clone pursuit, attacks and expiry.

use std::time::Duration;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::collision::CollisionOracle;
use crate::combat::ai::boss::Boss;
use crate::combat::components::{Enemy, Facing, Health, Opacity, Player};
use crate::combat::events::{DamageKind, DamageRequest, EntityExpiredEvent};
use crate::combat::resolver::in_cone;
use crate::content::{CloneConfig, CombatConfig, secs};
use crate::core::CombatRng;
use crate::navigation::{Path, PathParams, find_path};

/// A temporary ally fighting on the player's behalf.
#[derive(Component, Debug, Clone)]
pub struct SummonedClone {
    pub spawned_at: Duration,
    pub lifetime: Duration,
    pub target: Option<Entity>,
    pub attack_ready_at: Duration,
    pub path: Path,
    /// Goal the current path was computed for.
    pub path_goal: Option<Vec3>,
    pub last_path_at: Option<Duration>,
}

impl SummonedClone {
    pub fn new(spawned_at: Duration, lifetime: Duration) -> Self {
        Self {
            spawned_at,
            lifetime,
            target: None,
            attack_ready_at: spawned_at,
            path: Path::default(),
            path_goal: None,
            last_path_at: None,
        }
    }

    pub fn expires_at(&self) -> Duration {
        self.spawned_at + self.lifetime
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at()
    }

    /// Linear fade to zero over the final `fade` of the lifetime.
    pub fn opacity(&self, now: Duration, fade: Duration) -> f32 {
        let remaining = self.expires_at().saturating_sub(now);
        if fade.is_zero() || remaining >= fade {
            return 1.0;
        }
        (remaining.as_secs_f32() / fade.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn forget_path(&mut self) {
        self.path.clear();
        self.path_goal = None;
    }

    /// A new route is needed once the old one runs out, or once the goal has
    /// drifted and the repath interval has passed.
    pub fn needs_repath(&self, goal: Vec3, now: Duration, config: &CloneConfig) -> bool {
        if self.path.is_exhausted() {
            return true;
        }
        let Some(previous) = self.path_goal else {
            return true;
        };
        let drifted = previous.distance(goal) > config.repath_distance;
        let due = self
            .last_path_at
            .is_none_or(|at| now >= at + secs(config.repath_interval));
        drifted && due
    }
}

/// A hostile the clone may pick as its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileCandidate {
    pub entity: Entity,
    pub position: Vec3,
    pub is_boss: bool,
}

/// Nearest boss within `search_radius`, otherwise the nearest ordinary
/// creature within it.
pub fn select_clone_target(
    position: Vec3,
    candidates: &[HostileCandidate],
    search_radius: f32,
) -> Option<HostileCandidate> {
    let nearest = |want_boss: bool| {
        candidates
            .iter()
            .filter(|candidate| candidate.is_boss == want_boss)
            .map(|candidate| (candidate, position.distance(candidate.position)))
            .filter(|(_, distance)| *distance <= search_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| *candidate)
    };
    nearest(true).or_else(|| nearest(false))
}

fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

pub(crate) fn expire_clones(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut expired_events: MessageWriter<EntityExpiredEvent>,
    mut clone_query: Query<(Entity, &SummonedClone, &mut Opacity)>,
) {
    let now = time.elapsed();
    let fade = secs(config.clone.fade_duration);

    for (entity, clone, mut opacity) in &mut clone_query {
        if clone.is_expired(now) {
            debug!("Clone {entity} expired");
            expired_events.write(EntityExpiredEvent { entity });
            commands.entity(entity).despawn();
            continue;
        }

        let faded = clone.opacity(now, fade);
        if opacity.0 != faded {
            opacity.0 = faded;
        }
    }
}

pub(crate) fn update_clone_ai(
    time: Res<Time>,
    config: Res<CombatConfig>,
    oracle: Res<CollisionOracle>,
    mut rng: ResMut<CombatRng>,
    mut damage_requests: MessageWriter<DamageRequest>,
    player_query: Query<&Transform, (With<Player>, Without<SummonedClone>)>,
    hostile_query: Query<
        (Entity, &Transform, &Health, Has<Boss>),
        (With<Enemy>, Without<SummonedClone>),
    >,
    mut clone_query: Query<(Entity, &mut Transform, &mut Facing, &mut SummonedClone, &Health)>,
) {
    let now = time.elapsed();
    let dt = time.delta_secs();
    let tuning = &config.clone;
    let params = PathParams::from(&config.navigation);
    let half_angle = tuning.attack_half_angle_degrees.to_radians();
    let player_position = player_query.iter().next().map(|transform| transform.translation);

    let hostiles: Vec<HostileCandidate> = hostile_query
        .iter()
        .filter(|(_, _, health, _)| health.is_alive())
        .map(|(entity, transform, _, is_boss)| HostileCandidate {
            entity,
            position: transform.translation,
            is_boss,
        })
        .collect();

    for (entity, mut transform, mut facing, mut clone, health) in &mut clone_query {
        if health.is_dead() || clone.is_expired(now) {
            continue;
        }
        let position = transform.translation;

        let kept = clone
            .target
            .and_then(|target| hostiles.iter().find(|hostile| hostile.entity == target))
            .copied();
        let target = match kept {
            Some(hostile) => Some(hostile),
            None => {
                let picked = select_clone_target(position, &hostiles, tuning.search_radius);
                clone.target = picked.map(|hostile| hostile.entity);
                clone.forget_path();
                picked
            }
        };

        let goal = match (target, player_position) {
            (Some(hostile), _) => Some((hostile.position, tuning.engage_distance)),
            (None, Some(player)) => Some((player, tuning.follow_distance)),
            (None, None) => None,
        };

        if let Some((goal, stop_distance)) = goal
            && planar(goal - position).length() > stop_distance
        {
            if clone.needs_repath(goal, now, tuning) {
                let waypoints = find_path(&oracle, position, goal, &params, &mut rng.0);
                debug!("Clone {entity} repathed: {} waypoints", waypoints.len());
                clone.path = Path::new(waypoints);
                clone.path_goal = Some(goal);
                clone.last_path_at = Some(now);
            }

            // An empty or exhausted route falls back to walking straight at the goal.
            let next = clone
                .path
                .advance(position, tuning.waypoint_tolerance)
                .unwrap_or(goal);
            let to_next = planar(next - position);
            let direction = to_next.normalize_or_zero();
            if direction != Vec3::ZERO {
                facing.face(direction);
                let step = (tuning.move_speed * dt).min(to_next.length());
                let moved = position + direction * step;
                if oracle.is_valid_position(moved, params.body_radius) {
                    transform.translation = moved;
                }
            }
        }

        let Some(hostile) = target else {
            continue;
        };
        let origin = transform.translation;
        let to_target = hostile.position - origin;
        if to_target.length() > tuning.attack_range {
            continue;
        }
        facing.face(to_target);
        if now >= clone.attack_ready_at
            && in_cone(
                origin,
                facing.direction(),
                tuning.attack_range,
                half_angle,
                hostile.position,
            )
        {
            clone.attack_ready_at = now + secs(tuning.attack_cooldown);
            damage_requests.write(DamageRequest {
                source: entity,
                target: hostile.entity,
                amount: tuning.attack_damage,
                is_critical: false,
                lifesteal: 0.0,
                kind: DamageKind::Melee,
            });
        }
    }
}

//! Combat domain: boss phase layer on top of the creature state machine.

use std::time::Duration;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::ai::clone::SummonedClone;
use crate::combat::ai::creature::Creature;
use crate::combat::components::{Health, Opacity, Player};
use crate::combat::events::{BossPhaseChangeEvent, DamageKind, DamageRequest, KnockbackEvent};
use crate::combat::resolver::crossed_threshold;
use crate::content::{BossConfig, CombatConfig, secs};

/// Opacity shown on the dim half of the invincibility flash.
pub const FLASH_DIM_OPACITY: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossKind {
    /// Splits and drops loot on death.
    Full,
    Minion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    Normal,
    Invincible,
    Enraged,
}

#[derive(Component, Debug, Clone)]
pub struct Boss {
    pub kind: BossKind,
    /// Level the boss was spawned for; reported with its loot drop.
    pub level: u32,
    pub base_move_speed: f32,
    pub base_attack_damage: f32,
    phase_triggered: bool,
    invincible_since: Option<Duration>,
    invincible_until: Option<Duration>,
    enraged: bool,
}

impl Boss {
    pub fn new(kind: BossKind, level: u32, base_move_speed: f32, base_attack_damage: f32) -> Self {
        Self {
            kind,
            level,
            base_move_speed,
            base_attack_damage,
            phase_triggered: false,
            invincible_since: None,
            invincible_until: None,
            enraged: false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.kind == BossKind::Full
    }

    pub fn has_triggered_phase_transition(&self) -> bool {
        self.phase_triggered
    }

    pub fn is_invincible(&self, now: Duration) -> bool {
        match (self.invincible_since, self.invincible_until) {
            (Some(since), Some(until)) => now >= since && now < until,
            _ => false,
        }
    }

    pub fn is_enraged(&self) -> bool {
        self.enraged
    }

    pub fn invincible_until(&self) -> Option<Duration> {
        self.invincible_until
    }

    pub fn phase(&self, now: Duration) -> BossPhase {
        if self.enraged {
            BossPhase::Enraged
        } else if self.is_invincible(now) {
            BossPhase::Invincible
        } else {
            BossPhase::Normal
        }
    }

    /// Open the invincibility window if this hit is the first to cross the
    /// threshold. Only full bosses have a phase transition. Returns true when
    /// the window opened.
    pub fn try_begin_phase_transition(
        &mut self,
        health_before: f32,
        health: &Health,
        threshold: f32,
        now: Duration,
        window: Duration,
    ) -> bool {
        if !self.is_full() || self.phase_triggered {
            return false;
        }
        if !crossed_threshold(health_before, health.current, health.max, threshold) {
            return false;
        }
        self.phase_triggered = true;
        self.invincible_since = Some(now);
        self.invincible_until = Some(now + window);
        true
    }

    /// The invincibility window has run out and enrage has not fired yet.
    pub fn enrage_due(&self, now: Duration) -> bool {
        !self.enraged && self.invincible_until.is_some_and(|until| now >= until)
    }

    /// Flip to enraged. Returns false if already enraged.
    pub fn enrage(&mut self) -> bool {
        if self.enraged {
            return false;
        }
        self.enraged = true;
        true
    }

    /// Whether the flash is on its dim half. Toggles every `interval`,
    /// starting bright.
    pub fn flash_dimmed(&self, now: Duration, interval: Duration) -> bool {
        if !self.is_invincible(now) || interval.is_zero() {
            return false;
        }
        let Some(since) = self.invincible_since else {
            return false;
        };
        let toggles = now.saturating_sub(since).as_nanos() / interval.as_nanos();
        toggles % 2 == 1
    }
}

/// Position offset pushing `target` away from `boss`: the horizontal
/// direction tilted up by a fixed lift, renormalised and scaled to the
/// configured distance.
pub fn knockback_displacement(boss: Vec3, target: Vec3, config: &BossConfig) -> Vec3 {
    let horizontal = Vec3::new(target.x - boss.x, 0.0, target.z - boss.z).normalize_or_zero();
    Vec3::new(horizontal.x, config.knockback_lift, horizontal.z).normalize_or_zero()
        * config.knockback_distance
}

pub(crate) fn update_boss_phases(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut phase_events: MessageWriter<BossPhaseChangeEvent>,
    mut damage_requests: MessageWriter<DamageRequest>,
    mut knockback_events: MessageWriter<KnockbackEvent>,
    player_query: Query<(Entity, &Transform, &Health), (With<Player>, Without<Boss>)>,
    clone_query: Query<(Entity, &Transform, &Health), (With<SummonedClone>, Without<Boss>)>,
    mut boss_query: Query<(Entity, &mut Transform, &Health, &mut Boss, &mut Creature)>,
) {
    let now = time.elapsed();
    let tuning = &config.boss;

    for (entity, mut transform, health, mut boss, mut creature) in &mut boss_query {
        if health.is_dead() || !boss.enrage_due(now) || !boss.enrage() {
            continue;
        }

        creature.profile.move_speed = boss.base_move_speed * tuning.enrage_speed_multiplier;
        creature.profile.attack_damage = boss.base_attack_damage * tuning.enrage_damage_multiplier;
        transform.scale = Vec3::splat(tuning.enrage_scale);

        info!(
            "Boss {entity} enraged: speed {:.2}, damage {:.1}",
            creature.profile.move_speed, creature.profile.attack_damage
        );
        phase_events.write(BossPhaseChangeEvent {
            boss: entity,
            phase: BossPhase::Enraged,
        });

        let origin = transform.translation;
        for (target, target_transform, target_health) in player_query.iter().chain(clone_query.iter()) {
            if target_health.is_dead()
                || origin.distance(target_transform.translation) > tuning.explosion_radius
            {
                continue;
            }
            damage_requests.write(DamageRequest {
                source: entity,
                target,
                amount: tuning.explosion_damage,
                is_critical: false,
                lifesteal: 0.0,
                kind: DamageKind::Explosion,
            });
            knockback_events.write(KnockbackEvent {
                source: entity,
                target,
                displacement: knockback_displacement(origin, target_transform.translation, tuning),
                upward_velocity: tuning.knockback_upward_velocity,
            });
        }
    }
}

pub(crate) fn update_boss_flash(
    time: Res<Time>,
    config: Res<CombatConfig>,
    mut boss_query: Query<(&Boss, &mut Opacity)>,
) {
    let now = time.elapsed();
    let interval = secs(config.boss.flash_interval);

    for (boss, mut opacity) in &mut boss_query {
        let target = if boss.flash_dimmed(now, interval) {
            FLASH_DIM_OPACITY
        } else {
            1.0
        };
        if opacity.0 != target {
            opacity.0 = target;
        }
    }
}

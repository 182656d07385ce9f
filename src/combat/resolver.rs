//! Combat domain: hit detection and damage math.
//!
//! Everything here is a pure function over plain data so the same rules
//! serve the player, clones and abilities.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::components::{CombatStats, Health};

/// Slack on the cone boundary so targets exactly on the edge still count.
const CONE_EPSILON: f32 = 1.0e-4;

/// True iff `point` is within `range` of `origin` and no more than
/// `half_angle` radians off `facing`. A point on top of the origin always
/// qualifies.
pub fn in_cone(origin: Vec3, facing: Vec3, range: f32, half_angle: f32, point: Vec3) -> bool {
    let offset = point - origin;
    let distance = offset.length();
    if distance > range {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }
    let cos = facing
        .normalize_or_zero()
        .dot(offset / distance)
        .clamp(-1.0, 1.0);
    cos.acos() <= half_angle + CONE_EPSILON
}

/// Filter `candidates` down to those inside the attacker's frontal cone,
/// preserving input order.
pub fn find_targets_in_cone<T>(
    origin: Vec3,
    facing: Vec3,
    candidates: impl IntoIterator<Item = (T, Vec3)>,
    range: f32,
    half_angle: f32,
) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|(_, position)| in_cone(origin, facing, range, half_angle, *position))
        .map(|(candidate, _)| candidate)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    pub amount: f32,
    pub is_critical: bool,
}

pub fn roll_critical<R: Rng + ?Sized>(crit_rate_percent: f32, rng: &mut R) -> bool {
    rng.random::<f32>() * 100.0 < crit_rate_percent
}

/// `base + attack_bonus`, doubled on a critical roll.
pub fn resolve_damage<R: Rng + ?Sized>(
    base_damage: f32,
    stats: &CombatStats,
    rng: &mut R,
) -> DamageRoll {
    let amount = base_damage + stats.attack_bonus;
    if roll_critical(stats.crit_rate_percent, rng) {
        DamageRoll {
            amount: amount * 2.0,
            is_critical: true,
        }
    } else {
        DamageRoll {
            amount,
            is_critical: false,
        }
    }
}

/// Heal the attacker by a flat `lifesteal`, independent of damage dealt.
/// Returns the amount restored.
pub fn apply_lifesteal(attacker: &mut Health, lifesteal: f32) -> f32 {
    if lifesteal <= 0.0 {
        return 0.0;
    }
    attacker.heal(lifesteal)
}

pub fn apply_magic_resist(raw_damage: f32, resist: f32) -> f32 {
    (raw_damage - resist).max(0.0)
}

/// Limit a hit against a boss still above `threshold` so it lands exactly on
/// the threshold line instead of skipping the phase transition.
pub fn phase_capped_damage(requested: f32, health: &Health, threshold: f32) -> f32 {
    if health.percent() <= threshold {
        return requested;
    }
    let headroom = health.current - health.max * threshold;
    let capped = requested.min(headroom);
    if capped <= 0.0 { 1.0 } else { capped }
}

/// True when a hit took health from above the threshold line to on or below it.
pub fn crossed_threshold(before: f32, after: f32, max: f32, threshold: f32) -> bool {
    let line = max * threshold;
    before > line && after <= line
}

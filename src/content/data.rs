//! Tuning data for the combat core, deserialized from RON.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

/// Convert a configured span in seconds into a clock duration.
/// Negative spans clamp to zero.
pub fn secs(value: f32) -> Duration {
    Duration::from_secs_f32(value.max(0.0))
}

/// Root of `assets/data/combat.ron`. Every section falls back to its
/// defaults, so a file only needs to name what it overrides.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub creature: CreatureConfig,
    pub boss: BossConfig,
    pub clone: CloneConfig,
    pub abilities: AbilityConfig,
    pub player: PlayerConfig,
    pub player_attack: PlayerAttackConfig,
    pub navigation: NavigationConfig,
    pub level: LevelConfig,
}

/// Ordinary wandering monsters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CreatureConfig {
    pub max_health: f32,
    /// Units per second.
    pub move_speed: f32,
    pub attack_damage: f32,
    pub aggro_radius: f32,
    pub attack_radius: f32,
    pub attack_cooldown: f32,
    /// Wander points are drawn within this distance of the spawn anchor.
    pub wander_radius: f32,
    pub wander_interval: f32,
    pub arrival_tolerance: f32,
    pub body_radius: f32,
}

impl Default for CreatureConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 1.5,
            attack_damage: 3.0,
            aggro_radius: 15.0,
            attack_radius: 2.0,
            attack_cooldown: 1.0,
            wander_radius: 10.0,
            wander_interval: 3.0,
            arrival_tolerance: 0.1,
            body_radius: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    pub max_health: f32,
    pub minion_max_health: f32,
    pub move_speed: f32,
    pub minion_move_speed: f32,
    pub attack_damage: f32,
    pub minion_attack_damage: f32,
    pub attack_radius: f32,
    /// Health fraction at or below which the phase transition fires.
    pub phase_threshold: f32,
    pub invincibility: f32,
    pub flash_interval: f32,
    pub enrage_scale: f32,
    pub enrage_speed_multiplier: f32,
    pub enrage_damage_multiplier: f32,
    pub explosion_radius: f32,
    pub explosion_damage: f32,
    /// Horizontal displacement applied to explosion victims.
    pub knockback_distance: f32,
    /// Vertical component mixed into the knockback direction before scaling.
    pub knockback_lift: f32,
    pub knockback_min_height: f32,
    /// Upward impulse handed to the physics collaborator, units per second.
    pub knockback_upward_velocity: f32,
    pub minion_count: u32,
    pub minion_spawn_distance: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: 500.0,
            minion_max_health: 100.0,
            move_speed: 1.2,
            minion_move_speed: 2.4,
            attack_damage: 10.0,
            minion_attack_damage: 5.0,
            attack_radius: 3.0,
            phase_threshold: 0.5,
            invincibility: 1.0,
            flash_interval: 0.1,
            enrage_scale: 5.0,
            enrage_speed_multiplier: 1.5,
            enrage_damage_multiplier: 2.0,
            explosion_radius: 10.0,
            explosion_damage: 50.0,
            knockback_distance: 1.5,
            knockback_lift: 0.5,
            knockback_min_height: 1.5,
            knockback_upward_velocity: 12.0,
            minion_count: 4,
            minion_spawn_distance: 3.0,
        }
    }
}

/// Player-summoned allies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CloneConfig {
    pub count: u32,
    pub spawn_distance: f32,
    pub max_health: f32,
    pub lifetime: f32,
    /// Final stretch of the lifetime over which opacity ramps to zero.
    pub fade_duration: f32,
    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_half_angle_degrees: f32,
    pub attack_cooldown: f32,
    pub search_radius: f32,
    pub move_speed: f32,
    /// Clones stop closing in once this near their target.
    pub engage_distance: f32,
    /// Idle clones stop this near the player.
    pub follow_distance: f32,
    pub waypoint_tolerance: f32,
    pub repath_interval: f32,
    /// Goal displacement that counts as the target having moved.
    pub repath_distance: f32,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            count: 5,
            spawn_distance: 2.0,
            max_health: 100.0,
            lifetime: 20.0,
            fade_duration: 2.0,
            attack_damage: 10.0,
            attack_range: 10.0,
            attack_half_angle_degrees: 90.0,
            attack_cooldown: 1.0,
            search_radius: 50.0,
            move_speed: 1.8,
            engage_distance: 2.0,
            follow_distance: 2.0,
            waypoint_tolerance: 0.3,
            repath_interval: 1.0,
            repath_distance: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AbilityConfig {
    pub summon_cooldown: f32,
    pub area_strike_cooldown: f32,
    pub area_strike_damage: f32,
    pub area_strike_range: f32,
    pub area_strike_half_angle_degrees: f32,
}

impl Default for AbilityConfig {
    fn default() -> Self {
        Self {
            summon_cooldown: 30.0,
            area_strike_cooldown: 5.0,
            area_strike_damage: 1000.0,
            area_strike_range: 10.0,
            area_strike_half_angle_degrees: 90.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: f32,
    /// Flat lifesteal every player has before equipment.
    pub base_lifesteal: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            base_lifesteal: 3.0,
        }
    }
}

/// The player's basic melee swing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerAttackConfig {
    pub base_damage: f32,
    pub range: f32,
    pub half_angle_degrees: f32,
}

impl Default for PlayerAttackConfig {
    fn default() -> Self {
        Self {
            base_damage: 20.0,
            range: 5.0,
            half_angle_degrees: 90.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub step_length: f32,
    pub max_iterations: u32,
    /// Deviating directions tried per step before falling back.
    pub samples_per_step: u32,
    pub body_radius: f32,
    pub body_height: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            step_length: 1.0,
            max_iterations: 200,
            samples_per_step: 8,
            body_radius: 0.6,
            body_height: 1.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub creature_count: u32,
    /// Spawns land within `[-spawn_extent, spawn_extent]` on both planar axes.
    pub spawn_extent: f32,
    pub spawn_height: f32,
    pub spawn_attempts: u32,
    pub fallback_spawn: [f32; 3],
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            creature_count: 5,
            spawn_extent: 35.0,
            spawn_height: 0.5,
            spawn_attempts: 50,
            fallback_spawn: [10.0, 0.5, 10.0],
        }
    }
}

impl LevelConfig {
    pub fn fallback_position(&self) -> Vec3 {
        Vec3::from_array(self.fallback_spawn)
    }
}

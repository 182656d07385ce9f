//! Combat domain: AI for creatures, bosses and summoned clones.

pub(crate) mod boss;
pub(crate) mod clone;
pub(crate) mod creature;

pub use boss::{
    Boss, BossKind, BossPhase, FLASH_DIM_OPACITY, knockback_displacement,
};
pub use clone::{HostileCandidate, SummonedClone, select_clone_target};
pub use creature::{
    Creature, CreatureAction, CreatureProfile, CreatureState, TargetCandidate, nearest_target,
    random_wander_point, think,
};

pub(crate) use boss::{update_boss_flash, update_boss_phases};
pub(crate) use clone::{expire_clones, update_clone_ai};
pub(crate) use creature::update_creature_ai;

//! Level domain: level lifecycle requests and outcomes.

use bevy::ecs::message::Message;
use bevy::math::bounding::Aabb3d;

/// Start level `number`, replacing whatever level is running.
#[derive(Debug, Clone)]
pub struct LoadLevelRequest {
    pub number: u32,
    /// Static obstacles for the new level's collision oracle.
    pub obstacles: Vec<Aabb3d>,
}

impl Message for LoadLevelRequest {}

/// Remove every level-scoped entity without starting a new level.
#[derive(Debug, Clone, Default)]
pub struct TeardownLevelRequest;

impl Message for TeardownLevelRequest {}

/// Every hostile spawned for the level, split minions included, is dead.
#[derive(Debug, Clone)]
pub struct LevelClearedEvent {
    pub level: u32,
}

impl Message for LevelClearedEvent {}

//! Content domain: data-driven combat tuning.

mod data;
mod loader;
#[cfg(test)]
mod tests;

pub use data::{
    AbilityConfig, BossConfig, CloneConfig, CombatConfig, CreatureConfig, LevelConfig,
    NavigationConfig, PlayerAttackConfig, PlayerConfig, secs,
};
pub use loader::{ConfigError, load_combat_config, parse_combat_config};

use std::path::PathBuf;

use bevy::prelude::*;

/// Default location of the tuning file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/data/combat.ron";

/// Loads [`CombatConfig`] at build time unless the host already inserted one.
pub struct ContentPlugin {
    pub config_path: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<CombatConfig>() {
            return;
        }

        let config = match load_combat_config(&self.config_path) {
            Ok(config) => {
                info!("Loaded combat tuning from {}", self.config_path.display());
                config
            }
            Err(err) => {
                warn!("{err}; using built-in combat tuning");
                CombatConfig::default()
            }
        };
        app.insert_resource(config);
    }
}

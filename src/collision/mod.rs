//! Collision domain: the static obstacle oracle shared by movement and
//! path search.

mod oracle;
#[cfg(test)]
mod tests;

pub use oracle::{
    CollisionOracle, DEFAULT_BODY_HEIGHT, intersects, obstacle_from_corners,
};

use bevy::prelude::*;

use crate::content::CombatConfig;

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        let body_height = app
            .world()
            .get_resource::<CombatConfig>()
            .map_or(DEFAULT_BODY_HEIGHT, |config| config.navigation.body_height);
        app.insert_resource(CollisionOracle::new(Vec::new(), body_height));
    }
}

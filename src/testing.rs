//! Shared harness for app-level tests: manual clock, default tuning and
//! message capture.

use std::time::Duration;

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::ArenaCombatPlugins;
use crate::content::CombatConfig;
use crate::core::RunConfig;

pub(crate) const FRAME: Duration = Duration::from_millis(16);

/// Every message of type `M` seen since the harness started.
#[derive(Resource)]
pub(crate) struct Captured<M: Message>(pub Vec<M>);

impl<M: Message> Default for Captured<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn capture_messages<M: Message + Clone>(
    mut reader: MessageReader<M>,
    mut captured: ResMut<Captured<M>>,
) {
    captured.0.extend(reader.read().cloned());
}

pub(crate) fn test_app_with(config: CombatConfig) -> App {
    let mut app = App::new();
    app.insert_resource(Time::<()>::default())
        .insert_resource(RunConfig { seed: 7 })
        .insert_resource(config)
        .add_plugins(ArenaCombatPlugins);
    app
}

pub(crate) fn test_app() -> App {
    test_app_with(CombatConfig::default())
}

pub(crate) fn capture<M: Message + Clone>(app: &mut App) {
    app.init_resource::<Captured<M>>()
        .add_systems(PostUpdate, capture_messages::<M>);
}

pub(crate) fn captured<M: Message>(app: &App) -> &[M] {
    &app.world().resource::<Captured<M>>().0
}

/// Advance the clock by `delta` and run one frame.
pub(crate) fn step(app: &mut App, delta: Duration) {
    app.world_mut().resource_mut::<Time>().advance_by(delta);
    app.update();
}

/// Run frames of [`FRAME`] until `total` has elapsed.
pub(crate) fn run_for(app: &mut App, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        let delta = FRAME.min(total - elapsed);
        step(app, delta);
        elapsed += delta;
    }
}

pub(crate) fn send<M: Message>(app: &mut App, message: M) {
    app.world_mut().write_message(message);
}

/// Spawn through [`Commands`] the way systems do, returning the new entity.
pub(crate) fn spawn_with<F>(app: &mut App, spawn: F) -> Entity
where
    F: FnOnce(&mut Commands, &CombatConfig) -> Entity,
{
    let config = app.world().resource::<CombatConfig>().clone();
    let world = app.world_mut();
    let mut queue = bevy::ecs::world::CommandQueue::default();
    let entity = {
        let mut commands = Commands::new(&mut queue, world);
        spawn(&mut commands, &config)
    };
    queue.apply(world);
    entity
}

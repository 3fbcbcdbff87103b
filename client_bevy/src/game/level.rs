use bevy::prelude::*;
use bevy_rapier2d::prelude::RapierConfiguration;

use crate::board::levels::{is_known_level, level_layout};

use super::aim::AimState;
use super::ball::spawn_ball;
use super::container::spawn_container;
use super::core::GameSettings;
use super::obstacles::{spawn_frame_edges, spawn_launcher_pad, spawn_obstacle};
use super::session::Session;
use super::UpdateSet;

pub struct LevelPlugin;

/// Request to tear down the current level and build `level` from scratch.
/// Restart is the same request with the current ordinal.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LoadLevelMessage {
    pub(crate) level: u32,
}

/// Everything spawned for a level; despawned as a whole on reload.
#[derive(Component)]
pub(crate) struct LevelEntity;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<LoadLevelMessage>()
            .add_systems(Startup, request_start_level)
            .add_systems(Update, load_level_system.in_set(UpdateSet::Level));
    }
}

fn request_start_level(settings: Res<GameSettings>, mut loads: MessageWriter<LoadLevelMessage>) {
    loads.write(LoadLevelMessage {
        level: settings.config.start_level,
    });
}

fn load_level_system(
    mut commands: Commands,
    mut loads: MessageReader<LoadLevelMessage>,
    settings: Res<GameSettings>,
    q_level: Query<Entity, With<LevelEntity>>,
    mut session: ResMut<Session>,
    mut aim: ResMut<AimState>,
    mut q_config: Query<&mut RapierConfiguration>,
) {
    // Only the latest request in a frame matters.
    let Some(msg) = loads.read().last().copied() else {
        return;
    };

    for entity in &q_level {
        commands.entity(entity).despawn();
    }

    if !is_known_level(msg.level) {
        warn!("Unknown level {}; loading level 1 instead", msg.level);
    }
    let layout = level_layout(msg.level, &settings.frame, settings.ball_radius);

    spawn_frame_edges(&mut commands, &settings.frame);
    for obstacle in &layout.obstacles {
        spawn_obstacle(&mut commands, &settings.frame, obstacle);
    }
    if let Some(pad) = &layout.launcher {
        spawn_launcher_pad(&mut commands, &settings.frame, pad);
    }
    for placement in &layout.containers {
        spawn_container(&mut commands, &settings.frame, placement);
    }
    for spawn in &layout.balls {
        spawn_ball(&mut commands, &settings, spawn);
    }

    session.begin(layout.number, layout.balls.len());
    aim.reset();
    for mut cfg in &mut q_config {
        cfg.physics_pipeline_active = true;
    }

    info!(
        "Loaded level {} ({} ball(s), {} container(s), {} obstacle(s))",
        layout.number,
        layout.balls.len(),
        layout.containers.len(),
        layout.obstacles.len()
    );
}

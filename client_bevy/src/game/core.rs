use bevy::prelude::*;
use bevy::time::Virtual;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::{PhysicsSet, RapierConfiguration, TimestepMode};
use catchball_shared::config::GameConfig;
use std::time::Duration;

use crate::constants::{
    color_from_hex, Colors, PHYSICS_DT, PHYSICS_MAX_CATCHUP_SECS, PHYSICS_MAX_STEPS_PER_FRAME,
    PHYSICS_SUBSTEPS,
};
use crate::coord::Frame;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Level,
    Aim,
    Visuals,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum FixedSet {
    Simulate,
    PostPhysics,
    Spawn,
}

/// Validated configuration plus the values derived from it once at startup.
#[derive(Resource, Clone, Debug)]
pub(crate) struct GameSettings {
    pub(crate) config: GameConfig,
    pub(crate) frame: Frame,
    pub(crate) ball_radius: f32,
}

impl GameSettings {
    pub(crate) fn new(config: GameConfig) -> Self {
        let frame = Frame::new(config.canvas_width, config.canvas_height);
        let ball_radius = config.ball_radius();
        Self {
            config,
            frame,
            ball_radius,
        }
    }
}

pub struct CorePlugin {
    pub config: GameConfig,
}

#[derive(Component)]
pub(crate) struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GameSettings::new(self.config.clone()))
            .insert_resource(ClearColor(color_from_hex(Colors::BACKGROUND)))
            .insert_resource(Time::<Fixed>::from_seconds(PHYSICS_DT as f64))
            .insert_resource(TimestepMode::Fixed {
                dt: PHYSICS_DT,
                substeps: PHYSICS_SUBSTEPS,
            })
            .configure_sets(
                Update,
                (
                    UpdateSet::Input,
                    UpdateSet::Level,
                    UpdateSet::Aim,
                    UpdateSet::Visuals,
                )
                    .chain(),
            )
            .configure_sets(
                FixedUpdate,
                (FixedSet::Simulate, FixedSet::PostPhysics, FixedSet::Spawn).chain(),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::Simulate.before(PhysicsSet::SyncBackend),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::PostPhysics.after(PhysicsSet::Writeback),
            )
            .add_systems(
                Startup,
                (
                    setup_camera,
                    configure_virtual_time_catchup_cap,
                    configure_rapier_gravity,
                )
                    .chain(),
            )
            .add_systems(Update, fit_camera_to_canvas);
    }
}

fn setup_camera(mut commands: Commands) {
    // WebGL2 MSAA is expensive (often CPU fallback); lyon already provides AA via tessellation.
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    commands.spawn((Camera2d, msaa, MainCamera));
}

fn configure_rapier_gravity(
    settings: Res<GameSettings>,
    mut q_config: Query<&mut RapierConfiguration>,
) {
    for mut cfg in &mut q_config {
        cfg.gravity = Vec2::new(0.0, settings.config.gravity);
    }
}

fn configure_virtual_time_catchup_cap(mut virtual_time: ResMut<Time<Virtual>>) {
    // At most PHYSICS_MAX_STEPS_PER_FRAME fixed steps are simulated per rendered frame.
    let max_delta = Duration::from_secs_f64(PHYSICS_MAX_CATCHUP_SECS);
    debug_assert_eq!(
        PHYSICS_MAX_CATCHUP_SECS,
        (PHYSICS_DT as f64) * (PHYSICS_MAX_STEPS_PER_FRAME as f64)
    );
    virtual_time.set_max_delta(max_delta);
}

/// Orthographic scale that fits the whole canvas inside the window.
pub(crate) fn fit_scale(frame: &Frame, window_width: f32, window_height: f32) -> Option<f32> {
    if window_width <= 0.0 || window_height <= 0.0 {
        return None;
    }
    let scale_x = frame.width / window_width;
    let scale_y = frame.height / window_height;
    Some(scale_x.max(scale_y).max(0.0001))
}

fn fit_camera_to_canvas(
    settings: Res<GameSettings>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_projection: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    let Some(target_scale) = fit_scale(&settings.frame, window.width(), window.height()) else {
        return;
    };

    for mut projection in &mut q_projection {
        if let Projection::Orthographic(ortho) = &mut *projection {
            ortho.scale = target_scale;
        }
    }
}

mod board;
mod constants;
mod coord;
mod game;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_prototype_lyon::prelude::ShapePlugin;
use bevy_rapier2d::prelude::*;
use catchball_shared::config::GameConfig;

use constants::PPM;
use game::{
    AimPlugin, BallPlugin, ContainerPlugin, CorePlugin, HudPlugin, InputPlugin, LevelPlugin,
    SessionPlugin,
};

fn main() {
    let config = match config_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Catch the Ball".to_string(),
                resolution: WindowResolution::new(
                    config.canvas_width as u32,
                    config.canvas_height as u32,
                ),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(PPM).in_fixed_schedule())
        .add_plugins(ShapePlugin)
        .add_plugins(CorePlugin { config })
        .add_plugins(SessionPlugin)
        .add_plugins(LevelPlugin)
        .add_plugins(ContainerPlugin)
        .add_plugins(BallPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(AimPlugin)
        .add_plugins(HudPlugin)
        .run();
}

/// Defaults, optionally replaced by the JSON file at `CATCHBALL_CONFIG`, with
/// `CATCHBALL_LEVEL` overriding the start level.
#[cfg(not(target_arch = "wasm32"))]
fn config_from_env() -> Result<GameConfig, String> {
    let mut config = match std::env::var("CATCHBALL_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            GameConfig::from_json_str(&json)?
        }
        Err(_) => GameConfig::default(),
    };

    if let Ok(level) = std::env::var("CATCHBALL_LEVEL") {
        config.start_level = parse_level(&level)?;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(target_arch = "wasm32")]
fn config_from_env() -> Result<GameConfig, String> {
    Ok(GameConfig::default())
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_level(raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| format!("CATCHBALL_LEVEL must be a level number: {e}"))
}

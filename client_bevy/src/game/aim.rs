use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalImpulse, ReadMassProperties, Velocity};

use crate::board::aim_logic::{aim_guide, launch_impulse, launch_velocity, pick_ball};
use crate::constants::{color_from_hex, Colors};

use super::ball::Ball;
use super::core::GameSettings;
use super::input::InputState;
use super::session::Session;
use super::{FixedSet, UpdateSet};

pub struct AimPlugin;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendingLaunch {
    pub(crate) ball: Entity,
    pub(crate) velocity: Vec2,
}

/// Drag gesture state. A press anchors the drag; the release turns it into a
/// pending launch that the next physics step applies.
#[derive(Resource, Default, Debug)]
pub(crate) struct AimState {
    pub(crate) ball: Option<Entity>,
    pub(crate) press: Option<Vec2>,
    pub(crate) pointer: Vec2,
    pub(crate) pending: Option<PendingLaunch>,
}

impl AimState {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn is_aiming(&self) -> bool {
        self.press.is_some()
    }
}

impl Plugin for AimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AimState>()
            .add_systems(Update, aim_input_system.in_set(UpdateSet::Aim))
            .add_systems(Update, draw_aim_guide.in_set(UpdateSet::Visuals))
            .add_systems(FixedUpdate, apply_launch_system.in_set(FixedSet::Simulate));
    }
}

fn aim_input_system(
    input: Res<InputState>,
    session: Res<Session>,
    settings: Res<GameSettings>,
    mut aim: ResMut<AimState>,
    q_ball: Query<(Entity, &Transform), With<Ball>>,
    q_buttons: Query<&Interaction, With<Button>>,
) {
    if !session.is_playing() || input.cancelled {
        aim.press = None;
        return;
    }

    if let Some(pointer) = input.pointer {
        aim.pointer = pointer;
    }

    if input.pressed && !aim.is_aiming() {
        let over_button = q_buttons.iter().any(|i| *i != Interaction::None);
        if let (false, Some(pointer)) = (over_button, input.pointer) {
            let balls: Vec<(Entity, Vec2)> = q_ball
                .iter()
                .map(|(e, tf)| (e, tf.translation.truncate()))
                .collect();
            let current = pick_ball(pointer, settings.ball_radius, &balls)
                .or(aim.ball.filter(|e| q_ball.contains(*e)))
                .or(balls.first().map(|(e, _)| *e));

            if let Some(ball) = current {
                aim.ball = Some(ball);
                aim.press = Some(pointer);
            }
        }
    }

    if input.released {
        let Some(press) = aim.press.take() else {
            return;
        };
        let release = input.pointer.unwrap_or(aim.pointer);
        match (aim.ball, launch_velocity(press, release, &settings.config)) {
            (Some(ball), Some(velocity)) => {
                aim.pending = Some(PendingLaunch { ball, velocity });
            }
            _ => debug!("Released without a drag; nothing launched"),
        }
    }
}

fn draw_aim_guide(
    aim: Res<AimState>,
    settings: Res<GameSettings>,
    q_ball: Query<&Transform, With<Ball>>,
    mut gizmos: Gizmos,
) {
    if !aim.is_aiming() {
        return;
    }
    let Some(Ok(ball_tf)) = aim.ball.map(|e| q_ball.get(e)) else {
        return;
    };
    let Some(guide) = aim_guide(
        ball_tf.translation.truncate(),
        aim.pointer,
        &settings.config,
    ) else {
        return;
    };

    let color = color_from_hex(Colors::AIM);
    for dash in guide.dashes {
        gizmos.line_2d(dash.from, dash.to, color);
    }
    gizmos.circle_2d(guide.tip, 3.0, color);
}

fn apply_launch_system(
    mut aim: ResMut<AimState>,
    session: Res<Session>,
    settings: Res<GameSettings>,
    mut q_ball: Query<(&mut Velocity, &mut ExternalImpulse, &ReadMassProperties), With<Ball>>,
) {
    let Some(launch) = aim.pending.take() else {
        return;
    };
    if !session.is_playing() {
        return;
    }
    let Ok((mut vel, mut impulse, mass_props)) = q_ball.get_mut(launch.ball) else {
        warn!("Launch target {:?} no longer exists", launch.ball);
        return;
    };

    // Mass is only known after the first physics step.
    let mass = if mass_props.mass > 0.0 {
        mass_props.mass
    } else {
        settings.config.ball.mass
    };

    *vel = Velocity::zero();
    impulse.impulse = launch_impulse(launch.velocity, mass);
    debug!(
        "Launched {:?} at {:.1} px/s",
        launch.ball,
        launch.velocity.length()
    );
}

use bevy::color::Mix;
use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;
use catchball_shared::categories::CategoryMask;
use catchball_shared::color::BallColor;

use crate::board::geometry::ContainerShape;
use crate::board::levels::ContainerPlacement;
use crate::constants::{
    color_from_hex, Colors, CONTAINER_FLASH_SECS, CONTAINER_FRICTION, CONTAINER_RESTITUTION,
    Z_CONTAINER,
};
use crate::coord::{frame_to_world, Frame};

use super::collision_groups;
use super::level::LevelEntity;
use super::{FixedSet, UpdateSet};

pub struct ContainerPlugin;

const IDLE_FILL_ALPHA: f32 = 0.85;

#[derive(Component, Clone, Copy, Debug)]
pub(crate) struct Container {
    pub(crate) color: BallColor,
    pub(crate) shape: ContainerShape,
}

#[derive(Component, Default)]
pub(crate) struct ContainerFlash {
    pub(crate) seconds_left: f32,
    /// Value used for the last visual update, to skip redundant Shape mutations.
    last_visual_t: f32,
}

impl ContainerFlash {
    pub(crate) fn trigger(&mut self) {
        self.seconds_left = CONTAINER_FLASH_SECS;
    }
}

impl Plugin for ContainerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, tick_flash_timers.in_set(FixedSet::Simulate))
            .add_systems(Update, update_container_visuals.in_set(UpdateSet::Visuals));
    }
}

pub(crate) fn spawn_container(
    commands: &mut Commands,
    frame: &Frame,
    placement: &ContainerPlacement,
) {
    let shape = ContainerShape::for_frame(frame);
    let body = shape.body();
    let half = body.half_extents();
    let world = frame_to_world(frame, placement.pos, Z_CONTAINER);
    let cup = shapes::Polygon {
        points: shape.cup_outline(),
        closed: true,
    };
    let color = color_from_hex(placement.color.hex());

    commands.spawn((
        RigidBody::Fixed,
        Collider::compound(vec![(body.center(), 0.0, Collider::cuboid(half.x, half.y))]),
        collision_groups(CategoryMask::container()),
        Restitution::coefficient(CONTAINER_RESTITUTION),
        Friction::coefficient(CONTAINER_FRICTION),
        ActiveEvents::COLLISION_EVENTS,
        Transform::from_translation(world).with_rotation(Quat::from_rotation_z(placement.rotation)),
        ShapeBuilder::with(&cup)
            .fill(color.with_alpha(IDLE_FILL_ALPHA))
            .stroke((color_from_hex(Colors::CONTAINER_RIM), 2.0))
            .build(),
        Container {
            color: placement.color,
            shape,
        },
        ContainerFlash::default(),
        LevelEntity,
    ));
}

fn tick_flash_timers(mut q_flash: Query<&mut ContainerFlash>, time: Res<Time<Fixed>>) {
    let dt = time.delta_secs();
    for mut flash in &mut q_flash {
        if flash.seconds_left > 0.0 {
            flash.seconds_left = (flash.seconds_left - dt).max(0.0);
        }
    }
}

fn update_container_visuals(mut q: Query<(&Container, &mut ContainerFlash, &mut Shape)>) {
    for (container, mut flash, mut shape) in &mut q {
        let t = (flash.seconds_left / CONTAINER_FLASH_SECS).clamp(0.0, 1.0);
        if t == flash.last_visual_t {
            continue;
        }
        flash.last_visual_t = t;

        if let Some(fill) = shape.fill.as_mut() {
            let base = color_from_hex(container.color.hex())
                .with_alpha(IDLE_FILL_ALPHA)
                .to_srgba();
            fill.color = base.mix(&Srgba::WHITE, t).into();
        }
    }
}

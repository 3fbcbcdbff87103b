use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;
use catchball_shared::categories::CategoryMask;

use crate::board::geometry::{
    capsule_outline, frame_edges, pillar_capsule, LauncherPad, Obstacle, ObstacleShape, Segment,
};
use crate::constants::{
    color_from_hex, Colors, EDGE_COLLIDER_THICKNESS, EDGE_FRICTION, EDGE_RESTITUTION,
    OBSTACLE_FRICTION, OBSTACLE_RESTITUTION, Z_OBSTACLE,
};
use crate::coord::{frame_to_world, Frame};

use super::collision_groups;
use super::level::LevelEntity;

const PILLAR_ARC_SEGMENTS: usize = 12;

#[derive(Component)]
pub(crate) struct LauncherPadVisual;

/// Invisible boundary around the canvas; one fixed body with a cuboid per side.
pub(crate) fn spawn_frame_edges(commands: &mut Commands, frame: &Frame) {
    let body = commands
        .spawn((
            RigidBody::Fixed,
            Transform::default(),
            GlobalTransform::default(),
            LevelEntity,
        ))
        .id();

    for seg in frame_edges(frame) {
        spawn_edge_collider(commands, body, frame, seg);
    }
}

fn spawn_edge_collider(commands: &mut Commands, parent: Entity, frame: &Frame, seg: Segment) {
    let mid = frame_to_world(frame, (seg.from + seg.to) * 0.5, 0.0);
    let d = seg.to - seg.from;
    let len = d.length();
    let angle = d.y.atan2(d.x);

    let child = commands
        .spawn((
            Collider::cuboid(len * 0.5, EDGE_COLLIDER_THICKNESS),
            collision_groups(CategoryMask::wall()),
            Restitution::coefficient(EDGE_RESTITUTION),
            Friction::coefficient(EDGE_FRICTION),
            Transform::from_translation(mid).with_rotation(Quat::from_rotation_z(angle)),
            GlobalTransform::default(),
        ))
        .id();

    commands.entity(parent).add_child(child);
}

/// Static obstacle: physics body and lyon visual on the same entity.
pub(crate) fn spawn_obstacle(commands: &mut Commands, frame: &Frame, obstacle: &Obstacle) {
    let origin = frame_to_world(frame, obstacle.body_origin(), Z_OBSTACLE);
    let color = color_from_hex(obstacle.color);
    let (collider, visual) = obstacle_parts(&obstacle.shape, color);

    commands.spawn((
        RigidBody::Fixed,
        collider,
        collision_groups(obstacle.mask()),
        Restitution::coefficient(OBSTACLE_RESTITUTION),
        Friction::coefficient(OBSTACLE_FRICTION),
        Transform::from_translation(origin).with_rotation(Quat::from_rotation_z(obstacle.rotation)),
        visual,
        LevelEntity,
    ));
}

/// Grey launcher pad. Shape only: no rigid body or collider.
pub(crate) fn spawn_launcher_pad(commands: &mut Commands, frame: &Frame, pad: &LauncherPad) {
    let rect = shapes::Rectangle {
        extents: pad.size,
        origin: shapes::RectangleOrigin::Center,
        radii: None,
    };
    commands.spawn((
        ShapeBuilder::with(&rect)
            .fill(color_from_hex(Colors::LAUNCHER))
            .build(),
        Transform::from_translation(frame_to_world(frame, pad.center, Z_OBSTACLE)),
        LauncherPadVisual,
        LevelEntity,
    ));
}

fn obstacle_parts(shape: &ObstacleShape, color: Color) -> (Collider, Shape) {
    match shape {
        ObstacleShape::Slab { size } => {
            let rect = shapes::Rectangle {
                extents: *size,
                origin: shapes::RectangleOrigin::Center,
                radii: None,
            };
            (
                Collider::cuboid(size.x * 0.5, size.y * 0.5),
                ShapeBuilder::with(&rect).fill(color).build(),
            )
        }
        ObstacleShape::Pillar { size } => {
            let capsule = pillar_capsule(*size);
            let collider = if capsule.vertical {
                Collider::capsule_y(capsule.half_segment, capsule.radius)
            } else {
                Collider::capsule_x(capsule.half_segment, capsule.radius)
            };
            let outline = shapes::Polygon {
                points: capsule_outline(capsule, PILLAR_ARC_SEGMENTS),
                closed: true,
            };
            (collider, ShapeBuilder::with(&outline).fill(color).build())
        }
        ObstacleShape::Ledge(ledge) => {
            let parts = ledge
                .parts
                .iter()
                .map(|rect| {
                    let half = rect.half_extents();
                    (rect.center(), 0.0, Collider::cuboid(half.x, half.y))
                })
                .collect();
            let outline = shapes::Polygon {
                points: ledge.points.clone(),
                closed: true,
            };
            (
                Collider::compound(parts),
                ShapeBuilder::with(&outline).fill(color).build(),
            )
        }
    }
}

use bevy::prelude::Vec2;
use catchball_shared::config::GameConfig;

use super::geometry::Segment;

/// Dashed guide drawn from the ball while dragging.
#[derive(Clone, Debug, PartialEq)]
pub struct AimGuide {
    pub tip: Vec2,
    pub dashes: Vec<Segment>,
}

/// Guide pointing away from the pointer, capped at the max drag distance.
/// Returns `None` when the pointer sits exactly on the ball center.
pub fn aim_guide(ball: Vec2, pointer: Vec2, config: &GameConfig) -> Option<AimGuide> {
    let offset = ball - pointer;
    let length = offset.length();
    if length <= f32::EPSILON {
        return None;
    }

    let dir = offset / length;
    let total = length.min(config.max_drag_distance);
    let tip = ball + dir * total;

    let stride = config.aim_dash_length + config.aim_gap_length;
    let mut dashes = Vec::new();
    let mut covered = 0.0;
    while covered < total {
        let from = ball + dir * covered;
        let to = ball + dir * (covered + config.aim_dash_length).min(total);
        dashes.push(Segment { from, to });
        covered += stride;
    }

    Some(AimGuide { tip, dashes })
}

/// Fraction of full power for a drag of `distance` pixels.
pub fn launch_strength(distance: f32, max_drag_distance: f32) -> f32 {
    (distance.min(max_drag_distance) / max_drag_distance).clamp(0.0, 1.0)
}

/// Launch velocity for a drag from `press` to `release`: the ball flies
/// opposite to the drag, scaled by drag length up to the cap.
pub fn launch_velocity(press: Vec2, release: Vec2, config: &GameConfig) -> Option<Vec2> {
    let drag = press - release;
    let distance = drag.length();
    if distance <= f32::EPSILON {
        return None;
    }

    let strength = launch_strength(distance, config.max_drag_distance);
    Some(drag / distance * config.launch_speed * strength)
}

/// Impulse that changes a body of `mass` by exactly `velocity`.
pub fn launch_impulse(velocity: Vec2, mass: f32) -> Vec2 {
    velocity * mass.max(0.0001)
}

/// Nearest ball whose disc contains `pointer`.
pub fn pick_ball<T: Copy>(pointer: Vec2, radius: f32, balls: &[(T, Vec2)]) -> Option<T> {
    balls
        .iter()
        .map(|(id, pos)| (*id, pos.distance(pointer)))
        .filter(|(_, d)| *d <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

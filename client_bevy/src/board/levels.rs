//! Hand-authored level scripts. Every number is a fraction of the canvas
//! width or height, so layouts scale with the frame.

use std::f32::consts::PI;

use bevy::prelude::Vec2;
use catchball_shared::color::BallColor::{self, Pink, Red};
use catchball_shared::LEVEL_COUNT;

use crate::coord::Frame;

use super::geometry::{j_ledge, l_ledge, LauncherPad, LedgeOutline, Obstacle, ObstacleShape};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BallSpawn {
    pub pos: Vec2,
    pub color: BallColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerPlacement {
    pub pos: Vec2,
    pub rotation: f32,
    pub color: BallColor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LevelLayout {
    pub number: u32,
    pub balls: Vec<BallSpawn>,
    pub containers: Vec<ContainerPlacement>,
    pub obstacles: Vec<Obstacle>,
    pub launcher: Option<LauncherPad>,
}

impl LevelLayout {
    fn new(number: u32) -> Self {
        Self {
            number,
            balls: Vec::new(),
            containers: Vec::new(),
            obstacles: Vec::new(),
            launcher: None,
        }
    }

    fn ball(mut self, color: BallColor, pos: Vec2) -> Self {
        self.balls.push(BallSpawn { pos, color });
        self
    }

    fn container(mut self, color: BallColor, pos: Vec2, turns: f32) -> Self {
        self.containers.push(ContainerPlacement {
            pos,
            rotation: PI * turns,
            color,
        });
        self
    }

    fn slab(mut self, color: BallColor, center: Vec2, size: Vec2) -> Self {
        self.obstacles.push(Obstacle {
            anchor: center,
            rotation: 0.0,
            shape: ObstacleShape::Slab { size },
            color: color.hex(),
        });
        self
    }

    fn pillar(mut self, color: BallColor, corner: Vec2, size: Vec2, turns: f32) -> Self {
        self.obstacles.push(Obstacle {
            anchor: corner,
            rotation: PI * turns,
            shape: ObstacleShape::Pillar { size },
            color: color.hex(),
        });
        self
    }

    fn ledge(mut self, color: BallColor, origin: Vec2, outline: LedgeOutline) -> Self {
        self.obstacles.push(Obstacle {
            anchor: origin,
            rotation: 0.0,
            shape: ObstacleShape::Ledge(outline),
            color: color.hex(),
        });
        self
    }

    fn launcher(mut self, pad: LauncherPad) -> Self {
        self.launcher = Some(pad);
        self
    }
}

/// Layout for `number`; unknown ordinals fall back to the first level.
pub fn level_layout(number: u32, frame: &Frame, ball_radius: f32) -> LevelLayout {
    let f = frame;
    match number {
        1 => level_1(f, ball_radius),
        2 => level_2(f),
        3 => level_3(f),
        4 => level_4(f),
        5 => level_5(f),
        6 => level_6(f),
        7 => level_7(f),
        8 => level_8(f),
        9 => level_9(f),
        10 => level_10(f),
        11 => level_11(f),
        12 => level_12(f),
        13 => level_13(f),
        14 => level_14(f),
        15 => level_15(f),
        _ => level_1(f, ball_radius),
    }
}

pub fn is_known_level(number: u32) -> bool {
    (1..=LEVEL_COUNT).contains(&number)
}

fn base_platform(f: &Frame) -> (Vec2, Vec2) {
    (f.point(0.5, 0.1), f.size(1.0, 0.02))
}

/// Short L used by the later ledge levels: 0.3W base, 0.4H stem.
fn short_l(f: &Frame) -> LedgeOutline {
    l_ledge(f.size(0.3, 0.15), f.size(0.15, 0.4))
}

fn tall_l(f: &Frame) -> LedgeOutline {
    l_ledge(f.size(0.4, 0.15), f.size(0.15, 0.6))
}

fn level_1(f: &Frame, ball_radius: f32) -> LevelLayout {
    let pad = LauncherPad::for_frame(f);
    let (base_center, base_size) = base_platform(f);
    LevelLayout::new(1)
        .container(Red, f.point(0.85, 0.2), 0.0)
        .slab(Red, base_center, base_size)
        .launcher(pad)
        .ball(Red, pad.ball_spawn(ball_radius))
}

fn level_2(f: &Frame) -> LevelLayout {
    let (base_center, base_size) = base_platform(f);
    LevelLayout::new(2)
        .container(Pink, f.point(0.85, 0.3), 0.0)
        .pillar(Pink, f.point(0.5, 0.25), f.size(0.1, 0.5), 0.0)
        .slab(Pink, base_center, base_size)
        .launcher(LauncherPad::for_frame(f))
        .ball(Pink, f.point(0.15, 0.15))
}

fn level_3(f: &Frame) -> LevelLayout {
    LevelLayout::new(3)
        .container(Pink, f.point(0.15, 0.2), 0.0)
        .ledge(Pink, f.point(0.6, 0.2), tall_l(f))
        .ball(Pink, f.point(0.8, 0.35))
}

fn level_4(f: &Frame) -> LevelLayout {
    LevelLayout::new(4)
        .container(Pink, f.point(0.15, 0.2), 0.15)
        .ledge(Pink, f.point(0.6, 0.2), tall_l(f))
        .ledge(
            Pink,
            f.point(0.35, 0.4),
            j_ledge(f.size(0.35, 0.15), f.size(0.25, 0.4)),
        )
        .ball(Pink, f.point(0.8, 0.35))
}

fn level_5(f: &Frame) -> LevelLayout {
    LevelLayout::new(5)
        .container(Pink, f.point(0.85, 0.2), -0.15)
        .ledge(Pink, f.point(0.1, 0.2), tall_l(f))
        .pillar(Pink, f.point(0.6, 0.3), f.size(0.1, 0.5), 0.0)
        .ball(Pink, f.point(0.3, 0.35))
}

fn level_6(f: &Frame) -> LevelLayout {
    LevelLayout::new(6)
        .pillar(Pink, f.point(0.3, 0.25), f.size(0.1, 0.5), -0.15)
        .pillar(Pink, f.point(0.7, 0.4), Vec2::new(f.w(0.5), f.w(0.1)), 0.0)
        .container(Pink, f.point(0.7, 0.2), 0.0)
        .ball(Pink, f.point(0.15, 0.7))
}

fn level_7(f: &Frame) -> LevelLayout {
    LevelLayout::new(7)
        .pillar(Pink, f.point(0.2, 0.8), f.size(0.1, 0.3), -0.15)
        .pillar(Pink, f.point(0.8, 0.8), f.size(0.1, 0.3), 0.15)
        .pillar(Pink, f.point(0.5, 0.6), Vec2::new(f.w(0.4), f.w(0.08)), 0.1)
        .pillar(Pink, f.point(0.3, 0.4), f.size(0.08, 0.25), -0.1)
        .pillar(Pink, f.point(0.7, 0.4), f.size(0.08, 0.25), 0.1)
        .pillar(Pink, f.point(0.5, 0.25), Vec2::new(f.w(0.3), f.w(0.08)), -0.1)
        .container(Pink, f.point(0.85, 0.15), 0.0)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_8(f: &Frame) -> LevelLayout {
    LevelLayout::new(8)
        .ledge(Pink, f.point(0.1, 0.4), short_l(f))
        .ledge(
            Pink,
            f.point(0.6, 0.4),
            j_ledge(f.size(0.3, 0.15), f.size(0.15, 0.4)),
        )
        .pillar(Pink, f.point(0.5, 0.5), f.size(0.2, 0.2), 0.0)
        .container(Pink, f.point(0.85, 0.15), -0.1)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_9(f: &Frame) -> LevelLayout {
    let size = f.size(0.1, 0.4);
    LevelLayout::new(9)
        .pillar(Pink, f.point(0.2, 0.7), size, -0.15)
        .pillar(Pink, f.point(0.8, 0.7), size, 0.15)
        .pillar(Pink, f.point(0.5, 0.5), size, 0.1)
        .container(Pink, f.point(0.5, 0.2), 0.0)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_10(f: &Frame) -> LevelLayout {
    let size = f.size(0.1, 0.5);
    LevelLayout::new(10)
        .pillar(Pink, f.point(0.3, 0.6), size, 0.0)
        .pillar(Pink, f.point(0.7, 0.6), size, 0.0)
        .pillar(Pink, f.point(0.5, 0.4), size, 0.1)
        .container(Pink, f.point(0.5, 0.2), 0.0)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_11(f: &Frame) -> LevelLayout {
    let size = f.size(0.1, 0.4);
    LevelLayout::new(11)
        .pillar(Pink, f.point(0.2, 0.8), size, -0.1)
        .pillar(Pink, f.point(0.8, 0.8), size, 0.1)
        .pillar(Pink, f.point(0.5, 0.6), size, 0.0)
        .container(Pink, f.point(0.5, 0.2), 0.0)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_12(f: &Frame) -> LevelLayout {
    LevelLayout::new(12)
        .ledge(Pink, f.point(0.1, 0.3), short_l(f))
        .pillar(Pink, f.point(0.5, 0.4), f.size(0.1, 0.4), 0.25)
        .container(Pink, f.point(0.85, 0.15), -0.15)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_13(f: &Frame) -> LevelLayout {
    let size = f.size(0.1, 0.4);
    LevelLayout::new(13)
        .pillar(Pink, f.point(0.2, 0.7), size, 0.15)
        .pillar(Pink, f.point(0.5, 0.6), size, -0.15)
        .pillar(Pink, f.point(0.8, 0.5), size, 0.15)
        .container(Pink, f.point(0.85, 0.2), 0.1)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_14(f: &Frame) -> LevelLayout {
    let size = f.size(0.1, 0.3);
    LevelLayout::new(14)
        .ledge(Pink, f.point(0.1, 0.4), short_l(f))
        .pillar(Pink, f.point(0.4, 0.7), size, 0.25)
        .pillar(Pink, f.point(0.6, 0.5), size, -0.25)
        .pillar(Pink, f.point(0.8, 0.3), size, 0.25)
        .container(Pink, f.point(0.85, 0.15), -0.1)
        .ball(Pink, f.point(0.15, 0.85))
}

fn level_15(f: &Frame) -> LevelLayout {
    LevelLayout::new(15)
        .pillar(Pink, f.point(0.15, 0.7), f.size(0.1, 0.5), -0.2)
        .pillar(Pink, f.point(0.5, 0.6), f.size(0.1, 0.3), 0.25)
        .pillar(Pink, f.point(0.8, 0.5), f.size(0.1, 0.4), -0.15)
        .container(Pink, f.point(0.85, 0.2), 0.1)
        .ball(Pink, f.point(0.1, 0.85))
}

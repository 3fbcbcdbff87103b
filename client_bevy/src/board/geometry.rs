use std::f32::consts::PI;

use bevy::prelude::Vec2;
use catchball_shared::categories::CategoryMask;

use crate::coord::Frame;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Axis-aligned rectangle in some local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// L-shaped or mirrored ledge: an outline for drawing and a set of rectangles
/// that tile it for collision.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgeOutline {
    pub points: Vec<Vec2>,
    pub parts: Vec<Rect>,
}

/// Horizontal base with a stem rising from its left end.
pub fn l_ledge(base: Vec2, stem: Vec2) -> LedgeOutline {
    LedgeOutline {
        points: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(base.x, 0.0),
            Vec2::new(base.x, base.y),
            Vec2::new(stem.x, base.y),
            Vec2::new(stem.x, stem.y),
            Vec2::new(0.0, stem.y),
        ],
        parts: vec![
            Rect::new(Vec2::ZERO, base),
            Rect::new(Vec2::new(0.0, base.y), Vec2::new(stem.x, stem.y)),
        ],
    }
}

/// Horizontal base with a stem rising from its right end.
pub fn j_ledge(base: Vec2, stem: Vec2) -> LedgeOutline {
    let stem_left = base.x - stem.x;
    LedgeOutline {
        points: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(base.x, 0.0),
            Vec2::new(base.x, stem.y),
            Vec2::new(stem_left, stem.y),
            Vec2::new(stem_left, base.y),
            Vec2::new(0.0, base.y),
        ],
        parts: vec![
            Rect::new(Vec2::ZERO, base),
            Rect::new(Vec2::new(stem_left, base.y), Vec2::new(base.x, stem.y)),
        ],
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObstacleShape {
    /// Rectangle centered on the anchor, rotated about its center.
    Slab { size: Vec2 },
    /// Fully rounded rectangle anchored at its bottom-left corner and rotated
    /// about that corner.
    Pillar { size: Vec2 },
    /// Polygon anchored at its local origin.
    Ledge(LedgeOutline),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    /// Frame-space anchor (meaning depends on the shape).
    pub anchor: Vec2,
    pub rotation: f32,
    pub shape: ObstacleShape,
    pub color: u32,
}

impl Obstacle {
    pub fn mask(&self) -> CategoryMask {
        match self.shape {
            ObstacleShape::Slab { .. } => CategoryMask::platform(),
            ObstacleShape::Pillar { .. } | ObstacleShape::Ledge(_) => CategoryMask::wall(),
        }
    }

    /// Frame-space origin of the body. Collider and outline are expressed
    /// relative to this point, rotated by `rotation`.
    pub fn body_origin(&self) -> Vec2 {
        match &self.shape {
            ObstacleShape::Slab { .. } | ObstacleShape::Ledge(_) => self.anchor,
            ObstacleShape::Pillar { size } => {
                self.anchor + Vec2::from_angle(self.rotation).rotate(*size * 0.5)
            }
        }
    }
}

/// Capsule that fills a fully rounded rectangle, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub half_segment: f32,
    pub radius: f32,
    pub vertical: bool,
}

pub fn pillar_capsule(size: Vec2) -> Capsule {
    let vertical = size.y >= size.x;
    let (long, short) = if vertical {
        (size.y, size.x)
    } else {
        (size.x, size.y)
    };
    Capsule {
        half_segment: (long - short) * 0.5,
        radius: short * 0.5,
        vertical,
    }
}

/// Outline of a capsule centered on the origin, `arc_segments` per rounded end.
pub fn capsule_outline(capsule: Capsule, arc_segments: usize) -> Vec<Vec2> {
    let arc_segments = arc_segments.max(1);
    let axis = if capsule.vertical { Vec2::Y } else { Vec2::X };
    // Start angle of the "forward" cap, measured from +X.
    let start = if capsule.vertical { 0.0 } else { -PI * 0.5 };

    let mut points = Vec::with_capacity((arc_segments + 1) * 2);
    for (cap_center, offset) in [
        (axis * capsule.half_segment, 0.0),
        (-axis * capsule.half_segment, PI),
    ] {
        for i in 0..=arc_segments {
            let a = start + offset + PI * (i as f32 / arc_segments as f32);
            points.push(cap_center + Vec2::from_angle(a) * capsule.radius);
        }
    }
    points
}

/// Container footprint for a given frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerShape {
    pub size: Vec2,
}

impl ContainerShape {
    pub fn for_frame(frame: &Frame) -> Self {
        Self {
            size: frame.size(0.15, 0.15),
        }
    }

    /// Solid collision box in container-local space.
    pub fn body(&self) -> Rect {
        let half = Vec2::new(self.size.x * 0.4, self.size.y * 0.35);
        let center = Vec2::new(0.0, -self.size.y * 0.3);
        Rect::new(center - half, center + half)
    }

    /// Region in container-local space where a ball center counts as caught.
    pub fn capture_zone(&self) -> Rect {
        let half = Vec2::new(self.size.x * 0.35, self.size.y * 0.2);
        let center = Vec2::new(0.0, -self.size.y * 0.3);
        Rect::new(center - half, center + half)
    }

    /// Cup-shaped outline, open at the top.
    pub fn cup_outline(&self) -> Vec<Vec2> {
        let h = self.size * 0.5;
        let t = self.size.x * 0.1;
        vec![
            Vec2::new(-h.x, h.y),
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(h.x - t, h.y),
            Vec2::new(h.x - t, -h.y + t),
            Vec2::new(-h.x + t, -h.y + t),
            Vec2::new(-h.x + t, h.y),
        ]
    }
}

/// Express `point` in the local frame of a body at `origin` rotated by `rotation`.
pub fn to_local(point: Vec2, origin: Vec2, rotation: f32) -> Vec2 {
    Vec2::from_angle(-rotation).rotate(point - origin)
}

pub fn capture_zone_contains(
    shape: &ContainerShape,
    container_pos: Vec2,
    container_rotation: f32,
    ball_pos: Vec2,
) -> bool {
    shape
        .capture_zone()
        .contains(to_local(ball_pos, container_pos, container_rotation))
}

/// Closed loop around the canvas.
pub fn frame_edges(frame: &Frame) -> [Segment; 4] {
    let bl = Vec2::ZERO;
    let br = Vec2::new(frame.width, 0.0);
    let tr = Vec2::new(frame.width, frame.height);
    let tl = Vec2::new(0.0, frame.height);
    [
        Segment { from: bl, to: br },
        Segment { from: br, to: tr },
        Segment { from: tr, to: tl },
        Segment { from: tl, to: bl },
    ]
}

/// Grey pad the opening levels draw under the ball. Drawn only; it has no
/// body, so a ball placed on it falls to whatever lies below.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LauncherPad {
    pub center: Vec2,
    pub size: Vec2,
}

impl LauncherPad {
    pub fn for_frame(frame: &Frame) -> Self {
        Self {
            center: frame.point(0.1, 0.2),
            size: frame.size(0.1, 0.02),
        }
    }

    /// Ball center for a ball of `radius` set down on the pad.
    pub fn ball_spawn(&self, radius: f32) -> Vec2 {
        self.center + Vec2::new(0.0, radius)
    }
}

use bevy::prelude::{Vec2, Vec3};

/// Canvas extents in pixels. Level scripts are written in "frame" space:
/// origin at the bottom-left corner, Y-up, measured in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fraction of the width, in pixels.
    pub fn w(&self, fraction: f32) -> f32 {
        self.width * fraction
    }

    /// Fraction of the height, in pixels.
    pub fn h(&self, fraction: f32) -> f32 {
        self.height * fraction
    }

    pub fn point(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.w(fx), self.h(fy))
    }

    pub fn size(&self, fw: f32, fh: f32) -> Vec2 {
        Vec2::new(self.w(fw), self.h(fh))
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Convert frame coordinates (bottom-left origin) to Bevy world coordinates
/// (canvas centered on the origin).
pub fn frame_to_world(frame: &Frame, p: Vec2, z: f32) -> Vec3 {
    (p - frame.center()).extend(z)
}

/// Convert Bevy world coordinates back to frame coordinates.
pub fn world_to_frame(frame: &Frame, world_xy: Vec2) -> Vec2 {
    world_xy + frame.center()
}

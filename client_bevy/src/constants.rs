/// Rapier pixels_per_meter scaling factor. Rapier divides internally by this
/// so we can work in pixel coordinates everywhere.
pub const PPM: f32 = 150.0;

pub const PHYSICS_DT: f32 = 1.0 / 120.0;
pub const PHYSICS_SUBSTEPS: usize = 1;
pub const PHYSICS_MAX_STEPS_PER_FRAME: u32 = 8;
pub const PHYSICS_MAX_CATCHUP_SECS: f64 = PHYSICS_DT as f64 * PHYSICS_MAX_STEPS_PER_FRAME as f64;

/// Half-thickness of the invisible frame edge colliders.
pub const EDGE_COLLIDER_THICKNESS: f32 = 5.0;

pub const OBSTACLE_RESTITUTION: f32 = 0.5;
pub const OBSTACLE_FRICTION: f32 = 0.3;
pub const EDGE_RESTITUTION: f32 = 0.8;
pub const EDGE_FRICTION: f32 = 0.3;
pub const CONTAINER_RESTITUTION: f32 = 0.2;
pub const CONTAINER_FRICTION: f32 = 0.5;

pub const CONTAINER_FLASH_SECS: f32 = 0.3;

pub const Z_OBSTACLE: f32 = 2.0;
pub const Z_CONTAINER: f32 = 3.0;
pub const Z_BALL: f32 = 4.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const BACKGROUND: u32 = 0x1a1030;
    pub const LAUNCHER: u32 = 0x808080;
    pub const CONTAINER_RIM: u32 = 0xffffff;
    pub const AIM: u32 = 0xffffff;
    pub const TIMER: u32 = 0xffffff;
    pub const TIMER_WARNING: u32 = 0xff3030;
    pub const WIN: u32 = 0xff00ff;
    pub const LOSE: u32 = 0xff2020;
    pub const STAR_FILLED: u32 = 0xffd020;
    pub const STAR_EMPTY: u32 = 0x505050;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0xFF8040);
        // Color::srgb returns Srgba, check the components
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 1.0).abs() < 1e-3);
            assert!((srgba.green - 0.502).abs() < 1e-2);
            assert!((srgba.blue - 0.251).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }

    #[test]
    fn catchup_cap_matches_step_budget() {
        // PHYSICS_DT is an f32, so the cap only agrees with 8/120 to f32 precision.
        assert!((PHYSICS_MAX_CATCHUP_SECS - 8.0 / 120.0).abs() < 1e-6);
        let steps = PHYSICS_MAX_CATCHUP_SECS / PHYSICS_DT as f64;
        assert!((steps - PHYSICS_MAX_STEPS_PER_FRAME as f64).abs() < 1e-9);
    }
}

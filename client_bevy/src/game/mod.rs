mod aim;
mod ball;
mod container;
mod core;
mod hud;
mod input;
mod level;
mod obstacles;
mod session;

pub use aim::AimPlugin;
pub use ball::BallPlugin;
pub use container::ContainerPlugin;
pub use core::CorePlugin;
pub(crate) use core::{FixedSet, UpdateSet};
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use level::LevelPlugin;
pub use session::SessionPlugin;

use bevy_rapier2d::prelude::{CollisionGroups, Group};
use catchball_shared::categories::CategoryMask;

pub(crate) fn collision_groups(mask: CategoryMask) -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(mask.memberships),
        Group::from_bits_truncate(mask.filter),
    )
}

//! Collision categories.
//!
//! Every body carries a membership bitmask and a filter bitmask. A pair of
//! bodies interacts only when each membership intersects the other's filter.

pub const NONE: u32 = 0;
pub const BALL: u32 = 0b1;
pub const CONTAINER: u32 = 0b10;
pub const PLATFORM: u32 = 0b100;
pub const WALL: u32 = 0b1000;
pub const BOX: u32 = 0b10000;
pub const EDGE: u32 = 0b100000;
pub const ALL: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMask {
    pub memberships: u32,
    pub filter: u32,
}

impl CategoryMask {
    pub const fn new(memberships: u32, filter: u32) -> Self {
        Self {
            memberships,
            filter,
        }
    }

    pub const fn ball() -> Self {
        Self::new(BALL, CONTAINER | PLATFORM | WALL)
    }

    pub const fn container() -> Self {
        Self::new(CONTAINER, BALL)
    }

    pub const fn platform() -> Self {
        Self::new(PLATFORM, ALL)
    }

    pub const fn wall() -> Self {
        Self::new(WALL, ALL)
    }

    pub fn interacts_with(self, other: CategoryMask) -> bool {
        (self.memberships & other.filter) != 0 && (other.memberships & self.filter) != 0
    }
}

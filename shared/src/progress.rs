use crate::LEVEL_COUNT;

/// Session-only record of which levels are open and the best rating per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    unlocked: u32,
    stars: [u8; LEVEL_COUNT as usize],
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            unlocked: 1,
            stars: [0; LEVEL_COUNT as usize],
        }
    }
}

impl Progress {
    pub fn is_unlocked(&self, level: u32) -> bool {
        (1..=LEVEL_COUNT).contains(&level) && level <= self.unlocked
    }

    pub fn stars(&self, level: u32) -> u8 {
        if !(1..=LEVEL_COUNT).contains(&level) {
            return 0;
        }
        self.stars[(level - 1) as usize]
    }

    pub fn unlocked_count(&self) -> u32 {
        self.unlocked
    }

    /// Keep the best rating for `level` and open the one after it.
    /// Returns `true` when the stored rating improved.
    pub fn record_win(&mut self, level: u32, stars: u8) -> bool {
        if !(1..=LEVEL_COUNT).contains(&level) {
            return false;
        }

        let slot = &mut self.stars[(level - 1) as usize];
        let stars = stars.min(3);
        let improved = stars > *slot;
        if improved {
            *slot = stars;
        }

        self.unlocked = self.unlocked.max((level + 1).min(LEVEL_COUNT));
        improved
    }

    pub fn total_stars(&self) -> u32 {
        self.stars.iter().map(|s| *s as u32).sum()
    }
}

/// Level that follows `level`, wrapping back to the first one after the last.
pub fn next_level(level: u32) -> u32 {
    if level >= LEVEL_COUNT {
        1
    } else {
        level + 1
    }
}

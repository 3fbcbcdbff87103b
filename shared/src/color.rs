/// Color tag shared by balls and containers. A ball only scores in a
/// container with the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColor {
    Red,
    Pink,
}

impl BallColor {
    pub const fn hex(self) -> u32 {
        match self {
            BallColor::Red => 0xff0000,
            BallColor::Pink => 0xff0080,
        }
    }

    pub fn matches(self, other: BallColor) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_use_pure_red_and_magenta_leaning_pink() {
        assert_eq!(BallColor::Red.hex(), 0xff0000);
        assert_eq!(BallColor::Pink.hex(), 0xff0080);
    }

    #[test]
    fn only_same_tag_matches() {
        assert!(BallColor::Red.matches(BallColor::Red));
        assert!(!BallColor::Red.matches(BallColor::Pink));
    }
}

use crate::config::GameConfig;

/// Countdown for a single attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LevelClock {
    pub elapsed: f32,
    pub running: bool,
}

impl LevelClock {
    pub fn started() -> Self {
        Self {
            elapsed: 0.0,
            running: true,
        }
    }

    pub fn remaining(&self, limit: f32) -> f32 {
        (limit - self.elapsed).max(0.0)
    }
}

/// Advance the clock. Returns `true` on the step where the limit is reached;
/// the clock stops itself at that point.
pub fn step_clock(mut clock: LevelClock, dt: f32, limit: f32) -> (LevelClock, bool) {
    if !clock.running {
        return (clock, false);
    }

    clock.elapsed += dt;
    if clock.elapsed >= limit {
        clock.running = false;
        return (clock, true);
    }
    (clock, false)
}

pub fn star_rating(elapsed: f32, config: &GameConfig) -> u8 {
    if elapsed <= config.three_star_secs {
        3
    } else if elapsed <= config.two_star_secs {
        2
    } else {
        1
    }
}

/// `m:ss` with whole seconds truncated.
pub fn format_time_left(remaining: f32) -> String {
    let total = remaining.max(0.0) as u32;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Whether the timer label should be drawn in its warning color this frame.
pub fn warning_blink_on(remaining: f32, warning_secs: f32) -> bool {
    remaining <= warning_secs && ((remaining * 2.0) as u32) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn stopped_clock_does_not_advance() {
        let (clock, expired) = step_clock(LevelClock::default(), DT, 90.0);
        assert_eq!(clock.elapsed, 0.0);
        assert!(!expired);
    }

    #[test]
    fn clock_expires_once_at_limit() {
        let mut clock = LevelClock::started();
        let mut expirations = 0;
        for _ in 0..200 {
            let (next, expired) = step_clock(clock, 0.5, 90.0);
            clock = next;
            if expired {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert!(!clock.running);
        assert_eq!(clock.elapsed, 90.0);
        assert_eq!(clock.remaining(90.0), 0.0);
    }

    #[test]
    fn stars_follow_thresholds() {
        let config = GameConfig::default();
        assert_eq!(star_rating(0.0, &config), 3);
        assert_eq!(star_rating(10.0, &config), 3);
        assert_eq!(star_rating(10.01, &config), 2);
        assert_eq!(star_rating(20.0, &config), 2);
        assert_eq!(star_rating(20.5, &config), 1);
        assert_eq!(star_rating(89.0, &config), 1);
    }

    #[test]
    fn time_left_formats_minutes_and_padded_seconds() {
        assert_eq!(format_time_left(90.0), "1:30");
        assert_eq!(format_time_left(69.9), "1:09");
        assert_eq!(format_time_left(5.5), "0:05");
        assert_eq!(format_time_left(-3.0), "0:00");
    }

    #[test]
    fn warning_blinks_only_when_low() {
        assert!(!warning_blink_on(30.0, 10.0));
        assert!(warning_blink_on(10.0, 10.0));
        assert!(!warning_blink_on(9.6, 10.0));
        assert!(warning_blink_on(9.4, 10.0));
    }
}

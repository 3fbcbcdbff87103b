use bevy::prelude::*;

use crate::constants::Colors;
use crate::game::session::Phase;

pub(super) const EDGE_MARGIN: f32 = 12.0;
pub(super) const BUTTON_HEIGHT: f32 = 32.0;
pub(super) const STAR_SIZE: f32 = 28.0;
pub(super) const STAR_COUNT: u8 = 3;
pub(super) const PANEL_WIDTH: f32 = 260.0;

pub(super) const UI_DIM: u32 = 0xb0b0c0;

#[derive(Component)]
pub(super) struct HudTimerText;

#[derive(Component)]
pub(super) struct HudLevelText;

#[derive(Component)]
pub(super) struct HudRestartButton;

#[derive(Component)]
pub(super) struct HudResultPanel;

#[derive(Component)]
pub(super) struct HudResultTitle;

#[derive(Component)]
pub(super) struct HudStarPip {
    pub(super) index: u8,
}

#[derive(Component)]
pub(super) struct HudPrimaryButton;

#[derive(Component)]
pub(super) struct HudPrimaryButtonText;

/// What the result overlay shows for a finished attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ResultView {
    pub(super) title: &'static str,
    pub(super) title_color: u32,
    pub(super) stars: u8,
    pub(super) button: &'static str,
}

pub(super) fn result_view(phase: Phase) -> Option<ResultView> {
    match phase {
        Phase::Playing => None,
        Phase::Won { stars } => Some(ResultView {
            title: "YOU WIN!",
            title_color: Colors::WIN,
            stars,
            button: "Next",
        }),
        Phase::Lost(_) => Some(ResultView {
            title: "YOU LOSE",
            title_color: Colors::LOSE,
            stars: 0,
            button: "Try again",
        }),
    }
}

pub(super) fn panel_bg(alpha: f32) -> Color {
    Color::srgba(10.0 / 255.0, 6.0 / 255.0, 24.0 / 255.0, alpha)
}

pub(super) fn panel_border(alpha: f32) -> Color {
    Color::srgba(1.0, 1.0, 1.0, alpha)
}

#[cfg(test)]
mod tests {
    use crate::game::session::LossReason;

    use super::*;

    #[test]
    fn no_overlay_while_playing() {
        assert_eq!(result_view(Phase::Playing), None);
    }

    #[test]
    fn win_overlay_shows_earned_stars() {
        let view = result_view(Phase::Won { stars: 2 }).unwrap();
        assert_eq!(view.title, "YOU WIN!");
        assert_eq!(view.stars, 2);
        assert_eq!(view.button, "Next");
    }

    #[test]
    fn lose_overlay_offers_retry() {
        for reason in [LossReason::TimeUp, LossReason::BallLost] {
            let view = result_view(Phase::Lost(reason)).unwrap();
            assert_eq!(view.title, "YOU LOSE");
            assert_eq!(view.stars, 0);
            assert_eq!(view.button, "Try again");
        }
    }
}

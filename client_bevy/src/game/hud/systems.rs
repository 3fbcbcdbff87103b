use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use catchball_shared::rating::{format_time_left, warning_blink_on};

use crate::constants::{color_from_hex, Colors};
use crate::game::core::GameSettings;
use crate::game::input::InputState;
use crate::game::level::LoadLevelMessage;
use crate::game::session::{primary_action, Session};

use super::types::{
    result_view, HudLevelText, HudPrimaryButton, HudPrimaryButtonText, HudRestartButton,
    HudResultPanel, HudResultTitle, HudStarPip, HudTimerText,
};

type ButtonInteractionQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Interaction,
        Option<&'static HudRestartButton>,
        Option<&'static HudPrimaryButton>,
    ),
    (Changed<Interaction>, With<Button>),
>;

type ResultTextSet<'w, 's> = ParamSet<
    'w,
    's,
    (
        Query<'w, 's, (&'static mut Text, &'static mut TextColor), With<HudResultTitle>>,
        Query<'w, 's, &'static mut Text, With<HudPrimaryButtonText>>,
    ),
>;

#[derive(SystemParam)]
pub(super) struct ButtonQueries<'w, 's> {
    query: ButtonInteractionQuery<'w, 's>,
}

#[derive(SystemParam)]
pub(super) struct ResultPanelQueries<'w, 's> {
    panel: Query<'w, 's, &'static mut Visibility, With<HudResultPanel>>,
    texts: ResultTextSet<'w, 's>,
    pips: Query<'w, 's, (&'static HudStarPip, &'static mut BackgroundColor)>,
}

/// Restart and the overlay's primary action, from buttons or keys.
pub(super) fn handle_navigation(
    buttons: ButtonQueries,
    input: Res<InputState>,
    session: Res<Session>,
    mut loads: MessageWriter<LoadLevelMessage>,
) {
    let mut restart = input.restart;
    let mut primary = input.confirm;

    for (interaction, restart_button, primary_button) in &buttons.query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        restart |= restart_button.is_some();
        primary |= primary_button.is_some();
    }

    if primary {
        if let Some(level) = primary_action(&session) {
            loads.write(LoadLevelMessage { level });
            return;
        }
    }
    if restart && session.level > 0 {
        info!("Restarting level {}", session.level);
        loads.write(LoadLevelMessage {
            level: session.level,
        });
    }
}

pub(super) fn update_timer_ui(
    session: Res<Session>,
    settings: Res<GameSettings>,
    mut q_timer: Query<(&mut Text, &mut TextColor), With<HudTimerText>>,
) {
    let Ok((mut text, mut color)) = q_timer.single_mut() else {
        return;
    };

    let remaining = session.clock.remaining(settings.config.level_time_limit);
    let label = format_time_left(remaining);
    if text.0 != label {
        text.0 = label;
    }

    let warn = session.is_playing()
        && warning_blink_on(remaining, settings.config.low_time_warning_secs);
    color.0 = color_from_hex(if warn {
        Colors::TIMER_WARNING
    } else {
        Colors::TIMER
    });
}

pub(super) fn update_level_ui(
    session: Res<Session>,
    mut q_level: Query<&mut Text, With<HudLevelText>>,
) {
    if !session.is_changed() {
        return;
    }
    if let Ok(mut text) = q_level.single_mut() {
        text.0 = format!("Level {}", session.level);
    }
}

pub(super) fn update_result_panel(session: Res<Session>, mut queries: ResultPanelQueries) {
    if !session.is_changed() {
        return;
    }

    let view = result_view(session.phase);

    if let Ok(mut visibility) = queries.panel.single_mut() {
        *visibility = if view.is_some() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    let Some(view) = view else {
        return;
    };

    if let Ok((mut text, mut color)) = queries.texts.p0().single_mut() {
        text.0 = view.title.to_string();
        color.0 = color_from_hex(view.title_color);
    }
    if let Ok(mut text) = queries.texts.p1().single_mut() {
        text.0 = view.button.to_string();
    }
    for (pip, mut fill) in &mut queries.pips {
        fill.0 = color_from_hex(if pip.index < view.stars {
            Colors::STAR_FILLED
        } else {
            Colors::STAR_EMPTY
        });
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use catchball_shared::config::GameConfig;

    use crate::game::session::{LossReason, Phase};

    use super::*;

    fn assert_color_close(actual: Color, expected: Color) {
        let a = actual.to_srgba();
        let e = expected.to_srgba();
        let eps = 1e-4;
        assert!((a.red - e.red).abs() < eps, "red {} != {}", a.red, e.red);
        assert!(
            (a.green - e.green).abs() < eps,
            "green {} != {}",
            a.green,
            e.green
        );
        assert!(
            (a.blue - e.blue).abs() < eps,
            "blue {} != {}",
            a.blue,
            e.blue
        );
    }

    fn make_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameSettings::new(GameConfig::default()));
        let mut session = Session::default();
        session.begin(3, 1);
        app.insert_resource(session);
        app.init_resource::<InputState>();
        app.add_message::<LoadLevelMessage>();
        app
    }

    fn drain_loads(app: &mut App) -> Vec<u32> {
        app.world_mut()
            .resource_mut::<Messages<LoadLevelMessage>>()
            .drain()
            .map(|m| m.level)
            .collect()
    }

    #[test]
    fn timer_counts_down_in_minutes_and_seconds() {
        let mut app = make_test_app();
        app.add_systems(Update, update_timer_ui);
        let timer = app
            .world_mut()
            .spawn((HudTimerText, Text::new(""), TextColor(Color::NONE)))
            .id();

        app.world_mut().resource_mut::<Session>().clock.elapsed = 20.4;
        app.update();

        assert_eq!(&app.world().get::<Text>(timer).unwrap().0, "1:09");
        assert_color_close(
            app.world().get::<TextColor>(timer).unwrap().0,
            color_from_hex(Colors::TIMER),
        );
    }

    #[test]
    fn timer_blinks_red_when_low() {
        let mut app = make_test_app();
        app.add_systems(Update, update_timer_ui);
        let timer = app
            .world_mut()
            .spawn((HudTimerText, Text::new(""), TextColor(Color::NONE)))
            .id();

        // 9.9 s left: floor(19.8) = 19 is odd, so the label is white.
        app.world_mut().resource_mut::<Session>().clock.elapsed = 80.1;
        app.update();
        assert_color_close(
            app.world().get::<TextColor>(timer).unwrap().0,
            color_from_hex(Colors::TIMER),
        );

        // 9.4 s left: floor(18.8) = 18 is even, so the label is red.
        app.world_mut().resource_mut::<Session>().clock.elapsed = 80.6;
        app.update();
        assert_eq!(&app.world().get::<Text>(timer).unwrap().0, "0:09");
        assert_color_close(
            app.world().get::<TextColor>(timer).unwrap().0,
            color_from_hex(Colors::TIMER_WARNING),
        );
    }

    #[test]
    fn result_panel_shows_win_with_stars() {
        let mut app = make_test_app();
        app.add_systems(Update, update_result_panel);

        let panel = app
            .world_mut()
            .spawn((HudResultPanel, Visibility::Hidden))
            .id();
        let title = app
            .world_mut()
            .spawn((HudResultTitle, Text::new(""), TextColor(Color::NONE)))
            .id();
        let button = app
            .world_mut()
            .spawn((HudPrimaryButtonText, Text::new("")))
            .id();
        let pips: Vec<Entity> = (0..3)
            .map(|index| {
                app.world_mut()
                    .spawn((HudStarPip { index }, BackgroundColor(Color::NONE)))
                    .id()
            })
            .collect();

        app.world_mut().resource_mut::<Session>().phase = Phase::Won { stars: 2 };
        app.update();

        assert_eq!(
            *app.world().get::<Visibility>(panel).unwrap(),
            Visibility::Visible
        );
        assert_eq!(&app.world().get::<Text>(title).unwrap().0, "YOU WIN!");
        assert_eq!(&app.world().get::<Text>(button).unwrap().0, "Next");
        let filled = color_from_hex(Colors::STAR_FILLED);
        let empty = color_from_hex(Colors::STAR_EMPTY);
        assert_color_close(app.world().get::<BackgroundColor>(pips[0]).unwrap().0, filled);
        assert_color_close(app.world().get::<BackgroundColor>(pips[1]).unwrap().0, filled);
        assert_color_close(app.world().get::<BackgroundColor>(pips[2]).unwrap().0, empty);
    }

    #[test]
    fn result_panel_hides_while_playing() {
        let mut app = make_test_app();
        app.add_systems(Update, update_result_panel);
        let panel = app
            .world_mut()
            .spawn((HudResultPanel, Visibility::Visible))
            .id();

        app.update();

        assert_eq!(
            *app.world().get::<Visibility>(panel).unwrap(),
            Visibility::Hidden
        );
    }

    #[test]
    fn level_label_tracks_session() {
        let mut app = make_test_app();
        app.add_systems(Update, update_level_ui);
        let label = app.world_mut().spawn((HudLevelText, Text::new(""))).id();

        app.update();
        assert_eq!(&app.world().get::<Text>(label).unwrap().0, "Level 3");
    }

    #[test]
    fn restart_key_reloads_current_level() {
        let mut app = make_test_app();
        app.add_systems(Update, handle_navigation);
        app.world_mut().resource_mut::<InputState>().restart = true;

        app.update();
        assert_eq!(drain_loads(&mut app), vec![3]);
    }

    #[test]
    fn enter_moves_to_next_level_after_win() {
        let mut app = make_test_app();
        app.add_systems(Update, handle_navigation);
        app.world_mut().resource_mut::<Session>().phase = Phase::Won { stars: 3 };
        app.world_mut().resource_mut::<InputState>().confirm = true;

        app.update();
        assert_eq!(drain_loads(&mut app), vec![4]);
    }

    #[test]
    fn enter_retries_after_loss() {
        let mut app = make_test_app();
        app.add_systems(Update, handle_navigation);
        app.world_mut().resource_mut::<Session>().phase = Phase::Lost(LossReason::TimeUp);
        app.world_mut().resource_mut::<InputState>().confirm = true;

        app.update();
        assert_eq!(drain_loads(&mut app), vec![3]);
    }

    #[test]
    fn enter_does_nothing_while_playing() {
        let mut app = make_test_app();
        app.add_systems(Update, handle_navigation);
        app.world_mut().resource_mut::<InputState>().confirm = true;

        app.update();
        assert!(drain_loads(&mut app).is_empty());
    }

    #[test]
    fn pressed_primary_button_triggers_action() {
        let mut app = make_test_app();
        app.add_systems(Update, handle_navigation);
        app.world_mut().resource_mut::<Session>().phase = Phase::Won { stars: 1 };
        app.world_mut().resource_mut::<Session>().level = 15;
        app.world_mut()
            .spawn((Button, HudPrimaryButton, Interaction::Pressed));

        app.update();
        assert_eq!(drain_loads(&mut app), vec![1]);
    }
}

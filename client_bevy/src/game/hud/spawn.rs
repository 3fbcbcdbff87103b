use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors};

use super::types::{
    panel_bg, panel_border, HudLevelText, HudPrimaryButton, HudPrimaryButtonText,
    HudRestartButton, HudResultPanel, HudResultTitle, HudStarPip, HudTimerText, BUTTON_HEIGHT,
    EDGE_MARGIN, PANEL_WIDTH, STAR_COUNT, STAR_SIZE, UI_DIM,
};

pub(super) fn spawn_hud(mut commands: Commands) {
    let medium = TextFont::from_font_size(16.0);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(EDGE_MARGIN),
            top: Val::Px(EDGE_MARGIN),
            ..default()
        },
        Text::new(""),
        medium.clone(),
        TextColor(color_from_hex(UI_DIM)),
        HudLevelText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(EDGE_MARGIN),
            top: Val::Px(EDGE_MARGIN),
            ..default()
        },
        Text::new("0:00"),
        TextFont::from_font_size(24.0),
        TextColor(color_from_hex(Colors::TIMER)),
        HudTimerText,
    ));

    commands
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(EDGE_MARGIN),
                bottom: Val::Px(EDGE_MARGIN),
                height: Val::Px(BUTTON_HEIGHT),
                padding: UiRect::horizontal(Val::Px(12.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(panel_bg(0.6)),
            BorderColor::all(panel_border(0.4)),
            BorderRadius::MAX,
            HudRestartButton,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Restart"),
                TextFont::from_font_size(14.0),
                TextColor(panel_border(0.8)),
            ));
        });

    // Full-screen layer that centers the result panel.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            HudResultPanel,
        ))
        .with_children(|layer| {
            layer
                .spawn((
                    Node {
                        width: Val::Px(PANEL_WIDTH),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(panel_bg(0.92)),
                    BorderColor::all(panel_border(0.3)),
                    BorderRadius::all(Val::Px(8.0)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(""),
                        TextFont::from_font_size(32.0),
                        TextColor(color_from_hex(Colors::WIN)),
                        HudResultTitle,
                    ));

                    panel
                        .spawn(Node {
                            flex_direction: FlexDirection::Row,
                            column_gap: Val::Px(10.0),
                            ..default()
                        })
                        .with_children(|row| {
                            for index in 0..STAR_COUNT {
                                row.spawn((
                                    Node {
                                        width: Val::Px(STAR_SIZE),
                                        height: Val::Px(STAR_SIZE),
                                        border: UiRect::all(Val::Px(1.0)),
                                        ..default()
                                    },
                                    BackgroundColor(color_from_hex(Colors::STAR_EMPTY)),
                                    BorderColor::all(panel_border(0.5)),
                                    BorderRadius::MAX,
                                    HudStarPip { index },
                                ));
                            }
                        });

                    panel
                        .spawn((
                            Button,
                            Node {
                                height: Val::Px(BUTTON_HEIGHT),
                                padding: UiRect::horizontal(Val::Px(20.0)),
                                justify_content: JustifyContent::Center,
                                align_items: AlignItems::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BackgroundColor(panel_bg(0.8)),
                            BorderColor::all(panel_border(0.6)),
                            BorderRadius::MAX,
                            HudPrimaryButton,
                        ))
                        .with_children(|button| {
                            button.spawn((
                                Text::new(""),
                                medium,
                                TextColor(panel_border(0.9)),
                                HudPrimaryButtonText,
                            ));
                        });
                });
        });
}

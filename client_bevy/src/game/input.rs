use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::core::MainCamera;
use super::UpdateSet;

pub struct InputPlugin;

/// Pointer and key state for the current frame, in world coordinates.
/// Mouse and the first touch are merged into one pointer.
#[derive(Resource, Default, Debug)]
pub(crate) struct InputState {
    pub(crate) pointer: Option<Vec2>,
    pub(crate) pressed: bool,
    pub(crate) released: bool,
    pub(crate) cancelled: bool,
    pub(crate) restart: bool,
    pub(crate) confirm: bool,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .add_systems(Update, input_system.in_set(UpdateSet::Input));
    }
}

fn input_system(
    mut input: ResMut<InputState>,
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    let touch_release = touches.iter_just_released().next().map(|t| t.position());

    input.pressed = mouse.just_pressed(MouseButton::Left) || touches.any_just_pressed();
    input.released = mouse.just_released(MouseButton::Left) || touch_release.is_some();
    input.cancelled = touches.any_just_canceled();
    input.restart = keys.just_pressed(KeyCode::KeyR);
    input.confirm = keys.just_pressed(KeyCode::Enter) || keys.just_pressed(KeyCode::NumpadEnter);

    let Ok(window) = q_window.single() else {
        input.pointer = None;
        return;
    };
    if !window.focused {
        input.cancelled = true;
    }

    let screen = touches
        .iter()
        .next()
        .map(|t| t.position())
        .or(touch_release)
        .or_else(|| window.cursor_position());

    input.pointer = screen.and_then(|pos| {
        let (camera, cam_tf) = q_camera.single().ok()?;
        camera.viewport_to_world_2d(cam_tf, pos).ok()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<InputState>();
        app.init_resource::<ButtonInput<MouseButton>>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<Touches>();
        app.add_systems(Update, input_system);
        app
    }

    #[test]
    fn keys_map_to_navigation_flags() {
        let mut app = make_test_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update();

        let input = app.world().resource::<InputState>();
        assert!(input.restart);
        assert!(!input.confirm);

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.clear();
        keys.press(KeyCode::Enter);
        app.update();

        let input = app.world().resource::<InputState>();
        assert!(!input.restart);
        assert!(input.confirm);
    }

    #[test]
    fn mouse_press_and_release_are_edges() {
        let mut app = make_test_app();
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert!(app.world().resource::<InputState>().pressed);

        let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        mouse.clear();
        mouse.release(MouseButton::Left);
        app.update();

        let input = app.world().resource::<InputState>();
        assert!(!input.pressed);
        assert!(input.released);
    }

    #[test]
    fn unfocused_window_cancels() {
        let mut app = make_test_app();
        let window = app
            .world_mut()
            .spawn((
                Window {
                    focused: false,
                    ..default()
                },
                PrimaryWindow,
            ))
            .id();
        app.update();
        assert!(app.world().resource::<InputState>().cancelled);

        app.world_mut().get_mut::<Window>(window).unwrap().focused = true;
        app.update();
        assert!(!app.world().resource::<InputState>().cancelled);
    }

    #[test]
    fn no_window_means_no_pointer() {
        let mut app = make_test_app();
        app.world_mut().resource_mut::<InputState>().pointer = Some(Vec2::ONE);
        app.update();
        assert!(app.world().resource::<InputState>().pointer.is_none());
    }
}

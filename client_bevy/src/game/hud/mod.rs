mod spawn;
mod systems;
mod types;

use bevy::prelude::*;

use super::UpdateSet;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn::spawn_hud)
            .add_systems(Update, systems::handle_navigation.in_set(UpdateSet::Level))
            .add_systems(
                Update,
                (
                    systems::update_timer_ui,
                    systems::update_level_ui,
                    systems::update_result_panel,
                )
                    .chain()
                    .in_set(UpdateSet::Visuals),
            );
    }
}

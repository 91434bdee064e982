//! Egui panels: toolbar and tile inspector.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod tile_info_panel;
pub mod toolbar;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Update, (toolbar::toolbar, tile_info_panel::tile_info_panel));
    }
}

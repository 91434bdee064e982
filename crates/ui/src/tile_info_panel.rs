//! Tile inspector window.
//!
//! Shows the selected tile in full (kind, positions, height, resources,
//! entities, navigation table) and a one-line summary of the hovered tile.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use grid::coords::{GridPos, IsoProjection};
use grid::tile::TileRecord;
use grid::tile_map::TileMap;
use rendering::input::CursorGridPos;

fn tag_list(ui: &mut egui::Ui, label: &str, tags: &std::collections::BTreeSet<String>) {
    if tags.is_empty() {
        ui.label(format!("{label}: none"));
    } else {
        let joined: Vec<&str> = tags.iter().map(String::as_str).collect();
        ui.label(format!("{label}: {}", joined.join(", ")));
    }
}

fn tile_details(ui: &mut egui::Ui, pos: GridPos, tile: &TileRecord, proj: &IsoProjection) {
    let world = proj.grid_to_world(pos, tile.height);
    ui.label(format!("Kind: {}", tile.kind));
    ui.label(format!("Grid: {pos}"));
    ui.label(format!(
        "World: ({:.2}, {:.2}, {:.2})",
        world.x, world.y, world.z
    ));
    ui.label(format!("Height: {:.2}", tile.height));
    tag_list(ui, "Resources", &tile.resources);
    tag_list(ui, "Entities", &tile.entities);

    ui.separator();
    ui.label("Navigation:");
    if tile.navigation.is_empty() {
        ui.label("  (no travel modes listed)");
    }
    for (mode, passable) in &tile.navigation {
        let mark = if *passable { "yes" } else { "no" };
        ui.label(format!("  {mode}: {mark}"));
    }
}

pub fn tile_info_panel(
    mut contexts: EguiContexts,
    map: Res<TileMap>,
    proj: Res<IsoProjection>,
    cursor: Res<CursorGridPos>,
) {
    egui::Window::new("Tile Inspector")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .default_width(240.0)
        .show(contexts.ctx_mut(), |ui| {
            match map.selected_pos().and_then(|pos| map.get(pos).map(|t| (pos, t))) {
                Some((pos, tile)) => tile_details(ui, pos, tile, &proj),
                None => {
                    ui.label("No tile selected.");
                    ui.label("Click a tile with the Inspect tool.");
                }
            }

            ui.separator();
            if cursor.valid {
                match map.get(cursor.grid) {
                    Some(tile) => ui.label(format!(
                        "Hover: {} at {} (h {:.2})",
                        tile.kind, cursor.grid, tile.height
                    )),
                    None => ui.label(format!("Hover: empty cell {}", cursor.grid)),
                };
            } else {
                ui.label("Hover: off grid");
            }
        });
}

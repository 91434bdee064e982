//! Toolbar window: tool selection, place-kind picker, map save/load, status.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::PathBuf;

use grid::map_io::{LoadMapEvent, SaveMapEvent};
use grid::tile_map::TileMap;
use rendering::input::{ActiveTool, PlaceKind, StatusMessage, QUICKSAVE_PATH};

const PLACE_KINDS: [&str; 4] = ["grass", "sand", "water", "rock"];

const TOOLS: [(ActiveTool, &str); 5] = [
    (ActiveTool::Inspect, "I"),
    (ActiveTool::Place, "P"),
    (ActiveTool::Remove, "X"),
    (ActiveTool::Raise, "R"),
    (ActiveTool::Lower, "L"),
];

#[allow(clippy::too_many_arguments)]
pub fn toolbar(
    mut contexts: EguiContexts,
    map: Res<TileMap>,
    mut tool: ResMut<ActiveTool>,
    mut place_kind: ResMut<PlaceKind>,
    status: Res<StatusMessage>,
    mut save_events: EventWriter<SaveMapEvent>,
    mut load_events: EventWriter<LoadMapEvent>,
) {
    egui::Window::new("Tilescape")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .default_width(220.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(format!(
                "Tiles: {}  ({}x{})",
                map.len(),
                map.dimensions.0,
                map.dimensions.1
            ));

            ui.separator();
            ui.horizontal_wrapped(|ui| {
                for (t, key) in TOOLS {
                    let selected = *tool == t;
                    if ui
                        .selectable_label(selected, format!("{} ({key})", t.label()))
                        .clicked()
                    {
                        *tool = t;
                    }
                }
            });

            if *tool == ActiveTool::Place {
                ui.horizontal(|ui| {
                    ui.label("Kind:");
                    for kind in PLACE_KINDS {
                        if ui
                            .selectable_label(place_kind.0 == kind, kind)
                            .clicked()
                        {
                            place_kind.0 = kind.to_string();
                        }
                    }
                });
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save map (F5)").clicked() {
                    save_events.send(SaveMapEvent(PathBuf::from(QUICKSAVE_PATH)));
                }
                if ui.button("Load map (F9)").clicked() {
                    load_events.send(LoadMapEvent(PathBuf::from(QUICKSAVE_PATH)));
                }
            });

            if status.timer > 0.0 && !status.text.is_empty() {
                let color = if status.is_error {
                    egui::Color32::from_rgb(220, 80, 80)
                } else {
                    egui::Color32::from_rgb(180, 220, 180)
                };
                ui.colored_label(color, &status.text);
            }

            egui::CollapsingHeader::new("Keybinds")
                .default_open(false)
                .show(ui, |ui| {
                    ui.label("WASD / arrows: pan camera");
                    ui.label("Right drag: orbit, wheel: zoom");
                    ui.label("Middle / left drag: pan");
                    ui.label("Home: recenter on map");
                    ui.label("I/P/X/R/L: switch tool");
                    ui.label("Escape: deselect");
                    ui.label("F3: dump ASCII map to log");
                    ui.label("F5 / F9: save / load map");
                });
        });
}

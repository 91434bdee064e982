use bevy::prelude::*;

use grid::coords::GridPos;

/// The tool applied by a left click on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Resource)]
pub enum ActiveTool {
    #[default]
    Inspect,
    Place,
    Remove,
    Raise,
    Lower,
}

impl ActiveTool {
    pub fn label(self) -> &'static str {
        match self {
            ActiveTool::Inspect => "Inspect",
            ActiveTool::Place => "Place",
            ActiveTool::Remove => "Remove",
            ActiveTool::Raise => "Raise",
            ActiveTool::Lower => "Lower",
        }
    }
}

/// The tile kind the Place tool stamps. Edited from the toolbar.
#[derive(Resource, Debug, Clone)]
pub struct PlaceKind(pub String);

impl Default for PlaceKind {
    fn default() -> Self {
        Self("grass".to_string())
    }
}

/// Where the cursor points on the grid this frame. `valid` is false when the
/// cursor is off-window or the pick ray misses the ground plane.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CursorGridPos {
    pub grid: GridPos,
    pub world: Vec3,
    pub valid: bool,
}

/// One-line status feedback from tools, shown in the toolbar and cleared
/// after a few seconds.
#[derive(Resource, Default)]
pub struct StatusMessage {
    pub text: String,
    pub timer: f32,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) {
        self.text = text.into();
        self.timer = 4.0;
        self.is_error = is_error;
    }
}

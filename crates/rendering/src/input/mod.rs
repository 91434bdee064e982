//! Input handling, split by concern:
//! - `types`: resources (ActiveTool, CursorGridPos, StatusMessage, ...)
//! - `cursor`: cursor-to-grid picking, hover highlight, status tick
//! - `tool_handler`: left-click tool dispatch
//! - `keyboard`: tool hotkeys, escape, debug dump, quick save/load

mod cursor;
mod keyboard;
mod tool_handler;
mod types;

#[cfg(test)]
mod tests;

pub use types::{ActiveTool, CursorGridPos, PlaceKind, StatusMessage};

pub use cursor::{ray_to_ground, tick_status_message, update_cursor_grid_pos, update_hover};

pub use tool_handler::{apply_tool_at, handle_tool_input};

pub use keyboard::{
    debug_dump_map, handle_escape_key, keyboard_tool_switch, quick_save_load, QUICKSAVE_PATH,
};

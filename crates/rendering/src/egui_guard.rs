//! Egui input guard: prevents click-through from UI panels to the world.
//!
//! While egui is handling pointer input, world-level input systems should
//! skip processing to avoid placing or removing tiles underneath the UI.

use bevy_egui::EguiContexts;

/// Returns `true` when egui wants the pointer — the cursor is over an egui
/// panel or egui is mid-drag. Tool systems early-return when this is `true`.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

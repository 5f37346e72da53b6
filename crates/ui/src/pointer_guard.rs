//! Keeps pointer input over egui panels from reaching the city.
//!
//! Camera drags and block picking read [`PointerOverUi`]; this system is the
//! only writer.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use rendering::interaction::PointerOverUi;

/// `true` when egui wants the pointer: the cursor is over a panel or egui is
/// handling a drag or click.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

pub fn update_pointer_over_ui(mut contexts: EguiContexts, mut over_ui: ResMut<PointerOverUi>) {
    let wants = egui_wants_pointer(&mut contexts);
    if over_ui.0 != wants {
        over_ui.0 = wants;
    }
}

use imgui::{Condition, WindowFlags};

use super::panels::ItemStatus;
use crate::placement::PlacementAction;

const BUTTON_SIZE: [f32; 2] = [120.0, 60.0];

/// Cancel / Confirm pair shown while a model is selected
pub fn placement_buttons(
    ui: &imgui::Ui,
    name: &str,
    can_confirm: bool,
    status: ItemStatus,
) -> Option<PlacementAction> {
    let [width, height] = ui.io().display_size;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let panel_size = [BUTTON_SIZE[0] * 2.0 + 48.0, BUTTON_SIZE[1] + 56.0];
    let mut action = None;

    ui.window("Place model")
        .position(
            [(width - panel_size[0]) * 0.5, height - panel_size[1] - 20.0],
            Condition::Always,
        )
        .size(panel_size, Condition::Always)
        .bg_alpha(0.5)
        .flags(WindowFlags::NO_DECORATION | WindowFlags::NO_MOVE | WindowFlags::NO_SAVED_SETTINGS)
        .build(|| {
            match status.label() {
                Some(label) => ui.text_disabled(format!("{} ({})", name, label)),
                None => ui.text(name),
            }

            if ui.button_with_size("Cancel", BUTTON_SIZE) {
                action = Some(PlacementAction::Cancel);
            }
            ui.same_line();
            ui.disabled(!can_confirm, || {
                if ui.button_with_size("Place", BUTTON_SIZE) {
                    action = Some(PlacementAction::Confirm);
                }
            });
        });

    action
}

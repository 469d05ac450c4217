use std::collections::HashMap;

use imgui::{Condition, TextureId, WindowFlags};

use super::panels::{ItemStatus, PickerItem, THUMBNAIL_SIZE};
use crate::placement::PlacementAction;
use crate::registry::EntryId;

const PICKER_HEIGHT: f32 = THUMBNAIL_SIZE + 60.0;

/// Imgui texture for each registry entry's thumbnail
pub type ThumbnailTextures = HashMap<EntryId, TextureId>;

/// Bottom-docked, horizontally scrolling row of thumbnails
///
/// Returns `Pick` for the thumbnail clicked this frame.
pub fn model_picker(
    ui: &imgui::Ui,
    items: &[PickerItem],
    textures: &ThumbnailTextures,
) -> Option<PlacementAction> {
    let [width, height] = ui.io().display_size;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let mut picked = None;
    ui.window("Models")
        .position([0.0, height - PICKER_HEIGHT], Condition::Always)
        .size([width, PICKER_HEIGHT], Condition::Always)
        .bg_alpha(0.5)
        .flags(WindowFlags::NO_DECORATION | WindowFlags::NO_MOVE | WindowFlags::NO_SAVED_SETTINGS)
        .build(|| {
            if items.is_empty() {
                ui.text_disabled("No models found");
                return;
            }

            ui.child_window("model_row")
                .size([0.0, 0.0])
                .horizontal_scrollbar(true)
                .build(|| {
                    for (index, item) in items.iter().enumerate() {
                        if index > 0 {
                            ui.same_line();
                        }
                        if thumbnail_tile(ui, item, textures.get(&item.id).copied()) {
                            picked = Some(PlacementAction::Pick(item.id));
                        }
                    }
                });
        });

    picked
}

/// One thumbnail with its status caption; true when clicked
fn thumbnail_tile(ui: &imgui::Ui, item: &PickerItem, texture: Option<TextureId>) -> bool {
    let _id = ui.push_id(item.name.as_str());
    let mut clicked = false;

    ui.group(|| {
        match texture {
            Some(texture) => {
                imgui::Image::new(texture, [THUMBNAIL_SIZE, THUMBNAIL_SIZE]).build(ui);
                clicked = ui.is_item_clicked();
            }
            None => {
                clicked = ui.button_with_size(&item.name, [THUMBNAIL_SIZE, THUMBNAIL_SIZE]);
            }
        }
        if ui.is_item_hovered() {
            ui.tooltip_text(&item.name);
        }

        match item.status.label() {
            Some(label) if item.status == ItemStatus::Unavailable => {
                ui.text_colored([0.9, 0.4, 0.4, 1.0], label)
            }
            Some(label) => ui.text_disabled(label),
            None => ui.text(""),
        }
    });

    clicked
}

//! # User Interface
//!
//! Dear ImGui panels over the 3D view. The panels only read the placement
//! state and the registry; clicks come back as [`PlacementAction`]s that the
//! app dispatches to the store.
//!
//! - [`UiManager`] - imgui context, input capture, thumbnail textures
//! - [`panels`] - which panel is visible and what it lists
//! - [`model_picker`] - horizontal thumbnail picker
//! - [`placement_buttons`] - Cancel / Place buttons
//!
//! [`PlacementAction`]: crate::placement::PlacementAction

pub mod joystick_view;
pub mod manager;
pub mod panels;
pub mod picker;
pub mod placement_buttons;

pub use joystick_view::draw_joystick;
pub use manager::UiManager;
pub use panels::{ItemStatus, Panel, PickerItem};
pub use picker::{model_picker, ThumbnailTextures};
pub use placement_buttons::placement_buttons;

use crate::placement::PlacementAction;

/// Builds whichever panel is current; returns the action the user took
pub fn placement_ui(
    ui: &imgui::Ui,
    panel: &Panel,
    textures: &ThumbnailTextures,
) -> Option<PlacementAction> {
    match panel {
        Panel::Picker(items) => model_picker(ui, items, textures),
        Panel::Confirm {
            name,
            can_confirm,
            status,
            ..
        } => placement_buttons(ui, name, *can_confirm, *status),
    }
}

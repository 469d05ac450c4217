use crate::overlay::OverlayScene;

const BASE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
const STICK_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.7];

/// Draws the overlay joystick behind the UI windows
pub fn draw_joystick(ui: &imgui::Ui, overlay: &OverlayScene) {
    let Some(joystick) = overlay.joystick() else {
        return;
    };

    let base = overlay.to_view(joystick.position);
    let stick = overlay.to_view(joystick.stick_position());
    let radius = joystick.radius();

    let draw_list = ui.get_background_draw_list();
    draw_list
        .add_circle([base.0, base.1], radius, BASE_COLOR)
        .filled(true)
        .build();
    draw_list
        .add_circle([stick.0, stick.1], radius * 0.4, STICK_COLOR)
        .filled(true)
        .build();
}

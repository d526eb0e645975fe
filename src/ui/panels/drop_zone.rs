// SymDrop - ui/panels/drop_zone.rs
//
// The drop target area. Pure presentation: the actual dropped-file events
// are consumed in gui.rs from the egui raw input; this panel only draws the
// zone and its hover highlight.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the drop zone. `hover_accepted` is true while at least one
/// acceptable file is hovering over the window.
pub fn render(ui: &mut egui::Ui, state: &AppState, hover_accepted: bool) {
    let (border, fill) = if hover_accepted {
        (theme::DROP_BORDER_ACTIVE, theme::DROP_FILL_ACTIVE)
    } else {
        (theme::DROP_BORDER, egui::Color32::TRANSPARENT)
    };

    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, border))
        .fill(fill)
        .show(ui, |ui| {
            ui.set_min_height(theme::DROP_ZONE_HEIGHT);
            ui.set_width(ui.available_width());
            ui.centered_and_justified(|ui| {
                let message = if state.drops_enabled() {
                    "Drop .xcarchive / .xccrashpoint / .app / .dsym / .crash files here"
                } else {
                    "Drops disabled \u{2014} symbolicatecrash was not found"
                };
                ui.label(egui::RichText::new(message).color(theme::PROMPT_TEXT));
            });
        });
}

// SymDrop - ui/panels/artifacts.rs
//
// The four artifact slot rows: helper tool, app, dSYM, crash log.
// Read-only view over resolver/locator state; no mutation here.

use crate::app::state::AppState;
use crate::core::display::Slot;
use crate::ui::theme;

/// Render the artifact slot rows.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    slot_row(ui, state, "symbolicatecrash", Slot::Tool, state.locator.tool_path().is_some());
    slot_row(ui, state, "App", Slot::App, state.resolver.app().is_some());
    slot_row(ui, state, "dSYM", Slot::DebugSymbols, state.resolver.dsym().is_some());
    slot_row(ui, state, "Crash log", Slot::CrashLog, state.resolver.crash().is_some());
}

fn slot_row(ui: &mut egui::Ui, state: &AppState, label: &str, slot: Slot, resolved: bool) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [theme::SLOT_LABEL_WIDTH, 0.0],
            egui::Label::new(egui::RichText::new(format!("{label}:")).strong()),
        );

        let text = state.slot_label(slot);
        let colour = if resolved {
            theme::PATH_TEXT
        } else {
            theme::PROMPT_TEXT
        };
        // Paths truncate from the left so the distinguishing tail stays
        // visible; the full path is available on hover.
        ui.add(
            egui::Label::new(
                egui::RichText::new(&text)
                    .monospace()
                    .color(colour),
            )
            .truncate(),
        )
        .on_hover_text(text);
    });
}

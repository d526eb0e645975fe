// SymDrop - gui.rs
//
// Top-level eframe::App implementation.
// Wires the drop events, buttons, and run lifecycle together. All resolver
// and locator mutation happens here, sequentially, on the UI thread.

use crate::app::run::RunManager;
use crate::app::state::AppState;
use crate::core::invoke;
use crate::ui;
use crate::util::error::SaveError;

/// The SymDrop application.
pub struct SymDropApp {
    pub state: AppState,
    pub run_manager: RunManager,
}

impl SymDropApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            run_manager: RunManager::new(),
        }
    }

    /// Handle a finished run: offer a save dialog for successful output,
    /// update the status line either way.
    fn handle_outcome(&mut self, output: Option<String>) {
        let Some(content) = output else {
            self.state.status_message =
                "Symbolication produced no output. See the log for details.".to_string();
            return;
        };

        self.state.status_message = "Symbolication finished.".to_string();

        let suggested = self.state.suggested_output_name();
        let Some(dest) = rfd::FileDialog::new()
            .set_title("Save Symbolicated Crash Log")
            .set_file_name(&suggested)
            .save_file()
        else {
            return; // user cancelled the dialog
        };

        match std::fs::write(&dest, &content) {
            Ok(()) => {
                tracing::info!(path = %dest.display(), "Symbolicated log saved");
                self.state.status_message = format!("Saved {}.", dest.display());
            }
            Err(source) => {
                // Write failures are logged, never raised as a dialog.
                let err = SaveError::Io { path: dest, source };
                tracing::warn!(error = %err, "Save failed");
                self.state.status_message = "Save failed. See the log for details.".to_string();
            }
        }
    }
}

impl eframe::App for SymDropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for a finished run.
        if let Some(outcome) = self.run_manager.poll_outcome() {
            self.handle_outcome(outcome.output);
        }
        // Repaint while a run is active so completion is picked up promptly.
        if self.run_manager.in_flight() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ---- Drag-and-drop ----
        // Highlight while at least one acceptable file hovers the window.
        let hover_accepted = !self.run_manager.in_flight()
            && ctx.input(|i| {
                i.raw.hovered_files.iter().any(|f| {
                    f.path
                        .as_deref()
                        .is_some_and(|p| self.state.accepts(p))
                })
            });

        // Apply all acceptable dropped files. Drops are ignored while a run
        // is in flight so the argv being executed cannot change underneath it.
        if !self.run_manager.in_flight() {
            let dropped: Vec<_> = ctx.input(|i| {
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .filter(|p| self.state.accepts(p))
                    .collect()
            });
            if !dropped.is_empty() {
                for path in &dropped {
                    self.state.submit_file(path);
                }
                self.state.status_message = format!("Applied {} file(s).", dropped.len());
            }
        }

        // Files queued from the CLI or the Open button.
        let pending = std::mem::take(&mut self.state.pending_files);
        for path in &pending {
            if self.state.accepts(path) {
                self.state.submit_file(path);
            } else {
                tracing::info!(path = %path.display(), "Skipping unsupported file");
            }
        }

        // request_run: the Run button was pressed this frame or earlier.
        if self.state.request_run {
            self.state.request_run = false;
            let invocation = invoke::build_invocation(&self.state.locator, &self.state.resolver);
            self.state.status_message = "Symbolicating\u{2026}".to_string();
            self.run_manager.start(invocation);
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
            });
        });

        // Central panel: artifact slots, drop zone, action buttons.
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::artifacts::render(ui, &self.state);
            ui.add_space(8.0);
            ui::panels::drop_zone::render(ui, &self.state, hover_accepted);
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let in_flight = self.run_manager.in_flight();

                if ui
                    .add_enabled(self.state.drops_enabled() && !in_flight, egui::Button::new("Open\u{2026}"))
                    .clicked()
                {
                    let extensions: Vec<&str> =
                        self.state.locator.supported_extensions().to_vec();
                    if let Some(files) = rfd::FileDialog::new()
                        .add_filter("Crash artifacts", &extensions)
                        .pick_files()
                    {
                        self.state.pending_files = files;
                    }
                }

                if ui
                    .add_enabled(self.state.can_clear() && !in_flight, egui::Button::new("Clear"))
                    .clicked()
                {
                    self.state.clear();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let run_label = if in_flight { "Running\u{2026}" } else { "Run" };
                    if ui
                        .add_enabled(
                            self.state.can_run() && !in_flight,
                            egui::Button::new(run_label),
                        )
                        .clicked()
                    {
                        self.state.request_run = true;
                    }
                });
            });
        });
    }
}

#[cfg(test)]
impl SymDropApp {
    /// Feed a path directly, bypassing the extension filter. Test hook for
    /// exercising update-adjacent logic without an egui context.
    fn submit_unfiltered(&mut self, path: &std::path::Path) {
        self.state.submit_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locate::ToolLocator;
    use crate::core::search::MatchStrategy;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_run_request_without_tool_completes_absent() {
        let state = AppState::new(
            ToolLocator::from_parts(None, None),
            MatchStrategy::WalkOrder,
        );
        let mut app = SymDropApp::new(state);
        app.submit_unfiltered(Path::new("/x/Foo.crash"));

        // Simulate the Run handling path without an egui frame.
        let invocation = invoke::build_invocation(&app.state.locator, &app.state.resolver);
        assert!(invocation.is_none());
        app.run_manager.start(invocation);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        let outcome = loop {
            if let Some(outcome) = app.run_manager.poll_outcome() {
                break outcome;
            }
            assert!(std::time::Instant::now() < deadline, "no outcome delivered");
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert!(outcome.output.is_none());
    }

    #[test]
    fn test_suggested_name_used_for_save_dialog() {
        let state = AppState::new(
            ToolLocator::from_parts(None, Some(PathBuf::from("/t/symbolicatecrash"))),
            MatchStrategy::WalkOrder,
        );
        let mut app = SymDropApp::new(state);
        app.submit_unfiltered(Path::new("/x/Report-2024.crash"));
        assert_eq!(
            app.state.suggested_output_name(),
            "Report-2024.symbolicated.crash"
        );
    }
}

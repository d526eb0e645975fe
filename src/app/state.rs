// SymDrop - app/state.rs
//
// Application state: the located toolchain, the artifact resolver, and the
// UI status line. Owned by the eframe::App implementation; all mutation
// happens sequentially on the UI thread.

use crate::core::artifact::ArtifactResolver;
use crate::core::display::{self, Slot};
use crate::core::locate::ToolLocator;
use crate::core::search::MatchStrategy;
use std::path::{Path, PathBuf};

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Toolchain locations, resolved once at startup. Immutable afterwards.
    pub locator: ToolLocator,

    /// Accumulated artifact paths from dropped/opened files.
    pub resolver: ArtifactResolver,

    /// Status message for the status bar.
    pub status_message: String,

    /// Paths queued by the UI (file picker or drop) for the next frame.
    pub pending_files: Vec<PathBuf>,

    /// Set when the Run button was pressed; gui.rs consumes it each frame.
    pub request_run: bool,
}

impl AppState {
    /// Create initial state around an already-located toolchain.
    pub fn new(locator: ToolLocator, strategy: MatchStrategy) -> Self {
        let status_message = if locator.tool_path().is_some() {
            "Ready. Drop crash artifacts to begin.".to_string()
        } else {
            "symbolicatecrash not found. Install Xcode to enable drops.".to_string()
        };
        Self {
            locator,
            resolver: ArtifactResolver::new(strategy),
            status_message,
            pending_files: Vec::new(),
            request_run: false,
        }
    }

    /// Feed one accepted file to the resolver. The extension filter has
    /// already run at the drop boundary; unrecognized paths are a no-op
    /// anyway.
    pub fn submit_file(&mut self, path: &Path) {
        self.resolver.submit(path);
    }

    /// True when at least one file extension would currently be accepted.
    pub fn drops_enabled(&self) -> bool {
        !self.locator.supported_extensions().is_empty()
    }

    /// True when `path` carries one of the currently accepted extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        self.locator
            .supported_extensions()
            .contains(&extension.as_str())
    }

    pub fn can_clear(&self) -> bool {
        self.resolver.can_clear()
    }

    pub fn can_run(&self) -> bool {
        self.resolver.can_invoke(self.locator.tool_path().is_some())
    }

    /// Reset artifact state; locator state is never cleared.
    pub fn clear(&mut self) {
        self.resolver.clear();
        self.status_message = "Cleared.".to_string();
    }

    /// Display string for one artifact slot.
    pub fn slot_label(&self, slot: Slot) -> String {
        let crash_present = self.resolver.crash().is_some();
        let path = match slot {
            Slot::Tool => self.locator.tool_path(),
            Slot::App => self.resolver.app(),
            Slot::DebugSymbols => self.resolver.dsym(),
            Slot::CrashLog => self.resolver.crash(),
        };
        display::slot_label(slot, path, crash_present)
    }

    /// Suggested output file name: `Foo.crash` -> `Foo.symbolicated.crash`.
    /// Save is only reachable after a run, which requires a crash log; the
    /// fixed fallback name covers the unreachable no-crash case.
    pub fn suggested_output_name(&self) -> String {
        use crate::util::constants::OUTPUT_NAME_INFIX;

        match self.resolver.crash() {
            Some(crash) => {
                let stem = crash
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("crash");
                match crash.extension().and_then(|e| e.to_str()) {
                    Some(ext) => format!("{stem}.{OUTPUT_NAME_INFIX}.{ext}"),
                    None => format!("{stem}.{OUTPUT_NAME_INFIX}"),
                }
            }
            None => format!("output.{OUTPUT_NAME_INFIX}.crash"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

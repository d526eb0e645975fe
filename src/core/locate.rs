// SymDrop - core/locate.rs
//
// Toolchain location: the installed developer dir and the symbolicatecrash
// helper inside Xcode's SharedFrameworks tree.
//
// Lifecycle invariant: both paths are resolved once at startup and never
// mutate afterwards. Every failure is absorbed here -- logged and left as an
// absent slot -- so callers only ever observe "located or not".

use crate::core::command;
use crate::core::search::{self, EntryKind, MatchStrategy, NamePattern};
use crate::util::constants;
use crate::util::error::LocateError;
use std::path::{Path, PathBuf};

/// Locations of the developer toolchain and the symbolication helper.
#[derive(Debug, Default)]
pub struct ToolLocator {
    developer_dir: Option<PathBuf>,
    tool_path: Option<PathBuf>,
}

impl ToolLocator {
    /// Run the full startup discovery: developer dir first, then the helper.
    ///
    /// `developer_dir_override` (from config or CLI) skips the selector
    /// subprocess; the override still goes through normalization.
    pub fn locate(developer_dir_override: Option<&Path>) -> Self {
        let mut locator = Self::default();
        match developer_dir_override {
            Some(dir) => {
                let dir = search::normalize(dir);
                tracing::info!(developer_dir = %dir.display(), "Using configured developer dir");
                locator.developer_dir = Some(dir);
            }
            None => locator.locate_developer_dir(),
        }
        locator.locate_symbolicate_tool();
        locator
    }

    /// Build a locator from already-known paths. Used by integration tests
    /// and by callers that resolved the locations out of band.
    pub fn from_parts(developer_dir: Option<PathBuf>, tool_path: Option<PathBuf>) -> Self {
        Self {
            developer_dir,
            tool_path,
        }
    }

    /// The developer dir reported by `xcode-select -p`, if located.
    pub fn developer_dir(&self) -> Option<&Path> {
        self.developer_dir.as_deref()
    }

    /// Absolute path of the symbolicatecrash helper, if located.
    pub fn tool_path(&self) -> Option<&Path> {
        self.tool_path.as_deref()
    }

    /// Extensions accepted by drag-and-drop. Empty until the helper has been
    /// located -- the single gate that keeps the drop zone disabled while the
    /// system cannot actually symbolicate anything.
    pub fn supported_extensions(&self) -> &'static [&'static str] {
        if self.tool_path.is_some() {
            &constants::SUPPORTED_EXTENSIONS
        } else {
            &[]
        }
    }

    /// Run `/usr/bin/xcode-select -p` and store the first output line as the
    /// developer dir. Leaves the slot absent on any failure.
    fn locate_developer_dir(&mut self) {
        let result = command::run_command(constants::XCODE_SELECT_PATH, ["-p"], &[]);

        let Some(stdout) = result.stdout else {
            let err = LocateError::SelectorFailed {
                command: constants::XCODE_SELECT_PATH.to_string(),
                detail: result.stderr.unwrap_or_else(|| "no output".to_string()),
            };
            tracing::warn!(error = %err, "Developer dir not located");
            return;
        };

        let line = stdout.lines().next().unwrap_or("").trim();
        if line.is_empty() {
            let err = LocateError::EmptyOutput {
                command: constants::XCODE_SELECT_PATH.to_string(),
            };
            tracing::warn!(error = %err, "Developer dir not located");
            return;
        }

        // e.g. /Applications/Xcode.app/Contents/Developer
        let path = search::normalize(Path::new(line));
        tracing::info!(developer_dir = %path.display(), "Developer dir located");
        self.developer_dir = Some(path);
    }

    /// Search `<developerDir>/../SharedFrameworks` for a file literally named
    /// `symbolicatecrash` and store the first match. Silent no-op while the
    /// developer dir is absent.
    fn locate_symbolicate_tool(&mut self) {
        let Some(developer_dir) = &self.developer_dir else {
            return;
        };

        let frameworks_dir = search::normalize(
            &developer_dir
                .join("..")
                .join(constants::SHARED_FRAMEWORKS_DIR_NAME),
        );
        if !frameworks_dir.is_dir() {
            let err = LocateError::FrameworksDirMissing {
                path: frameworks_dir,
            };
            tracing::warn!(error = %err, "Symbolication tool not located");
            return;
        }

        let found = search::find_first(
            &frameworks_dir,
            EntryKind::File,
            NamePattern::Exact(constants::SYMBOLICATE_TOOL_NAME),
            MatchStrategy::WalkOrder,
        );

        match found {
            Some(path) => {
                // e.g. .../SharedFrameworks/DVTFoundation.framework/Versions/
                //      A/Resources/symbolicatecrash
                let path = search::normalize(&path);
                tracing::info!(tool = %path.display(), "Symbolication tool located");
                self.tool_path = Some(path);
            }
            None => {
                let err = LocateError::ToolNotFound {
                    search_root: frameworks_dir,
                };
                tracing::warn!(error = %err, "Symbolication tool not located");
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

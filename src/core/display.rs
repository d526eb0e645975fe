// SymDrop - core/display.rs
//
// Fallback label wording for the four artifact slots.
//
// Kept out of the resolver's mutation path: a pure function from what is
// currently known to a display string, testable without filesystem access.

use std::path::Path;

/// The four UI slots that show a path or a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Tool,
    App,
    DebugSymbols,
    CrashLog,
}

/// Label for `slot`: the stored path when present, otherwise a prompt that
/// depends on what else is known. Once a crash log is present, the optional
/// app/dSYM slots switch to "detect automatically" wording because the
/// helper can find both on its own.
pub fn slot_label(
    slot: Slot,
    path: Option<&Path>,
    crash_present: bool,
) -> String {
    if let Some(path) = path {
        return path.display().to_string();
    }

    match slot {
        Slot::Tool => "Install Xcode.".to_string(),
        Slot::App => {
            if crash_present {
                "Detect automatically using the crash file.".to_string()
            } else {
                "Drop an .xcarchive or .app file.".to_string()
            }
        }
        Slot::DebugSymbols => {
            if crash_present {
                "Detect automatically using the crash file.".to_string()
            } else {
                "Drop an .xcarchive or .dsym file.".to_string()
            }
        }
        Slot::CrashLog => "Drop an .xccrashpoint or .crash file.".to_string(),
    }
}

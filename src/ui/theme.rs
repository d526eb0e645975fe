// SymDrop - ui/theme.rs
//
// Colours and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Text colour for a slot showing a resolved path.
pub const PATH_TEXT: Color32 = Color32::from_rgb(209, 213, 219); // Gray 300

/// Text colour for a slot showing a fallback prompt.
pub const PROMPT_TEXT: Color32 = Color32::from_rgb(107, 114, 128); // Gray 500

/// Drop zone border while idle.
pub const DROP_BORDER: Color32 = Color32::from_rgb(75, 85, 99); // Gray 600

/// Drop zone border while acceptable files hover over the window.
pub const DROP_BORDER_ACTIVE: Color32 = Color32::from_rgb(34, 197, 94); // Green 500

/// Drop zone fill while acceptable files hover over the window.
pub const DROP_FILL_ACTIVE: Color32 = Color32::from_rgba_premultiplied(34, 197, 94, 20);

/// Layout constants.
pub const SLOT_LABEL_WIDTH: f32 = 130.0;
pub const DROP_ZONE_HEIGHT: f32 = 140.0;
pub const WINDOW_WIDTH: f32 = 680.0;
pub const WINDOW_HEIGHT: f32 = 420.0;

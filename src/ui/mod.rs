// SymDrop - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only views), egui.
// Must NOT depend on: platform, direct I/O.

pub mod panels;
pub mod theme;

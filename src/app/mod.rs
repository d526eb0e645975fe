// SymDrop - app/mod.rs
//
// Application layer: state ownership and the background run lifecycle.
// Bridges core logic to the GUI event loop.

pub mod run;
pub mod state;

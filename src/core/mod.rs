// SymDrop - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app, or GUI crates.

pub mod artifact;
pub mod command;
pub mod display;
pub mod invoke;
pub mod locate;
pub mod search;

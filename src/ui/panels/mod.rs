// SymDrop - ui/panels/mod.rs

pub mod artifacts;
pub mod drop_zone;

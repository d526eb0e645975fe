// SymDrop - platform/mod.rs
//
// Platform integration: config directory resolution and config.toml loading.

pub mod config;

// crates/pitchreel-core/src/lib.rs
//
// Pure session data and decision logic — no egui, no network, no threads.
// Used by both pitchreel-gen and pitchreel-ui.

pub mod commands;
pub mod genre;
pub mod helpers;
pub mod session;
pub mod studio_types;

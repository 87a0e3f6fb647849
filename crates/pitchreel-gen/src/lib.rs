// crates/pitchreel-gen/src/lib.rs
//
// No egui dependency — communicates with pitchreel-ui via channels only.
//
// To add a new background capability:
//   1. Create a new module file here
//   2. Add `mod mymodule;` below
//   3. Call it from worker.rs (or a new StudioWorker method)

pub mod fetch;
pub mod simulate;
pub mod worker;

// Re-export the main public API so pitchreel-ui imports are simple.
pub use simulate::{SimulatedStudio, TrailerSource};
pub use worker::StudioWorker;

pub use pitchreel_core::studio_types::StudioResult;

// crates/pitchreel-ui/src/modules/mod.rs
//
// Module registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing PanelModule
//   2. Add `pub mod mypanel;` below
//   3. Show it from app.rs::update

//
// Every panel implements this trait.
// Modules read state, emit commands — they never mutate state directly.

pub mod brief_module;
pub mod preview_module;

use egui::Ui;
use pitchreel_core::commands::AppCommand;
use pitchreel_core::session::SessionState;

pub trait PanelModule {
    fn name(&self) -> &str;
    fn ui(&mut self, ui: &mut Ui, state: &SessionState, cmd: &mut Vec<AppCommand>);
}

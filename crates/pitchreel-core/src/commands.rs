// crates/pitchreel-core/src/commands.rs
//
// Every user action in PitchReel is expressed as an AppCommand.
// Modules emit these; app.rs processes them after the UI pass.
// Adding a new feature = add a variant here + one match arm in app.rs.

#[derive(Debug, Clone)]
pub enum AppCommand {
    // ── Brief input ──────────────────────────────────────────────────────────
    SetTitle(String),
    SetDescription(String),

    // ── Generation ───────────────────────────────────────────────────────────
    /// Validate the current brief and, if complete, start a generation run.
    /// Ignored while a run is in flight (the button is disabled anyway).
    Generate,

    // ── Preview ──────────────────────────────────────────────────────────────
    TogglePlayback,

    // ── Download ─────────────────────────────────────────────────────────────
    /// Open the save dialog for the resolved trailer and start the download.
    /// The freshness token is stripped before the transfer.
    SaveTrailer,
    /// Dismiss the "Saved: …" banner.
    ClearSaveStatus,

    // ── Errors ───────────────────────────────────────────────────────────────
    DismissError,
}

// crates/pitchreel-core/src/studio_types.rs
//
// Types that flow across the channel between pitchreel-gen and pitchreel-ui.
// No egui, no network handles — just plain data. Every variant carries the
// id of the job that produced it so the UI can drop results from a job the
// session has already moved past.

use std::path::PathBuf;
use uuid::Uuid;

use crate::session::ResolvedClip;

/// Results sent from the StudioWorker background threads to the UI.
#[derive(Debug)]
pub enum StudioResult {
    // ── Generation run ───────────────────────────────────────────────────────
    Progress  { job: Uuid, percent: u8 },
    Resolved  { job: Uuid, clip: ResolvedClip },
    /// The cancel flag fired before resolution (teardown only — no user
    /// cancel path exists).
    Cancelled { job: Uuid },
    /// A render backend failed. Unreachable with the simulated source; kept
    /// so a real backend can slot in behind the same channel.
    RenderError { job: Uuid, msg: String },

    // ── Preview probe ────────────────────────────────────────────────────────
    /// The one-shot reachability probe for `url` failed; `msg` is already the
    /// user-facing message.
    PreviewError { url: String, msg: String },

    // ── Trailer download ─────────────────────────────────────────────────────
    /// `total` is 0 until the response reports a content length.
    SaveProgress { job: Uuid, written: u64, total: u64 },
    SaveDone     { job: Uuid, path: PathBuf },
    SaveError    { job: Uuid, msg: String },
}

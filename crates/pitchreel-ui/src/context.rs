// crates/pitchreel-ui/src/context.rs
//
// AppContext owns the runtime handles that are not part of SessionState.
// PitchReelApp holds one of these plus a SessionState and the module list —
// nothing else.

use crate::pitchreel_log;
use eframe::egui;
use pitchreel_core::session::SessionState;
use pitchreel_core::studio_types::StudioResult;
use pitchreel_gen::StudioWorker;

// ── PreviewContext ────────────────────────────────────────────────────────────
// Tracks which preview URL has already been probed, so the one-shot HEAD
// check fires on the first play of each resolved clip and never again.
pub struct PreviewContext {
    /// URL a probe was dispatched for. Compared against the current clip's
    /// URL before dispatching another.
    pub verify_requested: Option<String>,
}

impl PreviewContext {
    fn new() -> Self {
        Self { verify_requested: None }
    }
}

// ── AppContext ────────────────────────────────────────────────────────────────

pub struct AppContext {
    pub worker:  StudioWorker,
    pub preview: PreviewContext,
}

impl AppContext {
    pub fn new(worker: StudioWorker) -> Self {
        Self {
            worker,
            preview: PreviewContext::new(),
        }
    }

    /// Drain the StudioWorker result channel and load everything into
    /// SessionState. Called once per frame from `app::update`, before the
    /// panels draw.
    ///
    /// Every job-scoped arm guards on the session's current job id, so a
    /// stale result from a superseded run never clobbers a fresh one.
    pub fn ingest_studio_results(
        &mut self,
        state: &mut SessionState,
        ctx:   &egui::Context,
    ) {
        while let Ok(result) = self.worker.rx.try_recv() {
            match result {
                // ── Generation run ────────────────────────────────────────────
                // set_progress / complete / abort_generation each check the job
                // id themselves and drop mismatches.

                StudioResult::Progress { job, percent } => {
                    state.set_progress(job, percent);
                    ctx.request_repaint();
                }

                StudioResult::Resolved { job, clip } => {
                    pitchreel_log!("[studio] job {job} resolved → {}", clip.genre.label());
                    self.preview.verify_requested = None;
                    state.complete(job, clip);
                    ctx.request_repaint();
                }

                StudioResult::Cancelled { job } => {
                    pitchreel_log!("[studio] job {job} cancelled");
                    state.abort_generation(job, None);
                    ctx.request_repaint();
                }

                StudioResult::RenderError { job, msg } => {
                    pitchreel_log!("[studio] job {job} failed: {msg}");
                    state.abort_generation(job, Some(msg));
                    ctx.request_repaint();
                }

                // ── Preview probe ─────────────────────────────────────────────
                // Only failures arrive. Ignore a result for anything but the
                // clip currently on screen (the user may have re-generated
                // while the probe was in flight).

                StudioResult::PreviewError { url, msg } => {
                    if state.preview_url() == Some(url.as_str()) {
                        self.preview.verify_requested = None;
                        state.playback_interrupted(msg);
                        ctx.request_repaint();
                    }
                }

                // ── Download ──────────────────────────────────────────────────

                StudioResult::SaveProgress { job, written, total } => {
                    if state.save_job == Some(job) {
                        state.save_progress = Some((written, total));
                        ctx.request_repaint();
                    }
                }

                StudioResult::SaveDone { job, path } => {
                    if state.save_job == Some(job) {
                        pitchreel_log!("[save] trailer written → {}", path.display());
                        state.save_done     = Some(path);
                        state.save_job      = None;
                        state.save_progress = None;
                        ctx.request_repaint();
                    }
                }

                StudioResult::SaveError { job, msg } => {
                    if state.save_job == Some(job) {
                        state.error         = Some(msg);
                        state.save_job      = None;
                        state.save_progress = None;
                        ctx.request_repaint();
                    }
                }
            }
        }
    }
}

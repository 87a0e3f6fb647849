// crates/pitchreel-core/src/session.rs
//
// The session state machine. One page-visit worth of ephemeral state — never
// persisted, reset by process exit.
//
// A flat rendition would track five independent flags (generating, preview
// url, playing, error, progress) and keep them consistent by convention.
// Here the phase is a single tagged variant so the illegal combinations
// (playing with no preview, progress outside a run) cannot be constructed. `error` stays a separate slot: an error may coexist with any
// phase and clearing it never changes the phase.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use crate::genre::Genre;

// ── User-visible error messages ──────────────────────────────────────────────

pub const ERR_VALIDATION: &str = "Please provide both title and description";
pub const ERR_LOAD:       &str = "Failed to load video. Please try generating again.";
pub const ERR_PLAY:       &str = "Failed to play video. Please try again.";
pub const ERR_DOWNLOAD:   &str = "Failed to download video. Please try again.";

// ── Data ─────────────────────────────────────────────────────────────────────

/// What the user typed. Mutated through SetTitle / SetDescription commands
/// on every input change; validated only when generation starts.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrailerBrief {
    pub title:       String,
    pub description: String,
}

impl TrailerBrief {
    /// Generation entry guard: both fields non-empty.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

/// A finished generation: the selected sample plus its freshness-tokened URL.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedClip {
    pub genre:    Genre,
    /// Sample URL with the `?t=<millis>` cache-buster appended.
    pub url:      String,
    /// Nominal clip runtime in seconds (drives the playhead clock).
    pub duration: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Playback {
    Paused  { at: f64 },
    Playing { at: f64 },
}

impl Playback {
    pub fn position(self) -> f64 {
        match self {
            Playback::Paused { at } | Playback::Playing { at } => at,
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, Playback::Playing { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    /// One generation run. `progress` is 0..=100 and non-decreasing.
    Generating { job: Uuid, progress: u8 },
    /// A trailer is resolved and previewable.
    Ready { clip: ResolvedClip, playback: Playback },
}

// ── Session ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct SessionState {
    pub brief: TrailerBrief,
    pub phase: Phase,
    /// The single user-visible error slot. Errors never change the phase by
    /// themselves and are cleared when a new generation run starts.
    pub error: Option<String>,

    // ── Save status (runtime-only, independent of the preview phase) ─────────
    /// Id of the in-flight trailer download, or None when idle.
    pub save_job:      Option<Uuid>,
    /// (bytes_written, total_bytes) — total is 0 until the response headers
    /// report a content length.
    pub save_progress: Option<(u64, u64)>,
    /// Destination of the last completed download; shown as a ✓ banner until
    /// dismissed.
    pub save_done:     Option<PathBuf>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            brief:         TrailerBrief::default(),
            phase:         Phase::Idle,
            error:         None,
            save_job:      None,
            save_progress: None,
            save_done:     None,
        }
    }
}

impl SessionState {
    /// Try to enter a generation run under `job`.
    ///
    /// Rejected (returns false, error set, no other change) when the brief is
    /// incomplete or a run is already in flight. On success the previous
    /// preview and playback vanish with the old phase and progress restarts
    /// at 0.
    pub fn begin_generation(&mut self, job: Uuid) -> bool {
        if matches!(self.phase, Phase::Generating { .. }) {
            return false;
        }
        if !self.brief.is_complete() {
            self.error = Some(ERR_VALIDATION.into());
            return false;
        }
        self.error = None;
        self.phase = Phase::Generating { job, progress: 0 };
        true
    }

    /// Raise the progress of the run identified by `job`. Monotonic: a late
    /// or reordered report can never move the bar backwards. Reports for any
    /// other job are dropped.
    pub fn set_progress(&mut self, job: Uuid, percent: u8) {
        if let Phase::Generating { job: current, progress } = &mut self.phase {
            if *current == job {
                *progress = (*progress).max(percent.min(100));
            }
        }
    }

    /// Resolve the run identified by `job`: progress hits 100 and the phase
    /// becomes Ready with playback paused at the head.
    pub fn complete(&mut self, job: Uuid, clip: ResolvedClip) {
        match self.phase {
            Phase::Generating { job: current, .. } if current == job => {
                self.set_progress(job, 100);
                self.phase = Phase::Ready {
                    clip,
                    playback: Playback::Paused { at: 0.0 },
                };
            }
            _ => {}
        }
    }

    /// End the run identified by `job` without a result (teardown cancel, or
    /// a render error from a future real backend). Returns to Idle.
    pub fn abort_generation(&mut self, job: Uuid, error: Option<String>) {
        if let Phase::Generating { job: current, .. } = self.phase {
            if current == job {
                self.phase = Phase::Idle;
                if error.is_some() {
                    self.error = error;
                }
            }
        }
    }

    /// Flip play/pause. Returns the new playing flag, or None outside Ready.
    /// Playing an ended clip restarts it from the head.
    pub fn toggle_playback(&mut self) -> Option<bool> {
        if let Phase::Ready { clip, playback } = &mut self.phase {
            *playback = match *playback {
                Playback::Paused { at } if at >= clip.duration => {
                    Playback::Playing { at: 0.0 }
                }
                Playback::Paused  { at } => Playback::Playing { at },
                Playback::Playing { at } => Playback::Paused  { at },
            };
            Some(playback.is_playing())
        } else {
            None
        }
    }

    /// Advance the playhead by `dt` seconds. At the end of the clip playback
    /// reverts to Paused at the end position — the URL is untouched.
    /// Returns true while still playing (caller keeps repainting).
    pub fn advance_playhead(&mut self, dt: f64) -> bool {
        if let Phase::Ready { clip, playback } = &mut self.phase {
            if let Playback::Playing { at } = playback {
                let pos = *at + dt;
                if pos >= clip.duration {
                    *playback = Playback::Paused { at: clip.duration };
                    return false;
                }
                *playback = Playback::Playing { at: pos };
                return true;
            }
        }
        false
    }

    /// A preview failed to load or play: surface the message and revert the
    /// playing flag. Position and URL survive — the user may retry.
    pub fn playback_interrupted(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
        if let Phase::Ready { playback, .. } = &mut self.phase {
            if let Playback::Playing { at } = *playback {
                *playback = Playback::Paused { at };
            }
        }
    }

    /// Try to start a trailer download under `job`. Rejected (returns false,
    /// nothing changes) while another download is in flight — the guard that
    /// keeps a second command from orphaning the first job's progress.
    pub fn begin_save(&mut self, job: Uuid) -> bool {
        if self.save_job.is_some() {
            return false;
        }
        self.save_job      = Some(job);
        self.save_progress = None;
        self.save_done     = None;
        true
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn is_generating(&self) -> bool {
        matches!(self.phase, Phase::Generating { .. })
    }

    /// Non-empty exactly when a generation has completed since the last run
    /// started — structurally, whenever the phase is Ready.
    pub fn preview_url(&self) -> Option<&str> {
        match &self.phase {
            Phase::Ready { clip, .. } => Some(&clip.url),
            _ => None,
        }
    }

    pub fn progress(&self) -> Option<u8> {
        match self.phase {
            Phase::Generating { progress, .. } => Some(progress),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief(title: &str, desc: &str) -> TrailerBrief {
        TrailerBrief { title: title.into(), description: desc.into() }
    }

    fn clip() -> ResolvedClip {
        ResolvedClip {
            genre:    Genre::Action,
            url:      format!("{}?t=1700000000000", Genre::Action.sample_url()),
            duration: 596.0,
        }
    }

    #[test]
    fn empty_title_rejects_generation() {
        let mut s = SessionState::default();
        s.brief = brief("", "anything");
        assert!(!s.begin_generation(Uuid::new_v4()));
        assert_eq!(s.error.as_deref(), Some(ERR_VALIDATION));
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.preview_url(), None);
        assert_eq!(s.progress(), None);
    }

    #[test]
    fn empty_description_rejects_generation() {
        let mut s = SessionState::default();
        s.brief = brief("Sunset", "");
        assert!(!s.begin_generation(Uuid::new_v4()));
        assert_eq!(s.error.as_deref(), Some(ERR_VALIDATION));
    }

    #[test]
    fn begin_clears_error_and_prior_preview() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let j1 = Uuid::new_v4();
        assert!(s.begin_generation(j1));
        s.complete(j1, clip());
        s.error = Some("stale".into());

        let j2 = Uuid::new_v4();
        assert!(s.begin_generation(j2));
        assert_eq!(s.error, None);
        assert_eq!(s.preview_url(), None);
        assert_eq!(s.progress(), Some(0));
    }

    #[test]
    fn second_run_cannot_start_while_generating() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        assert!(s.begin_generation(Uuid::new_v4()));
        assert!(!s.begin_generation(Uuid::new_v4()));
    }

    #[test]
    fn progress_is_monotonic_and_job_guarded() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);

        s.set_progress(job, 30);
        s.set_progress(job, 10); // late report — must not regress
        assert_eq!(s.progress(), Some(30));

        s.set_progress(Uuid::new_v4(), 90); // stale job — dropped
        assert_eq!(s.progress(), Some(30));
    }

    #[test]
    fn completion_yields_ready_with_tokened_url() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);
        s.complete(job, clip());

        let url = s.preview_url().expect("preview after completion");
        assert!(url.contains("?t="));
        assert!(!s.is_generating());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);
        s.complete(Uuid::new_v4(), clip());
        assert!(s.is_generating());
    }

    #[test]
    fn abort_returns_to_idle_only_for_matching_job() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);

        s.abort_generation(Uuid::new_v4(), None);
        assert!(s.is_generating());

        s.abort_generation(job, Some("render backend failed".into()));
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.error.as_deref(), Some("render backend failed"));
    }

    #[test]
    fn toggle_flips_and_preserves_position() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);
        s.complete(job, clip());

        assert_eq!(s.toggle_playback(), Some(true));
        assert!(s.advance_playhead(2.5));
        assert_eq!(s.toggle_playback(), Some(false));

        if let Phase::Ready { playback, .. } = s.phase {
            assert!((playback.position() - 2.5).abs() < 1e-9);
        } else {
            panic!("expected Ready");
        }
    }

    #[test]
    fn toggle_outside_ready_is_a_no_op() {
        let mut s = SessionState::default();
        assert_eq!(s.toggle_playback(), None);
    }

    #[test]
    fn natural_end_pauses_without_touching_url() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);
        let c = clip();
        let url = c.url.clone();
        s.complete(job, c);
        s.toggle_playback();

        assert!(!s.advance_playhead(10_000.0));
        assert_eq!(s.preview_url(), Some(url.as_str()));
        if let Phase::Ready { clip, playback } = &s.phase {
            assert!(!playback.is_playing());
            assert_eq!(playback.position(), clip.duration);
        } else {
            panic!("expected Ready");
        }
    }

    #[test]
    fn replay_after_natural_end_restarts_from_head() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);
        s.complete(job, clip());
        s.toggle_playback();
        assert!(!s.advance_playhead(10_000.0)); // run to the natural end

        assert_eq!(s.toggle_playback(), Some(true));
        assert!(s.advance_playhead(0.016));
        if let Phase::Ready { playback, .. } = s.phase {
            assert!(playback.is_playing());
            assert!(playback.position() < 1.0, "restarted at {}", playback.position());
        } else {
            panic!("expected Ready");
        }
    }

    #[test]
    fn second_download_cannot_start_while_one_is_in_flight() {
        let mut s = SessionState::default();
        let j1 = Uuid::new_v4();
        assert!(s.begin_save(j1));
        s.save_progress = Some((1024, 4096));

        assert!(!s.begin_save(Uuid::new_v4()));
        assert_eq!(s.save_job, Some(j1));
        assert_eq!(s.save_progress, Some((1024, 4096)));
    }

    #[test]
    fn playback_interruption_reverts_flag_and_keeps_url() {
        let mut s = SessionState::default();
        s.brief = brief("A", "B");
        let job = Uuid::new_v4();
        s.begin_generation(job);
        s.complete(job, clip());
        s.toggle_playback();

        s.playback_interrupted(ERR_LOAD);
        assert_eq!(s.error.as_deref(), Some(ERR_LOAD));
        assert!(s.preview_url().is_some());
        if let Phase::Ready { playback, .. } = s.phase {
            assert!(!playback.is_playing());
        } else {
            panic!("expected Ready");
        }
    }
}

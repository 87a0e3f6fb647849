// crates/pitchreel-gen/src/worker.rs
//
// StudioWorker: owns the result channel and every background thread.
// All public API that pitchreel-ui calls lives here.
//
// One generation run exists at a time from the UI's perspective (the session
// phase tracks a single job id), but each run still owns its own cancel flag
// keyed by job id, so a late result from a superseded job can never clobber a
// fresh one and teardown can cancel everything in flight deterministically.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use uuid::Uuid;

use pitchreel_core::session::TrailerBrief;
use pitchreel_core::studio_types::StudioResult;

use crate::fetch::{probe_preview, save_trailer};
use crate::simulate::{SimulatedStudio, TrailerSource};

pub struct StudioWorker {
    /// Shared result channel: generation progress, resolutions, probe
    /// failures, download progress.
    pub rx:   Receiver<StudioResult>,
    tx:       Sender<StudioResult>,
    /// The render pipeline. Simulated by default; swappable for tests or a
    /// future real backend.
    source:   Arc<dyn TrailerSource>,
    shutdown: Arc<AtomicBool>,
    /// Per-job cancel flags. Entries are inserted by start_generation and
    /// removed when the job's thread exits; shutdown trips all of them.
    render_cancels: Arc<Mutex<HashMap<Uuid, Arc<AtomicBool>>>>,
}

impl StudioWorker {
    pub fn new() -> Self {
        Self::with_source(SimulatedStudio::default())
    }

    pub fn with_source(source: impl TrailerSource) -> Self {
        let (tx, rx) = bounded(64);
        Self {
            rx,
            tx,
            source:         Arc::new(source),
            shutdown:       Arc::new(AtomicBool::new(false)),
            render_cancels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Trip every in-flight cancel flag. Called from App::on_exit (and Drop)
    /// so no background thread outlives the session it was reporting to.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let cancels = self.render_cancels.lock().unwrap();
        for flag in cancels.values() {
            flag.store(true, Ordering::Relaxed);
        }
    }

    /// Spawn a generation run for `brief` under `job`.
    ///
    /// The brief is snapshotted here, so edits made while the run is in
    /// flight do not affect classification.
    pub fn start_generation(&self, job: Uuid, brief: TrailerBrief) {
        let cancel = Arc::new(AtomicBool::new(false));
        let tx     = self.tx.clone();
        let sd     = self.shutdown.clone();
        let source = Arc::clone(&self.source);

        // Register the cancel flag before spawning — avoids a window where
        // shutdown runs before the thread has inserted the flag.
        self.render_cancels.lock().unwrap().insert(job, Arc::clone(&cancel));

        let cancels_ref = Arc::clone(&self.render_cancels);
        thread::spawn(move || {
            if sd.load(Ordering::Relaxed) {
                let _ = tx.send(StudioResult::Cancelled { job });
                return;
            }

            let mut progress = |percent: u8| {
                let _ = tx.send(StudioResult::Progress { job, percent });
            };

            match source.render(&brief, &mut progress, &cancel) {
                Ok(Some(clip)) => {
                    let _ = tx.send(StudioResult::Resolved { job, clip });
                }
                Ok(None) => {
                    let _ = tx.send(StudioResult::Cancelled { job });
                }
                Err(e) => {
                    eprintln!("[studio] render: {e:#}");
                    let _ = tx.send(StudioResult::RenderError { job, msg: e.to_string() });
                }
            }

            // Drop the cancel flag once the job is done so the map never
            // grows across a long session.
            cancels_ref.lock().unwrap().remove(&job);
        });
    }

    /// Probe a resolved preview URL once. Only failures produce a result.
    pub fn verify_preview(&self, url: String) {
        let tx = self.tx.clone();
        let sd = self.shutdown.clone();
        thread::spawn(move || {
            if sd.load(Ordering::Relaxed) {
                return;
            }
            if let Err(msg) = probe_preview(&url) {
                let _ = tx.send(StudioResult::PreviewError { url, msg: msg.into() });
            }
        });
    }

    /// Stream the (already token-stripped) trailer URL to `dest` as job `job`.
    pub fn save_trailer(&self, job: Uuid, url: String, dest: PathBuf) {
        let tx = self.tx.clone();
        let sd = self.shutdown.clone();
        thread::spawn(move || {
            if sd.load(Ordering::Relaxed) {
                return;
            }
            save_trailer(job, &url, &dest, &tx, &sd);
        });
    }
}

impl Default for StudioWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for StudioWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_worker() -> StudioWorker {
        StudioWorker::with_source(SimulatedStudio {
            tick:  Duration::from_millis(2),
            step:  30,
            cap:   90,
            total: Duration::from_millis(20),
        })
    }

    fn brief(title: &str, desc: &str) -> TrailerBrief {
        TrailerBrief { title: title.into(), description: desc.into() }
    }

    #[test]
    fn run_reports_progress_then_resolves() {
        let worker = fast_worker();
        let job = Uuid::new_v4();
        worker.start_generation(job, brief("Funny Times", "A humor-filled comedy"));

        let mut got_progress = false;
        loop {
            match worker.rx.recv_timeout(Duration::from_secs(5)).expect("worker result") {
                StudioResult::Progress { job: j, .. } => {
                    assert_eq!(j, job);
                    got_progress = true;
                }
                StudioResult::Resolved { job: j, clip } => {
                    assert_eq!(j, job);
                    assert_eq!(clip.genre, pitchreel_core::genre::Genre::Comedy);
                    break;
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
        assert!(got_progress);
    }

    #[test]
    fn shutdown_cancels_an_in_flight_run() {
        let worker = StudioWorker::with_source(SimulatedStudio {
            tick:  Duration::from_millis(5),
            step:  10,
            cap:   90,
            total: Duration::from_secs(60),
        });
        let job = Uuid::new_v4();
        worker.start_generation(job, brief("a", "b"));

        // Let the run get going, then tear down.
        std::thread::sleep(Duration::from_millis(10));
        worker.shutdown();

        loop {
            match worker.rx.recv_timeout(Duration::from_secs(5)).expect("worker result") {
                StudioResult::Progress { .. } => continue,
                StudioResult::Cancelled { job: j } => {
                    assert_eq!(j, job);
                    break;
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn cancel_flags_are_released_after_resolution() {
        let worker = fast_worker();
        let job = Uuid::new_v4();
        worker.start_generation(job, brief("a", "b"));

        loop {
            if let StudioResult::Resolved { .. } =
                worker.rx.recv_timeout(Duration::from_secs(5)).expect("worker result")
            {
                break;
            }
        }
        // The job thread removes its flag after sending Resolved; give it a beat.
        std::thread::sleep(Duration::from_millis(20));
        assert!(worker.render_cancels.lock().unwrap().is_empty());
    }
}

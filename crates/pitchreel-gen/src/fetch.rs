// crates/pitchreel-gen/src/fetch.rs
//
// The only real I/O in PitchReel: a one-shot reachability probe for the
// resolved sample URL, and a streaming download of the trailer to a
// user-chosen path. Both run on short-lived threads spawned by worker.rs.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::Sender;
use uuid::Uuid;

use pitchreel_core::session::{ERR_DOWNLOAD, ERR_LOAD, ERR_PLAY};
use pitchreel_core::studio_types::StudioResult;

/// How often SaveProgress results are emitted during a download.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);
/// Read/write chunk size for the download stream.
const CHUNK: usize = 64 * 1024;

/// Check that a resolved preview URL actually answers.
///
/// Two user-visible failures come out of this one probe: an HTTP error
/// status maps to the play message, a transport failure to the load message.
/// `Err` carries the user-facing text; details go to stderr.
pub fn probe_preview(url: &str) -> Result<(), &'static str> {
    match ureq::head(url).call() {
        Ok(_) => Ok(()),
        Err(ureq::Error::StatusCode(code)) => {
            eprintln!("[fetch] preview probe: HTTP {code} for {url}");
            Err(ERR_PLAY)
        }
        Err(e) => {
            eprintln!("[fetch] preview probe: {e}");
            Err(ERR_LOAD)
        }
    }
}

/// Stream `url` to `dest`, reporting progress over `tx` as job `job`.
///
/// The transfer lands in a `.part` sibling and is renamed into place only
/// once complete, so a failed or aborted run never disturbs whatever already
/// exists at `dest`. Any failure sends one SaveError with the fixed
/// user-facing message — no retry. A tripped `shutdown` flag aborts quietly;
/// nobody is left to read a result at that point.
pub fn save_trailer(
    job:      Uuid,
    url:      &str,
    dest:     &Path,
    tx:       &Sender<StudioResult>,
    shutdown: &AtomicBool,
) {
    let part = partial_path(dest);
    match stream_to_file(job, url, &part, tx, shutdown) {
        Ok(true) => match std::fs::rename(&part, dest) {
            Ok(()) => {
                let _ = tx.send(StudioResult::SaveDone { job, path: dest.to_path_buf() });
            }
            Err(e) => {
                eprintln!("[fetch] save_trailer: rename failed: {e}");
                let _ = std::fs::remove_file(&part);
                let _ = tx.send(StudioResult::SaveError { job, msg: ERR_DOWNLOAD.into() });
            }
        },
        Ok(false) => {
            // Shutdown mid-transfer. Don't leave a truncated .part behind.
            let _ = std::fs::remove_file(&part);
        }
        Err(e) => {
            eprintln!("[fetch] save_trailer: {e:#}");
            let _ = std::fs::remove_file(&part);
            let _ = tx.send(StudioResult::SaveError { job, msg: ERR_DOWNLOAD.into() });
        }
    }
}

/// `<dest>.part` in the same directory, so the final rename never crosses a
/// filesystem boundary.
fn partial_path(dest: &Path) -> std::path::PathBuf {
    let mut name = dest.file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| "trailer.mp4".into());
    name.push(".part");
    dest.with_file_name(name)
}

/// Returns Ok(true) on a completed transfer, Ok(false) when shutdown fired.
fn stream_to_file(
    job:      Uuid,
    url:      &str,
    dest:     &Path,
    tx:       &Sender<StudioResult>,
    shutdown: &AtomicBool,
) -> anyhow::Result<bool> {
    let resp = ureq::get(url).call().context("HTTP request failed")?;

    let total = resp.headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let mut file = File::create(dest)
        .with_context(|| format!("cannot create {}", dest.display()))?;

    let mut body    = resp.into_body();
    let mut reader  = body.as_reader();
    let mut buf     = [0u8; CHUNK];
    let mut written = 0u64;
    let mut last    = Instant::now();

    let _ = tx.send(StudioResult::SaveProgress { job, written: 0, total });

    loop {
        if shutdown.load(Ordering::Relaxed) {
            return Ok(false);
        }
        let n = reader.read(&mut buf).context("download read error")?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).context("write error")?;
        written += n as u64;

        if last.elapsed() >= PROGRESS_INTERVAL {
            let _ = tx.send(StudioResult::SaveProgress { job, written, total });
            last = Instant::now();
        }
    }

    file.flush().context("flush error")?;
    let _ = tx.send(StudioResult::SaveProgress { job, written, total });
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::path::PathBuf;

    #[test]
    fn partial_path_is_a_sibling_with_part_suffix() {
        let dest = PathBuf::from("/tmp/downloads/movie-trailer.mp4");
        assert_eq!(
            partial_path(&dest),
            PathBuf::from("/tmp/downloads/movie-trailer.mp4.part"),
        );
    }

    #[test]
    fn failed_download_leaves_an_existing_destination_intact() {
        let dir  = tempfile::tempdir().unwrap();
        let dest = dir.path().join("movie-trailer.mp4");
        std::fs::write(&dest, b"keep me").unwrap();

        let (tx, rx) = bounded(16);
        let shutdown = AtomicBool::new(false);
        let job = Uuid::new_v4();
        // Nothing listens on the discard port, so the request fails fast.
        save_trailer(job, "http://127.0.0.1:9/trailer.mp4", &dest, &tx, &shutdown);

        match rx.recv_timeout(Duration::from_secs(10)).expect("save result") {
            StudioResult::SaveError { job: j, msg } => {
                assert_eq!(j, job);
                assert_eq!(msg, ERR_DOWNLOAD);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(std::fs::read(&dest).unwrap(), b"keep me");
        assert!(!partial_path(&dest).exists());
    }
}

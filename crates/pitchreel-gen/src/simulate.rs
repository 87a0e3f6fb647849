// crates/pitchreel-gen/src/simulate.rs
//
// The simulated render pipeline. No media work happens anywhere in PitchReel;
// "generation" is a timed progress ramp followed by a table lookup. The
// TrailerSource trait keeps that stand-in swappable: a real backend call can
// replace SimulatedStudio without touching the worker or the state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use pitchreel_core::genre::Genre;
use pitchreel_core::helpers::url::with_freshness_token;
use pitchreel_core::session::{ResolvedClip, TrailerBrief};

/// Anything that can turn a brief into a resolved trailer clip.
///
/// `progress` receives whole percentages (0..=100) as the work advances.
/// `cancel` is polled by the implementation; when it fires the source stops
/// and returns `Ok(None)`. `Err` is reserved for real backends — the shipped
/// simulator cannot fail once entered.
pub trait TrailerSource: Send + Sync + 'static {
    fn render(
        &self,
        brief:    &TrailerBrief,
        progress: &mut dyn FnMut(u8),
        cancel:   &AtomicBool,
    ) -> anyhow::Result<Option<ResolvedClip>>;
}

/// The fake studio: a fixed-delay ramp that caps below 100 and jumps to the
/// finished state only at resolution — a visual simplification, not a measure
/// of work done.
pub struct SimulatedStudio {
    /// Interval between progress reports.
    pub tick:  Duration,
    /// Percentage points added per tick.
    pub step:  u8,
    /// Progress ceiling while the run is still in flight.
    pub cap:   u8,
    /// Total wall-clock duration of one run.
    pub total: Duration,
}

impl Default for SimulatedStudio {
    fn default() -> Self {
        Self {
            tick:  Duration::from_millis(500),
            step:  10,
            cap:   90,
            total: Duration::from_secs(5),
        }
    }
}

impl TrailerSource for SimulatedStudio {
    fn render(
        &self,
        brief:    &TrailerBrief,
        progress: &mut dyn FnMut(u8),
        cancel:   &AtomicBool,
    ) -> anyhow::Result<Option<ResolvedClip>> {
        let started = Instant::now();
        let mut pct: u8 = 0;
        progress(0);

        loop {
            let elapsed = started.elapsed();
            if elapsed >= self.total {
                break;
            }
            // Never sleep past the resolution deadline.
            std::thread::sleep(self.tick.min(self.total - elapsed));

            if cancel.load(Ordering::Relaxed) {
                return Ok(None);
            }
            if pct < self.cap {
                pct = (pct.saturating_add(self.step)).min(self.cap);
                progress(pct);
            }
        }

        // Resolution: classify the brief as it stood when the run began,
        // then stamp the sample URL with a cache-busting freshness token.
        let genre = Genre::classify(&brief.title, &brief.description);
        progress(100);

        Ok(Some(ResolvedClip {
            genre,
            url:      with_freshness_token(genre.sample_url(), now_millis()),
            duration: genre.sample_duration(),
        }))
    }
}

/// Milliseconds since the Unix epoch — the freshness token value.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_studio() -> SimulatedStudio {
        SimulatedStudio {
            tick:  Duration::from_millis(2),
            step:  30,
            cap:   90,
            total: Duration::from_millis(20),
        }
    }

    fn brief(title: &str, desc: &str) -> TrailerBrief {
        TrailerBrief { title: title.into(), description: desc.into() }
    }

    #[test]
    fn resolves_to_the_classified_genre() {
        let studio  = fast_studio();
        let cancel  = AtomicBool::new(false);
        let mut seen = Vec::new();

        let clip = studio
            .render(&brief("Epic Action Adventure", "An action-packed thriller"),
                    &mut |p| seen.push(p), &cancel)
            .unwrap()
            .expect("uncancelled run resolves");

        assert_eq!(clip.genre, Genre::Action);
        assert!(clip.url.starts_with(Genre::Action.sample_url()));
        assert!(clip.url.contains("?t="));
        assert_eq!(clip.duration, Genre::Action.sample_duration());
    }

    #[test]
    fn progress_ramps_monotonically_caps_then_finishes_at_100() {
        let studio  = fast_studio();
        let cancel  = AtomicBool::new(false);
        let mut seen = Vec::new();

        studio
            .render(&brief("a", "b"), &mut |p| seen.push(p), &cancel)
            .unwrap();

        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
        assert!(seen.windows(2).all(|w| w[0] <= w[1]), "non-monotonic: {seen:?}");
        // Everything before resolution stays at or below the cap.
        assert!(seen[..seen.len() - 1].iter().all(|&p| p <= 90));
    }

    #[test]
    fn cancel_flag_stops_the_run_without_a_clip() {
        let studio = SimulatedStudio {
            tick:  Duration::from_millis(2),
            step:  10,
            cap:   90,
            total: Duration::from_secs(60),
        };
        let cancel = AtomicBool::new(true);

        let out = studio
            .render(&brief("a", "b"), &mut |_| {}, &cancel)
            .unwrap();
        assert!(out.is_none());
    }
}

// crates/pitchreel-core/src/helpers/time.rs
//
// Human-readable timecode formatting for the preview transport bar.

/// Format a playhead position in seconds as `MM:SS`.
///
/// ```
/// use pitchreel_core::helpers::time::format_time;
/// assert_eq!(format_time(0.0),   "00:00");
/// assert_eq!(format_time(61.5),  "01:01");
/// assert_eq!(format_time(754.0), "12:34");
/// ```
pub fn format_time(s: f64) -> String {
    let m  = (s / 60.0) as u32;
    let sc = (s % 60.0) as u32;
    format!("{m:02}:{sc:02}")
}

/// Format a clip runtime as a compact human-readable string.
///
/// | Range    | Format    | Example   |
/// |----------|-----------|-----------|
/// | ≥ 3600 s | `H:MM:SS` | `1:04:35` |
/// | ≥ 60 s   | `M:SS`    | `9:56`    |
/// | < 60 s   | `S.Xs`    | `4.2s`    |
///
/// ```
/// use pitchreel_core::helpers::time::format_duration;
/// assert_eq!(format_duration(4.2),   "4.2s");
/// assert_eq!(format_duration(596.0), "9:56");
/// ```
pub fn format_duration(secs: f64) -> String {
    if secs >= 3600.0 {
        format!(
            "{}:{:02}:{:02}",
            secs as u64 / 3600,
            (secs as u64 % 3600) / 60,
            secs as u64 % 60,
        )
    } else if secs >= 60.0 {
        format!("{}:{:02}", secs as u64 / 60, secs as u64 % 60)
    } else {
        format!("{secs:.1}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_pads_both_fields() {
        assert_eq!(format_time(5.9), "00:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn format_duration_picks_the_right_band() {
        assert_eq!(format_duration(59.9), "59.9s");
        assert_eq!(format_duration(60.0), "1:00");
        assert_eq!(format_duration(3875.0), "1:04:35");
    }
}

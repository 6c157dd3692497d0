//! Duration formatting for progress and summary lines.

use std::time::Duration;

/// Format a duration for display.
///
/// Sub-second durations are shown in milliseconds, shorter than a minute
/// with one decimal, longer as minutes and seconds.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else if millis < 60_000 {
        format!("{:.1}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

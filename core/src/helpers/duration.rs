use std::time::Duration;

/// Human readable elapsed time for log lines, e.g. `1m 5s` or `250ms`.
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else if secs >= 10 {
        format!("{}s", secs)
    } else if secs > 0 {
        format!("{}s {}ms", secs, total_ms % 1000)
    } else {
        format!("{}ms", total_ms)
    }
}

//! Human-readable durations for progress lines.

use std::time::Duration;

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Render whole seconds as `"1 hour 2 minutes 5 seconds"`.
///
/// Zero components are left out; anything under a second is `"0 seconds"`.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let components = [
        (total / DAY, "day"),
        (total % DAY / HOUR, "hour"),
        (total % HOUR / MINUTE, "minute"),
        (total % MINUTE, "second"),
    ];
    let parts: Vec<String> = components
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| plural(*n, label))
        .collect();
    if parts.is_empty() {
        return plural(0, "second");
    }
    parts.join(" ")
}

fn plural(n: u64, label: &str) -> String {
    if n == 1 {
        format!("{n} {label}")
    } else {
        format!("{n} {label}s")
    }
}

//! Human-readable durations for builds, steps and tests
//!
//! Formats:
//! - Sub-second: 250ms
//! - Under a minute: 45s
//! - Under an hour: 3m 12s
//! - Longer: 1h 4m

use chrono::Duration;

/// Format a duration; negative durations render as zero
pub fn format_duration(d: Duration) -> String {
    let millis = d.num_milliseconds().max(0);
    if millis < 1000 {
        return format!("{millis}ms");
    }

    let secs = millis / 1000;
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Format a duration given in (fractional) seconds.
///
/// Between one second and a minute, tenths are kept: `1.5s`, `12s`.
pub fn format_seconds(secs: f64) -> String {
    if !secs.is_finite() {
        return "-".to_string();
    }

    let tenths = (secs * 10.0).round() / 10.0;
    if (1.0..60.0).contains(&tenths) {
        return if tenths.fract() == 0.0 {
            format!("{tenths:.0}s")
        } else {
            format!("{tenths:.1}s")
        };
    }

    format_duration(Duration::milliseconds((secs * 1000.0).round() as i64))
}

//! Clock face formatting

/// Format a number of seconds as `MM:SS`.
///
/// Both parts are zero-padded to two digits; minutes keep growing past 99
/// for long durations.
pub fn format_clock(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

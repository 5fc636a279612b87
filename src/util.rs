// Display bounds for a zone's activation time. Enforced by the UI widget,
// not by the registry.
pub const TIME_MIN: u16 = 1;
pub const TIME_MAX: u16 = 15;

pub fn clamp_time(time: u16) -> u16 {
    time.clamp(TIME_MIN, TIME_MAX)
}

/// Formats the elapsed clock as zero-padded `MM : SS`.
pub fn format_elapsed(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02} : {:02}", minutes, seconds)
}

//! Elapsed-time rendering for stake positions.

const SECS_PER_DAY: u64 = 86_400;

/// Render an elapsed time as whole days plus a `hh:mm:ss` remainder.
///
/// Days come first because they are the reward period.
pub fn format_elapsed(secs: u64) -> String {
    let days = secs / SECS_PER_DAY;
    let rest = secs % SECS_PER_DAY;
    let clock = format!("{:02}:{:02}:{:02}", rest / 3600, rest % 3600 / 60, rest % 60);
    match days {
        0 => clock,
        1 => format!("1 day {clock}"),
        n => format!("{n} days {clock}"),
    }
}

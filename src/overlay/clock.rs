//! Wall-clock label.

use web_time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: i64 = 86_400;

/// Format `now` as 24-hour `HH:MM`, shifted by `utc_offset_minutes`
/// (positive east of Greenwich).
#[must_use]
pub fn format_clock(now: SystemTime, utc_offset_minutes: i32) -> String {
    let secs = match now.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    };
    let local = secs + i64::from(utc_offset_minutes) * 60;
    let of_day = local.rem_euclid(SECS_PER_DAY);
    format!("{:02}:{:02}", of_day / 3600, of_day % 3600 / 60)
}

/// Milliseconds since the Unix epoch, saturating at zero.
#[must_use]
pub fn unix_millis(now: SystemTime) -> u64 {
    now.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    fn at(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn formats_utc_with_leading_zeros() {
        assert_eq!(format_clock(at(0), 0), "00:00");
        // 1970-01-01 09:05:59
        assert_eq!(format_clock(at(9 * 3600 + 5 * 60 + 59), 0), "09:05");
    }

    #[test]
    fn offset_wraps_around_midnight() {
        // 23:30 UTC at UTC+7 is 06:30 the next day
        assert_eq!(format_clock(at(23 * 3600 + 30 * 60), 7 * 60), "06:30");
        // 00:15 UTC at UTC-5 is 19:15 the previous day
        assert_eq!(format_clock(at(86_400 + 15 * 60), -5 * 60), "19:15");
    }

    #[test]
    fn millis_since_epoch() {
        assert_eq!(unix_millis(at(2)), 2000);
    }
}

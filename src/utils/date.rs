//! UTC date utilities without timezone dependencies.
//!
//! Writeup dates come from file modification times, so only the conversion
//! from [`SystemTime`] and a couple of display formats are needed.
//!
//! ```ignore
//! let dt = DateTimeUtc::from_unix(1_700_000_000);
//! assert_eq!(dt.to_ymd(), "2023-11-14");
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn now() -> Self {
        Self::from_system_time(SystemTime::now())
    }

    /// Convert a filesystem timestamp. Times before 1970 are supported.
    pub fn from_system_time(time: SystemTime) -> Self {
        #[allow(clippy::cast_possible_wrap)] // seconds since 1970 fit easily
        let secs = match time.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(e) => -(e.duration().as_secs_f64().ceil() as i64),
        };
        Self::from_unix(secs)
    }

    /// Convert seconds since the Unix epoch.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix(secs: i64) -> Self {
        let days = secs.div_euclid(86_400);
        let rem = secs.rem_euclid(86_400);
        let (year, month, day) = civil_from_days(days);
        Self::new(
            year,
            month,
            day,
            (rem / 3600) as u8,
            ((rem / 60) % 60) as u8,
            (rem % 60) as u8,
        )
    }

    /// `YYYY-MM-DD`
    pub fn to_ymd(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn to_timestamp(self) -> String {
        format!(
            "{} {:02}:{:02}:{:02}",
            self.to_ymd(),
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// Days since 1970-01-01 → (year, month, day) in the proleptic Gregorian calendar.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_epoch() {
        assert_eq!(DateTimeUtc::from_unix(0), DateTimeUtc::new(1970, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_known_timestamp() {
        let dt = DateTimeUtc::from_unix(1_700_000_000);
        assert_eq!(dt.to_ymd(), "2023-11-14");
        assert_eq!(dt.to_timestamp(), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_leap_day() {
        assert_eq!(DateTimeUtc::from_unix(951_782_400).to_ymd(), "2000-02-29");
        assert_eq!(DateTimeUtc::from_unix(951_782_400 + 86_400).to_ymd(), "2000-03-01");
    }

    #[test]
    fn test_before_epoch() {
        assert_eq!(DateTimeUtc::from_unix(-1).to_timestamp(), "1969-12-31 23:59:59");
    }

    #[test]
    fn test_from_system_time() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(DateTimeUtc::from_system_time(time).to_ymd(), "2023-11-14");
    }
}

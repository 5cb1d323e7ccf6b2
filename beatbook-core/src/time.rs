//! Time utilities: resolve the agent's local calendar day.

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// The calendar date at `now` in an IANA timezone like "Asia/Kolkata".
/// The beat schedule runs on the agent's wall clock, not UTC.
pub fn local_date(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now.with_timezone(&tz).date_naive())
}

/// The weekday at `now` in the given timezone.
pub fn local_weekday(now: DateTime<Utc>, tz: &str) -> Result<Weekday> {
    Ok(local_date(now, tz)?.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Regression test: late UTC evening is already the next day in Kolkata.
    #[test]
    fn test_kolkata_day_rolls_over_before_utc() {
        // 2024-06-01 20:00 UTC is 2024-06-02 01:30 IST.
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        assert_eq!(
            local_date(now, "Asia/Kolkata").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
        );
        assert_eq!(local_weekday(now, "Asia/Kolkata").unwrap(), Weekday::Sun);
        assert_eq!(local_weekday(now, "UTC").unwrap(), Weekday::Sat);
    }

    #[test]
    fn test_invalid_timezone_errors() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(local_date(now, "Mars/OlympusMons").is_err());
    }
}

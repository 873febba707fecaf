use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::errors::{Error, Result};

/// Zone used when the device zone is not configured.
pub const DEFAULT_DEVICE_TZ: Tz = chrono_tz::UTC;

/// Offset of `tz` on the given date, sampled at noon UTC so DST gaps around
/// midnight never make the conversion ambiguous.
pub fn zone_offset_on(tz: Tz, on: NaiveDate) -> FixedOffset {
    let noon = NaiveDateTime::new(on, NaiveTime::default()) + Duration::hours(12);
    tz.offset_from_utc_datetime(&noon).fix()
}

/// Converts a device-local time of day to UTC using the zone's offset on `on`.
pub fn local_time_to_utc(time: NaiveTime, on: NaiveDate, tz: Tz) -> NaiveTime {
    let offset = zone_offset_on(tz, on);
    time.overflowing_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))
        .0
}

/// Converts a UTC time of day to device-local time using the zone's offset on `on`.
pub fn utc_time_to_local(time: NaiveTime, on: NaiveDate, tz: Tz) -> NaiveTime {
    let offset = zone_offset_on(tz, on);
    time.overflowing_add_signed(Duration::seconds(offset.local_minus_utc() as i64))
        .0
}

/// Today's date in the device zone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Formats a UTC time of day as an ISO offset time (`HH:MM:SS+00:00`).
pub fn format_utc_offset_time(time: NaiveTime) -> String {
    format!("{}+00:00", time.format("%H:%M:%S"))
}

/// Parses an ISO offset time (`08:30Z`, `08:30:00+02:00`, `08:30:00.5-0130`)
/// and returns the equivalent UTC time of day.
pub fn parse_offset_time_as_utc(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    let (time_part, offset_seconds) = split_offset(value)?;

    let time = NaiveTime::parse_from_str(time_part, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M"))
        .map_err(|e| Error::invalid_input(format!("Invalid time of day '{}': {}", value, e)))?;

    Ok(time
        .overflowing_sub_signed(Duration::seconds(offset_seconds as i64))
        .0)
}

fn split_offset(value: &str) -> Result<(&str, i32)> {
    if let Some(stripped) = value.strip_suffix(['Z', 'z']) {
        return Ok((stripped, 0));
    }

    let sign_pos = value
        .rfind(['+', '-'])
        .ok_or_else(|| Error::invalid_input(format!("Time '{}' has no UTC offset", value)))?;
    let (time_part, offset_part) = value.split_at(sign_pos);
    let sign = if offset_part.starts_with('-') { -1 } else { 1 };
    let digits: String = offset_part[1..].chars().filter(|c| *c != ':').collect();

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::invalid_input(format!(
            "Invalid UTC offset in '{}'",
            value
        )));
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.as_str(), "0"),
        4 => digits.split_at(2),
        _ => {
            return Err(Error::invalid_input(format!(
                "Invalid UTC offset in '{}'",
                value
            )))
        }
    };
    let hours: i32 = hours
        .parse()
        .map_err(|_| Error::invalid_input(format!("Invalid UTC offset in '{}'", value)))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| Error::invalid_input(format!("Invalid UTC offset in '{}'", value)))?;
    if hours > 23 || minutes > 59 {
        return Err(Error::invalid_input(format!(
            "Invalid UTC offset in '{}'",
            value
        )));
    }

    Ok((time_part, sign * (hours * 3600 + minutes * 60)))
}

/// Parses an RFC 3339 instant, normalising it to UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::invalid_input(format!("Invalid date-time '{}': {}", value, e)))
}

/// Resolves a device-local wall-clock date and time to a UTC instant.
/// Ambiguous times resolve to the earlier instant; skipped times are rejected.
pub fn local_datetime_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            Error::invalid_input(format!("{} {} does not exist in {}", date, time, tz.name()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_local_utc_round_trip_with_dst() {
        let tz: Tz = "Europe/Warsaw".parse().unwrap();
        // CEST (+02:00) in summer, CET (+01:00) in winter
        assert_eq!(local_time_to_utc(t(8, 30), d(2024, 7, 1), tz), t(6, 30));
        assert_eq!(local_time_to_utc(t(8, 30), d(2024, 1, 15), tz), t(7, 30));
        assert_eq!(utc_time_to_local(t(6, 30), d(2024, 7, 1), tz), t(8, 30));
    }

    #[test]
    fn test_conversion_wraps_midnight() {
        let tz: Tz = "Asia/Tokyo".parse().unwrap();
        assert_eq!(local_time_to_utc(t(7, 0), d(2024, 3, 1), tz), t(22, 0));
        assert_eq!(utc_time_to_local(t(22, 0), d(2024, 3, 1), tz), t(7, 0));
    }

    #[test]
    fn test_parse_offset_time_variants() {
        assert_eq!(parse_offset_time_as_utc("08:30Z").unwrap(), t(8, 30));
        assert_eq!(parse_offset_time_as_utc("08:30:00+00:00").unwrap(), t(8, 30));
        assert_eq!(parse_offset_time_as_utc("08:30:00+02:00").unwrap(), t(6, 30));
        assert_eq!(parse_offset_time_as_utc("23:15:00-0130").unwrap(), t(0, 45));
        assert_eq!(parse_offset_time_as_utc("01:00+05").unwrap(), t(20, 0));
    }

    #[test]
    fn test_parse_offset_time_rejects_naive_and_garbage() {
        assert!(parse_offset_time_as_utc("08:30:00").is_err());
        assert!(parse_offset_time_as_utc("lunch+01:00").is_err());
        assert!(parse_offset_time_as_utc("08:30+99:00").is_err());
    }

    #[test]
    fn test_parse_offset_time_rejects_non_ascii_offset() {
        assert!(parse_offset_time_as_utc("08:00:00+aé1").is_err());
        assert!(parse_offset_time_as_utc("08:00:00-0é").is_err());
        assert!(parse_offset_time_as_utc("08:00:00++1:00").is_err());
    }

    #[test]
    fn test_format_utc_offset_time() {
        assert_eq!(format_utc_offset_time(t(6, 5)), "06:05:00+00:00");
    }

    #[test]
    fn test_parse_instant_normalises_offset() {
        let instant = parse_instant("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-05-01T08:00:00+00:00");
    }

    #[test]
    fn test_local_datetime_to_utc() {
        let warsaw = chrono_tz::Europe::Warsaw;
        let utc = local_datetime_to_utc(d(2024, 7, 1), t(8, 0), warsaw).unwrap();
        assert_eq!(utc, Utc.with_ymd_and_hms(2024, 7, 1, 6, 0, 0).unwrap());
        assert!(local_datetime_to_utc(d(2024, 3, 31), t(2, 30), warsaw).is_err());
    }
}

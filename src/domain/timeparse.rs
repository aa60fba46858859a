// Reading time parsing with year inference
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Parses a reading time (`"MM-DD"` or `"MM-DD HH:mm"`) into an absolute
/// timestamp.
///
/// Period files carry no year, so it is inferred from `now`: a month later
/// than the reference month is taken to belong to the previous year. This
/// handles data recorded across a year boundary, at the cost of ambiguity for
/// very sparse datasets.
///
/// Malformed input logs a warning and falls back to `now` rather than
/// erroring; callers must tolerate fallback timestamps that do not reflect
/// true reading order.
pub fn parse_reading_time(time: &str, now: NaiveDateTime) -> NaiveDateTime {
    match try_parse(time, now) {
        Some(timestamp) => timestamp,
        None => {
            tracing::warn!("unparsable reading time {time:?}, substituting current time");
            now
        }
    }
}

fn try_parse(time: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let mut tokens = time.split_whitespace();
    let date_part = tokens.next()?;
    let clock_part = tokens.next();
    if tokens.next().is_some() {
        return None;
    }

    let mut fields = date_part.split('-');
    let month: u32 = fields.next()?.parse().ok()?;
    let day: u32 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let mut year = now.year();
    if month > now.month() {
        year -= 1;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let clock = match clock_part {
        Some(part) => parse_clock(part)?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(clock))
}

/// Parses an `"HH:mm"` clock value, 1-2 digits per field.
pub fn parse_clock(clock: &str) -> Option<NaiveTime> {
    let mut fields = clock.split(':');
    let hour: u32 = fields.next()?.parse().ok()?;
    let minute: u32 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        let parsed = parse_reading_time("06-01", reference());
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_time(NaiveTime::MIN)
        );
    }

    #[test]
    fn test_parse_date_and_clock() {
        let parsed = parse_reading_time("6-1 8:05", reference());
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(8, 5, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_future_month_is_previous_year() {
        let parsed = parse_reading_time("12-20", reference());
        assert_eq!(parsed.year(), 2024);

        let parsed = parse_reading_time("06-20", reference());
        assert_eq!(parsed.year(), 2025);
    }

    #[test]
    fn test_invalid_month_falls_back() {
        assert_eq!(parse_reading_time("13-45", reference()), reference());
    }

    #[test]
    fn test_invalid_day_and_clock_fall_back() {
        assert_eq!(parse_reading_time("06-31", reference()), reference());
        assert_eq!(parse_reading_time("06-01 25:00", reference()), reference());
    }

    #[test]
    fn test_extra_date_component_falls_back() {
        // legacy "MM-DD-HH" samples are not valid dashboard times
        assert_eq!(parse_reading_time("05-05-23", reference()), reference());
    }

    #[test]
    fn test_garbage_falls_back() {
        assert_eq!(parse_reading_time("yesterday", reference()), reference());
        assert_eq!(parse_reading_time("", reference()), reference());
    }
}

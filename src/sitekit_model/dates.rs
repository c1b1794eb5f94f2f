use chrono::TimeZone as _;

/// Used when `date_format` is not set.
pub const DEFAULT_DATE_FORMAT: &str = "%a %d %B %Y";

pub(crate) fn localize(
    tz: chrono_tz::Tz,
    date: chrono::DateTime<chrono::Utc>,
) -> chrono::DateTime<chrono_tz::Tz> {
    tz.from_utc_datetime(&date.naive_utc())
}

pub(crate) fn format(
    tz: chrono_tz::Tz,
    format: Option<&str>,
    date: chrono::DateTime<chrono::Utc>,
) -> String {
    let format = format.unwrap_or(DEFAULT_DATE_FORMAT);
    localize(tz, date).format(format).to_string()
}

#[cfg(test)]
mod test {
    use chrono::TimeZone as _;

    use super::*;

    fn new_years() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn localize_shifts_to_zone() {
        let local = localize(chrono_tz::America::Los_Angeles, new_years());
        assert_eq!(local.to_rfc3339(), "2023-12-31T16:00:00-08:00");
    }

    #[test]
    fn format_uses_default() {
        let text = format(chrono_tz::America::Los_Angeles, None, new_years());
        assert_eq!(text, "Sun 31 December 2023");
    }

    #[test]
    fn format_uses_override() {
        let text = format(chrono_tz::UTC, Some("%Y-%m-%d %Z"), new_years());
        assert_eq!(text, "2024-01-01 UTC");
    }
}

use std::fmt;

use chrono::prelude::*;

const REPORTING_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a reporting date as `2006-01-02 15:04:05 Z` for UTC and
/// `2006-01-02 15:04:05 -07:00` for any other offset.
pub fn format_reporting_date<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let offset = if dt.offset().fix().local_minus_utc() == 0 {
        "Z".to_string()
    } else {
        dt.format("%:z").to_string()
    };
    format!("{} {}", dt.format(REPORTING_DATE_FORMAT), offset)
}

pub fn now_reporting_date() -> String {
    format_reporting_date(&Local::now())
}

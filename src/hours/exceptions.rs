use chrono::DateTime;
use chrono_tz::Tz;

use crate::ISO_FORMAT_DATE;

/// True when today's Central-time date appears in the closed-exception
/// list. Entries that are not yyyy-MM-dd dates simply never match.
pub fn is_closed_today(closed_dates: &[String], now: &DateTime<Tz>) -> bool {
    matches_today(closed_dates, now)
}

/// True when today's Central-time date appears in the open-exception list.
pub fn is_open_today(open_dates: &[String], now: &DateTime<Tz>) -> bool {
    matches_today(open_dates, now)
}

fn matches_today(dates: &[String], now: &DateTime<Tz>) -> bool {
    let today = now.format(ISO_FORMAT_DATE).to_string();
    dates.iter().any(|date| date == &today)
}

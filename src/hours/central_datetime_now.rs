use chrono::{DateTime, Datelike, Local};
use chrono_tz::Tz;


pub fn central_datetime_now() -> DateTime<Tz> {
    let local_datetime = Local::now();
    let central_timezone: Tz = "America/Chicago".parse().unwrap();
    let central_datetime: DateTime<Tz> = local_datetime.with_timezone(&central_timezone);
    return central_datetime;
}

/// Day-of-week digit of a Central-time instant, 0 = Sunday .. 6 = Saturday.
///
/// Callers read "now" once per evaluation and derive this once from it, so
/// a day boundary crossing mid-request cannot flag two different days as
/// today.
pub fn weekday_digit(datetime: &DateTime<Tz>) -> u8 {
    datetime.weekday().num_days_from_sunday() as u8
}

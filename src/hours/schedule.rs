use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use super::central_datetime_now::weekday_digit;
use super::error::HoursError;
use super::period::HoursPeriod;
use super::time_of_day::TimeOfDay;

pub const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// A raw weekday-tagged time entry from the data store, one per opening
/// or closing event. Validated on construction so the builder can trust
/// its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursRecord {
    weekday_digit: u8,
    time: TimeOfDay,
}

impl HoursRecord {
    pub fn new(weekday_digit: u8, time: &str, time_digits: &str) -> Result<Self, HoursError> {
        if weekday_digit > 6 {
            return Err(HoursError::InvalidWeekdayDigit(weekday_digit));
        }
        Ok(Self {
            weekday_digit,
            time: TimeOfDay::new(time_digits, time)?,
        })
    }

    pub fn weekday_digit(&self) -> u8 {
        self.weekday_digit
    }

    pub fn time(&self) -> &TimeOfDay {
        &self.time
    }
}

/// One day of the week: its paired open/close periods in chronological
/// order plus the flags the evaluator and the response need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub day: &'static str,
    pub day_digit: u8,
    pub periods: Vec<HoursPeriod>,
    pub is_24_hours: bool,
    pub is_today: bool,
    pub hours_summary: String,
}

/// The full week, always seven entries ordered Sunday through Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    days: [DaySchedule; 7],
}

impl WeeklySchedule {
    pub fn days(&self) -> &[DaySchedule; 7] {
        &self.days
    }

    /// The entry for a weekday digit in 0 = Sunday .. 6 = Saturday.
    pub fn day(&self, weekday_digit: u8) -> &DaySchedule {
        &self.days[weekday_digit as usize]
    }
}

/// Builds the weekly schedule by pairing each day's sorted opening times
/// with its sorted closing times.
///
/// `now` is the caller's single reading of the current Central-time
/// instant; it only determines which entry is flagged as today.
pub fn build_schedule(
    open_records: &[HoursRecord],
    close_records: &[HoursRecord],
    now: &DateTime<Tz>,
) -> Result<WeeklySchedule, HoursError> {
    let today_digit = weekday_digit(now);
    let days = [
        day_schedule(0, open_records, close_records, today_digit)?,
        day_schedule(1, open_records, close_records, today_digit)?,
        day_schedule(2, open_records, close_records, today_digit)?,
        day_schedule(3, open_records, close_records, today_digit)?,
        day_schedule(4, open_records, close_records, today_digit)?,
        day_schedule(5, open_records, close_records, today_digit)?,
        day_schedule(6, open_records, close_records, today_digit)?,
    ];
    Ok(WeeklySchedule { days })
}

fn day_schedule(
    day_digit: u8,
    open_records: &[HoursRecord],
    close_records: &[HoursRecord],
    today_digit: u8,
) -> Result<DaySchedule, HoursError> {
    let opens = sorted_for_day(open_records, day_digit);
    let closes = sorted_for_day(close_records, day_digit);
    if opens.len() != closes.len() {
        return Err(HoursError::ScheduleMismatch {
            weekday: DAY_NAMES[day_digit as usize],
            open_count: opens.len(),
            close_count: closes.len(),
        });
    }

    // A first pairing of 0000-0000 is the data store's way of saying the
    // site never closes that day.
    let is_24_hours = match (opens.first(), closes.first()) {
        (Some(open), Some(close)) => open.time().digits() == 0 && close.time().digits() == 0,
        _ => false,
    };

    let periods: Vec<HoursPeriod> = opens
        .into_iter()
        .zip(closes)
        .map(|(open, close)| HoursPeriod::new(open.time().clone(), close.time().clone()))
        .collect();

    Ok(DaySchedule {
        day: DAY_NAMES[day_digit as usize],
        day_digit,
        hours_summary: hours_summary(&periods, is_24_hours),
        periods,
        is_24_hours,
        is_today: day_digit == today_digit,
    })
}

fn sorted_for_day(records: &[HoursRecord], day_digit: u8) -> Vec<&HoursRecord> {
    let mut day_records: Vec<&HoursRecord> = records
        .iter()
        .filter(|record| record.weekday_digit() == day_digit)
        .collect();
    // Stable sort keeps records with equal times in input order.
    day_records.sort_by_key(|record| record.time().digits());
    day_records
}

fn hours_summary(periods: &[HoursPeriod], is_24_hours: bool) -> String {
    if is_24_hours {
        return "Open 24 hours".to_string();
    }
    if periods.is_empty() {
        return "Closed".to_string();
    }
    periods
        .iter()
        .filter_map(|period| {
            let open = period.open_time.as_ref()?;
            let close = period.close_time.as_ref()?;
            Some(format!("{} - {}", open.display(), close.display()))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

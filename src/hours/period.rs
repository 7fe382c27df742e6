use serde::Serialize;

use super::time_of_day::TimeOfDay;

/// Lookahead threshold for the opening-soon / closing-soon flags.
pub const SOON_WINDOW_MINUTES: u32 = 60;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// One open/close pair within a day. Every period the schedule builder
/// emits has both endpoints; a pair can also be fully absent for a day
/// with no service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursPeriod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<TimeOfDay>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<TimeOfDay>,
}

impl HoursPeriod {
    pub fn new(open_time: TimeOfDay, close_time: TimeOfDay) -> Self {
        Self {
            open_time: Some(open_time),
            close_time: Some(close_time),
        }
    }

    /// Whether `now_digits` falls inside this period. The interval is
    /// half-open: the opening minute counts, the closing minute does not.
    /// A close time numerically earlier than the open time means the
    /// period runs past midnight into the next day.
    pub fn contains(&self, now_digits: u16) -> bool {
        let (Some(open), Some(close)) = (&self.open_time, &self.close_time) else {
            return false;
        };
        let (now, close) = overnight_adjusted(open.digits(), close.digits(), now_digits);
        minutes_of(open.digits()) <= now && now < close
    }

    /// Whether this period opens within `window_minutes` after `now_digits`.
    pub fn opens_within(&self, now_digits: u16, window_minutes: u32) -> bool {
        let Some(open) = &self.open_time else {
            return false;
        };
        let open = minutes_of(open.digits());
        let now = minutes_of(now_digits);
        open >= now && open - now <= window_minutes
    }

    /// Whether this period closes within `window_minutes` after
    /// `now_digits`, with the close pushed into tomorrow for overnight
    /// periods.
    pub fn closes_within(&self, now_digits: u16, window_minutes: u32) -> bool {
        let (Some(open), Some(close)) = (&self.open_time, &self.close_time) else {
            return false;
        };
        let (now, close) = overnight_adjusted(open.digits(), close.digits(), now_digits);
        close >= now && close - now <= window_minutes
    }
}

fn minutes_of(digits: u16) -> u32 {
    (digits / 100) as u32 * 60 + (digits % 100) as u32
}

/// Maps the current time and the close time onto a timeline anchored at
/// the open time. For an overnight period the close always lands on the
/// next day; the current time lands there too once it has wrapped past
/// midnight.
fn overnight_adjusted(open_digits: u16, close_digits: u16, now_digits: u16) -> (u32, u32) {
    let open = minutes_of(open_digits);
    let close = minutes_of(close_digits);
    let now = minutes_of(now_digits);
    if close < open {
        let now = if now < open { now + MINUTES_PER_DAY } else { now };
        (now, close + MINUTES_PER_DAY)
    } else {
        (now, close)
    }
}

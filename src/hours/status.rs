use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

use super::period::{HoursPeriod, SOON_WINDOW_MINUTES};

/// The live verdict for one site at one instant.
///
/// The soon fields are `None` only when today has no schedule at all;
/// once periods exist they are always `Some`, matching the upstream API
/// where `undefined` meant "not applicable" rather than "no".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStatus {
    pub is_open_now: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_soon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_soon: Option<bool>,
}

impl LiveStatus {
    /// Status for a site running around the clock today.
    pub fn open_all_day() -> Self {
        Self {
            is_open_now: true,
            opening_soon: Some(false),
            closing_soon: Some(false),
        }
    }

    /// Status when today has no schedule; no transition can be near.
    pub fn no_hours_today() -> Self {
        Self {
            is_open_now: false,
            opening_soon: None,
            closing_soon: None,
        }
    }
}

/// Decides the live open/closed state for "right now" from today's
/// periods, or from the 24-hour flag, which wins outright.
///
/// `now` is reduced to HHMM digits once; every period comparison reuses
/// that single reading.
pub fn evaluate_status(
    today_periods: &[HoursPeriod],
    is_24_hours: bool,
    now: &DateTime<Tz>,
) -> LiveStatus {
    if is_24_hours {
        return LiveStatus::open_all_day();
    }
    if today_periods.is_empty() {
        return LiveStatus::no_hours_today();
    }

    let now_digits = (now.hour() * 100 + now.minute()) as u16;
    let is_open_now = today_periods
        .iter()
        .any(|period| period.contains(now_digits));

    if is_open_now {
        let closing_soon = today_periods
            .iter()
            .any(|period| period.closes_within(now_digits, SOON_WINDOW_MINUTES));
        LiveStatus {
            is_open_now: true,
            opening_soon: Some(false),
            closing_soon: Some(closing_soon),
        }
    } else {
        let opening_soon = today_periods
            .iter()
            .any(|period| period.opens_within(now_digits, SOON_WINDOW_MINUTES));
        LiveStatus {
            is_open_now: false,
            opening_soon: Some(opening_soon),
            closing_soon: Some(false),
        }
    }
}

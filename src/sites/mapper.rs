use chrono::DateTime;
use chrono_tz::Tz;
use regex::Regex;

use crate::airtable::records::{HoursFields, Record, SiteFields};
use crate::hours::central_datetime_now::weekday_digit;
use crate::hours::error::HoursError;
use crate::hours::exceptions::{is_closed_today, is_open_today};
use crate::hours::schedule::{build_schedule, HoursRecord, WeeklySchedule};
use crate::hours::status::{evaluate_status, LiveStatus};

use super::response::SiteResponse;
use super::transit::parse_transit_option;

/// Projects raw Airtable rows into the response records the API serves,
/// joining each site's linked hours rows and computing its weekly
/// schedule and live status.
pub struct SiteMapper {
    time_digits: Regex,
}

impl SiteMapper {
    pub fn new() -> Self {
        Self {
            time_digits: Regex::new(r"^\d{4}$").unwrap(),
        }
    }

    /// Maps every valid site against the caller's single `now` reading.
    /// Any hours data problem aborts the whole pass; the server layer
    /// decides whether to fall back to the cache.
    pub fn map_sites(
        &self,
        sites: &[Record<SiteFields>],
        hours: &[Record<HoursFields>],
        now: &DateTime<Tz>,
    ) -> Result<Vec<SiteResponse>, HoursError> {
        sites
            .iter()
            .filter(|site| Self::is_valid(&site.fields))
            .map(|site| self.map_site(&site.fields, hours, now))
            .collect()
    }

    // A row without a name or map position cannot be rendered.
    fn is_valid(fields: &SiteFields) -> bool {
        fields
            .org_name
            .as_ref()
            .is_some_and(|name| !name.is_empty())
            && fields.longitude.is_some()
            && fields.latitude.is_some()
            && fields.color.is_some()
    }

    fn map_site(
        &self,
        fields: &SiteFields,
        hours: &[Record<HoursFields>],
        now: &DateTime<Tz>,
    ) -> Result<SiteResponse, HoursError> {
        let (open_records, close_records) = linked_hours_records(fields, hours)?;
        let schedule = build_schedule(&open_records, &close_records, now)?;
        let status = live_status(fields, &schedule, now);

        Ok(SiteResponse {
            name: fields.org_name.clone(),
            neighborhood: fields.neighborhood_name.clone(),
            address: fields.address.clone(),
            longitude: fields.longitude,
            latitude: fields.latitude,
            most_recently_updated_at: fields.last_updated.clone(),
            currently_open_for_distributing: fields.currently_open_for_distributing,
            opening_for_distributing_donations: self
                .display_time(fields.opening_for_distributing.as_deref()),
            closing_for_distributing_donations: self
                .display_time(fields.closing_for_distributing.as_deref()),
            currently_open_for_receiving: fields.currently_open_for_receiving,
            opening_for_receiving_donations: self
                .display_time(fields.opening_for_receiving.as_deref()),
            closing_for_receiving_donations: self
                .display_time(fields.closing_for_receiving.as_deref()),
            urgent_need: fields.urgent_need.clone(),
            seeking_money: fields.seeking_money,
            seeking_money_url: fields.seeking_money_url.clone(),
            no_id_needed: fields.no_id_needed,
            some_info_required: fields.some_info_required,
            warming_site: fields.warming_site,
            public_transit_options: fields.public_transit.as_ref().map(|options| {
                options
                    .iter()
                    .filter_map(|option| parse_transit_option(option))
                    .collect()
            }),
            accepting: fields.accepting.clone(),
            not_accepting: fields.not_accepting.clone(),
            seeking_volunteers: fields.seeking_volunteers,
            notes: fields.notes.clone(),
            color: fields.color.clone(),
            is_open_now: status.is_open_now,
            opening_soon: status.opening_soon,
            closing_soon: status.closing_soon,
            hours: schedule,
        })
    }

    fn display_time(&self, time: Option<&str>) -> Option<String> {
        time.map(|time| self.to_12_hour(time))
    }

    /// Legacy display format for the donation time cells: `"1000"` ->
    /// `"10:00 am"`, `"1900"` -> `"7:00 pm"`. Anything that is not a
    /// 4-digit time passes through untouched.
    fn to_12_hour(&self, time: &str) -> String {
        if !self.time_digits.is_match(time) {
            return time.to_string();
        }
        let Ok(digits) = time.parse::<u16>() else {
            return time.to_string();
        };
        let hour = digits / 100;
        let minute = digits % 100;
        let meridiem = if hour >= 12 { "pm" } else { "am" };
        let hour = match hour % 12 {
            0 => 12,
            hour => hour,
        };
        format!("{}:{:02} {}", hour, minute, meridiem)
    }
}

/// Closed-date exceptions beat open-date exceptions beat the schedule.
fn live_status(fields: &SiteFields, schedule: &WeeklySchedule, now: &DateTime<Tz>) -> LiveStatus {
    let closed_dates = fields.closed_dates.as_deref().unwrap_or(&[]);
    if is_closed_today(closed_dates, now) {
        return LiveStatus::no_hours_today();
    }
    let open_dates = fields.open_dates.as_deref().unwrap_or(&[]);
    if is_open_today(open_dates, now) {
        return LiveStatus::open_all_day();
    }
    let today = schedule.day(weekday_digit(now));
    evaluate_status(&today.periods, today.is_24_hours, now)
}

/// Resolves the site's linked hours rows into open and close record
/// lists for the schedule builder. Stale links (ids deleted upstream)
/// are skipped; a row with absent close cells contributes an unpaired
/// open, which the builder reports as a mismatch.
fn linked_hours_records(
    fields: &SiteFields,
    hours: &[Record<HoursFields>],
) -> Result<(Vec<HoursRecord>, Vec<HoursRecord>), HoursError> {
    let mut open_records = Vec::new();
    let mut close_records = Vec::new();
    let Some(linked_ids) = &fields.hours_periods else {
        return Ok((open_records, close_records));
    };

    for id in linked_ids {
        let Some(record) = hours.iter().find(|record| &record.id == id) else {
            continue;
        };
        let row = &record.fields;
        let (Some(weekday), Some(time), Some(digits)) = (
            row.open_weekday_digit,
            &row.open_time,
            &row.open_time_digits,
        ) else {
            continue;
        };
        open_records.push(HoursRecord::new(weekday, time, digits)?);
        if let (Some(time), Some(digits)) = (&row.close_time, &row.close_time_digits) {
            close_records.push(HoursRecord::new(weekday, time, digits)?);
        }
    }
    Ok((open_records, close_records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn central(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
        let timezone: Tz = "America/Chicago".parse().unwrap();
        timezone
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .unwrap()
    }

    // 2021-02-25 was a Thursday (weekday digit 4).
    fn thursday(hour: u32, minute: u32) -> DateTime<Tz> {
        central(2021, 2, 25, hour, minute)
    }

    fn site(fields: SiteFields) -> Record<SiteFields> {
        Record {
            id: "recSite".to_string(),
            fields,
        }
    }

    fn valid_fields() -> SiteFields {
        SiteFields {
            org_name: Some("Community Fridge".to_string()),
            longitude: Some(-93.265),
            latitude: Some(44.977),
            color: Some("#00CC00".to_string()),
            ..SiteFields::default()
        }
    }

    fn hours_row(
        id: &str,
        weekday: u8,
        open: (&str, &str),
        close: Option<(&str, &str)>,
    ) -> Record<HoursFields> {
        Record {
            id: id.to_string(),
            fields: HoursFields {
                open_weekday: Some("thursday".to_string()),
                open_weekday_digit: Some(weekday),
                open_time: Some(open.0.to_string()),
                open_time_digits: Some(open.1.to_string()),
                close_time: close.map(|close| close.0.to_string()),
                close_time_digits: close.map(|close| close.1.to_string()),
            },
        }
    }

    fn linked(fields: SiteFields, ids: &[&str]) -> SiteFields {
        SiteFields {
            hours_periods: Some(ids.iter().map(|id| id.to_string()).collect()),
            ..fields
        }
    }

    #[test]
    fn test_filters_invalid_records() {
        let mapper = SiteMapper::new();
        let sites = [
            site(valid_fields()),
            site(SiteFields {
                org_name: None,
                ..valid_fields()
            }),
            site(SiteFields {
                org_name: Some("".to_string()),
                ..valid_fields()
            }),
            site(SiteFields {
                longitude: None,
                ..valid_fields()
            }),
            site(SiteFields {
                latitude: None,
                ..valid_fields()
            }),
            site(SiteFields {
                color: None,
                ..valid_fields()
            }),
        ];

        let result = mapper.map_sites(&sites, &[], &thursday(12, 0)).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name.as_deref(), Some("Community Fridge"));
    }

    #[test]
    fn test_joins_linked_hours_and_evaluates_today() {
        let mapper = SiteMapper::new();
        let hours = [
            hours_row("recThu", 4, ("11:00AM", "1100"), Some(("3:00PM", "1500"))),
            hours_row("recFri", 5, ("9:00AM", "0900"), Some(("5:00PM", "1700"))),
        ];
        let sites = [site(linked(valid_fields(), &["recThu", "recFri"]))];

        let result = mapper.map_sites(&sites, &hours, &thursday(13, 0)).unwrap();
        let mapped = &result[0];
        assert!(mapped.is_open_now);
        assert_eq!(mapped.opening_soon, Some(false));
        assert_eq!(mapped.closing_soon, Some(false));

        let thursday_entry = mapped.hours.day(4);
        assert!(thursday_entry.is_today);
        assert_eq!(thursday_entry.hours_summary, "11:00AM - 3:00PM");
        assert_eq!(mapped.hours.day(5).hours_summary, "9:00AM - 5:00PM");
        assert_eq!(mapped.hours.day(0).hours_summary, "Closed");
    }

    #[test]
    fn test_stale_hours_links_are_skipped() {
        let mapper = SiteMapper::new();
        let hours = [hours_row(
            "recThu",
            4,
            ("11:00AM", "1100"),
            Some(("3:00PM", "1500")),
        )];
        let sites = [site(linked(valid_fields(), &["recDeleted", "recThu"]))];

        let result = mapper.map_sites(&sites, &hours, &thursday(13, 0)).unwrap();
        assert!(result[0].is_open_now);
    }

    #[test]
    fn test_absent_close_cells_surface_as_mismatch() {
        let mapper = SiteMapper::new();
        let hours = [hours_row("recThu", 4, ("11:00AM", "1100"), None)];
        let sites = [site(linked(valid_fields(), &["recThu"]))];

        let result = mapper.map_sites(&sites, &hours, &thursday(13, 0));
        assert_eq!(
            result.unwrap_err(),
            HoursError::ScheduleMismatch {
                weekday: "thursday",
                open_count: 1,
                close_count: 0,
            }
        );
    }

    #[test]
    fn test_closed_date_exception_beats_schedule() {
        let mapper = SiteMapper::new();
        let hours = [hours_row(
            "recThu",
            4,
            ("11:00AM", "1100"),
            Some(("3:00PM", "1500")),
        )];
        let fields = SiteFields {
            closed_dates: Some(vec!["2021-02-25".to_string()]),
            ..linked(valid_fields(), &["recThu"])
        };

        let result = mapper
            .map_sites(&[site(fields)], &hours, &thursday(13, 0))
            .unwrap();
        assert!(!result[0].is_open_now);
        assert_eq!(result[0].opening_soon, None);
        assert_eq!(result[0].closing_soon, None);
    }

    #[test]
    fn test_closed_date_exception_beats_open_date_exception() {
        let mapper = SiteMapper::new();
        let fields = SiteFields {
            closed_dates: Some(vec!["2021-02-25".to_string()]),
            open_dates: Some(vec!["2021-02-25".to_string()]),
            ..valid_fields()
        };

        let result = mapper
            .map_sites(&[site(fields)], &[], &thursday(13, 0))
            .unwrap();
        assert!(!result[0].is_open_now);
    }

    #[test]
    fn test_open_date_exception_overrides_an_empty_day() {
        let mapper = SiteMapper::new();
        let fields = SiteFields {
            open_dates: Some(vec!["2021-02-25".to_string()]),
            ..valid_fields()
        };

        let result = mapper
            .map_sites(&[site(fields)], &[], &thursday(3, 0))
            .unwrap();
        assert!(result[0].is_open_now);
        assert_eq!(result[0].opening_soon, Some(false));
        assert_eq!(result[0].closing_soon, Some(false));
    }

    #[test]
    fn test_no_linked_hours_gives_a_closed_week() {
        let mapper = SiteMapper::new();
        let result = mapper
            .map_sites(&[site(valid_fields())], &[], &thursday(13, 0))
            .unwrap();

        let mapped = &result[0];
        assert!(!mapped.is_open_now);
        assert_eq!(mapped.opening_soon, None);
        assert_eq!(mapped.closing_soon, None);
        for day in mapped.hours.days() {
            assert!(day.periods.is_empty());
        }
    }

    #[test]
    fn test_donation_time_cells_get_the_legacy_display_format() {
        let mapper = SiteMapper::new();
        let fields = SiteFields {
            opening_for_distributing: Some("1000".to_string()),
            closing_for_distributing: Some("1900".to_string()),
            opening_for_receiving: Some("0905".to_string()),
            closing_for_receiving: Some("by appointment".to_string()),
            ..valid_fields()
        };

        let result = mapper
            .map_sites(&[site(fields)], &[], &thursday(13, 0))
            .unwrap();
        let mapped = &result[0];
        assert_eq!(
            mapped.opening_for_distributing_donations.as_deref(),
            Some("10:00 am")
        );
        assert_eq!(
            mapped.closing_for_distributing_donations.as_deref(),
            Some("7:00 pm")
        );
        assert_eq!(
            mapped.opening_for_receiving_donations.as_deref(),
            Some("9:05 am")
        );
        assert_eq!(
            mapped.closing_for_receiving_donations.as_deref(),
            Some("by appointment")
        );
    }

    #[test]
    fn test_twelve_hour_boundaries() {
        let mapper = SiteMapper::new();
        assert_eq!(mapper.to_12_hour("0000"), "12:00 am");
        assert_eq!(mapper.to_12_hour("1200"), "12:00 pm");
        assert_eq!(mapper.to_12_hour("2359"), "11:59 pm");
        assert_eq!(mapper.to_12_hour("130"), "130");
    }

    #[test]
    fn test_transit_options_map_and_drop() {
        let mapper = SiteMapper::new();
        let fields = SiteFields {
            public_transit: Some(vec![
                "5-BUS-2 blocks".to_string(),
                "malformed".to_string(),
            ]),
            ..valid_fields()
        };

        let result = mapper
            .map_sites(&[site(fields)], &[], &thursday(13, 0))
            .unwrap();
        let options = result[0].public_transit_options.as_ref().unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].route_name, "5");

        let without = mapper
            .map_sites(&[site(valid_fields())], &[], &thursday(13, 0))
            .unwrap();
        assert!(without[0].public_transit_options.is_none());
    }

    #[test]
    fn test_absent_cells_are_omitted_from_the_json() {
        let mapper = SiteMapper::new();
        let result = mapper
            .map_sites(&[site(valid_fields())], &[], &thursday(13, 0))
            .unwrap();

        let json = serde_json::to_value(&result[0]).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("name"));
        assert!(object.contains_key("isOpenNow"));
        assert!(object.contains_key("hours"));
        assert!(!object.contains_key("address"));
        assert!(!object.contains_key("seekingMoneyURL"));
        assert!(!object.contains_key("openingSoon"));
        assert_eq!(json["hours"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn test_seeking_money_url_keeps_legacy_casing() {
        let mapper = SiteMapper::new();
        let fields = SiteFields {
            seeking_money: Some(true),
            seeking_money_url: Some("https://example.org/donate".to_string()),
            ..valid_fields()
        };

        let result = mapper
            .map_sites(&[site(fields)], &[], &thursday(13, 0))
            .unwrap();
        let json = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(json["seekingMoneyURL"], "https://example.org/donate");
        assert_eq!(json["seekingMoney"], true);
    }
}

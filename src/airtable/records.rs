use serde::Deserialize;

/// One page of an Airtable list call. `offset` is present while more
/// pages remain and is echoed back to fetch the next one.
#[derive(Debug, Deserialize)]
pub struct RecordPage<F> {
    pub records: Vec<Record<F>>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Record<F> {
    pub id: String,
    pub fields: F,
}

/// Raw cells of a `mutual_aid_locations` row. Airtable leaves empty
/// cells out of the payload entirely, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteFields {
    pub org_name: Option<String>,
    pub neighborhood_name: Option<String>,
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub last_updated: Option<String>,
    pub currently_open_for_distributing: Option<bool>,
    pub opening_for_distributing: Option<String>,
    pub closing_for_distributing: Option<String>,
    pub currently_open_for_receiving: Option<bool>,
    pub opening_for_receiving: Option<String>,
    pub closing_for_receiving: Option<String>,
    pub urgent_need: Option<String>,
    pub seeking_money: Option<bool>,
    pub seeking_money_url: Option<String>,
    pub no_id_needed: Option<bool>,
    pub some_info_required: Option<bool>,
    pub warming_site: Option<bool>,
    pub public_transit: Option<Vec<String>>,
    pub accepting: Option<String>,
    pub not_accepting: Option<String>,
    pub seeking_volunteers: Option<bool>,
    pub notes: Option<String>,
    pub color: Option<String>,
    /// Linked record ids into the `hours_periods` table.
    pub hours_periods: Option<Vec<String>>,
    pub closed_dates: Option<Vec<String>>,
    pub open_dates: Option<Vec<String>>,
}

/// Raw cells of an `hours_periods` row. The close cells are genuinely
/// optional upstream; the mapper turns their absence into a schedule
/// mismatch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HoursFields {
    pub open_weekday: Option<String>,
    pub open_weekday_digit: Option<u8>,
    pub open_time: Option<String>,
    pub open_time_digits: Option<String>,
    pub close_time: Option<String>,
    pub close_time_digits: Option<String>,
}

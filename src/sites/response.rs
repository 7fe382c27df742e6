use serde::Serialize;

use crate::hours::schedule::WeeklySchedule;

use super::transit::TransitRoute;

/// One site as the API returns it. The key names and their legacy
/// casing (`seekingMoneyURL` included) are frozen; the frontend matches
/// them literally. Absent upstream cells disappear from the JSON rather
/// than serializing as null.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_recently_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currently_open_for_distributing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_for_distributing_donations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_for_distributing_donations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currently_open_for_receiving: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_for_receiving_donations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_for_receiving_donations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent_need: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeking_money: Option<bool>,
    #[serde(rename = "seekingMoneyURL", skip_serializing_if = "Option::is_none")]
    pub seeking_money_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_id_needed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub some_info_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warming_site: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_transit_options: Option<Vec<TransitRoute>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_accepting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seeking_volunteers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub is_open_now: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_soon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_soon: Option<bool>,
    pub hours: WeeklySchedule,
}

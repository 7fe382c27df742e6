use serde::Serialize;

const LIGHTRAIL_ICON: &str = "tram";
const BUS_ICON: &str = "directions_bus";
const BLUELINE: &str = "BLUELINE";
const GREENLINE: &str = "GREENLINE";
const BUS: &str = "BUS";
const PURPLE: &str = "#771473";
const BLUE: &str = "#0055A5";
const GREEN: &str = "#00B100";

/// A nearby transit route the way the map frontend renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitRoute {
    pub route_name: String,
    pub background_color: &'static str,
    pub icon: &'static str,
    pub distance: String,
}

/// Parses one raw transit option, formatted upstream as
/// `name-KIND-distance` (e.g. `"5-BUS-2 blocks"`). Options with fewer
/// than two hyphens or an unknown kind are dropped.
pub fn parse_transit_option(option: &str) -> Option<TransitRoute> {
    let parts: Vec<&str> = option.split('-').collect();
    if parts.len() < 3 {
        return None;
    }

    let (background_color, icon) = match parts[1] {
        BLUELINE => (BLUE, LIGHTRAIL_ICON),
        GREENLINE => (GREEN, LIGHTRAIL_ICON),
        BUS => (PURPLE, BUS_ICON),
        _ => return None,
    };

    Some(TransitRoute {
        route_name: parts[0].to_string(),
        background_color,
        icon,
        distance: parts[2].to_string(),
    })
}

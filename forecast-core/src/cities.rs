//! Static lookup table from city identifiers to CWA location names.

/// The identifiers the frontend sends, paired with the location names the CWA
/// datastore expects. The set is fixed and agreed with the frontend; entries
/// must never be added here without a matching frontend change.
const CITY_TABLE: &[(&str, &str)] = &[
    ("taipei", "臺北市"),
    ("newtaipei", "新北市"),
    ("taoyuan", "桃園市"),
    ("taichung", "臺中市"),
    ("tainan", "臺南市"),
    ("kaohsiung", "高雄市"),
    ("keelung", "基隆市"),
    ("hsinchu", "新竹市"),
    ("chiayi", "嘉義市"),
];

/// Resolve a city identifier (any letter case) to its CWA location name.
pub fn lookup_location(city_id: &str) -> Option<&'static str> {
    let lower = city_id.to_lowercase();
    CITY_TABLE.iter().find(|(id, _)| *id == lower).map(|(_, name)| *name)
}

/// All valid city identifiers, in table order.
pub fn valid_city_ids() -> Vec<&'static str> {
    CITY_TABLE.iter().map(|(id, _)| *id).collect()
}

use serde::{Deserialize, Serialize};

/// One discrete time interval's weather summary.
///
/// All fields are strings taken verbatim from the upstream payload (the CWA
/// reports temperatures and probabilities as text); a field stays empty when
/// the upstream omits its element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSlot {
    pub start_time: String,
    pub end_time: String,
    pub weather: String,
    /// Precipitation probability with a literal `%` suffix, e.g. `"30%"`.
    pub rain: String,
    pub min_temp: String,
    pub max_temp: String,
    pub comfort: String,
    pub wind_speed: String,
}

/// Normalized forecast for one city, slots in upstream time order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Location name as the upstream reports it, not the lookup-table value.
    pub city: String,
    /// Dataset description text, passed through verbatim.
    pub update_time: String,
    pub forecasts: Vec<ForecastSlot>,
}

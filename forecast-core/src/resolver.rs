//! The validation → upstream call → reshaping pipeline.

use tracing::warn;

use crate::cities::{lookup_location, valid_city_ids};
use crate::config::Config;
use crate::error::ResolveError;
use crate::model::{ForecastResult, ForecastSlot};
use crate::upstream::{CwaClient, CwaLocation};

/// The six weather-element tags carried by the 36-hour dataset. Each tag
/// selects the slot field its `parameterName` is copied into; tags outside
/// this set are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementTag {
    Wx,
    Pop,
    MinT,
    MaxT,
    Ci,
    Ws,
}

impl ElementTag {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Wx" => Some(Self::Wx),
            "PoP" => Some(Self::Pop),
            "MinT" => Some(Self::MinT),
            "MaxT" => Some(Self::MaxT),
            "CI" => Some(Self::Ci),
            "WS" => Some(Self::Ws),
            _ => None,
        }
    }

    fn apply(self, slot: &mut ForecastSlot, value: &str) {
        match self {
            Self::Wx => slot.weather = value.to_string(),
            Self::Pop => slot.rain = format!("{value}%"),
            Self::MinT => slot.min_temp = value.to_string(),
            Self::MaxT => slot.max_temp = value.to_string(),
            Self::Ci => slot.comfort = value.to_string(),
            Self::Ws => slot.wind_speed = value.to_string(),
        }
    }
}

/// Resolves a city identifier into a normalized forecast.
///
/// Holds only read-only state (HTTP client, credential); cheap to clone and
/// safe to share across concurrent requests.
#[derive(Debug, Clone)]
pub struct ForecastResolver {
    client: CwaClient,
    api_key: String,
}

impl ForecastResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            client: CwaClient::new(config.api_base.clone()),
            api_key: config.api_key.clone().unwrap_or_default(),
        }
    }

    /// Run the full pipeline for one city identifier.
    pub async fn resolve(&self, city_id: &str) -> Result<ForecastResult, ResolveError> {
        let location_name =
            lookup_location(city_id).ok_or_else(|| ResolveError::InvalidCity {
                input: city_id.to_string(),
                valid: valid_city_ids(),
            })?;

        // Checked before any network activity; the key itself is never logged.
        if self.api_key.is_empty() {
            return Err(ResolveError::MissingApiKey);
        }

        let response = self
            .client
            .fetch_forecast(&self.api_key, location_name)
            .await
            .inspect_err(|e| warn!(location = location_name, error = %e, "CWA request failed"))?;

        let records = response.records;
        let Some(location) = records.location.into_iter().next() else {
            return Err(ResolveError::NoData {
                location: location_name.to_string(),
            });
        };

        let forecasts = reshape(&location)
            .inspect_err(|e| warn!(location = location_name, error = %e, "CWA payload rejected"))?;

        Ok(ForecastResult {
            city: location.location_name,
            update_time: records.dataset_description,
            forecasts,
        })
    }
}

/// Flatten the per-element time arrays into one slot per time interval,
/// preserving upstream order.
///
/// The dataset contract says every element carries the same `time` length;
/// a payload that breaks it is rejected rather than read misaligned.
fn reshape(location: &CwaLocation) -> Result<Vec<ForecastSlot>, ResolveError> {
    let elements = &location.weather_element;
    let Some(first) = elements.first() else {
        return Ok(Vec::new());
    };

    let len = first.time.len();
    for element in elements {
        if element.time.len() != len {
            return Err(ResolveError::MalformedUpstream {
                reason: format!(
                    "element '{}' carries {} time entries, expected {}",
                    element.element_name,
                    element.time.len(),
                    len
                ),
            });
        }
    }

    let mut slots = Vec::with_capacity(len);
    for i in 0..len {
        let mut slot = ForecastSlot {
            start_time: first.time[i].start_time.clone(),
            end_time: first.time[i].end_time.clone(),
            ..ForecastSlot::default()
        };

        for element in elements {
            if let Some(tag) = ElementTag::from_name(&element.element_name) {
                tag.apply(&mut slot, &element.time[i].parameter.parameter_name);
            }
        }

        slots.push(slot);
    }

    Ok(slots)
}

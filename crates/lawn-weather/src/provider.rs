//! Current conditions and pollen readings from the Open-Meteo forecast
//! and air-quality APIs.

use crate::geocode::Geocoder;
use crate::types::{
    Coordinates, CurrentConditions, PlaceCandidate, PollenReadings, Readings, Sky, WeatherError,
};
use crate::USER_AGENT;
use chrono::NaiveDateTime;
use lawn_core::ProviderConfig;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

const METERS_PER_FOOT: f64 = 0.3048;
const METERS_PER_INCH: f64 = 0.0254;
const MM_PER_INCH: f64 = 25.4;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: ForecastCurrent,
    #[serde(default)]
    current_units: ForecastUnits,
    daily: Option<ForecastDaily>,
    #[serde(default)]
    daily_units: DailyUnits,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    time: Option<String>,
    temperature_2m: f64,
    wind_speed_10m: f64,
    wind_gusts_10m: Option<f64>,
    rain: Option<f64>,
    snow_depth: Option<f64>,
    weather_code: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct ForecastUnits {
    rain: Option<String>,
    snow_depth: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyUnits {
    precipitation_sum: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastDaily {
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    current: AirQualityCurrent,
}

#[derive(Debug, Deserialize)]
struct AirQualityCurrent {
    alder_pollen: Option<f64>,
    birch_pollen: Option<f64>,
    grass_pollen: Option<f64>,
    mugwort_pollen: Option<f64>,
    olive_pollen: Option<f64>,
    ragweed_pollen: Option<f64>,
}

/// Convert a precipitation amount in `unit` to inches.
fn precipitation_to_inches(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some("mm") => value / MM_PER_INCH,
        Some("cm") => value * 10.0 / MM_PER_INCH,
        // We request inches, so a missing unit means inches
        _ => value,
    }
}

/// Convert a snow depth in `unit` to meters.
fn snow_depth_to_meters(value: f64, unit: Option<&str>) -> f64 {
    match unit {
        Some("ft") => value * METERS_PER_FOOT,
        Some("inch") | Some("in") => value * METERS_PER_INCH,
        Some("cm") => value / 100.0,
        _ => value,
    }
}

impl ForecastResponse {
    fn into_conditions(self) -> CurrentConditions {
        let units = self.current_units;
        let daily_unit = self.daily_units.precipitation_sum;
        let current = self.current;

        let precipitation_today_in = self
            .daily
            .and_then(|d| d.precipitation_sum.into_iter().next().flatten())
            .map(|v| precipitation_to_inches(v, daily_unit.as_deref()))
            .unwrap_or(0.0);

        let observed_at = current
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok());

        CurrentConditions {
            temperature_f: current.temperature_2m,
            wind_speed_mph: current.wind_speed_10m,
            wind_gust_mph: current.wind_gusts_10m.unwrap_or(0.0),
            rain_in: current
                .rain
                .map(|v| precipitation_to_inches(v, units.rain.as_deref()))
                .unwrap_or(0.0),
            snow_depth_m: current
                .snow_depth
                .map(|v| snow_depth_to_meters(v, units.snow_depth.as_deref()))
                .unwrap_or(0.0),
            precipitation_today_in,
            sky: current
                .weather_code
                .map(Sky::from_wmo_code)
                .unwrap_or_default(),
            observed_at,
        }
    }
}

impl From<AirQualityCurrent> for PollenReadings {
    fn from(c: AirQualityCurrent) -> Self {
        Self {
            alder: c.alder_pollen,
            birch: c.birch_pollen,
            grass: c.grass_pollen,
            mugwort: c.mugwort_pollen,
            olive: c.olive_pollen,
            ragweed: c.ragweed_pollen,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    forecast_url: String,
    air_quality_url: String,
    geocoder: Geocoder,
}

impl WeatherProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        let client = Arc::new(client);

        Ok(Self {
            geocoder: Geocoder::with_client(client.clone(), &config.geocoding_url),
            client,
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            air_quality_url: config.air_quality_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    /// Current temperature, wind, rain, snow depth and today's precipitation.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_conditions(
        &self,
        coords: Coordinates,
    ) -> Result<CurrentConditions, WeatherError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}\
             &current=temperature_2m,rain,wind_speed_10m,wind_gusts_10m,snow_depth,weather_code\
             &daily=precipitation_sum&forecast_days=1&timezone=auto\
             &temperature_unit=fahrenheit&wind_speed_unit=mph&precipitation_unit=inch",
            self.forecast_url, coords.latitude, coords.longitude
        );

        let response = self.client.get(&url).send().await?;
        let body: ForecastResponse = crate::handle_response(response).await?;
        Ok(body.into_conditions())
    }

    /// Current pollen readings; species without coverage are `None`.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_air_quality(
        &self,
        coords: Coordinates,
    ) -> Result<PollenReadings, WeatherError> {
        let url = format!(
            "{}/v1/air-quality?latitude={}&longitude={}\
             &current=alder_pollen,birch_pollen,grass_pollen,mugwort_pollen,olive_pollen,ragweed_pollen",
            self.air_quality_url, coords.latitude, coords.longitude
        );

        let response = self.client.get(&url).send().await?;
        let body: AirQualityResponse = crate::handle_response(response).await?;
        Ok(body.current.into())
    }

    /// Fetch weather and pollen for `place` concurrently.
    ///
    /// A weather failure fails the whole fetch. A pollen failure is logged
    /// and leaves the pollen readings empty.
    pub async fn fetch_readings(&self, place: PlaceCandidate) -> Result<Readings, WeatherError> {
        let coords = place.coordinates();
        let (conditions, pollen) =
            tokio::join!(self.fetch_conditions(coords), self.fetch_air_quality(coords));

        let conditions = conditions?;
        let pollen = pollen.unwrap_or_else(|e| {
            tracing::warn!("Air quality unavailable, pollen treated as unreported: {}", e);
            PollenReadings::default()
        });

        Ok(Readings {
            place,
            conditions,
            pollen,
        })
    }

    /// Resolve `query` and fetch readings for the best of up to `count`
    /// candidates. The rest are logged for disambiguation.
    pub async fn lookup(&self, query: &str, count: u8) -> Result<Readings, WeatherError> {
        let mut candidates = self.geocoder.search(query, count).await?.into_iter();
        let place = candidates
            .next()
            .ok_or_else(|| WeatherError::LocationNotFound(query.trim().to_string()))?;
        for other in candidates {
            tracing::info!("Also matched: {}", other.display_label());
        }
        tracing::info!(
            "Radar locked: {} ({:.3}, {:.3})",
            place.display_label(),
            place.latitude,
            place.longitude
        );
        self.fetch_readings(place).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_parsing_normalizes_units() {
        let body: ForecastResponse = serde_json::from_value(serde_json::json!({
            "current_units": { "rain": "mm", "snow_depth": "ft" },
            "daily_units": { "precipitation_sum": "mm" },
            "current": {
                "time": "2026-10-18T14:15",
                "temperature_2m": 61.3,
                "wind_speed_10m": 7.2,
                "wind_gusts_10m": 18.1,
                "rain": 2.54,
                "snow_depth": 1.0,
                "weather_code": 61
            },
            "daily": { "precipitation_sum": [12.7] }
        }))
        .unwrap();

        let c = body.into_conditions();
        assert_eq!(c.temperature_f, 61.3);
        assert_eq!(c.wind_gust_mph, 18.1);
        assert!((c.rain_in - 0.1).abs() < 1e-9);
        assert!((c.precipitation_today_in - 0.5).abs() < 1e-9);
        assert!((c.snow_depth_m - 0.3048).abs() < 1e-9);
        assert_eq!(c.sky, Sky::Rain);
        assert!(c.observed_at.is_some());
    }

    #[test]
    fn test_forecast_parsing_defaults_missing_optionals() {
        let body: ForecastResponse = serde_json::from_value(serde_json::json!({
            "current": {
                "temperature_2m": 70.0,
                "wind_speed_10m": 5.0,
                "rain": null,
                "snow_depth": null
            }
        }))
        .unwrap();

        let c = body.into_conditions();
        assert_eq!(c.wind_gust_mph, 0.0);
        assert_eq!(c.rain_in, 0.0);
        assert_eq!(c.snow_depth_m, 0.0);
        assert_eq!(c.precipitation_today_in, 0.0);
        assert_eq!(c.sky, Sky::Unknown);
        assert!(c.observed_at.is_none());
    }

    #[test]
    fn test_daily_total_uses_daily_units() {
        // Current rain in inches, daily sum reported in mm
        let body: ForecastResponse = serde_json::from_value(serde_json::json!({
            "current_units": { "rain": "inch" },
            "daily_units": { "precipitation_sum": "mm" },
            "current": {
                "temperature_2m": 66.0,
                "wind_speed_10m": 4.0,
                "rain": 0.01
            },
            "daily": { "precipitation_sum": [25.4] }
        }))
        .unwrap();

        let c = body.into_conditions();
        assert_eq!(c.rain_in, 0.01);
        assert!((c.precipitation_today_in - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_snow_depth_units() {
        assert_eq!(snow_depth_to_meters(0.02, Some("m")), 0.02);
        assert!((snow_depth_to_meters(2.0, Some("cm")) - 0.02).abs() < 1e-12);
        assert!((snow_depth_to_meters(1.0, Some("inch")) - 0.0254).abs() < 1e-12);
    }
}

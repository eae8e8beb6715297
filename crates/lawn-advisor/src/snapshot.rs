use chrono::Datelike;
use lawn_weather::Readings;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ground condition as reported by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualGround {
    BoneDry,
    MorningDew,
    SoakedWet,
    SnowCovered,
    Unknown,
}

impl ManualGround {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BoneDry => "Bone Dry",
            Self::MorningDew => "Morning Dew",
            Self::SoakedWet => "Soaked / Wet",
            Self::SnowCovered => "Snow Covered",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ground condition {0:?} (expected dry, dew, wet, snow or unknown)")]
pub struct ParseGroundError(String);

impl FromStr for ManualGround {
    type Err = ParseGroundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry" | "bone-dry" | "bone_dry" => Ok(Self::BoneDry),
            "dew" | "damp" | "morning-dew" | "morning_dew" => Ok(Self::MorningDew),
            "wet" | "soaked" | "soaked-wet" | "soaked_wet" => Ok(Self::SoakedWet),
            "snow" | "snow-covered" | "snow_covered" => Ok(Self::SnowCovered),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseGroundError(s.to_string())),
        }
    }
}

/// Point-in-time readings for one location, built once per query.
///
/// Units: °F, mph, precipitation in inches, snow depth in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_f: f64,
    pub wind_speed_mph: f64,
    pub wind_gust_mph: f64,
    pub current_rain_in: f64,
    pub past_24h_precip_in: f64,
    pub snow_depth_m: f64,
    pub max_pollen_index: f64,
    /// 1..=12; leaf season is skipped when absent
    pub month: Option<u32>,
    pub manual_ground: Option<ManualGround>,
    /// False when the readings are placeholders rather than live data
    pub authoritative: bool,
}

impl WeatherSnapshot {
    /// Live readings with every optional field at its default.
    pub fn new(temperature_f: f64, wind_speed_mph: f64, current_rain_in: f64) -> Self {
        Self {
            temperature_f,
            wind_speed_mph,
            wind_gust_mph: 0.0,
            current_rain_in,
            past_24h_precip_in: 0.0,
            snow_depth_m: 0.0,
            max_pollen_index: 0.0,
            month: None,
            manual_ground: None,
            authoritative: true,
        }
    }

    /// Placeholder sensors shown when no live data could be fetched.
    pub fn neutral_default() -> Self {
        Self {
            authoritative: false,
            ..Self::new(75.0, 5.0, 0.0)
        }
    }

    /// Build from fetched readings. The month comes from the observation's
    /// local time, falling back to `fallback_month`.
    pub fn from_readings(
        readings: &Readings,
        fallback_month: u32,
        manual_ground: Option<ManualGround>,
    ) -> Self {
        let c = &readings.conditions;
        let month = c.observed_at.map(|t| t.month()).unwrap_or(fallback_month);

        Self {
            temperature_f: c.temperature_f,
            wind_speed_mph: c.wind_speed_mph,
            wind_gust_mph: c.wind_gust_mph,
            current_rain_in: c.rain_in,
            past_24h_precip_in: c.precipitation_today_in,
            snow_depth_m: c.snow_depth_m,
            max_pollen_index: readings.pollen.max_index(),
            month: Some(month).filter(|m| (1..=12).contains(m)),
            manual_ground,
            authoritative: true,
        }
    }

    pub fn with_gust(mut self, mph: f64) -> Self {
        self.wind_gust_mph = mph;
        self
    }

    pub fn with_past_24h_precip(mut self, inches: f64) -> Self {
        self.past_24h_precip_in = inches;
        self
    }

    pub fn with_snow_depth(mut self, meters: f64) -> Self {
        self.snow_depth_m = meters;
        self
    }

    pub fn with_pollen(mut self, max_index: f64) -> Self {
        self.max_pollen_index = max_index;
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_manual_ground(mut self, ground: ManualGround) -> Self {
        self.manual_ground = Some(ground);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lawn_weather::{CurrentConditions, PlaceCandidate, PollenReadings, Sky};

    fn readings(observed_month: Option<u32>) -> Readings {
        Readings {
            place: PlaceCandidate {
                name: "Newton".into(),
                admin1: Some("New Jersey".into()),
                country_code: Some("US".into()),
                latitude: 41.058,
                longitude: -74.752,
            },
            conditions: CurrentConditions {
                temperature_f: 64.0,
                wind_speed_mph: 9.0,
                wind_gust_mph: 17.0,
                rain_in: 0.0,
                snow_depth_m: 0.0,
                precipitation_today_in: 0.12,
                sky: Sky::Clouds,
                observed_at: observed_month.and_then(|m| {
                    NaiveDate::from_ymd_opt(2026, m, 3).and_then(|d| d.and_hms_opt(9, 0, 0))
                }),
            },
            pollen: PollenReadings {
                grass: Some(33.0),
                ragweed: Some(8.0),
                ..PollenReadings::default()
            },
        }
    }

    #[test]
    fn test_from_readings_uses_observation_month() {
        let snapshot = WeatherSnapshot::from_readings(&readings(Some(10)), 4, None);
        assert_eq!(snapshot.month, Some(10));
        assert_eq!(snapshot.wind_gust_mph, 17.0);
        assert_eq!(snapshot.past_24h_precip_in, 0.12);
        assert_eq!(snapshot.max_pollen_index, 33.0);
        assert!(snapshot.authoritative);
    }

    #[test]
    fn test_from_readings_falls_back_to_given_month() {
        let snapshot =
            WeatherSnapshot::from_readings(&readings(None), 11, Some(ManualGround::MorningDew));
        assert_eq!(snapshot.month, Some(11));
        assert_eq!(snapshot.manual_ground, Some(ManualGround::MorningDew));
    }

    #[test]
    fn test_neutral_default_is_not_authoritative() {
        let snapshot = WeatherSnapshot::neutral_default();
        assert!(!snapshot.authoritative);
        assert_eq!(snapshot.wind_speed_mph, 5.0);
        assert_eq!(snapshot.current_rain_in, 0.0);
    }

    #[test]
    fn test_parse_manual_ground() {
        assert_eq!("dry".parse(), Ok(ManualGround::BoneDry));
        assert_eq!(" Dew ".parse(), Ok(ManualGround::MorningDew));
        assert_eq!("soaked".parse(), Ok(ManualGround::SoakedWet));
        assert_eq!("snow".parse(), Ok(ManualGround::SnowCovered));
        assert!("muddy".parse::<ManualGround>().is_err());
    }
}

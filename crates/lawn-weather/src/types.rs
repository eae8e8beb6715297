use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sky state for the dashboard line, grouped from WMO weather codes.
///
/// Codes: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    Clear,
    Clouds,
    Fog,
    Drizzle,
    Rain,
    Showers,
    /// Freezing drizzle or rain
    Freezing,
    Snow,
    Storm,
    /// Missing or unrecognized code
    #[default]
    Unknown,
}

impl Sky {
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Clouds,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 | 66 | 67 => Self::Freezing,
            61 | 63 | 65 => Self::Rain,
            80..=82 => Self::Showers,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Storm,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Showers => "Showers",
            Self::Freezing => "Freezing Rain",
            Self::Snow => "Snow",
            Self::Storm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One match returned by the location resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    /// State / province
    pub admin1: Option<String>,
    pub country_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PlaceCandidate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// "Newton, New Jersey, US"
    pub fn display_label(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        if let Some(region) = self.admin1.as_deref().filter(|r| !r.is_empty() && *r != self.name) {
            parts.push(region);
        }
        if let Some(cc) = self.country_code.as_deref().filter(|c| !c.is_empty()) {
            parts.push(cc);
        }
        parts.join(", ")
    }
}

/// Current readings at one coordinate, normalized to the advisor's units.
///
/// Temperature °F, wind mph, precipitation inches, snow depth meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_f: f64,
    pub wind_speed_mph: f64,
    pub wind_gust_mph: f64,
    pub rain_in: f64,
    pub snow_depth_m: f64,
    pub precipitation_today_in: f64,
    pub sky: Sky,
    pub observed_at: Option<NaiveDateTime>,
}

/// Current pollen readings (grains/m³). Species the provider doesn't
/// report for a region come back as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollenReadings {
    pub alder: Option<f64>,
    pub birch: Option<f64>,
    pub grass: Option<f64>,
    pub mugwort: Option<f64>,
    pub olive: Option<f64>,
    pub ragweed: Option<f64>,
}

impl PollenReadings {
    fn species(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("alder", self.alder),
            ("birch", self.birch),
            ("grass", self.grass),
            ("mugwort", self.mugwort),
            ("olive", self.olive),
            ("ragweed", self.ragweed),
        ]
    }

    /// Highest reported reading, ignoring missing species. 0 when none reported.
    pub fn max_index(&self) -> f64 {
        self.species()
            .into_iter()
            .filter_map(|(_, v)| v)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Name of the species with the highest reading
    pub fn dominant_species(&self) -> Option<&'static str> {
        self.species()
            .into_iter()
            .filter_map(|(name, v)| v.filter(|v| v.is_finite() && *v > 0.0).map(|v| (name, v)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }

    pub fn reported_count(&self) -> usize {
        self.species().iter().filter(|(_, v)| v.is_some()).count()
    }
}

/// Everything fetched for one resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub place: PlaceCandidate,
    pub conditions: CurrentConditions,
    pub pollen: PollenReadings,
}

/// Provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("No match for \"{0}\"")]
    LocationNotFound(String),
}

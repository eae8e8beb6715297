use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Where to look when no query is given
    #[serde(default)]
    pub location: LocationConfig,

    /// Upstream data providers
    #[serde(default)]
    pub providers: ProviderConfig,

    /// Rule thresholds and ground override behavior
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Terminal output preferences
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Query used when none is passed on the command line
    #[serde(default = "default_query")]
    pub default_query: String,

    /// Number of candidates requested from the geocoder
    #[serde(default = "default_result_count")]
    pub result_count: u8,
}

fn default_query() -> String {
    "Newton, NJ".to_string()
}

fn default_result_count() -> u8 {
    5
}

/// Upper bound on `result_count`; the geocoder over-fetches for qualified queries
pub const MAX_RESULT_COUNT: u8 = 25;

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_query: default_query(),
            result_count: default_result_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_air_quality_url() -> String {
    "https://air-quality-api.open-meteo.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            air_quality_url: default_air_quality_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Named threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfilePreset {
    /// Cold floor 45°F, leaf and pollen rules enabled
    #[default]
    Standard,
    /// Cold floor 50°F, no leaf or pollen rules
    Classic,
}

/// The thresholds a config file may override, after merging with the preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub heat_ceiling_f: f64,
    pub cold_floor_f: f64,
    pub wind_limit_mph: f64,
    pub pollen_alert_index: f64,
}

impl ProfilePreset {
    pub fn thresholds(self) -> Thresholds {
        match self {
            Self::Standard => Thresholds {
                heat_ceiling_f: 88.0,
                cold_floor_f: 45.0,
                wind_limit_mph: 20.0,
                pollen_alert_index: 50.0,
            },
            Self::Classic => Thresholds {
                cold_floor_f: 50.0,
                ..Self::Standard.thresholds()
            },
        }
    }
}

/// How a user-asserted ground condition interacts with the derived one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroundOverrideMode {
    /// Manual input is never consulted
    Ignore,
    /// Derived status drives the moisture rules; manual input fires its own rule
    #[default]
    Augment,
    /// Manual input becomes the ground status unless it is `Unknown`
    Replace,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub profile: ProfilePreset,

    #[serde(default)]
    pub ground_override_mode: GroundOverrideMode,

    /// Overrides the preset's heat ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_ceiling_f: Option<f64>,

    /// Overrides the preset's cold floor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cold_floor_f: Option<f64>,

    /// Overrides the preset's sustained wind limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_limit_mph: Option<f64>,

    /// Overrides the preset's pollen alert level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pollen_alert_index: Option<f64>,
}

impl AdvisorConfig {
    /// Preset thresholds with this config's overrides applied
    pub fn thresholds(&self) -> Thresholds {
        let base = self.profile.thresholds();
        Thresholds {
            heat_ceiling_f: self.heat_ceiling_f.unwrap_or(base.heat_ceiling_f),
            cold_floor_f: self.cold_floor_f.unwrap_or(base.cold_floor_f),
            wind_limit_mph: self.wind_limit_mph.unwrap_or(base.wind_limit_mph),
            pollen_alert_index: self.pollen_alert_index.unwrap_or(base.pollen_alert_index),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Colored verdict panel
    #[serde(default = "default_true")]
    pub color: bool,

    /// Loading messages and GO quotes
    #[serde(default = "default_true")]
    pub flavor_text: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            flavor_text: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            tracing::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails; warnings are logged.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.location.default_query.trim().is_empty() {
            result.add_warning(
                "location.default_query",
                "No default location - a query must be given on the command line",
            );
        }
        if self.location.result_count == 0 {
            result.add_error("location.result_count", "Must request at least one result");
        } else if self.location.result_count > MAX_RESULT_COUNT {
            result.add_error(
                "location.result_count",
                format!("At most {} results can be requested", MAX_RESULT_COUNT),
            );
        }

        self.validate_url(
            &self.providers.geocoding_url,
            "providers.geocoding_url",
            &mut result,
        );
        self.validate_url(
            &self.providers.forecast_url,
            "providers.forecast_url",
            &mut result,
        );
        self.validate_url(
            &self.providers.air_quality_url,
            "providers.air_quality_url",
            &mut result,
        );

        if self.providers.timeout_secs == 0 {
            result.add_error("providers.timeout_secs", "Timeout must be greater than 0");
        } else if self.providers.timeout_secs > 120 {
            result.add_warning(
                "providers.timeout_secs",
                "Timeout is unusually long (>120s)",
            );
        }

        let advisor = &self.advisor;
        let t = advisor.thresholds();
        let mut finite = true;
        for (field, value) in [
            ("advisor.heat_ceiling_f", t.heat_ceiling_f),
            ("advisor.cold_floor_f", t.cold_floor_f),
            ("advisor.wind_limit_mph", t.wind_limit_mph),
            ("advisor.pollen_alert_index", t.pollen_alert_index),
        ] {
            if !value.is_finite() {
                result.add_error(field, "Threshold must be a finite number");
                finite = false;
            }
        }

        // Checked against the merged values so a single override can't cross the preset
        if finite && t.cold_floor_f >= t.heat_ceiling_f {
            result.add_error(
                "advisor.cold_floor_f",
                format!(
                    "Cold floor ({}) must be below heat ceiling ({})",
                    t.cold_floor_f, t.heat_ceiling_f
                ),
            );
        }

        if finite && t.wind_limit_mph <= 0.0 {
            result.add_error("advisor.wind_limit_mph", "Wind limit must be positive");
        }

        if advisor.profile == ProfilePreset::Classic && advisor.pollen_alert_index.is_some() {
            result.add_warning(
                "advisor.pollen_alert_index",
                "The classic profile has no pollen rule; this setting is ignored",
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("lawn-enforcer");

        Ok(config_dir.join("config.toml"))
    }
}

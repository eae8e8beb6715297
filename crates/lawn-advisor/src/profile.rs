use lawn_core::{AdvisorConfig, ProfilePreset};
use serde::{Deserialize, Serialize};

/// Thresholds for every rule. All comparisons are strict.
///
/// Temperatures °F, speeds mph, precipitation and snow inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleProfile {
    pub heat_ceiling_f: f64,
    pub cold_floor_f: f64,
    pub wind_limit_mph: f64,

    pub snow_cover_in: f64,
    pub active_rain_in: f64,
    pub soaked_past_in: f64,
    pub damp_past_in: f64,

    pub leaf_months: Vec<u32>,
    pub leaf_gust_mph: f64,
    pub leaf_rain_in: f64,

    pub pollen_medium_index: f64,
    pub pollen_alert_index: f64,

    pub leaf_rule: bool,
    pub pollen_rule: bool,
}

impl RuleProfile {
    pub fn standard() -> Self {
        let t = ProfilePreset::Standard.thresholds();
        Self {
            heat_ceiling_f: t.heat_ceiling_f,
            cold_floor_f: t.cold_floor_f,
            wind_limit_mph: t.wind_limit_mph,
            snow_cover_in: 0.5,
            active_rain_in: 0.02,
            soaked_past_in: 0.5,
            damp_past_in: 0.05,
            leaf_months: vec![10, 11],
            leaf_gust_mph: 15.0,
            leaf_rain_in: 0.25,
            pollen_medium_index: 20.0,
            pollen_alert_index: t.pollen_alert_index,
            leaf_rule: true,
            pollen_rule: true,
        }
    }

    /// Heat and wind as standard, a 50°F cold floor and no leaf or pollen rules.
    pub fn classic() -> Self {
        Self {
            cold_floor_f: ProfilePreset::Classic.thresholds().cold_floor_f,
            leaf_rule: false,
            pollen_rule: false,
            ..Self::standard()
        }
    }

    pub fn from_preset(preset: ProfilePreset) -> Self {
        match preset {
            ProfilePreset::Standard => Self::standard(),
            ProfilePreset::Classic => Self::classic(),
        }
    }

    /// Preset named in `config` with its threshold overrides applied.
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let t = config.thresholds();
        Self {
            heat_ceiling_f: t.heat_ceiling_f,
            cold_floor_f: t.cold_floor_f,
            wind_limit_mph: t.wind_limit_mph,
            pollen_alert_index: t.pollen_alert_index,
            ..Self::from_preset(config.profile)
        }
    }
}

impl Default for RuleProfile {
    fn default() -> Self {
        Self::standard()
    }
}

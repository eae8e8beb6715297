//! Categorical statuses derived from a snapshot before any rule runs.

use crate::profile::RuleProfile;
use crate::snapshot::{ManualGround, WeatherSnapshot};
use lawn_core::GroundOverrideMode;
use serde::{Deserialize, Serialize};

pub const INCHES_PER_METER: f64 = 39.37;

/// State of the lawn surface. Derived in strict precedence:
/// snow > active rain > heavy past rain > light past rain > dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundStatus {
    SnowCovered,
    RainingNow,
    SoakedMuddy,
    DampDew,
    BoneDry,
    Unknown,
}

impl GroundStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SnowCovered => "Snow Covered",
            Self::RainingNow => "Raining Now",
            Self::SoakedMuddy => "Soaked / Muddy",
            Self::DampDew => "Damp / Dew",
            Self::BoneDry => "Bone Dry",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafStatus {
    None,
    Season,
    ActiveFall,
}

impl LeafStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Season => "Leaf Season",
            Self::ActiveFall => "Active Fall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollenStatus {
    Low,
    Medium,
    High,
}

impl PollenStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Where the ground status came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundSource {
    Derived,
    Manual,
}

/// Everything derived from a snapshot, in derivation order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub ground: GroundStatus,
    pub ground_source: GroundSource,
    pub leaves: LeafStatus,
    pub pollen: PollenStatus,
    pub pollen_alert: bool,
}

impl Assessment {
    pub fn derive(
        snapshot: &WeatherSnapshot,
        profile: &RuleProfile,
        mode: GroundOverrideMode,
    ) -> Self {
        let derived = derive_ground(snapshot, profile);
        let (ground, ground_source) = match (mode, snapshot.manual_ground) {
            (GroundOverrideMode::Replace, Some(manual)) => match manual_to_ground(manual) {
                Some(ground) => (ground, GroundSource::Manual),
                None => (derived, GroundSource::Derived),
            },
            _ => (derived, GroundSource::Derived),
        };

        Self {
            ground,
            ground_source,
            leaves: derive_leaves(snapshot, profile),
            pollen: derive_pollen(snapshot.max_pollen_index, profile),
            pollen_alert: snapshot.max_pollen_index > profile.pollen_alert_index,
        }
    }
}

pub fn snow_depth_inches(snapshot: &WeatherSnapshot) -> f64 {
    snapshot.snow_depth_m * INCHES_PER_METER
}

pub fn derive_ground(snapshot: &WeatherSnapshot, profile: &RuleProfile) -> GroundStatus {
    if !snapshot.authoritative {
        return GroundStatus::Unknown;
    }

    if snow_depth_inches(snapshot) > profile.snow_cover_in {
        GroundStatus::SnowCovered
    } else if snapshot.current_rain_in > profile.active_rain_in {
        GroundStatus::RainingNow
    } else if snapshot.past_24h_precip_in > profile.soaked_past_in {
        GroundStatus::SoakedMuddy
    } else if snapshot.past_24h_precip_in > profile.damp_past_in {
        GroundStatus::DampDew
    } else {
        GroundStatus::BoneDry
    }
}

/// `None` for `Unknown`, which defers to the derived status.
pub fn manual_to_ground(manual: ManualGround) -> Option<GroundStatus> {
    match manual {
        ManualGround::BoneDry => Some(GroundStatus::BoneDry),
        ManualGround::MorningDew => Some(GroundStatus::DampDew),
        ManualGround::SoakedWet => Some(GroundStatus::SoakedMuddy),
        ManualGround::SnowCovered => Some(GroundStatus::SnowCovered),
        ManualGround::Unknown => None,
    }
}

pub fn derive_leaves(snapshot: &WeatherSnapshot, profile: &RuleProfile) -> LeafStatus {
    let in_season = snapshot
        .month
        .is_some_and(|m| profile.leaf_months.contains(&m));

    if !in_season {
        LeafStatus::None
    } else if snapshot.wind_gust_mph > profile.leaf_gust_mph
        || snapshot.past_24h_precip_in > profile.leaf_rain_in
    {
        LeafStatus::ActiveFall
    } else {
        LeafStatus::Season
    }
}

pub fn derive_pollen(max_index: f64, profile: &RuleProfile) -> PollenStatus {
    if max_index > profile.pollen_alert_index {
        PollenStatus::High
    } else if max_index > profile.pollen_medium_index {
        PollenStatus::Medium
    } else {
        PollenStatus::Low
    }
}

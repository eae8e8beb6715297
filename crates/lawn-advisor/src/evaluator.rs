//! The mowing decision table.
//!
//! Rules run in a fixed order and may only raise the severity. The snow,
//! heat, wind, moisture and manual ground groups always run; the leaf and
//! pollen groups are skipped once the verdict is already NO GO.

use crate::conditions::{snow_depth_inches, Assessment, GroundSource, GroundStatus, LeafStatus};
use crate::profile::RuleProfile;
use crate::snapshot::{ManualGround, WeatherSnapshot};
use lawn_core::{AdvisorConfig, GroundOverrideMode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered GO < CAUTION < NO GO.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MowStatus {
    #[default]
    Go,
    Caution,
    NoGo,
}

impl fmt::Display for MowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Go => "GO",
            Self::Caution => "CAUTION",
            Self::NoGo => "NO GO",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    Snow,
    Heat,
    Cold,
    Wind,
    Moisture,
    Ground,
    Leaves,
    Pollen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason {
    pub group: RuleGroup,
    pub severity: MowStatus,
    pub message: String,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: MowStatus,
    /// In the order the rules fired. Empty exactly when `status` is GO.
    pub reasons: Vec<Reason>,
    pub assessment: Assessment,
}

impl Verdict {
    fn new(assessment: Assessment) -> Self {
        Self {
            status: MowStatus::Go,
            reasons: Vec::new(),
            assessment,
        }
    }

    /// Raise the status to at least `severity` and record why.
    fn escalate(&mut self, group: RuleGroup, severity: MowStatus, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(?group, %severity, "Rule fired: {}", message);
        self.status = self.status.max(severity);
        self.reasons.push(Reason {
            group,
            severity,
            message,
        });
    }

    pub fn is_go(&self) -> bool {
        self.status == MowStatus::Go
    }

    pub fn messages(&self) -> Vec<&str> {
        self.reasons.iter().map(|r| r.message.as_str()).collect()
    }

    pub fn fired(&self, group: RuleGroup) -> bool {
        self.reasons.iter().any(|r| r.group == group)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    profile: RuleProfile,
    override_mode: GroundOverrideMode,
}

impl Evaluator {
    pub fn new(profile: RuleProfile, override_mode: GroundOverrideMode) -> Self {
        Self {
            profile,
            override_mode,
        }
    }

    pub fn from_config(config: &AdvisorConfig) -> Self {
        Self::new(RuleProfile::from_config(config), config.ground_override_mode)
    }

    /// Ground, leaf and pollen status without running any rule.
    pub fn assess(&self, snapshot: &WeatherSnapshot) -> Assessment {
        Assessment::derive(snapshot, &self.profile, self.override_mode)
    }

    pub fn evaluate(&self, snapshot: &WeatherSnapshot) -> Verdict {
        let p = &self.profile;
        let assessment = self.assess(snapshot);
        let mut verdict = Verdict::new(assessment);
        let manual = assessment.ground_source == GroundSource::Manual;

        // Snow
        if assessment.ground == GroundStatus::SnowCovered {
            let message = if manual {
                "SNOW: Snow reported on the lawn. Mowing prohibited.".to_string()
            } else {
                format!(
                    "SNOW: Snow detected ({:.1} in on the ground). Mowing prohibited.",
                    snow_depth_inches(snapshot)
                )
            };
            verdict.escalate(RuleGroup::Snow, MowStatus::NoGo, message);
        }

        // Heat
        if snapshot.temperature_f > p.heat_ceiling_f {
            verdict.escalate(
                RuleGroup::Heat,
                MowStatus::NoGo,
                format!("HEAT: Too hot (>{}°F). Turf stress risk.", p.heat_ceiling_f),
            );
        } else if snapshot.temperature_f < p.cold_floor_f
            && assessment.ground != GroundStatus::SnowCovered
        {
            verdict.escalate(
                RuleGroup::Cold,
                MowStatus::Caution,
                format!("COLD: Dormant grass, tearing risk (<{}°F).", p.cold_floor_f),
            );
        }

        // Wind
        if snapshot.wind_speed_mph > p.wind_limit_mph {
            verdict.escalate(
                RuleGroup::Wind,
                MowStatus::NoGo,
                format!("WIND: Debris risk (>{} mph).", p.wind_limit_mph),
            );
        }

        // Moisture
        match assessment.ground {
            GroundStatus::RainingNow => verdict.escalate(
                RuleGroup::Moisture,
                MowStatus::NoGo,
                "RAIN: Active precipitation detected.",
            ),
            GroundStatus::SoakedMuddy if manual => verdict.escalate(
                RuleGroup::Moisture,
                MowStatus::NoGo,
                "GROUND: Turf reported saturated. Mud risk.",
            ),
            GroundStatus::SoakedMuddy => verdict.escalate(
                RuleGroup::Moisture,
                MowStatus::NoGo,
                format!(
                    "MUD: Heavy recent rain ({:.2} in in the last day). Rutting and mud risk.",
                    snapshot.past_24h_precip_in
                ),
            ),
            GroundStatus::DampDew => verdict.escalate(
                RuleGroup::Moisture,
                MowStatus::Caution,
                "DAMP: Damp ground. Check for clumping.",
            ),
            GroundStatus::SnowCovered | GroundStatus::BoneDry | GroundStatus::Unknown => {}
        }

        // Manual ground report alongside the derived status
        if self.override_mode == GroundOverrideMode::Augment {
            if let Some(reported) = snapshot.manual_ground {
                self.apply_reported_ground(&mut verdict, reported);
            }
        }

        // Leaves
        if p.leaf_rule && verdict.status != MowStatus::NoGo {
            match assessment.leaves {
                LeafStatus::ActiveFall => verdict.escalate(
                    RuleGroup::Leaves,
                    MowStatus::Caution,
                    "LEAVES: High wind/rain causing leaf accumulation.",
                ),
                LeafStatus::Season => verdict.escalate(
                    RuleGroup::Leaves,
                    MowStatus::Caution,
                    "LEAVES: Leaf season. Watch for hidden obstacles.",
                ),
                LeafStatus::None => {}
            }
        }

        // Pollen
        if p.pollen_rule && verdict.status != MowStatus::NoGo && assessment.pollen_alert {
            verdict.escalate(
                RuleGroup::Pollen,
                MowStatus::Caution,
                format!(
                    "POLLEN: High pollen ({:.0}). Recommend mask and eye protection.",
                    snapshot.max_pollen_index
                ),
            );
        }

        tracing::info!(
            status = %verdict.status,
            reasons = verdict.reasons.len(),
            "Mowing verdict"
        );
        verdict
    }

    fn apply_reported_ground(&self, verdict: &mut Verdict, reported: ManualGround) {
        let ground = verdict.assessment.ground;
        match reported {
            ManualGround::SnowCovered if ground != GroundStatus::SnowCovered => verdict.escalate(
                RuleGroup::Ground,
                MowStatus::NoGo,
                "SNOW: Snow reported on the lawn. Mowing prohibited.",
            ),
            ManualGround::SoakedWet if ground != GroundStatus::SoakedMuddy => verdict.escalate(
                RuleGroup::Ground,
                MowStatus::NoGo,
                "GROUND: Turf is saturated.",
            ),
            ManualGround::MorningDew if ground != GroundStatus::DampDew => verdict.escalate(
                RuleGroup::Ground,
                MowStatus::Caution,
                "DEW: Wait for drying.",
            ),
            _ => {}
        }
    }
}

/// Evaluate with the standard profile and augmenting manual input.
pub fn evaluate(snapshot: &WeatherSnapshot) -> Verdict {
    Evaluator::default().evaluate(snapshot)
}

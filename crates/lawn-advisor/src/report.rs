//! What one query produced, ready for the panel.

use crate::conditions::Assessment;
use crate::evaluator::{Evaluator, Verdict};
use crate::snapshot::{ManualGround, WeatherSnapshot};
use lawn_core::AppError;
use lawn_weather::{Readings, Sky};

#[derive(Debug, Clone)]
pub struct Report {
    /// Resolved place, if resolution succeeded
    pub location: Option<String>,
    pub snapshot: WeatherSnapshot,
    pub assessment: Assessment,
    /// `None` when the location could not be resolved
    pub verdict: Option<Verdict>,
    pub sky: Sky,
    /// Number of pollen species the provider reported
    pub pollen_reported: usize,
    pub pollen_species: Option<&'static str>,
    /// Warning or error from the lookup, shown above the dashboard
    pub notice: Option<String>,
}

impl Report {
    pub fn from_readings(
        readings: &Readings,
        evaluator: &Evaluator,
        fallback_month: u32,
        manual_ground: Option<ManualGround>,
    ) -> Self {
        let snapshot = WeatherSnapshot::from_readings(readings, fallback_month, manual_ground);
        let verdict = evaluator.evaluate(&snapshot);

        Self {
            location: Some(readings.place.display_label()),
            assessment: verdict.assessment,
            verdict: Some(verdict),
            snapshot,
            sky: readings.conditions.sky,
            pollen_reported: readings.pollen.reported_count(),
            pollen_species: readings.pollen.dominant_species(),
            notice: None,
        }
    }

    /// Build the report for a finished lookup.
    ///
    /// A failed lookup shows default sensors. An unresolved location gets no
    /// verdict at all; a failed fetch gets one, flagged as not live.
    pub fn from_lookup<E>(
        outcome: Result<Readings, E>,
        evaluator: &Evaluator,
        fallback_month: u32,
        manual_ground: Option<ManualGround>,
    ) -> Self
    where
        E: Into<AppError>,
    {
        let err = match outcome {
            Ok(readings) => {
                return Self::from_readings(&readings, evaluator, fallback_month, manual_ground)
            }
            Err(e) => e.into(),
        };

        let snapshot = WeatherSnapshot {
            manual_ground,
            ..WeatherSnapshot::neutral_default()
        };
        let verdict = if err.is_location_not_found() {
            tracing::warn!("{}", err);
            None
        } else {
            tracing::error!("Lookup failed: {}", err);
            Some(evaluator.evaluate(&snapshot))
        };

        Self {
            location: None,
            assessment: evaluator.assess(&snapshot),
            snapshot,
            verdict,
            sky: Sky::Unknown,
            pollen_reported: 0,
            pollen_species: None,
            notice: Some(err.user_message().to_string()),
        }
    }
}

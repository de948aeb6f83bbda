use crate::error::{Result, TrendError};
use crate::models::{ActivityType, HeartRateImpulseMode, PreparedActivity, RawActivity, UserSettings};
use crate::stress::StressCalculator;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Scoring capabilities selected by the athlete
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparationOptions {
    /// How heart rate impulse becomes a score
    #[serde(default)]
    pub mode: HeartRateImpulseMode,

    /// Score rides with a power meter from weighted power
    #[serde(default)]
    pub power_enabled: bool,

    /// Score swims from pace
    #[serde(default)]
    pub swim_enabled: bool,

    /// Activity types left out entirely
    #[serde(default)]
    pub skip_types: Vec<ActivityType>,
}

impl PreparationOptions {
    /// Raw training impulse is not comparable with power or swim scores
    pub fn validate(&self) -> Result<()> {
        if self.mode == HeartRateImpulseMode::Trimp {
            if self.power_enabled {
                return Err(TrendError::IncompatibleConfiguration {
                    mode: self.mode,
                    feature: "power".to_string(),
                });
            }
            if self.swim_enabled {
                return Err(TrendError::IncompatibleConfiguration {
                    mode: self.mode,
                    feature: "swim".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn skips(&self, activity_type: &ActivityType) -> bool {
        self.skip_types.contains(activity_type)
    }
}

/// Turns raw activities into scored, calendar-tagged activities
pub struct ActivityPreparer<'a> {
    settings: &'a UserSettings,
    options: &'a PreparationOptions,
}

impl<'a> ActivityPreparer<'a> {
    pub fn new(settings: &'a UserSettings, options: &'a PreparationOptions) -> Self {
        ActivityPreparer { settings, options }
    }

    /// Score every activity of the batch, keeping the input order
    ///
    /// Fails with [`TrendError::InsufficientData`] when not a single activity
    /// could be scored by any model.
    pub fn prepare(&self, activities: &[RawActivity]) -> Result<Vec<PreparedActivity>> {
        self.options.validate()?;

        let mut prepared = Vec::with_capacity(activities.len());
        let mut has_minimum_data = false;

        for activity in activities {
            if self.options.skips(&activity.activity_type) {
                debug!(id = %activity.id, activity_type = %activity.activity_type, "Skipping activity");
                continue;
            }

            let prepared_activity = self.prepare_activity(activity);
            has_minimum_data |= prepared_activity.has_score();
            prepared.push(prepared_activity);
        }

        if !has_minimum_data {
            warn!(
                activities = activities.len(),
                mode = %self.options.mode,
                "No activity carries heart rate, power or swim data"
            );
            return Err(TrendError::InsufficientData);
        }

        debug!(prepared = prepared.len(), "Prepared activities");
        Ok(prepared)
    }

    fn prepare_activity(&self, activity: &RawActivity) -> PreparedActivity {
        let date = activity.date();
        let mut prepared = PreparedActivity {
            id: activity.id.clone(),
            date,
            day_of_year: date.ordinal(),
            year: date.year(),
            activity_type: activity.activity_type.clone(),
            name: activity.name.clone(),
            trimp_score: None,
            hrss_score: None,
            power_stress_score: None,
            swim_stress_score: None,
        };

        if let Some(training_impulse) = Self::training_impulse(activity) {
            match self.options.mode {
                HeartRateImpulseMode::Trimp => prepared.trimp_score = Some(training_impulse),
                HeartRateImpulseMode::Hrss => {
                    let lthr =
                        StressCalculator::resolve_lactate_threshold(&activity.activity_type, self.settings);
                    prepared.hrss_score = Some(StressCalculator::heart_rate_stress_score(
                        self.settings.gender,
                        self.settings.max_hr,
                        self.settings.rest_hr,
                        lthr,
                        training_impulse,
                    ));
                }
            }
        }

        if let Some((ftp, weighted_power)) = self.power_inputs(activity) {
            prepared.power_stress_score = Some(StressCalculator::power_stress_score(
                activity.moving_time,
                weighted_power,
                ftp,
            ));
        }

        if let Some((swim_ftp, distance)) = self.swim_inputs(activity) {
            prepared.swim_stress_score = Some(StressCalculator::swim_stress_score(
                distance,
                activity.moving_time,
                activity.elapsed_time,
                swim_ftp,
            ));
        }

        prepared
    }

    fn training_impulse(activity: &RawActivity) -> Option<f64> {
        activity
            .stats
            .as_ref()?
            .heart_rate
            .as_ref()?
            .training_impulse
    }

    /// FTP and weighted power when the power model applies
    fn power_inputs(&self, activity: &RawActivity) -> Option<(f64, f64)> {
        if !activity.activity_type.is_cycling() || !self.options.power_enabled {
            return None;
        }

        let ftp = self.settings.cycling_ftp.filter(|ftp| *ftp > 0.0)?;
        let power = activity.stats.as_ref()?.power.as_ref()?;
        if !power.has_power_meter {
            return None;
        }

        Some((ftp, power.weighted_power?))
    }

    /// Swim FTP and distance when the swim model applies
    fn swim_inputs(&self, activity: &RawActivity) -> Option<(f64, f64)> {
        if !self.options.swim_enabled || !activity.activity_type.is_swimming() {
            return None;
        }

        let swim_ftp = self.settings.swim_ftp.filter(|ftp| *ftp > 0.0)?;
        let distance = activity.distance?;
        if activity.moving_time <= 0.0 {
            return None;
        }

        Some((swim_ftp, distance))
    }
}

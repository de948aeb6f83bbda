//! Fitness trend pipeline
//!
//! Fetches activities once, then runs preparation, daily aggregation and the
//! PMC fold synchronously. The clock is read once per invocation.

use crate::clock::Clock;
use crate::daily::DailyStressGenerator;
use crate::error::{Result, TrendError};
use crate::models::{DayFitnessTrend, DayStress, PreparedActivity, UserSettings};
use crate::pmc::PmcCalculator;
use crate::preparer::{ActivityPreparer, PreparationOptions};
use crate::source::ActivitySource;
use tracing::{info, instrument};

/// Combines an activity source, a clock and the athlete's settings
pub struct FitnessTrendService<S, C> {
    source: S,
    clock: C,
    settings: UserSettings,
    options: PreparationOptions,
    pmc: PmcCalculator,
}

impl<S: ActivitySource, C: Clock> FitnessTrendService<S, C> {
    pub fn new(source: S, clock: C, settings: UserSettings, options: PreparationOptions) -> Self {
        FitnessTrendService {
            source,
            clock,
            settings,
            options,
            pmc: PmcCalculator::new(),
        }
    }

    /// Fetch and score activities
    ///
    /// Incompatible options are rejected before the source is queried.
    #[instrument(skip(self), fields(mode = %self.options.mode))]
    pub async fn prepare(&self) -> Result<Vec<PreparedActivity>> {
        self.options.validate()?;

        let activities = self.source.fetch().await.map_err(TrendError::Fetch)?;
        info!(activities = activities.len(), "Fetched activities");

        ActivityPreparer::new(&self.settings, &self.options).prepare(&activities)
    }

    /// Gapless daily stress from the day before the first activity to today,
    /// followed by the preview window
    #[instrument(skip(self))]
    pub async fn generate_daily_stress(&self) -> Result<Vec<DayStress>> {
        let prepared = self.prepare().await?;
        DailyStressGenerator::generate(&prepared, self.clock.today())
    }

    /// Fitness, fatigue and form for every day of the daily series
    #[instrument(skip(self))]
    pub async fn compute_trend(&self) -> Result<Vec<DayFitnessTrend>> {
        let days = self.generate_daily_stress().await?;
        let trend = self.pmc.compute_trend(&days);

        if let Some(latest) = PmcCalculator::latest(&trend) {
            info!(
                date = %latest.date,
                ctl = latest.ctl,
                atl = latest.atl,
                tsb = latest.tsb,
                "Fitness trend computed"
            );
        }

        Ok(trend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{ActivityType, ExtendedStats, Gender, HeartRateImpulseMode, HeartRateStats, RawActivity};
    use crate::source::StaticSource;
    use chrono::NaiveDate;

    fn create_test_settings() -> UserSettings {
        UserSettings {
            gender: Gender::Female,
            max_hr: 185.0,
            rest_hr: 55.0,
            lactate_threshold: None,
            cycling_ftp: None,
            swim_ftp: None,
        }
    }

    fn create_test_activity(day: u32, impulse: f64) -> RawActivity {
        RawActivity {
            id: day.to_string(),
            name: "Run".to_string(),
            start_time: NaiveDate::from_ymd_opt(2024, 9, day)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap(),
            activity_type: ActivityType::Run,
            distance: Some(8000.0),
            moving_time: 2400.0,
            elapsed_time: 2500.0,
            stats: Some(ExtendedStats {
                heart_rate: Some(HeartRateStats {
                    training_impulse: Some(impulse),
                }),
                power: None,
            }),
        }
    }

    #[tokio::test]
    async fn test_compute_trend_end_to_end() {
        let source = StaticSource::new(vec![create_test_activity(2, 60.0), create_test_activity(4, 90.0)]);
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 9, 5).unwrap());
        let options = PreparationOptions {
            mode: HeartRateImpulseMode::Trimp,
            ..PreparationOptions::default()
        };
        let service = FitnessTrendService::new(source, clock, create_test_settings(), options);

        let trend = service.compute_trend().await.unwrap();

        // Sep 1 .. Sep 5 plus the preview window
        assert_eq!(trend.len(), 5 + 14);
        assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(trend[1].trimp_score, Some(60.0));
        assert_eq!(trend[3].trimp_score, Some(90.0));
        assert!(trend[4].atl < trend[3].atl);
        assert!(trend[5].preview);
    }
}

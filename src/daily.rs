use crate::error::{Result, TrendError};
use crate::models::{ActivityType, DayStress, PreparedActivity};
use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

/// Number of empty days appended after today
pub const PREVIEW_DAYS: u64 = 14;

/// Running per-metric sums for the day being aggregated
#[derive(Debug, Default)]
struct DayAccumulator {
    activity_ids: Vec<String>,
    activity_names: Vec<String>,
    activity_types: Vec<ActivityType>,
    trimp_score: Option<f64>,
    hrss_score: Option<f64>,
    power_stress_score: Option<f64>,
    swim_stress_score: Option<f64>,
    final_stress_score: f64,
}

impl DayAccumulator {
    fn add(&mut self, activity: &PreparedActivity) {
        self.activity_ids.push(activity.id.clone());
        self.activity_names.push(activity.name.clone());
        self.activity_types.push(activity.activity_type.clone());

        Self::accumulate(&mut self.trimp_score, activity.trimp_score);
        Self::accumulate(&mut self.hrss_score, activity.hrss_score);
        Self::accumulate(&mut self.power_stress_score, activity.power_stress_score);
        Self::accumulate(&mut self.swim_stress_score, activity.swim_stress_score);

        if let Some(score) = activity.final_score() {
            self.final_stress_score += score;
        }
    }

    fn accumulate(sum: &mut Option<f64>, score: Option<f64>) {
        if let Some(score) = score {
            *sum.get_or_insert(0.0) += score;
        }
    }

    fn finish(self, date: NaiveDate) -> DayStress {
        DayStress {
            date,
            preview: false,
            activity_ids: self.activity_ids,
            activity_names: self.activity_names,
            activity_types: self.activity_types,
            trimp_score: self.trimp_score,
            hrss_score: self.hrss_score,
            power_stress_score: self.power_stress_score,
            swim_stress_score: self.swim_stress_score,
            final_stress_score: self.final_stress_score,
        }
    }
}

/// Densifies prepared activities into one stress entry per calendar day
pub struct DailyStressGenerator;

impl DailyStressGenerator {
    /// Build the gapless daily series ending with the preview window
    ///
    /// The series starts the day before the first prepared activity, taken by
    /// position rather than by earliest date, and runs through `today`.
    /// [`PREVIEW_DAYS`] empty preview days follow.
    pub fn generate(prepared: &[PreparedActivity], today: NaiveDate) -> Result<Vec<DayStress>> {
        let first = prepared.first().ok_or(TrendError::InsufficientData)?;
        let start = first.date.pred_opt().unwrap_or(first.date);

        debug!(%start, %today, activities = prepared.len(), "Generating daily stress");

        let mut days = Vec::new();
        let mut current = start;
        while current <= today {
            days.push(Self::aggregate_day(prepared, current));
            if current == today {
                break;
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }

        days.extend(Self::preview_days(today));
        Ok(days)
    }

    fn aggregate_day(prepared: &[PreparedActivity], date: NaiveDate) -> DayStress {
        let (year, day_of_year) = (date.year(), date.ordinal());

        let mut accumulator = DayAccumulator::default();
        for activity in prepared
            .iter()
            .filter(|a| a.year == year && a.day_of_year == day_of_year)
        {
            accumulator.add(activity);
        }

        accumulator.finish(date)
    }

    /// Empty days strictly after `today`
    pub fn preview_days(today: NaiveDate) -> Vec<DayStress> {
        (1..=PREVIEW_DAYS)
            .filter_map(|offset| today.checked_add_days(Days::new(offset)))
            .map(DayStress::preview)
            .collect()
    }
}

use crate::models::{DayFitnessTrend, DayStress};
use tracing::debug;

/// CTL time constant in days
pub const CTL_TIME_CONSTANT: f64 = 42.0;

/// ATL time constant in days
pub const ATL_TIME_CONSTANT: f64 = 7.0;

/// Exponential smoothing weight `1 - e^(-1/τ)`
fn smoothing_factor(time_constant: f64) -> f64 {
    1.0 - (-1.0 / time_constant).exp()
}

/// Training Stress Balance interpretation ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsbInterpretation {
    VeryFresh,    // +25 and above
    Fresh,        // +5 to +25
    Neutral,      // -10 to +5
    Fatigued,     // -30 to -10
    VeryFatigued, // Below -30
}

impl TsbInterpretation {
    /// Get TSB interpretation from numeric value
    pub fn from_tsb(tsb: f64) -> Self {
        if tsb >= 25.0 {
            TsbInterpretation::VeryFresh
        } else if tsb >= 5.0 {
            TsbInterpretation::Fresh
        } else if tsb >= -10.0 {
            TsbInterpretation::Neutral
        } else if tsb >= -30.0 {
            TsbInterpretation::Fatigued
        } else {
            TsbInterpretation::VeryFatigued
        }
    }

    /// Short label for tables
    pub fn label(&self) -> &'static str {
        match self {
            TsbInterpretation::VeryFresh => "very fresh",
            TsbInterpretation::Fresh => "fresh",
            TsbInterpretation::Neutral => "neutral",
            TsbInterpretation::Fatigued => "fatigued",
            TsbInterpretation::VeryFatigued => "very fatigued",
        }
    }

    /// Get interpretation description
    pub fn description(&self) -> &'static str {
        match self {
            TsbInterpretation::VeryFresh => "Very fresh (may be losing fitness)",
            TsbInterpretation::Fresh => "Fresh and ready for hard training/racing",
            TsbInterpretation::Neutral => "Neutral (normal training)",
            TsbInterpretation::Fatigued => "Fatigued (monitor closely)",
            TsbInterpretation::VeryFatigued => "Very fatigued (rest needed)",
        }
    }
}

/// Fitness and fatigue carried from one day to the next
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct LoadState {
    ctl: f64,
    atl: f64,
}

/// Core PMC calculation engine
pub struct PmcCalculator {
    ctl_factor: f64,
    atl_factor: f64,
}

impl PmcCalculator {
    /// Create new PMC calculator with the 42/7 day time constants
    pub fn new() -> Self {
        PmcCalculator {
            ctl_factor: smoothing_factor(CTL_TIME_CONSTANT),
            atl_factor: smoothing_factor(ATL_TIME_CONSTANT),
        }
    }

    /// Fold the daily stress series into fitness, fatigue and form
    ///
    /// `days` must be gapless and chronological; each entry depends on the
    /// previous one. The output has one entry per input day, in the same order.
    pub fn compute_trend(&self, days: &[DayStress]) -> Vec<DayFitnessTrend> {
        let mut state = LoadState::default();
        let trend: Vec<DayFitnessTrend> = days
            .iter()
            .map(|day| {
                // CTL_today = CTL_yesterday + (stress_today - CTL_yesterday) × (1 - e^(-1/42))
                state.ctl += (day.final_stress_score - state.ctl) * self.ctl_factor;
                // ATL_today = ATL_yesterday + (stress_today - ATL_yesterday) × (1 - e^(-1/7))
                state.atl += (day.final_stress_score - state.atl) * self.atl_factor;

                Self::trend_entry(day, state)
            })
            .collect();

        debug!(days = trend.len(), ctl = state.ctl, atl = state.atl, "Computed fitness trend");
        trend
    }

    fn trend_entry(day: &DayStress, state: LoadState) -> DayFitnessTrend {
        DayFitnessTrend {
            date: day.date,
            preview: day.preview,
            activity_ids: day.activity_ids.clone(),
            activity_names: day.activity_names.clone(),
            activity_types: day.activity_types.clone(),
            trimp_score: Self::positive(day.trimp_score),
            hrss_score: Self::positive(day.hrss_score),
            power_stress_score: Self::positive(day.power_stress_score),
            swim_stress_score: Self::positive(day.swim_stress_score),
            ctl: state.ctl,
            atl: state.atl,
            tsb: state.ctl - state.atl,
        }
    }

    fn positive(score: Option<f64>) -> Option<f64> {
        score.filter(|value| *value > 0.0)
    }

    /// Last non-preview entry of a trend series
    pub fn latest(trend: &[DayFitnessTrend]) -> Option<&DayFitnessTrend> {
        trend.iter().rev().find(|day| !day.preview)
    }
}

impl Default for PmcCalculator {
    fn default() -> Self {
        Self::new()
    }
}

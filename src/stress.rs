//! Per-activity training stress models
//!
//! All functions are total over their documented preconditions. Inputs outside
//! them (zero thresholds, resting HR above threshold) are not clamped and yield
//! NaN or infinite scores.

use crate::models::{ActivityType, Gender, UserSettings};

/// Banister weighting factor for men
pub const MALE_EXPONENTIAL_FACTOR: f64 = 1.92;

/// Banister weighting factor for everyone else
pub const FEMALE_EXPONENTIAL_FACTOR: f64 = 1.67;

const BANISTER_BASE_MULTIPLIER: f64 = 0.64;

/// Fraction of heart rate reserve used to estimate lactate threshold (Karvonen)
pub const KARVONEN_LTHR_FACTOR: f64 = 0.85;

/// Core stress score engine
pub struct StressCalculator;

impl StressCalculator {
    /// Power-based stress score for cycling
    ///
    /// PSS = (t × WP × IF) / (FTP × 3600) × 100, with IF = WP / FTP
    pub fn power_stress_score(moving_time_seconds: f64, weighted_power: f64, ftp: f64) -> f64 {
        let intensity_factor = weighted_power / ftp;
        (moving_time_seconds * weighted_power * intensity_factor) / (ftp * 3600.0) * 100.0
    }

    /// Swim stress score from average speed against threshold pace
    ///
    /// SSS = IF³ × elapsed_hours × 100, with IF = (distance / moving_minutes) / swim FTP
    pub fn swim_stress_score(
        distance_meters: f64,
        moving_time_seconds: f64,
        elapsed_time_seconds: f64,
        swim_ftp: f64,
    ) -> f64 {
        let normalized_swim_speed = distance_meters / (moving_time_seconds / 60.0);
        let intensity_factor = normalized_swim_speed / swim_ftp;
        intensity_factor.powi(3) * (elapsed_time_seconds / 3600.0) * 100.0
    }

    /// Heart rate stress score: activity impulse relative to one hour at threshold
    pub fn heart_rate_stress_score(
        gender: Gender,
        max_hr: f64,
        rest_hr: f64,
        lactate_threshold_hr: f64,
        training_impulse: f64,
    ) -> f64 {
        let lthr_impulse = Self::lactate_threshold_impulse(gender, max_hr, rest_hr, lactate_threshold_hr);
        training_impulse / lthr_impulse * 100.0
    }

    /// Banister TRIMP of sixty minutes held at lactate threshold
    pub fn lactate_threshold_impulse(
        gender: Gender,
        max_hr: f64,
        rest_hr: f64,
        lactate_threshold_hr: f64,
    ) -> f64 {
        let hr_reserve_fraction = (lactate_threshold_hr - rest_hr) / (max_hr - rest_hr);
        let factor = match gender {
            Gender::Male => MALE_EXPONENTIAL_FACTOR,
            Gender::Female => FEMALE_EXPONENTIAL_FACTOR,
        };
        60.0 * hr_reserve_fraction * BANISTER_BASE_MULTIPLIER * (factor * hr_reserve_fraction).exp()
    }

    /// Lactate threshold heart rate for an activity type
    ///
    /// Discipline override first, then the default override, then the
    /// Karvonen estimate `rest + 0.85 × (max - rest)`.
    pub fn resolve_lactate_threshold(activity_type: &ActivityType, settings: &UserSettings) -> f64 {
        if let Some(lthr) = &settings.lactate_threshold {
            let discipline = if activity_type.is_cycling() {
                lthr.cycling
            } else if activity_type.is_running() {
                lthr.running
            } else {
                None
            };

            if let Some(value) = discipline.or(lthr.default) {
                return value;
            }
        }

        Self::karvonen_lactate_threshold(settings.max_hr, settings.rest_hr)
    }

    pub fn karvonen_lactate_threshold(max_hr: f64, rest_hr: f64) -> f64 {
        rest_hr + KARVONEN_LTHR_FACTOR * (max_hr - rest_hr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LactateThreshold;

    fn create_test_settings() -> UserSettings {
        UserSettings {
            gender: Gender::Male,
            max_hr: 190.0,
            rest_hr: 50.0,
            lactate_threshold: None,
            cycling_ftp: Some(250.0),
            swim_ftp: Some(31.0),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn test_power_stress_score_at_threshold() {
        // One hour at FTP is 100 by definition
        assert_close(StressCalculator::power_stress_score(3600.0, 250.0, 250.0), 100.0);
    }

    #[test]
    fn test_power_stress_score_closed_form() {
        let (t, p, ftp) = (5400.0, 210.0, 260.0);
        let expected = t * p * (p / ftp) / (ftp * 3600.0) * 100.0;
        assert_close(StressCalculator::power_stress_score(t, p, ftp), expected);
    }

    #[test]
    fn test_power_stress_score_zero_ftp_is_not_finite() {
        assert!(!StressCalculator::power_stress_score(3600.0, 200.0, 0.0).is_finite());
    }

    #[test]
    fn test_swim_stress_score() {
        // 1860m in 60 moving minutes at 31 m/min threshold -> IF 1.0
        assert_close(
            StressCalculator::swim_stress_score(1860.0, 3600.0, 3600.0, 31.0),
            100.0,
        );

        let (d, tm, te, f) = (2000.0, 2700.0, 3000.0, 35.0);
        let intensity: f64 = (d / (tm / 60.0)) / f;
        let expected = intensity.powi(3) * (te / 3600.0) * 100.0;
        assert_close(StressCalculator::swim_stress_score(d, tm, te, f), expected);
    }

    #[test]
    fn test_hrss_of_one_hour_at_threshold_is_100() {
        let lthr = 170.0;
        let impulse = StressCalculator::lactate_threshold_impulse(Gender::Male, 190.0, 50.0, lthr);
        assert_close(
            StressCalculator::heart_rate_stress_score(Gender::Male, 190.0, 50.0, lthr, impulse),
            100.0,
        );
    }

    #[test]
    fn test_hrss_gender_factor() {
        let reserve: f64 = (170.0 - 50.0) / (190.0 - 50.0);
        let male_impulse = 60.0 * reserve * 0.64 * (1.92 * reserve).exp();
        let female_impulse = 60.0 * reserve * 0.64 * (1.67 * reserve).exp();

        assert_close(
            StressCalculator::heart_rate_stress_score(Gender::Male, 190.0, 50.0, 170.0, 100.0),
            100.0 / male_impulse * 100.0,
        );
        assert_close(
            StressCalculator::heart_rate_stress_score(Gender::Female, 190.0, 50.0, 170.0, 100.0),
            100.0 / female_impulse * 100.0,
        );
    }

    #[test]
    fn test_lactate_threshold_cycling_override() {
        let settings = UserSettings {
            lactate_threshold: Some(LactateThreshold {
                cycling: Some(165.0),
                running: Some(172.0),
                default: Some(160.0),
            }),
            ..create_test_settings()
        };

        assert_eq!(StressCalculator::resolve_lactate_threshold(&ActivityType::Ride, &settings), 165.0);
        assert_eq!(
            StressCalculator::resolve_lactate_threshold(&ActivityType::VirtualRide, &settings),
            165.0
        );
        assert_eq!(StressCalculator::resolve_lactate_threshold(&ActivityType::Run, &settings), 172.0);
        assert_eq!(StressCalculator::resolve_lactate_threshold(&ActivityType::Swim, &settings), 160.0);
    }

    #[test]
    fn test_lactate_threshold_default_override() {
        let settings = UserSettings {
            lactate_threshold: Some(LactateThreshold {
                cycling: None,
                running: None,
                default: Some(158.0),
            }),
            ..create_test_settings()
        };

        assert_eq!(StressCalculator::resolve_lactate_threshold(&ActivityType::Run, &settings), 158.0);
        assert_eq!(StressCalculator::resolve_lactate_threshold(&ActivityType::Ride, &settings), 158.0);
    }

    #[test]
    fn test_lactate_threshold_karvonen_fallback() {
        let settings = create_test_settings();
        let expected = 50.0 + 0.85 * (190.0 - 50.0);

        assert_close(StressCalculator::resolve_lactate_threshold(&ActivityType::Run, &settings), expected);

        let empty_overrides = UserSettings {
            lactate_threshold: Some(LactateThreshold::default()),
            ..create_test_settings()
        };
        assert_close(
            StressCalculator::resolve_lactate_threshold(&ActivityType::Ride, &empty_overrides),
            expected,
        );
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_power_stress_score_properties(
            ftp in 150.0f64..350.0,
            weighted_power in 100.0f64..400.0,
            duration in 1800.0f64..7200.0
        ) {
            let score = StressCalculator::power_stress_score(duration, weighted_power, ftp);
            let expected = duration * weighted_power * (weighted_power / ftp) / (ftp * 3600.0) * 100.0;

            prop_assert!(score > 0.0);
            prop_assert!((score - expected).abs() <= expected * 1e-12);

            // Riding above threshold accrues more than 100 per hour
            if weighted_power > ftp {
                prop_assert!(score > 100.0 * duration / 3600.0);
            }
        }
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Activity type tag as reported by the activity source
///
/// Serialized as the plain tag string (`"Ride"`, `"Run"`, `"Yoga"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    Ride,
    VirtualRide,
    EBikeRide,
    Run,
    Swim,
    Other(String),
}

impl ActivityType {
    /// Ride, VirtualRide and EBikeRide share cycling thresholds and power scoring
    pub fn is_cycling(&self) -> bool {
        matches!(
            self,
            ActivityType::Ride | ActivityType::VirtualRide | ActivityType::EBikeRide
        )
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ActivityType::Run)
    }

    pub fn is_swimming(&self) -> bool {
        matches!(self, ActivityType::Swim)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ActivityType::Ride => "Ride",
            ActivityType::VirtualRide => "VirtualRide",
            ActivityType::EBikeRide => "EBikeRide",
            ActivityType::Run => "Run",
            ActivityType::Swim => "Swim",
            ActivityType::Other(tag) => tag,
        }
    }
}

impl From<String> for ActivityType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Ride" => ActivityType::Ride,
            "VirtualRide" => ActivityType::VirtualRide,
            "EBikeRide" => ActivityType::EBikeRide,
            "Run" => ActivityType::Run,
            "Swim" => ActivityType::Swim,
            _ => ActivityType::Other(tag),
        }
    }
}

impl From<&str> for ActivityType {
    fn from(tag: &str) -> Self {
        ActivityType::from(tag.to_string())
    }
}

impl From<ActivityType> for String {
    fn from(activity_type: ActivityType) -> Self {
        activity_type.as_str().to_string()
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heart rate aggregate extracted from the activity stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateStats {
    /// TRIMP-like training impulse accumulated over the activity
    pub training_impulse: Option<f64>,
}

/// Power aggregate extracted from the activity stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerStats {
    /// False when power was estimated rather than measured
    pub has_power_meter: bool,

    /// Weighted (normalized) average power in watts
    pub weighted_power: Option<f64>,
}

/// Extended statistics attached to an activity by the upstream extractor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedStats {
    pub heart_rate: Option<HeartRateStats>,
    pub power: Option<PowerStats>,
}

/// Activity record as delivered by an activity source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    /// Unique identifier for the activity
    pub id: String,

    /// Display name
    pub name: String,

    /// Local wall-clock start time
    pub start_time: NaiveDateTime,

    /// Activity type tag
    #[serde(rename = "type")]
    pub activity_type: ActivityType,

    /// Distance in meters
    #[serde(default)]
    pub distance: Option<f64>,

    /// Moving time in seconds
    pub moving_time: f64,

    /// Elapsed time in seconds
    pub elapsed_time: f64,

    /// Extended statistics, absent when the activity was never analysed
    #[serde(default)]
    pub stats: Option<ExtendedStats>,
}

impl RawActivity {
    /// Calendar day the activity belongs to
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// Athlete gender, selects the Banister weighting factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Lactate threshold heart rate overrides, per discipline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LactateThreshold {
    pub cycling: Option<f64>,
    pub running: Option<f64>,
    pub default: Option<f64>,
}

/// Athlete physiological parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub gender: Gender,

    /// Maximum heart rate (bpm)
    pub max_hr: f64,

    /// Resting heart rate (bpm)
    pub rest_hr: f64,

    #[serde(default)]
    pub lactate_threshold: Option<LactateThreshold>,

    /// Cycling functional threshold power (watts)
    #[serde(default)]
    pub cycling_ftp: Option<f64>,

    /// Swimming functional threshold pace (meters per minute)
    #[serde(default)]
    pub swim_ftp: Option<f64>,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            gender: Gender::Male,
            max_hr: 190.0,
            rest_hr: 60.0,
            lactate_threshold: None,
            cycling_ftp: None,
            swim_ftp: None,
        }
    }
}

impl UserSettings {
    /// Check that the physiological parameters can feed the stress models
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::TrendError;

        fn positive(name: &str, value: f64) -> crate::error::Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TrendError::Validation(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )))
            }
        }

        positive("max_hr", self.max_hr)?;
        positive("rest_hr", self.rest_hr)?;
        if self.rest_hr >= self.max_hr {
            return Err(TrendError::Validation(format!(
                "rest_hr ({}) must be lower than max_hr ({})",
                self.rest_hr, self.max_hr
            )));
        }

        if let Some(lthr) = &self.lactate_threshold {
            for (name, value) in [
                ("lactate_threshold.cycling", lthr.cycling),
                ("lactate_threshold.running", lthr.running),
                ("lactate_threshold.default", lthr.default),
            ] {
                if let Some(value) = value {
                    positive(name, value)?;
                }
            }
        }

        if let Some(ftp) = self.cycling_ftp {
            positive("cycling_ftp", ftp)?;
        }
        if let Some(swim_ftp) = self.swim_ftp {
            positive("swim_ftp", swim_ftp)?;
        }

        Ok(())
    }
}

/// How the heart rate impulse of an activity is turned into a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeartRateImpulseMode {
    /// Use the raw training impulse as the score
    Trimp,
    /// Normalize the impulse against one hour at lactate threshold
    #[default]
    Hrss,
}

impl fmt::Display for HeartRateImpulseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeartRateImpulseMode::Trimp => write!(f, "trimp"),
            HeartRateImpulseMode::Hrss => write!(f, "hrss"),
        }
    }
}

impl std::str::FromStr for HeartRateImpulseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trimp" => Ok(HeartRateImpulseMode::Trimp),
            "hrss" => Ok(HeartRateImpulseMode::Hrss),
            _ => Err(format!("Invalid heart rate impulse mode: {}", s)),
        }
    }
}

/// Activity with its calendar metadata and the scores that applied to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedActivity {
    pub id: String,
    pub date: NaiveDate,

    /// Ordinal day within `year` (1-based)
    pub day_of_year: u32,
    pub year: i32,
    pub activity_type: ActivityType,
    pub name: String,

    pub trimp_score: Option<f64>,
    pub hrss_score: Option<f64>,
    pub power_stress_score: Option<f64>,
    pub swim_stress_score: Option<f64>,
}

impl PreparedActivity {
    pub fn has_score(&self) -> bool {
        self.trimp_score.is_some()
            || self.hrss_score.is_some()
            || self.power_stress_score.is_some()
            || self.swim_stress_score.is_some()
    }

    /// The single score that counts toward the day's final stress.
    ///
    /// Priority: power > heart rate stress > training impulse > swim.
    pub fn final_score(&self) -> Option<f64> {
        self.power_stress_score
            .or(self.hrss_score)
            .or(self.trimp_score)
            .or(self.swim_stress_score)
    }
}

/// Training stress of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStress {
    pub date: NaiveDate,

    /// True for the trailing days after today
    pub preview: bool,

    pub activity_ids: Vec<String>,
    pub activity_names: Vec<String>,
    pub activity_types: Vec<ActivityType>,

    pub trimp_score: Option<f64>,
    pub hrss_score: Option<f64>,
    pub power_stress_score: Option<f64>,
    pub swim_stress_score: Option<f64>,

    /// Sum of one score per activity, see [`PreparedActivity::final_score`]
    pub final_stress_score: f64,
}

impl DayStress {
    /// A day without activities
    pub fn rest(date: NaiveDate) -> Self {
        DayStress {
            date,
            preview: false,
            activity_ids: Vec::new(),
            activity_names: Vec::new(),
            activity_types: Vec::new(),
            trimp_score: None,
            hrss_score: None,
            power_stress_score: None,
            swim_stress_score: None,
            final_stress_score: 0.0,
        }
    }

    pub fn preview(date: NaiveDate) -> Self {
        DayStress {
            preview: true,
            ..DayStress::rest(date)
        }
    }

    pub fn has_activities(&self) -> bool {
        !self.activity_ids.is_empty()
    }
}

/// Fitness, fatigue and form for one day of the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayFitnessTrend {
    pub date: NaiveDate,
    pub preview: bool,

    pub activity_ids: Vec<String>,
    pub activity_names: Vec<String>,
    pub activity_types: Vec<ActivityType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trimp_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrss_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_stress_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swim_stress_score: Option<f64>,

    /// Chronic Training Load (fitness)
    pub ctl: f64,

    /// Acute Training Load (fatigue)
    pub atl: f64,

    /// Training Stress Balance (form), CTL - ATL
    pub tsb: f64,
}

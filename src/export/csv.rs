use super::ExportError;
use crate::models::DayFitnessTrend;
use serde::Serialize;
use std::io::Write;

/// Flat CSV row, suitable for spreadsheet plotting
#[derive(Debug, Serialize)]
struct TrendRow {
    date: String,
    preview: bool,
    activities: String,
    types: String,
    trimp: Option<f64>,
    hrss: Option<f64>,
    power_stress: Option<f64>,
    swim_stress: Option<f64>,
    ctl: f64,
    atl: f64,
    tsb: f64,
}

impl From<&DayFitnessTrend> for TrendRow {
    fn from(day: &DayFitnessTrend) -> Self {
        TrendRow {
            date: day.date.format("%Y-%m-%d").to_string(),
            preview: day.preview,
            activities: day.activity_names.join("; "),
            types: day
                .activity_types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join("; "),
            trimp: day.trimp_score,
            hrss: day.hrss_score,
            power_stress: day.power_stress_score,
            swim_stress: day.swim_stress_score,
            ctl: day.ctl,
            atl: day.atl,
            tsb: day.tsb,
        }
    }
}

/// Export the fitness trend as CSV
pub fn write_trend<W: Write>(trend: &[&DayFitnessTrend], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    for day in trend {
        csv_writer
            .serialize(TrendRow::from(*day))
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
    }

    csv_writer.flush()?;
    Ok(())
}

use super::ExportError;
use crate::models::DayFitnessTrend;
use crate::pmc::TsbInterpretation;
use std::io::Write;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TrendTableRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Activities")]
    activities: String,
    #[tabled(rename = "Scores")]
    scores: String,
    #[tabled(rename = "CTL")]
    ctl: String,
    #[tabled(rename = "ATL")]
    atl: String,
    #[tabled(rename = "TSB")]
    tsb: String,
    #[tabled(rename = "Form")]
    form: String,
}

fn format_scores(day: &DayFitnessTrend) -> String {
    [
        ("PSS", day.power_stress_score),
        ("HRSS", day.hrss_score),
        ("TRIMP", day.trimp_score),
        ("SSS", day.swim_stress_score),
    ]
    .into_iter()
    .filter_map(|(label, score)| score.map(|v| format!("{} {:.1}", label, v)))
    .collect::<Vec<_>>()
    .join(" / ")
}

impl From<&DayFitnessTrend> for TrendTableRow {
    fn from(day: &DayFitnessTrend) -> Self {
        let date = if day.preview {
            format!("{} *", day.date.format("%Y-%m-%d"))
        } else {
            day.date.format("%Y-%m-%d").to_string()
        };

        TrendTableRow {
            date,
            activities: day.activity_names.join(", "),
            scores: format_scores(day),
            ctl: format!("{:.1}", day.ctl),
            atl: format!("{:.1}", day.atl),
            tsb: format!("{:.1}", day.tsb),
            form: TsbInterpretation::from_tsb(day.tsb).label().to_string(),
        }
    }
}

/// Render the trend as a terminal table; preview days are marked with `*`
pub fn render_trend_table(trend: &[&DayFitnessTrend]) -> String {
    let rows: Vec<TrendTableRow> = trend.iter().map(|day| TrendTableRow::from(*day)).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn write_trend_table<W: Write>(trend: &[&DayFitnessTrend], mut writer: W) -> Result<(), ExportError> {
    writeln!(writer, "{}", render_trend_table(trend))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;
    use chrono::NaiveDate;

    #[test]
    fn test_render_trend_table() {
        let days = vec![
            DayFitnessTrend {
                date: NaiveDate::from_ymd_opt(2024, 9, 23).unwrap(),
                preview: false,
                activity_ids: vec!["1".to_string()],
                activity_names: vec!["Tempo Ride".to_string()],
                activity_types: vec![ActivityType::Ride],
                trimp_score: None,
                hrss_score: Some(80.0),
                power_stress_score: Some(72.25),
                swim_stress_score: None,
                ctl: 45.0,
                atl: 62.0,
                tsb: -17.0,
            },
            DayFitnessTrend {
                date: NaiveDate::from_ymd_opt(2024, 9, 24).unwrap(),
                preview: true,
                activity_ids: Vec::new(),
                activity_names: Vec::new(),
                activity_types: Vec::new(),
                trimp_score: None,
                hrss_score: None,
                power_stress_score: None,
                swim_stress_score: None,
                ctl: 44.0,
                atl: 54.0,
                tsb: -10.0,
            },
        ];
        let refs: Vec<&DayFitnessTrend> = days.iter().collect();

        let table = render_trend_table(&refs);

        assert!(table.contains("Tempo Ride"));
        assert!(table.contains("PSS 72.2") || table.contains("PSS 72.3"));
        assert!(table.contains("HRSS 80.0"));
        assert!(table.contains("fatigued"));
        assert!(table.contains("2024-09-24 *"));
        assert!(table.contains("neutral"));
    }
}

//! Flat views of a scenario result for reports and downloads.

use crate::balance::BalanceResult;
use crate::forecast::ForecastPoint;
use crate::scenario::{ScenarioInput, ScenarioOutcome};
use crate::sustainability::ProjectAssessment;
use gms_core::sample::WellSeries;
use gms_utils::dates::format_date;
use serde::Serialize;

/// Everything a report needs, as plain values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSnapshot {
    pub well_id: String,
    pub scenario: ScenarioInput,
    pub balance: BalanceResult,
    pub forecast: ForecastPoint,
    pub project: Option<ProjectAssessment>,
}

impl ReportSnapshot {
    pub fn new(outcome: &ScenarioOutcome, forecast: ForecastPoint, project: Option<ProjectAssessment>) -> Self {
        ReportSnapshot {
            well_id: outcome.well_id.clone(),
            scenario: outcome.input,
            balance: outcome.projected,
            forecast,
            project,
        }
    }

    /// Named scalars in report order.
    pub fn to_key_values(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = vec![("well_id".to_string(), self.well_id.clone())];
        pairs.extend(
            self.scenario
                .fields()
                .into_iter()
                .map(|(name, value)| (format!("scenario.{}", name), value.to_string())),
        );

        let balance = &self.balance;
        pairs.extend([
            ("balance.annual_recharge_bcm", format!("{:.6}", balance.annual_recharge)),
            ("balance.annual_draft_bcm", format!("{:.6}", balance.annual_draft)),
            ("balance.net_availability_bcm", format!("{:.6}", balance.net_availability)),
            ("balance.stage_of_extraction_percent", format!("{:.2}", balance.stage_of_extraction)),
            ("balance.category", balance.category.to_string()),
        ]
        .map(|(k, v)| (k.to_string(), v)));

        let forecast = &self.forecast;
        pairs.extend([
            ("forecast.horizon_months", forecast.horizon_months.to_string()),
            ("forecast.start_date", format_date(&forecast.start_date)),
            ("forecast.start_level_mbgl", format!("{:.2}", forecast.start_level)),
            (
                "forecast.date",
                forecast.date.map(|d| format_date(&d)).unwrap_or_default(),
            ),
            ("forecast.level_mbgl", format!("{:.2}", forecast.level)),
        ]
        .map(|(k, v)| (k.to_string(), v)));

        if let Some(project) = &self.project {
            pairs.extend([
                ("project.demand_mcm", format!("{:.3}", project.demand_mcm)),
                ("project.future_use_mcm", format!("{:.3}", project.future_use_mcm)),
                ("project.remaining_surplus_mcm", format!("{:.3}", project.remaining_surplus_mcm)),
                ("project.stage_before_percent", format!("{:.2}", project.stage_before)),
                ("project.stage_after_percent", format!("{:.2}", project.stage_after)),
                ("project.stage_increase_percent", format!("{:.2}", project.stage_increase)),
                ("project.status", project.status.to_string()),
            ]
            .map(|(k, v)| (k.to_string(), v)));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Historical,
    Forecasted,
}

/// One line of the data download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadRow {
    pub date: String,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: RowKind,
}

/// Historical readings followed by the forecast point. The forecast row is
/// omitted if its date overflowed the calendar.
pub fn download_rows(series: &WellSeries, forecast: &ForecastPoint) -> Vec<DownloadRow> {
    let mut rows: Vec<DownloadRow> = series
        .iter()
        .map(|s| DownloadRow {
            date: format_date(&s.date),
            value: s.value,
            kind: RowKind::Historical,
        })
        .collect();
    if let Some(date) = forecast.date {
        rows.push(DownloadRow {
            date: format_date(&date),
            value: forecast.level,
            kind: RowKind::Forecasted,
        });
    }
    rows
}

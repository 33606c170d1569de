//! Historical summaries of a well series used for charts and reports.

use chrono::NaiveDate;
use gms_core::sample::WellSeries;
use gms_utils::dates::month_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline figures for a well's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub sample_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Most recent depth [mbgl]
    pub latest_level: f64,
    /// Mean of all readings [mbgl]
    pub average_level: f64,
}

pub fn series_summary(series: &WellSeries) -> Option<SeriesSummary> {
    let first = series.samples().first()?;
    let last = series.latest()?;
    let total: f64 = series.iter().map(|s| s.value).sum();
    Some(SeriesSummary {
        sample_count: series.len(),
        first_date: first.date,
        last_date: last.date,
        latest_level: last.value,
        average_level: total / series.len() as f64,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyAverage {
    pub year: i32,
    pub average_level: f64,
}

/// Mean depth per calendar year, ascending.
pub fn yearly_averages(series: &WellSeries) -> Vec<YearlyAverage> {
    let mut years: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for sample in series {
        let entry = years.entry(sample.year()).or_insert((0.0, 0));
        entry.0 += sample.value;
        entry.1 += 1;
    }
    years
        .into_iter()
        .map(|(year, (sum, count))| YearlyAverage {
            year,
            average_level: sum / count as f64,
        })
        .collect()
}

/// Shallowest and deepest reading seen in a calendar month across all years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRange {
    pub month: u32,
    pub month_name: String,
    pub min_level: f64,
    pub max_level: f64,
}

/// Seasonal range per month of year, ordered January to December. Months
/// without readings are absent.
pub fn monthly_ranges(series: &WellSeries) -> Vec<MonthlyRange> {
    let mut months: BTreeMap<u32, (f64, f64)> = BTreeMap::new();
    for sample in series {
        months
            .entry(sample.month())
            .and_modify(|(min, max)| {
                *min = min.min(sample.value);
                *max = max.max(sample.value);
            })
            .or_insert((sample.value, sample.value));
    }
    months
        .into_iter()
        .map(|(month, (min_level, max_level))| MonthlyRange {
            month,
            month_name: month_name(month).to_string(),
            min_level,
            max_level,
        })
        .collect()
}

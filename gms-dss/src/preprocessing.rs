//! Derivations from a raw well series: seasonal rise, dry season decline and
//! per hydrological year recharge.

use crate::constants::{
    DRY_SEASON_END_MONTH, DRY_SEASON_START_MONTH, MIN_DRY_SEASON_SAMPLES,
    MIN_SAMPLES_FOR_DECLINE_RATE, POST_MONSOON_MONTH, PRE_MONSOON_MONTH,
};
use chrono::Datelike;
use gms_core::hydrological_year::HydrologicalYear;
use gms_core::sample::{WaterLevelSample, WellSeries};
use serde::{Deserialize, Serialize};

/// Seasonal water table rise of the most recent year, with the latest reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonsoonRise {
    /// Pre-monsoon (May) mean depth minus post-monsoon (November) mean depth,
    /// floored at zero [m].
    pub delta_h: f64,
    /// Depth of the chronologically last sample [mbgl].
    pub latest_level: f64,
}

/// Monsoon rise for the most recent calendar year in the series.
///
/// Falls back to a zero rise when either May or November of that year has no
/// readings. `None` only for an empty series.
pub fn monsoon_rise(series: &WellSeries) -> Option<MonsoonRise> {
    let latest_level = series.latest()?.value;
    let last_year = series.last_year()?;
    let pre = series.monthly_mean(last_year, PRE_MONSOON_MONTH);
    let post = series.monthly_mean(last_year, POST_MONSOON_MONTH);
    let delta_h = match (pre, post) {
        (Some(pre), Some(post)) => (pre - post).max(0.0),
        _ => {
            log::debug!(
                "no May/November pair in {} for well {}, monsoon rise is zero",
                last_year,
                series.well_id
            );
            0.0
        }
    };
    Some(MonsoonRise {
        delta_h,
        latest_level,
    })
}

fn in_dry_season(sample: &WaterLevelSample, last_year: i32) -> bool {
    let (year, month) = (sample.year(), sample.month());
    (year == last_year - 1 && month >= DRY_SEASON_START_MONTH)
        || (year == last_year && month <= DRY_SEASON_END_MONTH)
}

/// Ordinary least squares slope of `value` against day ordinal.
fn least_squares_slope(samples: &[&WaterLevelSample]) -> Option<f64> {
    let n = samples.len() as f64;
    let xs: Vec<f64> = samples
        .iter()
        .map(|s| s.date.num_days_from_ce() as f64)
        .collect();
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = samples.iter().map(|s| s.value).sum::<f64>() / n;
    let (sxy, sxx) = xs
        .iter()
        .zip(samples)
        .fold((0.0, 0.0), |(sxy, sxx), (x, s)| {
            let dx = x - mean_x;
            (sxy + dx * (s.value - mean_y), sxx + dx * dx)
        });
    if sxx == 0.0 {
        None
    } else {
        Some(sxy / sxx)
    }
}

/// Dry season decline rate of the water table [m/day].
///
/// Fits a line through readings from October of the year before the last
/// year through May of the last year. Returns the slope when depth is
/// increasing, otherwise 0. `None` when the series has fewer than 12
/// readings, the window has fewer than 2, or every window reading shares
/// one date.
pub fn decline_rate(series: &WellSeries) -> Option<f64> {
    if series.len() < MIN_SAMPLES_FOR_DECLINE_RATE {
        return None;
    }
    let last_year = series.last_year()?;
    let window: Vec<&WaterLevelSample> = series
        .iter()
        .filter(|sample| in_dry_season(sample, last_year))
        .collect();
    if window.len() < MIN_DRY_SEASON_SAMPLES {
        return None;
    }
    let slope = least_squares_slope(&window)?;
    Some(if slope > 0.0 { slope } else { 0.0 })
}

/// WTF recharge depth for one hydrological year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRecharge {
    pub hydrological_year: i32,
    /// e.g. "2021-2022"
    pub label: String,
    /// Specific yield times seasonal fluctuation [m].
    pub recharge_m: f64,
    /// Mean depth over the year [mbgl].
    pub avg_level_m: f64,
}

/// Per hydrological year recharge by the water table fluctuation method.
///
/// Years with fewer than 90 readings, or without a positive fluctuation, are
/// left out. Output is ascending by year.
pub fn per_year_recharge(series: &WellSeries, specific_yield: f64) -> Vec<AnnualRecharge> {
    HydrologicalYear::partition(series)
        .into_iter()
        .filter(HydrologicalYear::has_sufficient_data)
        .filter_map(|year| {
            let peak_level = year.peak_level()?;
            let lowest_level = year.lowest_level()?;
            let dh = lowest_level - peak_level;
            if dh <= 0.0 {
                return None;
            }
            Some(AnnualRecharge {
                hydrological_year: year.year,
                label: year.label(),
                recharge_m: specific_yield * dh,
                avg_level_m: year.mean_level()?,
            })
        })
        .collect()
}

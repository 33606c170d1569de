//! Linear water level projection from net availability.

use crate::constants::{M2_PER_HA, M3_PER_BCM, MAX_FORECAST_HORIZON_MONTHS};
use crate::error::{DssError, Result};
use chrono::NaiveDate;
use gms_utils::dates::add_months;
use serde::{Deserialize, Serialize};

/// Annual change in water table height implied by a net availability [m].
///
/// Inverse of the WTF relation solved for Δh. `None` when area or specific
/// yield is not positive.
pub fn annual_level_change(net_availability_bcm: f64, area_ha: f64, specific_yield: f64) -> Option<f64> {
    if area_ha > 0.0 && specific_yield > 0.0 {
        Some(net_availability_bcm * M3_PER_BCM / (area_ha * M2_PER_HA * specific_yield))
    } else {
        None
    }
}

/// Projected depth to water after `horizon_months` [mbgl].
///
/// A positive net availability raises the water table, which lowers the
/// depth. Returns `latest_level` unchanged when area or specific yield is
/// not positive.
pub fn forecast_level(
    latest_level: f64,
    net_availability_bcm: f64,
    area_ha: f64,
    specific_yield: f64,
    horizon_months: u32,
) -> f64 {
    match annual_level_change(net_availability_bcm, area_ha, specific_yield) {
        Some(delta_h_annual) => latest_level - delta_h_annual * (horizon_months as f64 / 12.0),
        None => latest_level,
    }
}

/// Reject horizons outside 1..=12 months.
pub fn check_horizon(horizon_months: u32) -> Result<u32> {
    if (1..=MAX_FORECAST_HORIZON_MONTHS).contains(&horizon_months) {
        Ok(horizon_months)
    } else {
        Err(DssError::InvalidHorizon {
            months: horizon_months,
            max: MAX_FORECAST_HORIZON_MONTHS,
        })
    }
}

/// A dated forecast point anchored at the last reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub horizon_months: u32,
    pub start_date: NaiveDate,
    pub start_level: f64,
    /// `None` if the date would overflow the calendar.
    pub date: Option<NaiveDate>,
    pub level: f64,
}

impl ForecastPoint {
    pub fn project(
        last_date: NaiveDate,
        latest_level: f64,
        net_availability_bcm: f64,
        area_ha: f64,
        specific_yield: f64,
        horizon_months: u32,
    ) -> Self {
        ForecastPoint {
            horizon_months,
            start_date: last_date,
            start_level: latest_level,
            date: add_months(&last_date, horizon_months),
            level: forecast_level(
                latest_level,
                net_availability_bcm,
                area_ha,
                specific_yield,
                horizon_months,
            ),
        }
    }
}

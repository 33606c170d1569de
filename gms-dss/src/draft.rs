//! Groundwater draft: pumping, category extraction and evapotranspiration losses.

use crate::constants::{
    DAYS_PER_YEAR, EVAPORATION_DEPTH_LIMIT_M, M2_PER_HA, M3_PER_BCM, MM_PER_M,
    TRANSPIRATION_DEPTH_LIMIT_M,
};

/// Cubic metres to BCM.
pub fn m3_to_bcm(volume_m3: f64) -> f64 {
    volume_m3 / M3_PER_BCM
}

/// Sum of annual volumes [m³/yr] expressed in BCM.
pub fn total_bcm(volumes_m3: &[f64]) -> f64 {
    m3_to_bcm(volumes_m3.iter().sum())
}

/// Annual draft from a constant daily pumping rate [m³/day] in BCM.
pub fn annual_draft(daily_pumping_m3: f64) -> f64 {
    daily_pumping_m3 * DAYS_PER_YEAR / M3_PER_BCM
}

/// Annual volume [m³] lost at `rate_mm_day` over `area_m2`.
fn annual_loss_m3(rate_mm_day: f64, area_m2: f64) -> f64 {
    (rate_mm_day / MM_PER_M) * area_m2 * DAYS_PER_YEAR
}

/// Evapotranspiration draft [BCM], gated by water table depth.
///
/// Evaporation counts when the water table is within 1.0 m of the surface,
/// transpiration when within 3.5 m. The gates are independent.
pub fn et_draft(
    evaporation_mm_day: f64,
    transpiration_mm_day: f64,
    area_ha: f64,
    latest_level_mbgl: f64,
) -> f64 {
    let area_m2 = area_ha * M2_PER_HA;
    let mut total_m3 = 0.0;
    if latest_level_mbgl <= EVAPORATION_DEPTH_LIMIT_M {
        total_m3 += annual_loss_m3(evaporation_mm_day, area_m2);
    }
    if latest_level_mbgl <= TRANSPIRATION_DEPTH_LIMIT_M {
        total_m3 += annual_loss_m3(transpiration_mm_day, area_m2);
    }
    total_m3 / M3_PER_BCM
}

//! Reference evapotranspiration (ET₀) estimate from NASA POWER temperatures.
//!
//! This is a coarse temperature-only proxy used to seed the irrigation
//! calculator, not a Penman-Monteith computation.

use chrono::NaiveDate;
use serde_json::Value;

#[cfg(feature = "api")]
use log::warn;
#[cfg(feature = "api")]
use reqwest::Client;

/// NASA POWER daily point endpoint.
pub const POWER_DAILY_POINT_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";

/// Values at or below this are POWER fill values for missing days.
pub const POWER_FILL_VALUE: f64 = -999.0;

/// ET₀ used when no estimate is available (mm/day).
pub const DEFAULT_ET0_MM_DAY: f64 = 5.0;

/// Days of temperature history averaged for the estimate.
pub const LOOKBACK_DAYS: i64 = 7;

/// Estimate ET₀ (mm/day) from daily mean air temperatures (°C).
///
/// Mean of the valid temperatures divided by 5, floored at 1.0 mm/day and
/// rounded to one decimal. `None` when no valid temperature is present.
pub fn estimate_et0(daily_mean_temps: &[f64]) -> Option<f64> {
    let valid: Vec<f64> = daily_mean_temps
        .iter()
        .copied()
        .filter(|t| *t > POWER_FILL_VALUE && t.is_finite())
        .collect();
    if valid.is_empty() {
        return None;
    }
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    let et0 = (mean / 5.0).max(1.0);
    Some((et0 * 10.0).round() / 10.0)
}

/// Pull the T2M daily series out of a POWER response.
pub fn parse_power_temperatures(payload: &Value) -> Option<Vec<f64>> {
    let t2m = payload
        .get("properties")?
        .get("parameter")?
        .get("T2M")?
        .as_object()?;
    Some(t2m.values().filter_map(Value::as_f64).collect())
}

/// Query parameters for the POWER request covering the week before `today`.
pub fn power_query(latitude: f64, longitude: f64, today: NaiveDate) -> Vec<(&'static str, String)> {
    let start = today - chrono::Duration::days(LOOKBACK_DAYS);
    vec![
        ("parameters", "T2M".to_string()),
        ("community", "AG".to_string()),
        ("longitude", longitude.to_string()),
        ("latitude", latitude.to_string()),
        ("start", start.format("%Y%m%d").to_string()),
        ("end", today.format("%Y%m%d").to_string()),
        ("format", "JSON".to_string()),
    ]
}

/// Client for the NASA POWER API.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct PowerClient {
    client: Client,
    base_url: String,
}

#[cfg(feature = "api")]
impl PowerClient {
    pub fn new(client: Client) -> Self {
        PowerClient {
            client,
            base_url: POWER_DAILY_POINT_URL.to_string(),
        }
    }

    /// Estimated ET₀ at a location for the week ending `today`.
    ///
    /// Any failure is logged and yields `None`; callers fall back to
    /// `DEFAULT_ET0_MM_DAY`.
    pub async fn reference_et0(&self, latitude: f64, longitude: f64, today: NaiveDate) -> Option<f64> {
        let query = power_query(latitude, longitude, today);
        let response = match self.client.get(&self.base_url).query(&query).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("NASA POWER request failed: {}", e);
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("NASA POWER bad response status: {}", response.status());
            return None;
        }
        let payload: Value = match response.json().await {
            Ok(p) => p,
            Err(e) => {
                warn!("NASA POWER response unreadable: {}", e);
                return None;
            }
        };
        let estimate = parse_power_temperatures(&payload).and_then(|temps| estimate_et0(&temps));
        if estimate.is_none() {
            warn!(
                "NASA POWER returned no usable temperatures for ({}, {}) over the last {} days",
                latitude, longitude, LOOKBACK_DAYS
            );
        }
        estimate
    }
}

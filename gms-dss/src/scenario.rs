//! Scenario inputs and the full balance evaluation for one well.
//!
//! A `ScenarioInput` is an immutable value. Callers that share a base
//! configuration across several views copy it and override fields with
//! struct update syntax instead of mutating shared state.

use crate::balance::BalanceResult;
use crate::classification::{classify_primary, Recommendation};
use crate::constants::{MAIN_FORECAST_HORIZON_MONTHS, MCM_PER_BCM};
use crate::draft::{annual_draft, et_draft, total_bcm};
use crate::error::{DssError, Result};
use crate::forecast::{check_horizon, ForecastPoint};
use crate::preprocessing::{monsoon_rise, MonsoonRise};
use crate::recharge::{reconcile_recharge, recharge_rif, recharge_wtf, RechargeSource};
use chrono::NaiveDate;
use gms_core::sample::WellSeries;
use serde::{Deserialize, Serialize};

/// Scenario parameters. Volumes are annual [m³/yr] unless noted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    /// Annual rainfall [mm]
    pub rainfall_mm: f64,
    /// Rainfall infiltration factor [-]
    pub rfif: f64,
    /// Specific yield of the aquifer [-]
    pub specific_yield: f64,
    /// Assessment area [ha]
    pub area_ha: f64,
    /// Base pumping [m³/day]
    pub base_daily_pumping_m3: f64,
    pub draft_irrigation_m3: f64,
    pub draft_industrial_m3: f64,
    pub draft_domestic_m3: f64,
    pub recharge_canals_m3: f64,
    /// Return flow from surface water irrigation
    pub recharge_swi_m3: f64,
    /// Return flow from groundwater irrigation
    pub recharge_gwi_m3: f64,
    pub recharge_tanks_m3: f64,
    pub recharge_artificial_m3: f64,
    /// [mm/day]
    pub evaporation_mm_day: f64,
    /// [mm/day]
    pub transpiration_mm_day: f64,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        ScenarioInput {
            rainfall_mm: 1200.0,
            rfif: 0.15,
            specific_yield: 0.12,
            area_ha: 10_000.0,
            base_daily_pumping_m3: 1500.0,
            draft_irrigation_m3: 1_000_000.0,
            draft_industrial_m3: 500_000.0,
            draft_domestic_m3: 500_000.0,
            recharge_canals_m3: 0.0,
            recharge_swi_m3: 0.0,
            recharge_gwi_m3: 0.0,
            recharge_tanks_m3: 0.0,
            recharge_artificial_m3: 0.0,
            evaporation_mm_day: 3.0,
            transpiration_mm_day: 2.0,
        }
    }
}

impl ScenarioInput {
    /// Named parameters in a stable order, for validation and reports.
    pub fn fields(&self) -> [(&'static str, f64); 15] {
        [
            ("rainfall_mm", self.rainfall_mm),
            ("rfif", self.rfif),
            ("specific_yield", self.specific_yield),
            ("area_ha", self.area_ha),
            ("base_daily_pumping_m3", self.base_daily_pumping_m3),
            ("draft_irrigation_m3", self.draft_irrigation_m3),
            ("draft_industrial_m3", self.draft_industrial_m3),
            ("draft_domestic_m3", self.draft_domestic_m3),
            ("recharge_canals_m3", self.recharge_canals_m3),
            ("recharge_swi_m3", self.recharge_swi_m3),
            ("recharge_gwi_m3", self.recharge_gwi_m3),
            ("recharge_tanks_m3", self.recharge_tanks_m3),
            ("recharge_artificial_m3", self.recharge_artificial_m3),
            ("evaporation_mm_day", self.evaporation_mm_day),
            ("transpiration_mm_day", self.transpiration_mm_day),
        ]
    }

    /// Every parameter must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        match self
            .fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((field, value)) => Err(DssError::InvalidInput { field, value }),
            None => Ok(()),
        }
    }

    /// Recharge added by interventions [BCM].
    pub fn intervention_recharge_bcm(&self) -> f64 {
        total_bcm(&[
            self.recharge_canals_m3,
            self.recharge_swi_m3,
            self.recharge_gwi_m3,
            self.recharge_tanks_m3,
            self.recharge_artificial_m3,
        ])
    }

    /// Extraction by use category [BCM].
    pub fn policy_draft_bcm(&self) -> f64 {
        total_bcm(&[
            self.draft_irrigation_m3,
            self.draft_industrial_m3,
            self.draft_domestic_m3,
        ])
    }
}

/// Everything derived from one (series, scenario) evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub well_id: String,
    pub input: ScenarioInput,
    pub last_date: NaiveDate,
    pub monsoon: MonsoonRise,
    /// [BCM]
    pub recharge_wtf: f64,
    /// [BCM]
    pub recharge_rif: f64,
    pub recharge_source: RechargeSource,
    /// Balance from validated recharge and base pumping only.
    pub base: BalanceResult,
    /// [BCM]
    pub additional_recharge: f64,
    /// [BCM]
    pub policy_draft: f64,
    /// [BCM]
    pub et_draft: f64,
    /// Balance including interventions, category extraction and ET losses.
    pub projected: BalanceResult,
    /// Projected minus base net availability [BCM].
    pub net_availability_change: f64,
    /// Projected minus base stage of extraction [percentage points].
    pub stage_change: f64,
    /// Headline three month forecast.
    pub main_forecast: ForecastPoint,
}

impl ScenarioOutcome {
    pub fn recommendation(&self) -> Recommendation {
        classify_primary(self.projected.stage_of_extraction)
    }

    /// Projected net availability for display [MCM], floored at zero.
    pub fn net_availability_mcm_display(&self) -> f64 {
        self.projected.net_availability.max(0.0) * MCM_PER_BCM
    }

    /// Forecast over a custom horizon of 1 to 12 months.
    pub fn forecast(&self, horizon_months: u32) -> Result<ForecastPoint> {
        let horizon_months = check_horizon(horizon_months)?;
        Ok(ForecastPoint::project(
            self.last_date,
            self.monsoon.latest_level,
            self.projected.net_availability,
            self.input.area_ha,
            self.input.specific_yield,
            horizon_months,
        ))
    }
}

/// Evaluate a scenario against a well's history.
///
/// An empty series yields `DssError::EmptySeries` rather than a balance built
/// on fabricated levels.
pub fn evaluate(series: &WellSeries, input: &ScenarioInput) -> Result<ScenarioOutcome> {
    input.validate()?;
    let monsoon = monsoon_rise(series).ok_or(DssError::EmptySeries)?;
    let last_date = series.latest().ok_or(DssError::EmptySeries)?.date;

    let wtf = recharge_wtf(monsoon.delta_h, input.area_ha, input.specific_yield);
    let rif = recharge_rif(input.rainfall_mm, input.area_ha, input.rfif);
    let (validated, recharge_source) = reconcile_recharge(wtf, rif);
    let base_draft = annual_draft(input.base_daily_pumping_m3);
    let base = BalanceResult::new(validated, base_draft);

    let additional_recharge = input.intervention_recharge_bcm();
    let policy_draft = input.policy_draft_bcm();
    let et = et_draft(
        input.evaporation_mm_day,
        input.transpiration_mm_day,
        input.area_ha,
        monsoon.latest_level,
    );
    let projected = BalanceResult::new(
        validated + additional_recharge,
        base_draft + policy_draft + et,
    );
    log::debug!(
        "well {}: recharge wtf={:.6} rif={:.6} validated={:.6} ({:?}), stage {:.2}% -> {:.2}%",
        series.well_id,
        wtf,
        rif,
        validated,
        recharge_source,
        base.stage_of_extraction,
        projected.stage_of_extraction
    );

    let main_forecast = ForecastPoint::project(
        last_date,
        monsoon.latest_level,
        projected.net_availability,
        input.area_ha,
        input.specific_yield,
        MAIN_FORECAST_HORIZON_MONTHS,
    );

    Ok(ScenarioOutcome {
        well_id: series.well_id.clone(),
        input: *input,
        last_date,
        monsoon,
        recharge_wtf: wtf,
        recharge_rif: rif,
        recharge_source,
        base,
        additional_recharge,
        policy_draft,
        et_draft: et,
        net_availability_change: projected.net_availability - base.net_availability,
        stage_change: projected.stage_of_extraction - base.stage_of_extraction,
        projected,
        main_forecast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Category;
    use gms_core::sample::WaterLevelSample;

    fn sample(y: i32, m: u32, d: u32, value: f64) -> WaterLevelSample {
        WaterLevelSample::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), value)
    }

    /// May mean 8.5, November mean 8.0: a 0.5 m rise, latest level 8.0.
    fn well() -> WellSeries {
        WellSeries::new(
            "W07541",
            vec![
                sample(2022, 5, 5, 8.4),
                sample(2022, 5, 25, 8.6),
                sample(2022, 11, 10, 8.0),
            ],
        )
    }

    #[test]
    fn test_default_input_is_valid() {
        assert!(ScenarioInput::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let input = ScenarioInput {
            area_ha: -5.0,
            ..ScenarioInput::default()
        };
        assert_eq!(
            input.validate(),
            Err(DssError::InvalidInput {
                field: "area_ha",
                value: -5.0
            })
        );
        let input = ScenarioInput {
            rfif: f64::NAN,
            ..ScenarioInput::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_partial_json_overrides_defaults() {
        let input: ScenarioInput =
            serde_json::from_str(r#"{"rainfall_mm": 800.0, "recharge_tanks_m3": 20000.0}"#).unwrap();
        assert_eq!(input.rainfall_mm, 800.0);
        assert_eq!(input.recharge_tanks_m3, 20_000.0);
        assert_eq!(input.specific_yield, 0.12);
    }

    #[test]
    fn test_evaluate_default_scenario() {
        let outcome = evaluate(&well(), &ScenarioInput::default()).unwrap();
        assert!((outcome.monsoon.delta_h - 0.5).abs() < 1e-9);
        assert!((outcome.recharge_wtf - 0.006).abs() < 1e-12);
        assert!((outcome.recharge_rif - 0.0179988).abs() < 1e-12);
        assert_eq!(outcome.recharge_source, RechargeSource::RifLowerBound);
        assert!((outcome.base.annual_recharge - 0.01439904).abs() < 1e-12);
        assert!((outcome.base.annual_draft - 0.0005475).abs() < 1e-15);

        // latest level 8.0 m is too deep for evaporation or transpiration
        assert_eq!(outcome.et_draft, 0.0);
        assert!((outcome.policy_draft - 0.002).abs() < 1e-15);
        assert_eq!(outcome.additional_recharge, 0.0);

        let draft = 0.0005475 + 0.002;
        let recharge = 0.01439904;
        assert!((outcome.projected.annual_draft - draft).abs() < 1e-12);
        assert!((outcome.projected.stage_of_extraction - draft / recharge * 100.0).abs() < 1e-9);
        assert_eq!(outcome.projected.category, Category::Safe);
        assert!(outcome.stage_change > 0.0);
        assert!((outcome.net_availability_change + 0.002).abs() < 1e-12);

        // positive net availability: the water table rises over three months
        assert!(outcome.main_forecast.level < 8.0);
        assert_eq!(
            outcome.main_forecast.date,
            NaiveDate::from_ymd_opt(2023, 2, 10)
        );
    }

    #[test]
    fn test_evaluate_heavy_extraction_is_over_exploited() {
        let input = ScenarioInput {
            draft_industrial_m3: 30_000_000.0,
            ..ScenarioInput::default()
        };
        let outcome = evaluate(&well(), &input).unwrap();
        assert_eq!(outcome.projected.category, Category::OverExploited);
        assert!(outcome.projected.net_availability < 0.0);
        assert_eq!(outcome.net_availability_mcm_display(), 0.0);
        assert!(outcome.main_forecast.level > 8.0);
        assert_eq!(
            outcome.recommendation().message,
            "OVER-EXPLOITED: Extraction exceeds recharge."
        );
    }

    #[test]
    fn test_evaluate_shallow_water_table_adds_et_draft() {
        let series = WellSeries::new("W1", vec![sample(2022, 7, 1, 0.8)]);
        let outcome = evaluate(&series, &ScenarioInput::default()).unwrap();
        // (3 + 2) mm/day over 10 000 ha for a year
        let expected = 5.0 / 1000.0 * 1e8 * 365.0 / 1e9;
        assert!((outcome.et_draft - expected).abs() < 1e-12);
    }

    #[test]
    fn test_custom_forecast_horizons() {
        let outcome = evaluate(&well(), &ScenarioInput::default()).unwrap();
        let three = outcome.forecast(3).unwrap();
        assert_eq!(three, outcome.main_forecast);
        let twelve = outcome.forecast(12).unwrap();
        let drop_3 = 8.0 - three.level;
        let drop_12 = 8.0 - twelve.level;
        assert!((drop_12 - 4.0 * drop_3).abs() < 1e-9);
        assert!(outcome.forecast(0).is_err());
        assert!(outcome.forecast(13).is_err());
    }

    #[test]
    fn test_evaluate_empty_series() {
        let empty = WellSeries::new("W1", Vec::new());
        assert_eq!(
            evaluate(&empty, &ScenarioInput::default()),
            Err(DssError::EmptySeries)
        );
    }
}

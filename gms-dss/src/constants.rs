//! Unit conversions and empirical thresholds used by the balance engine.

/// Hectare-metres to billion cubic metres.
/// 1 ha·m = 10 000 m³ and 1 BCM = 1e9 m³, so the factor is 1e4 / 1e9 = 1e-5.
pub const HA_M_TO_BCM: f64 = 1e-5;

/// Cubic metres in one billion cubic metres (BCM).
pub const M3_PER_BCM: f64 = 1e9;

/// Million cubic metres (MCM) in one BCM.
pub const MCM_PER_BCM: f64 = 1000.0;

/// Square metres in one hectare.
pub const M2_PER_HA: f64 = 10_000.0;

/// Millimetres in one metre.
pub const MM_PER_M: f64 = 1000.0;

/// Days used to annualise daily rates.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Empirical "effective rainfall" offset subtracted from rainfall in the RIF
/// method [mm]. A calibration constant carried as-is, not a unit-consistent term.
pub const RIF_RAINFALL_OFFSET_MM: f64 = 0.08;

/// WTF and RIF recharge must agree within this percentage, otherwise the RIF
/// estimate scaled by the matching bound is used.
pub const RECHARGE_AGREEMENT_PERCENT: f64 = 20.0;

/// Lower reconciliation bound applied to RIF recharge.
pub const RIF_LOWER_FACTOR: f64 = 0.8;

/// Upper reconciliation bound applied to RIF recharge.
pub const RIF_UPPER_FACTOR: f64 = 1.2;

/// Water table depth at or above which open evaporation draws from the aquifer [mbgl].
pub const EVAPORATION_DEPTH_LIMIT_M: f64 = 1.0;

/// Water table depth at or above which vegetation transpires from the aquifer [mbgl].
pub const TRANSPIRATION_DEPTH_LIMIT_M: f64 = 3.5;

/// Stage of extraction reported when recharge is zero or negative [%].
pub const STAGE_OF_EXTRACTION_SENTINEL: f64 = 200.0;

/// Minimum readings in the whole series before a dry season trend is fitted.
pub const MIN_SAMPLES_FOR_DECLINE_RATE: usize = 12;

/// Minimum readings inside the dry season window for a trend fit.
pub const MIN_DRY_SEASON_SAMPLES: usize = 2;

/// Month of the pre-monsoon reading (May).
pub const PRE_MONSOON_MONTH: u32 = 5;

/// Month of the post-monsoon reading (November).
pub const POST_MONSOON_MONTH: u32 = 11;

/// First month of the dry season, taken from the previous calendar year (October).
pub const DRY_SEASON_START_MONTH: u32 = 10;

/// Last month of the dry season (May).
pub const DRY_SEASON_END_MONTH: u32 = 5;

/// Horizon of the headline forecast [months].
pub const MAIN_FORECAST_HORIZON_MONTHS: u32 = 3;

/// Longest custom forecast horizon offered [months].
pub const MAX_FORECAST_HORIZON_MONTHS: u32 = 12;

/// Share of projected net availability allocatable to future use.
pub const FUTURE_USE_FACTOR: f64 = 0.9975;

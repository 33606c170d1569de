//! Farm level irrigation calculator: net irrigation requirement and pump run time.

use crate::error::{DssError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Square metres per acre, as rounded in the field guidance.
pub const M2_PER_ACRE: f64 = 4047.0;
/// Combined pump and motor efficiency.
pub const PUMP_EFFICIENCY: f64 = 0.65;
/// Hydraulic constant relating pump power to flow times head [m³·m/(h·HP)].
pub const HP_TO_M3_M_PER_HOUR: f64 = 367.0;
/// Depth assumed when no positive water level is known [m].
pub const FALLBACK_WATER_DEPTH_M: f64 = 5.0;
/// Head added for delivery and friction losses [m].
pub const DELIVERY_HEAD_M: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Wheat,
    Sugarcane,
    Cotton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    Initial,
    Development,
    MidSeason,
    LateSeason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Sandy,
    Loam,
    Clay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrrigationMethod {
    FloodFurrow,
    Sprinkler,
    Drip,
}

fn unsupported(kind: &str, value: &str) -> DssError {
    DssError::UnsupportedIrrigation(format!("{} '{}'", kind, value))
}

/// Lower-cased with spaces, dashes, slashes and underscores removed, so
/// "Mid-Season", "mid_season" and "midseason" all match.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '/'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Crop {
    type Err = DssError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "wheat" => Ok(Crop::Wheat),
            "sugarcane" => Ok(Crop::Sugarcane),
            "cotton" => Ok(Crop::Cotton),
            _ => Err(unsupported("crop", s)),
        }
    }
}

impl FromStr for GrowthStage {
    type Err = DssError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "initial" => Ok(GrowthStage::Initial),
            "development" => Ok(GrowthStage::Development),
            "midseason" | "mid" => Ok(GrowthStage::MidSeason),
            "lateseason" | "late" => Ok(GrowthStage::LateSeason),
            _ => Err(unsupported("growth stage", s)),
        }
    }
}

impl FromStr for SoilType {
    type Err = DssError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "sandy" => Ok(SoilType::Sandy),
            "loam" => Ok(SoilType::Loam),
            "clay" => Ok(SoilType::Clay),
            _ => Err(unsupported("soil type", s)),
        }
    }
}

impl FromStr for IrrigationMethod {
    type Err = DssError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "floodfurrow" | "flood" | "furrow" => Ok(IrrigationMethod::FloodFurrow),
            "sprinkler" => Ok(IrrigationMethod::Sprinkler),
            "drip" => Ok(IrrigationMethod::Drip),
            _ => Err(unsupported("irrigation method", s)),
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GrowthStage::Initial => "Initial",
            GrowthStage::Development => "Development",
            GrowthStage::MidSeason => "Mid-Season",
            GrowthStage::LateSeason => "Late Season",
        })
    }
}

impl fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IrrigationMethod::FloodFurrow => "Flood / Furrow",
            IrrigationMethod::Sprinkler => "Sprinkler",
            IrrigationMethod::Drip => "Drip",
        })
    }
}

/// Crop coefficient Kc. Sugarcane and cotton have no development stage entry.
pub fn crop_coefficient(crop: Crop, stage: GrowthStage) -> Result<f64> {
    use GrowthStage::*;
    match (crop, stage) {
        (Crop::Wheat, Initial) => Ok(0.40),
        (Crop::Wheat, Development) => Ok(0.80),
        (Crop::Wheat, MidSeason) => Ok(1.15),
        (Crop::Wheat, LateSeason) => Ok(0.35),
        (Crop::Sugarcane, Initial) => Ok(0.40),
        (Crop::Sugarcane, MidSeason) => Ok(1.25),
        (Crop::Sugarcane, LateSeason) => Ok(0.75),
        (Crop::Cotton, Initial) => Ok(0.35),
        (Crop::Cotton, MidSeason) => Ok(1.20),
        (Crop::Cotton, LateSeason) => Ok(0.60),
        (crop, stage) => Err(DssError::UnsupportedIrrigation(format!(
            "{:?} has no {} stage",
            crop, stage
        ))),
    }
}

/// Field application efficiency.
pub fn application_efficiency(soil: SoilType, method: IrrigationMethod) -> f64 {
    match (soil, method) {
        (SoilType::Sandy, IrrigationMethod::FloodFurrow) => 0.60,
        (_, IrrigationMethod::FloodFurrow) => 0.75,
        (_, IrrigationMethod::Sprinkler) => 0.80,
        (_, IrrigationMethod::Drip) => 0.90,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrigationRequest {
    pub crop: Crop,
    pub stage: GrowthStage,
    pub soil: SoilType,
    pub method: IrrigationMethod,
    pub area_acres: f64,
    pub pump_hp: f64,
    /// Reference evapotranspiration [mm/day]
    pub et0_mm_day: f64,
    /// [mm]
    pub recent_rainfall_mm: f64,
    /// Latest depth to water [mbgl], if known
    pub latest_level: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IrrigationAdvice {
    /// Rainfall covers crop demand
    NoIrrigationNeeded { net_requirement_mm: f64 },
    Irrigate {
        net_requirement_mm: f64,
        volume_m3: f64,
        total_head_m: f64,
        flow_m3_per_hour: f64,
        pumping_hours: f64,
    },
}

/// Net irrigation requirement and pump run time for one day of crop demand.
pub fn irrigation_requirement(request: &IrrigationRequest) -> Result<IrrigationAdvice> {
    let kc = crop_coefficient(request.crop, request.stage)?;
    let net_requirement_mm = request.et0_mm_day * kc - request.recent_rainfall_mm;
    if net_requirement_mm <= 0.0 {
        return Ok(IrrigationAdvice::NoIrrigationNeeded { net_requirement_mm });
    }

    let efficiency = application_efficiency(request.soil, request.method);
    let volume_m3 = net_requirement_mm * (request.area_acres * M2_PER_ACRE) / (1000.0 * efficiency);
    let depth = match request.latest_level {
        Some(level) if level > 0.0 => level,
        _ => FALLBACK_WATER_DEPTH_M,
    };
    let total_head_m = depth + DELIVERY_HEAD_M;
    let flow_m3_per_hour = request.pump_hp * PUMP_EFFICIENCY * HP_TO_M3_M_PER_HOUR / total_head_m;
    let pumping_hours = if flow_m3_per_hour > 0.0 {
        volume_m3 / flow_m3_per_hour
    } else {
        0.0
    };
    Ok(IrrigationAdvice::Irrigate {
        net_requirement_mm,
        volume_m3,
        total_head_m,
        flow_m3_per_hour,
        pumping_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> IrrigationRequest {
        IrrigationRequest {
            crop: Crop::Wheat,
            stage: GrowthStage::MidSeason,
            soil: SoilType::Loam,
            method: IrrigationMethod::Drip,
            area_acres: 5.0,
            pump_hp: 5.0,
            et0_mm_day: 5.0,
            recent_rainfall_mm: 0.0,
            latest_level: Some(8.0),
        }
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Mid-Season".parse::<GrowthStage>(), Ok(GrowthStage::MidSeason));
        assert_eq!("Late Season".parse::<GrowthStage>(), Ok(GrowthStage::LateSeason));
        assert_eq!("Flood / Furrow".parse::<IrrigationMethod>(), Ok(IrrigationMethod::FloodFurrow));
        assert_eq!("sugarcane".parse::<Crop>(), Ok(Crop::Sugarcane));
        assert!("rice".parse::<Crop>().is_err());
        assert!("silt".parse::<SoilType>().is_err());
    }

    #[test]
    fn test_crop_coefficients() {
        assert_eq!(crop_coefficient(Crop::Wheat, GrowthStage::MidSeason), Ok(1.15));
        assert_eq!(crop_coefficient(Crop::Cotton, GrowthStage::LateSeason), Ok(0.60));
        assert!(crop_coefficient(Crop::Sugarcane, GrowthStage::Development).is_err());
    }

    #[test]
    fn test_application_efficiency() {
        assert_eq!(application_efficiency(SoilType::Sandy, IrrigationMethod::FloodFurrow), 0.60);
        assert_eq!(application_efficiency(SoilType::Clay, IrrigationMethod::FloodFurrow), 0.75);
        assert_eq!(application_efficiency(SoilType::Sandy, IrrigationMethod::Drip), 0.90);
    }

    #[test]
    fn test_irrigation_requirement() {
        let advice = irrigation_requirement(&request()).unwrap();
        let IrrigationAdvice::Irrigate {
            net_requirement_mm,
            volume_m3,
            total_head_m,
            flow_m3_per_hour,
            pumping_hours,
        } = advice
        else {
            panic!("expected irrigation, got {:?}", advice);
        };
        assert!((net_requirement_mm - 5.75).abs() < 1e-12);
        assert!((volume_m3 - 5.75 * 5.0 * 4047.0 / 900.0).abs() < 1e-9);
        assert_eq!(total_head_m, 10.0);
        assert!((flow_m3_per_hour - 5.0 * 0.65 * 367.0 / 10.0).abs() < 1e-9);
        assert!((pumping_hours - volume_m3 / flow_m3_per_hour).abs() < 1e-12);
    }

    #[test]
    fn test_rainfall_covers_demand() {
        let req = IrrigationRequest {
            recent_rainfall_mm: 10.0,
            ..request()
        };
        assert!(matches!(
            irrigation_requirement(&req),
            Ok(IrrigationAdvice::NoIrrigationNeeded { .. })
        ));
    }

    #[test]
    fn test_unknown_level_uses_fallback_depth() {
        for latest_level in [None, Some(0.0), Some(-1.0)] {
            let req = IrrigationRequest {
                latest_level,
                ..request()
            };
            match irrigation_requirement(&req).unwrap() {
                IrrigationAdvice::Irrigate { total_head_m, .. } => assert_eq!(total_head_m, 7.0),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_pump_power_gives_zero_hours() {
        let req = IrrigationRequest {
            pump_hp: 0.0,
            ..request()
        };
        match irrigation_requirement(&req).unwrap() {
            IrrigationAdvice::Irrigate { pumping_hours, .. } => assert_eq!(pumping_hours, 0.0),
            other => panic!("unexpected {:?}", other),
        }
    }
}

//! Farmer irrigation calculator.

use crate::source::{load_metadata, load_series, open_cache};
use crate::SourceArgs;
use chrono::Local;
use clap::Args;
use gms_core::weather::{PowerClient, DEFAULT_ET0_MM_DAY};
use gms_dss::irrigation::{
    irrigation_requirement, Crop, GrowthStage, IrrigationAdvice, IrrigationMethod,
    IrrigationRequest, SoilType,
};
use log::info;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct IrrigateArgs {
    /// Wheat, Sugarcane or Cotton
    #[arg(long)]
    pub crop: Crop,

    /// Initial, Development, Mid-Season or Late Season
    #[arg(long)]
    pub stage: GrowthStage,

    /// Sandy, Loam or Clay
    #[arg(long)]
    pub soil: SoilType,

    /// Flood / Furrow, Sprinkler or Drip
    #[arg(long)]
    pub method: IrrigationMethod,

    /// Farm area [acres]
    #[arg(long, default_value_t = 5.0)]
    pub acres: f64,

    /// Pump power [HP]
    #[arg(long, default_value_t = 5.0)]
    pub hp: f64,

    /// Reference evapotranspiration [mm/day]; estimated from NASA POWER for the well when omitted
    #[arg(long)]
    pub et0: Option<f64>,

    /// Recent rainfall [mm]
    #[arg(long, default_value_t = 0.0)]
    pub rainfall: f64,

    /// Well supplying the farm, used for pumping head and location
    #[arg(short = 'w', long)]
    pub well: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

async fn estimate_et0(args: &IrrigateArgs) -> anyhow::Result<f64> {
    if let Some(et0) = args.et0 {
        return Ok(et0);
    }
    let coordinates = args.well.as_deref().and_then(|well| {
        load_metadata(&args.source.metadata_csv)?
            .lookup(well)?
            .coordinates()
    });
    let Some((latitude, longitude)) = coordinates else {
        info!("No coordinates available, using default ET0 {}", DEFAULT_ET0_MM_DAY);
        return Ok(DEFAULT_ET0_MM_DAY);
    };
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let today = Local::now().naive_local().date();
    let et0 = PowerClient::new(client)
        .reference_et0(latitude, longitude, today)
        .await
        .unwrap_or(DEFAULT_ET0_MM_DAY);
    info!("Using ET0 {} mm/day for ({}, {})", et0, latitude, longitude);
    Ok(et0)
}

pub async fn run_irrigate(args: &IrrigateArgs) -> anyhow::Result<()> {
    let latest_level = match &args.well {
        Some(well) => {
            let mut cache = open_cache(&args.source, well)?;
            load_series(&mut cache, well)
                .await?
                .latest()
                .map(|sample| sample.value)
        }
        None => None,
    };
    let request = IrrigationRequest {
        crop: args.crop,
        stage: args.stage,
        soil: args.soil,
        method: args.method,
        area_acres: args.acres,
        pump_hp: args.hp,
        et0_mm_day: estimate_et0(args).await?,
        recent_rainfall_mm: args.rainfall,
        latest_level,
    };

    match irrigation_requirement(&request)? {
        IrrigationAdvice::NoIrrigationNeeded { net_requirement_mm } => {
            println!("No irrigation needed (net requirement {:.2} mm)", net_requirement_mm);
        }
        IrrigationAdvice::Irrigate {
            net_requirement_mm,
            volume_m3,
            total_head_m,
            flow_m3_per_hour,
            pumping_hours,
        } => {
            println!("Net irrigation requirement: {:.2} mm", net_requirement_mm);
            println!("Water volume: {:.1} m³", volume_m3);
            println!("Total head: {:.1} m, pump flow {:.1} m³/h", total_head_m, flow_m3_per_hour);
            println!("Required pumping time: {:.2} hours", pumping_hours);
        }
    }
    Ok(())
}

//! Historical summary and per hydrological year recharge for a well.

use crate::source::{load_series, open_cache};
use crate::SourceArgs;
use gms_dss::analytics::{monthly_ranges, series_summary, yearly_averages};
use gms_dss::preprocessing::{decline_rate, per_year_recharge};
use gms_utils::dates::format_date;
use log::info;

pub async fn run_recharge(well: &str, specific_yield: f64, source: &SourceArgs) -> anyhow::Result<()> {
    if !specific_yield.is_finite() || specific_yield <= 0.0 {
        anyhow::bail!("specific yield must be positive, got {}", specific_yield);
    }
    let mut cache = open_cache(source, well)?;
    let series = load_series(&mut cache, well).await?;
    let Some(summary) = series_summary(&series) else {
        println!("Well {} has no readings", well);
        return Ok(());
    };

    println!(
        "Well {}: {} readings from {} to {}",
        well,
        summary.sample_count,
        format_date(&summary.first_date),
        format_date(&summary.last_date)
    );
    println!(
        "Latest level {:.2} mbgl, average {:.2} mbgl",
        summary.latest_level, summary.average_level
    );
    match decline_rate(&series) {
        Some(rate) => println!("Dry season decline: {:.4} m/day", rate),
        None => println!("Dry season decline: not enough data"),
    }

    println!("\nYearly average level");
    for year in yearly_averages(&series) {
        println!("{:>6} {:>8.2}", year.year, year.average_level);
    }

    println!("\nMonthly range (min / max mbgl)");
    for month in monthly_ranges(&series) {
        println!("{:>10} {:>8.2} {:>8.2}", month.month_name, month.min_level, month.max_level);
    }

    let annual = per_year_recharge(&series, specific_yield);
    info!("{} hydrological years with computable recharge for {}", annual.len(), well);
    println!("\nAnnual WTF recharge (Sy = {})", specific_yield);
    if annual.is_empty() {
        println!("No hydrological year has enough readings and a seasonal rise");
    }
    for year in annual {
        println!("{:>10} {:>8.3} m {:>8.2} mbgl", year.label, year.recharge_m, year.avg_level_m);
    }
    Ok(())
}

//! Balance, classification and forecast for one well under a scenario.

use crate::source::{load_metadata, load_scenario, load_series, open_cache, WellCache};
use crate::{ScenarioArgs, SourceArgs};
use gms_dss::forecast::ForecastPoint;
use gms_dss::scenario::{evaluate, ScenarioOutcome};
use gms_dss::sustainability::{assess_project, ProjectAssessment};
use gms_utils::dates::format_date;
use log::info;

/// Everything the scenario and export commands derive from their arguments.
pub struct ScenarioRun {
    pub series: gms_core::sample::WellSeries,
    pub outcome: ScenarioOutcome,
    pub forecast: ForecastPoint,
    pub project: Option<ProjectAssessment>,
}

pub async fn prepare_run(
    cache: &mut WellCache,
    well: &str,
    scenario: &ScenarioArgs,
) -> anyhow::Result<ScenarioRun> {
    let input = load_scenario(scenario.scenario.as_deref())?;
    let series = load_series(cache, well).await?;
    let outcome = evaluate(&series, &input)?;
    let forecast = outcome.forecast(scenario.horizon)?;
    let project = scenario
        .demand
        .map(|demand| assess_project(&outcome, demand))
        .transpose()?;
    info!(
        "Evaluated scenario for {} over {} samples ending {}",
        well,
        series.len(),
        outcome.last_date
    );
    Ok(ScenarioRun {
        series,
        outcome,
        forecast,
        project,
    })
}

pub async fn run_scenario(
    well: &str,
    scenario: &ScenarioArgs,
    source: &SourceArgs,
) -> anyhow::Result<()> {
    let mut cache = open_cache(source, well)?;
    let run = prepare_run(&mut cache, well, scenario).await?;
    if let Some(meta) = load_metadata(&source.metadata_csv).and_then(|t| t.lookup(well).cloned()) {
        println!(
            "Well {}: {}, {}, {}, {}",
            meta.well_no, meta.village, meta.block, meta.district, meta.state
        );
    } else {
        println!("Well {}", well);
    }
    print_outcome(&run.outcome);
    print_forecast("Forecast", &run.forecast);
    if let Some(project) = &run.project {
        print_project(project);
    }
    Ok(())
}

fn print_outcome(outcome: &ScenarioOutcome) {
    let base = &outcome.base;
    let projected = &outcome.projected;
    println!("Latest level: {:.2} mbgl on {}", outcome.monsoon.latest_level, format_date(&outcome.last_date));
    println!("Monsoon rise: {:.2} m", outcome.monsoon.delta_h);
    println!(
        "Recharge WTF {:.6} BCM, RIF {:.6} BCM, validated {:.6} BCM ({:?})",
        outcome.recharge_wtf, outcome.recharge_rif, base.annual_recharge, outcome.recharge_source
    );
    println!(
        "Base:      recharge {:.6} BCM, draft {:.6} BCM, net {:.6} BCM, stage {:.2}% ({})",
        base.annual_recharge, base.annual_draft, base.net_availability, base.stage_of_extraction, base.category
    );
    println!(
        "Scenario:  +{:.6} BCM recharge, +{:.6} BCM policy draft, +{:.6} BCM ET draft",
        outcome.additional_recharge, outcome.policy_draft, outcome.et_draft
    );
    println!(
        "Projected: recharge {:.6} BCM, draft {:.6} BCM, net {:.6} BCM, stage {:.2}% ({})",
        projected.annual_recharge,
        projected.annual_draft,
        projected.net_availability,
        projected.stage_of_extraction,
        projected.category
    );
    println!(
        "Change:    net {:+.6} BCM, stage {:+.2} points",
        outcome.net_availability_change, outcome.stage_change
    );
    println!("Net availability: {:.2} MCM", outcome.net_availability_mcm_display());
    let recommendation = outcome.recommendation();
    println!("{} [{}]", recommendation.message, recommendation.color);
    print_forecast("3-month forecast", &outcome.main_forecast);
}

fn print_forecast(title: &str, forecast: &ForecastPoint) {
    let date = forecast
        .date
        .map(|d| format_date(&d))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "{} ({} months): {:.2} mbgl on {}",
        title, forecast.horizon_months, forecast.level, date
    );
}

fn print_project(project: &ProjectAssessment) {
    println!("Project demand: {:.3} MCM", project.demand_mcm);
    println!("Net for future use: {:.3} MCM", project.future_use_mcm);
    println!("Remaining surplus: {:.3} MCM", project.remaining_surplus_mcm);
    println!(
        "Stage before project: {:.2}% ({})",
        project.stage_before, project.category_before
    );
    println!(
        "Stage after project: {:.2}% ({:+.2} points) -> {} [{}]",
        project.stage_after,
        project.stage_increase,
        project.status,
        project.status.color()
    );
}

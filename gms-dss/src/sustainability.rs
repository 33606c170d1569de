//! Effect of a new project's water demand on a scenario's balance.

use crate::balance::stage_of_extraction;
use crate::classification::{classify, classify_project, Category, ProjectStatus};
use crate::constants::{FUTURE_USE_FACTOR, MCM_PER_BCM};
use crate::error::{DssError, Result};
use crate::scenario::ScenarioOutcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectAssessment {
    /// [MCM]
    pub demand_mcm: f64,
    /// Net availability reserved for future use [MCM]
    pub future_use_mcm: f64,
    /// Future use left after the demand, floored at zero [MCM]
    pub remaining_surplus_mcm: f64,
    /// [%]
    pub stage_before: f64,
    pub category_before: Category,
    /// [BCM]
    pub new_draft: f64,
    /// [%]
    pub stage_after: f64,
    /// [percentage points]
    pub stage_increase: f64,
    pub status: ProjectStatus,
}

/// Add `demand_mcm` of annual extraction on top of a scenario outcome.
pub fn assess_project(outcome: &ScenarioOutcome, demand_mcm: f64) -> Result<ProjectAssessment> {
    if !demand_mcm.is_finite() || demand_mcm < 0.0 {
        return Err(DssError::InvalidInput {
            field: "demand_mcm",
            value: demand_mcm,
        });
    }
    let balance = &outcome.projected;
    let future_use_mcm = balance.net_availability_mcm() * FUTURE_USE_FACTOR;
    let new_draft = balance.annual_draft + demand_mcm / MCM_PER_BCM;
    let stage_after = stage_of_extraction(new_draft, balance.annual_recharge);
    let assessment = ProjectAssessment {
        demand_mcm,
        future_use_mcm,
        remaining_surplus_mcm: (future_use_mcm - demand_mcm).max(0.0),
        stage_before: balance.stage_of_extraction,
        category_before: classify(balance.stage_of_extraction),
        new_draft,
        stage_after,
        stage_increase: stage_after - balance.stage_of_extraction,
        status: classify_project(stage_after),
    };
    log::debug!(
        "project demand {:.3} MCM on well {}: stage {:.2}% -> {:.2}% ({})",
        demand_mcm,
        outcome.well_id,
        assessment.stage_before,
        assessment.stage_after,
        assessment.status
    );
    Ok(assessment)
}

//! Net availability, stage of extraction and the combined balance record.

use crate::classification::{classify, Category};
use crate::constants::{MCM_PER_BCM, STAGE_OF_EXTRACTION_SENTINEL};
use serde::{Deserialize, Serialize};

/// Recharge minus draft [BCM]. May be negative.
pub fn net_availability(recharge_bcm: f64, draft_bcm: f64) -> f64 {
    recharge_bcm - draft_bcm
}

/// Draft as a percentage of recharge. 200% when recharge is zero or negative.
pub fn stage_of_extraction(draft_bcm: f64, recharge_bcm: f64) -> f64 {
    if recharge_bcm <= 0.0 {
        return STAGE_OF_EXTRACTION_SENTINEL;
    }
    draft_bcm / recharge_bcm * 100.0
}

/// Annual water balance for one scenario, in BCM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    pub annual_recharge: f64,
    pub annual_draft: f64,
    pub net_availability: f64,
    /// Percent
    pub stage_of_extraction: f64,
    pub category: Category,
}

impl BalanceResult {
    pub fn new(annual_recharge: f64, annual_draft: f64) -> Self {
        let stage = stage_of_extraction(annual_draft, annual_recharge);
        BalanceResult {
            annual_recharge,
            annual_draft,
            net_availability: net_availability(annual_recharge, annual_draft),
            stage_of_extraction: stage,
            category: classify(stage),
        }
    }

    /// Net availability in million cubic metres.
    pub fn net_availability_mcm(&self) -> f64 {
        self.net_availability * MCM_PER_BCM
    }
}

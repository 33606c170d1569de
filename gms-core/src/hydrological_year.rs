use crate::sample::{WaterLevelSample, WellSeries};
use gms_utils::dates::{hydrological_year_for_date, hydrological_year_label};
use std::collections::BTreeMap;

/// Minimum number of readings for a hydrological year to be usable in
/// annual recharge calculations.
pub const MIN_SAMPLES_PER_HYDROLOGICAL_YEAR: usize = 90;

/// The monsoon-aligned hydrological year runs from June 1 to May 31, so a
/// pre-monsoon low and the following post-monsoon high fall in the same year.
#[derive(Debug, Clone, PartialEq)]
pub struct HydrologicalYear {
    /// Calendar year in which this hydrological year starts.
    pub year: i32,
    pub samples: Vec<WaterLevelSample>,
}

impl HydrologicalYear {
    /// Partition a series into hydrological years, ascending by year.
    /// Every sample lands in exactly one group.
    pub fn partition(series: &WellSeries) -> Vec<HydrologicalYear> {
        let mut groups: BTreeMap<i32, Vec<WaterLevelSample>> = BTreeMap::new();
        for sample in series {
            groups
                .entry(hydrological_year_for_date(&sample.date))
                .or_default()
                .push(*sample);
        }
        groups
            .into_iter()
            .map(|(year, samples)| HydrologicalYear { year, samples })
            .collect()
    }

    pub fn label(&self) -> String {
        hydrological_year_label(self.year)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True if the year carries enough readings for annual recharge.
    pub fn has_sufficient_data(&self) -> bool {
        self.samples.len() >= MIN_SAMPLES_PER_HYDROLOGICAL_YEAR
    }

    /// Shallowest depth of the year, i.e. the post-monsoon peak water table.
    pub fn peak_level(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).min_by(|a, b| a.total_cmp(b))
    }

    /// Deepest depth of the year, i.e. the pre-monsoon low water table.
    pub fn lowest_level(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).max_by(|a, b| a.total_cmp(b))
    }

    pub fn mean_level(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.value).sum();
        Some(sum / self.samples.len() as f64)
    }
}

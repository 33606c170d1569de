use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single groundwater level reading.
///
/// `value` is depth to water in metres below ground level (mbgl): a smaller value
/// means the water table is closer to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterLevelSample {
    pub date: NaiveDate,
    pub value: f64,
}

impl WaterLevelSample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        WaterLevelSample { date, value }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// The full history of one well, ordered ascending by date.
///
/// Samples sharing a date are kept in the order the provider returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellSeries {
    pub well_id: String,
    samples: Vec<WaterLevelSample>,
}

impl WellSeries {
    /// Build a series, sorting samples by date. The sort is stable so duplicate
    /// dates pass through untouched.
    pub fn new(well_id: impl Into<String>, mut samples: Vec<WaterLevelSample>) -> Self {
        if !samples.is_sorted_by_key(|sample| sample.date) {
            samples.sort_by_key(|sample| sample.date);
        }
        WellSeries {
            well_id: well_id.into(),
            samples,
        }
    }

    pub fn samples(&self) -> &[WaterLevelSample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WaterLevelSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The chronologically last sample.
    pub fn latest(&self) -> Option<&WaterLevelSample> {
        self.samples.last()
    }

    /// The most recent calendar year present in the series.
    pub fn last_year(&self) -> Option<i32> {
        self.samples.iter().map(WaterLevelSample::year).max()
    }

    /// Mean depth of all samples taken in `month` of `year`.
    pub fn monthly_mean(&self, year: i32, month: u32) -> Option<f64> {
        let (sum, count) = self
            .samples
            .iter()
            .filter(|sample| sample.year() == year && sample.month() == month)
            .fold((0.0, 0usize), |(sum, count), sample| (sum + sample.value, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}

impl<'a> IntoIterator for &'a WellSeries {
    type Item = &'a WaterLevelSample;
    type IntoIter = std::slice::Iter<'a, WaterLevelSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

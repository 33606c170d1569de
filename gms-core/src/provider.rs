//! Well history providers and the per-session series cache.

use crate::error::FetchError;
use crate::sample::{WaterLevelSample, WellSeries};
use csv::{ReaderBuilder, Trim};
use gms_utils::dates::parse_api_date;
use std::collections::HashMap;
use std::future::Future;

/// Source of historical water levels for a well.
///
/// Implementations return samples sorted ascending by date. An empty series
/// is a valid answer; a provider that cannot answer returns a `FetchError`.
pub trait WellHistoryProvider {
    fn fetch(&self, well_id: &str) -> impl Future<Output = Result<WellSeries, FetchError>>;
}

/// Memoizes fetched series by well id for the lifetime of the cache.
///
/// Historical data is treated as stable, so entries are never invalidated.
/// Failed fetches are not cached and will be retried on the next request.
pub struct SeriesCache<P> {
    provider: P,
    series: HashMap<String, WellSeries>,
}

impl<P: WellHistoryProvider> SeriesCache<P> {
    pub fn new(provider: P) -> Self {
        SeriesCache {
            provider,
            series: HashMap::new(),
        }
    }

    /// Return the cached series, fetching it on a miss.
    ///
    /// Takes `&mut self`, so a miss triggers exactly one fetch even if the
    /// caller evaluates many scenarios against the same well.
    pub async fn get(&mut self, well_id: &str) -> Result<&WellSeries, FetchError> {
        if !self.series.contains_key(well_id) {
            log::info!("cache miss for well {well_id}, fetching history");
            let fetched = self.provider.fetch(well_id).await?;
            log::info!("fetched {} samples for well {}", fetched.len(), well_id);
            self.series.insert(well_id.to_string(), fetched);
        }
        Ok(&self.series[well_id])
    }

    pub fn is_cached(&self, well_id: &str) -> bool {
        self.series.contains_key(well_id)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Provider backed by series already held in memory, e.g. loaded from a CSV
/// export for offline analysis.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryProvider {
    wells: HashMap<String, Vec<WaterLevelSample>>,
}

impl InMemoryHistoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, series: WellSeries) {
        self.wells
            .insert(series.well_id.clone(), series.samples().to_vec());
    }

    /// Load one well from CSV with a header row containing `date` and `value`
    /// columns. Rows with an empty, non-numeric or non-finite value are skipped; rows with
    /// an unreadable date make the whole payload malformed.
    pub fn load_csv_str(&mut self, well_id: &str, csv_data: &str) -> Result<usize, FetchError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(csv_data.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| FetchError::Malformed(e.to_string()))?
            .clone();
        let date_col = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("date"))
            .ok_or_else(|| FetchError::Malformed("missing date column".into()))?;
        let value_col = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case("value"))
            .ok_or_else(|| FetchError::Malformed("missing value column".into()))?;

        let mut samples = Vec::new();
        for row in rdr.records() {
            let record = row.map_err(|e| FetchError::Malformed(e.to_string()))?;
            let date_str = record.get(date_col).unwrap_or("");
            let date =
                parse_api_date(date_str).map_err(|e| FetchError::Malformed(e.to_string()))?;
            match record
                .get(value_col)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())
            {
                Some(value) => samples.push(WaterLevelSample::new(date, value)),
                None => log::debug!("skipping row without a numeric value on {date}"),
            }
        }
        let count = samples.len();
        self.insert(WellSeries::new(well_id, samples));
        Ok(count)
    }
}

impl WellHistoryProvider for InMemoryHistoryProvider {
    async fn fetch(&self, well_id: &str) -> Result<WellSeries, FetchError> {
        self.wells
            .get(well_id)
            .map(|samples| WellSeries::new(well_id, samples.clone()))
            .ok_or_else(|| FetchError::NotFound(well_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryHistoryProvider, SeriesCache, WellHistoryProvider};
    use crate::error::FetchError;
    use crate::sample::{WaterLevelSample, WellSeries};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl WellHistoryProvider for CountingProvider {
        async fn fetch(&self, well_id: &str) -> Result<WellSeries, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FetchError::Unavailable("offline".into()));
            }
            let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
            Ok(WellSeries::new(
                well_id,
                vec![WaterLevelSample::new(date, 3.2)],
            ))
        }
    }

    #[tokio::test]
    async fn test_cache_fetches_once_per_well() {
        let mut cache = SeriesCache::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        assert_eq!(cache.get("W1").await.unwrap().len(), 1);
        assert_eq!(cache.get("W1").await.unwrap().len(), 1);
        assert!(cache.is_cached("W1"));
        assert_eq!(cache.provider().calls.load(Ordering::SeqCst), 1);
        cache.get("W2").await.unwrap();
        assert_eq!(cache.provider().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cache_does_not_keep_failures() {
        let mut cache = SeriesCache::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        assert!(matches!(
            cache.get("W1").await,
            Err(FetchError::Unavailable(_))
        ));
        assert!(!cache.is_cached("W1"));
        assert!(cache.get("W1").await.is_err());
        assert_eq!(cache.provider().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_in_memory_provider_csv() {
        let csv_data = "date,value,type\n2021-02-01,5.5,historical\n2021-01-01,5.0,historical\n2021-03-01,,historical\n";
        let mut provider = InMemoryHistoryProvider::new();
        assert_eq!(provider.load_csv_str("W9", csv_data).unwrap(), 2);
        let series = provider.fetch("W9").await.unwrap();
        assert_eq!(series.samples()[0].value, 5.0);
        assert_eq!(series.latest().unwrap().value, 5.5);
        assert!(matches!(
            provider.fetch("missing").await,
            Err(FetchError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_provider_skips_non_finite_values() {
        let csv_data = "date,value\n2021-01-01,5.0\n2021-02-01,NaN\n2021-03-01,inf\n2021-04-01,-inf\n";
        let mut provider = InMemoryHistoryProvider::new();
        assert_eq!(provider.load_csv_str("W9", csv_data).unwrap(), 1);
        let series = provider.fetch("W9").await.unwrap();
        assert_eq!(series.latest().unwrap().value, 5.0);
    }

    #[test]
    fn test_in_memory_provider_rejects_bad_dates() {
        let mut provider = InMemoryHistoryProvider::new();
        let result = provider.load_csv_str("W9", "date,value\nyesterday,1.0\n");
        assert!(matches!(result, Err(FetchError::Malformed(_))));
        let result = provider.load_csv_str("W9", "when,value\n2021-01-01,1.0\n");
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }
}

//! Resolving command line sources into providers, series, metadata and scenarios.

use crate::SourceArgs;
use gms_core::error::FetchError;
use gms_core::history_client::HistoryClient;
use gms_core::metadata::WellMetadataTable;
use gms_core::provider::{InMemoryHistoryProvider, SeriesCache, WellHistoryProvider};
use gms_core::sample::WellSeries;
use gms_dss::scenario::ScenarioInput;
use log::{info, warn};
use std::path::Path;
use std::time::Duration;

/// The history provider selected on the command line.
pub enum HistorySource {
    Remote(HistoryClient),
    Offline(InMemoryHistoryProvider),
}

impl WellHistoryProvider for HistorySource {
    async fn fetch(&self, well_id: &str) -> Result<WellSeries, FetchError> {
        match self {
            HistorySource::Remote(client) => client.fetch(well_id).await,
            HistorySource::Offline(provider) => provider.fetch(well_id).await,
        }
    }
}

impl HistorySource {
    /// Offline when `--history-csv` is given, otherwise the remote API.
    /// The offline CSV is registered under `well_id`.
    pub fn from_args(args: &SourceArgs, well_id: &str) -> anyhow::Result<Self> {
        match &args.history_csv {
            Some(path) => {
                let data = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("Failed to read history CSV {}: {}", path, e))?;
                let mut provider = InMemoryHistoryProvider::new();
                let count = provider.load_csv_str(well_id, &data)?;
                info!("Loaded {} samples for {} from {}", count, well_id, path);
                Ok(HistorySource::Offline(provider))
            }
            None => {
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(60))
                    .build()?;
                Ok(HistorySource::Remote(HistoryClient::new(client, args.history_url.clone())))
            }
        }
    }
}

/// Series cache over the selected provider, one per command run.
pub type WellCache = SeriesCache<HistorySource>;

pub fn open_cache(args: &SourceArgs, well_id: &str) -> anyhow::Result<WellCache> {
    Ok(SeriesCache::new(HistorySource::from_args(args, well_id)?))
}

/// Fetch one well's history, served from `cache` after the first request.
pub async fn load_series(cache: &mut WellCache, well_id: &str) -> anyhow::Result<WellSeries> {
    let series = cache.get(well_id).await?;
    if series.is_empty() {
        warn!("Well {} has no readings", well_id);
    }
    Ok(series.clone())
}

/// The metadata table, or `None` if the file is absent or unreadable.
/// Metadata only adds location details, so its absence is not fatal.
pub fn load_metadata(path: &str) -> Option<WellMetadataTable> {
    if !Path::new(path).exists() {
        info!("Metadata CSV {} not found, skipping location lookup", path);
        return None;
    }
    match WellMetadataTable::from_path(path) {
        Ok(table) => {
            info!("Loaded metadata for {} wells from {}", table.len(), path);
            Some(table)
        }
        Err(e) => {
            warn!("Failed to parse metadata CSV {}: {}", path, e);
            None
        }
    }
}

/// Defaults overridden by the JSON file at `path`, if any, then validated.
pub fn load_scenario(path: Option<&str>) -> anyhow::Result<ScenarioInput> {
    let input = match path {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read scenario {}: {}", path, e))?;
            serde_json::from_str(&data)
                .map_err(|e| anyhow::anyhow!("Failed to parse scenario {}: {}", path, e))?
        }
        None => ScenarioInput::default(),
    };
    input.validate()?;
    Ok(input)
}

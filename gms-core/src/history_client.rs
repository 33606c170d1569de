//! Client for the spreadsheet-backed well history API.
//!
//! The API answers `GET {base}?wellNo={id}&mode=full` with either a JSON array of
//! `{"date": ..., "value": ...}` rows or an object `{"error": "..."}`.

use crate::error::FetchError;
use crate::sample::{WaterLevelSample, WellSeries};
use gms_utils::dates::parse_api_date;
use serde_json::Value;

#[cfg(feature = "api")]
use crate::provider::WellHistoryProvider;
#[cfg(feature = "api")]
use log::{info, warn};
#[cfg(feature = "api")]
use reqwest::{Client, StatusCode};
#[cfg(feature = "api")]
use std::time::Duration;

/// Apps Script deployment serving the DWLR well history sheet.
pub const DEFAULT_HISTORY_URL: &str = "https://script.google.com/macros/s/AKfycbwYz0qXjiJD3k6vIuJ5eNdthQV4Tf14EyiyuT8VTE0-NWN-aoY5qZXBBzUDK2LZjGsL/exec";

/// A finite reading, or `None` for null, text and "NaN"/"inf" strings.
fn sample_value(value: &Value) -> Option<f64> {
    let reading = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    reading.filter(|v| v.is_finite())
}

/// Interpret a well history response body.
///
/// Rows with a missing, non-numeric or non-finite value are dropped; a row without a
/// readable date makes the payload malformed. The result is sorted by date.
pub fn parse_history_payload(well_id: &str, body: &str) -> Result<WellSeries, FetchError> {
    let payload: Value =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    let rows = match payload {
        Value::Array(rows) => rows,
        Value::Object(map) => {
            return match map.get("error") {
                Some(message) => {
                    log::warn!("history API error for well {well_id}: {message}");
                    Err(FetchError::NotFound(well_id.to_string()))
                }
                None => Err(FetchError::Malformed(
                    "expected an array of samples".to_string(),
                )),
            };
        }
        other => {
            return Err(FetchError::Malformed(format!(
                "unexpected payload: {other}"
            )))
        }
    };

    let mut samples = Vec::with_capacity(rows.len());
    for row in &rows {
        let date = row
            .get("date")
            .and_then(Value::as_str)
            .ok_or_else(|| FetchError::Malformed(format!("row without date: {row}")))?;
        let date = parse_api_date(date).map_err(|e| FetchError::Malformed(e.to_string()))?;
        match row.get("value").and_then(sample_value) {
            Some(value) => samples.push(WaterLevelSample::new(date, value)),
            None => log::debug!("dropping sample without value for {well_id} on {date}"),
        }
    }
    Ok(WellSeries::new(well_id, samples))
}

/// HTTP provider for the well history API, with retry and exponential backoff.
#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct HistoryClient {
    client: Client,
    base_url: String,
    max_tries: u32,
    initial_backoff: Duration,
}

#[cfg(feature = "api")]
impl HistoryClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        HistoryClient {
            client,
            base_url: base_url.into(),
            max_tries: 3,
            initial_backoff: Duration::from_millis(1000),
        }
    }

    pub fn with_retries(mut self, max_tries: u32, initial_backoff: Duration) -> Self {
        self.max_tries = max_tries.max(1);
        self.initial_backoff = initial_backoff;
        self
    }

    async fn fetch_body(&self, well_id: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("wellNo", well_id), ("mode", "full")])
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(well_id.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Unavailable(format!("bad response status: {status}")));
        }
        Ok(response.text().await?)
    }
}

#[cfg(feature = "api")]
impl WellHistoryProvider for HistoryClient {
    async fn fetch(&self, well_id: &str) -> Result<WellSeries, FetchError> {
        let mut backoff = self.initial_backoff;
        let mut last_error = String::new();

        for attempt in 1..=self.max_tries {
            match self.fetch_body(well_id).await {
                Ok(body) => return parse_history_payload(well_id, &body),
                Err(FetchError::NotFound(id)) => return Err(FetchError::NotFound(id)),
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: history request failed for {}: {}",
                        attempt, self.max_tries, well_id, e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.max_tries {
                info!(
                    "Sleeping for {} milliseconds before retry for {}",
                    backoff.as_millis(),
                    well_id
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }

        warn!("All attempts failed for {}", well_id);
        Err(FetchError::Unavailable(last_error))
    }
}


#[cfg(all(test, feature = "api"))]
mod client_tests {
    use super::HistoryClient;
    use crate::error::FetchError;
    use crate::provider::WellHistoryProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers every request with `status` and `body`, counting connections.
    async fn serve(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        (format!("http://{}/exec", addr), hits)
    }

    fn client(base_url: String) -> HistoryClient {
        HistoryClient::new(reqwest::Client::new(), base_url)
            .with_retries(3, Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_server_error_retried_then_unavailable() {
        let (url, hits) = serve("500 Internal Server Error", "").await;
        let result = client(url).fetch("W07541").await;
        assert!(matches!(result, Err(FetchError::Unavailable(msg)) if msg.contains("500")));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let (url, hits) = serve("404 Not Found", "").await;
        let result = client(url).fetch("W07541").await;
        assert!(matches!(result, Err(FetchError::NotFound(id)) if id == "W07541"));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_payload_is_not_found() {
        let (url, hits) = serve("200 OK", r#"{"error": "Well not found"}"#).await;
        let result = client(url).fetch("W00000").await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_fetch() {
        let (url, hits) = serve(
            "200 OK",
            r#"[{"date": "2023-01-01", "value": 6.5}, {"date": "2022-12-01", "value": "6.1"}]"#,
        )
        .await;
        let series = client(url).fetch("W07541").await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().unwrap().value, 6.5);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        // bind then drop so the port refuses connections
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let result = client(format!("http://{}/exec", addr)).fetch("W07541").await;
        assert!(matches!(result, Err(FetchError::Unavailable(_))));
    }
}

//! Data download CSV and key-value report.

use crate::scenario::prepare_run;
use crate::source::open_cache;
use crate::{ScenarioArgs, SourceArgs};
use gms_dss::export::{download_rows, DownloadRow, ReportSnapshot};
use log::info;
use std::io::Write;

pub async fn run_export(
    well: &str,
    csv_path: &str,
    report_path: Option<&str>,
    scenario: &ScenarioArgs,
    source: &SourceArgs,
) -> anyhow::Result<()> {
    let mut cache = open_cache(source, well)?;
    let run = prepare_run(&mut cache, well, scenario).await?;

    let rows = download_rows(&run.series, &run.forecast);
    let file = std::fs::File::create(csv_path)?;
    write_rows(file, &rows)?;
    info!("Wrote {} rows to {}", rows.len(), csv_path);

    if let Some(path) = report_path {
        let snapshot = ReportSnapshot::new(&run.outcome, run.forecast, run.project);
        let file = std::fs::File::create(path)?;
        write_report(file, &snapshot)?;
        info!("Wrote report for {} to {}", well, path);
    }
    Ok(())
}

/// `date,value,type` with a header row.
pub fn write_rows<W: Write>(writer: W, rows: &[DownloadRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One `key: value` line per named scalar.
pub fn write_report<W: Write>(mut writer: W, snapshot: &ReportSnapshot) -> anyhow::Result<()> {
    writeln!(writer, "Groundwater Decision Support Report")?;
    for (key, value) in snapshot.to_key_values() {
        writeln!(writer, "{}: {}", key, value)?;
    }
    Ok(())
}

use crate::error::{CoreError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default metadata table shipped alongside the dashboard.
pub const DEFAULT_METADATA_CSV: &str = "DWLR_MAHARASHTRA_AND_GOA.csv";

/// Administrative location and coordinates of a monitoring well.
///
/// Only latitude/longitude feed any calculation (the optional ET₀ estimate);
/// the rest is shown alongside results.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct WellMetadata {
    pub well_no: String,
    pub state: String,
    pub district: String,
    pub block: String,
    pub village: String,
    /// Latitude in decimal degrees
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    pub longitude: Option<f64>,
}

impl WellMetadata {
    /// Coordinates, if both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Static reference table mapping well numbers to their metadata.
#[derive(Debug, Clone, Default)]
pub struct WellMetadataTable {
    wells: Vec<WellMetadata>,
}

struct Columns {
    well_no: usize,
    state: Option<usize>,
    district: Option<usize>,
    block: Option<usize>,
    village: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Columns> {
        let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        Ok(Columns {
            well_no: find("WellNo").ok_or_else(|| CoreError::MissingColumn("WellNo".into()))?,
            state: find("State"),
            district: find("District"),
            block: find("Block"),
            village: find("Village"),
            latitude: find("Latitude"),
            longitude: find("Longitude"),
        })
    }
}

fn text(record: &StringRecord, column: Option<usize>) -> String {
    column
        .and_then(|i| record.get(i))
        .map(String::from)
        .unwrap_or_else(|| String::from("N/A"))
}

fn coordinate(record: &StringRecord, column: Option<usize>) -> Option<f64> {
    column
        .and_then(|i| record.get(i))
        .and_then(|s| s.parse::<f64>().ok())
}

impl WellMetadataTable {
    /// Parse a CSV string of well metadata.
    ///
    /// Header names are trimmed and matched case-insensitively:
    /// WellNo, State, District, Block, Village, Latitude, Longitude. Other columns are ignored.
    pub fn from_csv_str(csv_object: &str) -> Result<WellMetadataTable> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(csv_object.as_bytes());
        let columns = Columns::from_headers(rdr.headers()?)?;
        let mut wells = Vec::new();
        for row in rdr.records() {
            let record = row?;
            let well_no = match record.get(columns.well_no) {
                Some(w) if !w.is_empty() => w.to_string(),
                _ => continue,
            };
            wells.push(WellMetadata {
                well_no,
                state: text(&record, columns.state),
                district: text(&record, columns.district),
                block: text(&record, columns.block),
                village: text(&record, columns.village),
                latitude: coordinate(&record, columns.latitude),
                longitude: coordinate(&record, columns.longitude),
            });
        }
        log::debug!("metadata: loaded {} wells", wells.len());
        Ok(WellMetadataTable { wells })
    }

    /// Read and parse a metadata CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<WellMetadataTable> {
        let contents = std::fs::read_to_string(path)?;
        WellMetadataTable::from_csv_str(&contents)
    }

    /// Find a well by number. The first matching row wins.
    pub fn lookup(&self, well_id: &str) -> Option<&WellMetadata> {
        let well_id = well_id.trim();
        self.wells.iter().find(|well| well.well_no == well_id)
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::WellMetadataTable;
    use crate::error::CoreError;

    static FIXTURE: &str = include_str!("../../fixtures/well_metadata.csv");

    #[test]
    fn test_parse_fixture() {
        let table = WellMetadataTable::from_csv_str(FIXTURE).unwrap();
        assert_eq!(table.len(), 4);
        let well = table.lookup("W07602").unwrap();
        assert_eq!(well.state, "Maharashtra");
        assert_eq!(well.district, "Satara");
        assert_eq!(well.block, "Man");
        assert_eq!(well.village, "Dahiwadi");
        let (lat, lon) = well.coordinates().unwrap();
        assert!((lat - 17.7021).abs() < f64::EPSILON);
        assert!((lon - 74.5403).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lookup_missing_well() {
        let table = WellMetadataTable::from_csv_str(FIXTURE).unwrap();
        assert!(table.lookup("NOPE").is_none());
        assert!(table.lookup(" W08810 ").is_some());
    }

    #[test]
    fn test_missing_coordinates_and_columns() {
        let csv_data = "WellNo,State,Latitude\nA1,Goa,\n";
        let table = WellMetadataTable::from_csv_str(csv_data).unwrap();
        let well = table.lookup("A1").unwrap();
        assert_eq!(well.village, "N/A");
        assert!(well.coordinates().is_none());
    }

    #[test]
    fn test_missing_well_column() {
        let csv_data = "State,District\nGoa,North Goa\n";
        let result = WellMetadataTable::from_csv_str(csv_data);
        assert!(matches!(result, Err(CoreError::MissingColumn(_))));
    }
}

//! Forecast table loading.
//!
//! Each (model, location) pair has one CSV produced upstream with the columns
//! `DateTime, Hsig_forecast, Tpeak_forecast, Wdir_forecast, wind_speed,
//! wind_direction`. Extra columns are ignored. Rows are kept in file order and
//! the timestamp strings are used verbatim as both display and lookup keys.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

use crate::error::{SurfError, SurfResult};
use crate::layout::DataLayout;
use crate::model::ForecastModel;

/// One forecast row. Field names on the wire match the CSV headers.
///
/// Numeric cells left blank (or written as `NaN`) by the pipeline are `None`
/// and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    #[serde(rename = "DateTime")]
    pub timestamp: String,

    /// Significant wave height (m).
    #[serde(rename = "Hsig_forecast", deserialize_with = "lenient_f64")]
    pub hsig: Option<f64>,

    /// Peak period (s).
    #[serde(rename = "Tpeak_forecast", deserialize_with = "lenient_f64")]
    pub tpeak: Option<f64>,

    /// Wave direction (degrees, coming from).
    #[serde(rename = "Wdir_forecast", deserialize_with = "lenient_f64")]
    pub wave_dir: Option<f64>,

    /// Wind speed (kts).
    #[serde(rename = "wind_speed", deserialize_with = "lenient_f64")]
    pub wind_speed: Option<f64>,

    /// Wind direction (degrees, coming from).
    #[serde(rename = "wind_direction", deserialize_with = "lenient_f64")]
    pub wind_dir: Option<f64>,
}

/// Parse a numeric cell; blank and non-finite values become `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(de::Error::custom)?;
    Ok(value.is_finite().then_some(value))
}

/// The parsed contents of one forecast CSV.
///
/// `timestamps[i]` is always `records[i].timestamp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastTable {
    pub timestamps: Vec<String>,
    pub records: Vec<ForecastRecord>,
}

impl ForecastTable {
    /// Load the table for `model` at location `key`.
    ///
    /// A missing file is reported as [`SurfError::UpstreamDataMissing`].
    pub fn load(layout: &DataLayout, model: ForecastModel, key: &str) -> SurfResult<Self> {
        let path = layout.forecast_table_path(model, key);
        Self::load_path(&path)
    }

    pub fn load_path(path: &Path) -> SurfResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| SurfError::from_table_io(path, e))?;
        let table = Self::from_reader(file).map_err(|e| SurfError::UpstreamDataInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), rows = table.len(), "Loaded forecast table");
        Ok(table)
    }

    /// Parse CSV text with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = csv_reader
            .deserialize::<ForecastRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<ForecastRecord>) -> Self {
        let timestamps = records.iter().map(|r| r.timestamp.clone()).collect();
        Self {
            timestamps,
            records,
        }
    }

    /// Find the record whose timestamp equals `timestamp` exactly.
    pub fn find(&self, timestamp: &str) -> Option<&ForecastRecord> {
        self.records.iter().find(|r| r.timestamp == timestamp)
    }

    pub fn contains(&self, timestamp: &str) -> bool {
        self.timestamps.iter().any(|t| t == timestamp)
    }

    pub fn first_timestamp(&self) -> Option<&str> {
        self.timestamps.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The three forecast tables shown on one location page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelTables {
    pub corrected: ForecastTable,
    pub gfs: ForecastTable,
    pub ecmwf: ForecastTable,
}

impl ModelTables {
    /// Load every model's table independently; the first failure aborts.
    pub fn load(layout: &DataLayout, key: &str) -> SurfResult<Self> {
        Ok(Self {
            gfs: ForecastTable::load(layout, ForecastModel::GfsWave, key)?,
            ecmwf: ForecastTable::load(layout, ForecastModel::Ecmwf, key)?,
            corrected: ForecastTable::load(layout, ForecastModel::Corrected, key)?,
        })
    }

    pub fn get(&self, model: ForecastModel) -> &ForecastTable {
        match model {
            ForecastModel::Corrected => &self.corrected,
            ForecastModel::GfsWave => &self.gfs,
            ForecastModel::Ecmwf => &self.ecmwf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction
2024-01-01 00:00:00,1.234,12.4,225.0,10.2,180.5
2024-01-01 03:00:00,1.5,13.0,230.0,12.0,190.0
2024-01-01 06:00:00,1.75,13.6,235.5,8.4,200.0
";

    #[test]
    fn test_parse_rows_in_order() {
        let table = ForecastTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.timestamps,
            vec![
                "2024-01-01 00:00:00",
                "2024-01-01 03:00:00",
                "2024-01-01 06:00:00"
            ]
        );
        assert_eq!(table.records[0].hsig, Some(1.234));
        assert_eq!(table.records[2].wave_dir, Some(235.5));
        assert_eq!(table.records[1].wind_dir, Some(190.0));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "\
,DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction,Hsig_raw
0,2024-01-01T00:00,1.0,10.0,200.0,5.0,90.0,0.9
";
        let table = ForecastTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.first_timestamp(), Some("2024-01-01T00:00"));
        assert_eq!(table.records[0].wind_speed, Some(5.0));
    }

    #[test]
    fn test_missing_column_is_error() {
        let csv = "DateTime,Hsig_forecast\n2024-01-01,1.0\n";
        assert!(ForecastTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_blank_and_nan_cells_are_missing() {
        let csv = "\
DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction
2024-01-01 00:00:00,1.2,11.0,200.0,,90.0
2024-01-01 03:00:00,NaN,11.0,,8.0,95.0
";
        let table = ForecastTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].wind_speed, None);
        assert_eq!(table.records[0].wind_dir, Some(90.0));
        assert_eq!(table.records[1].hsig, None);
        assert_eq!(table.records[1].wave_dir, None);

        let json = serde_json::to_value(&table.records[0]).unwrap();
        assert!(json["wind_speed"].is_null());
    }

    #[test]
    fn test_non_numeric_cell_is_error() {
        let csv = "\
DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction
2024-01-01 00:00:00,flat,11.0,200.0,5.0,90.0
";
        assert!(ForecastTable::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_find_exact_match_only() {
        let table = ForecastTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(table.find("2024-01-01 03:00:00").is_some());
        assert!(table.find("2024-01-01 03:00").is_none());
        assert!(table.contains("2024-01-01 06:00:00"));
    }

    #[test]
    fn test_empty_table() {
        let csv = "DateTime,Hsig_forecast,Tpeak_forecast,Wdir_forecast,wind_speed,wind_direction\n";
        let table = ForecastTable::from_reader(csv.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.first_timestamp(), None);
    }

    #[test]
    fn test_serialized_field_names_match_csv_headers() {
        let table = ForecastTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let json = serde_json::to_value(&table.records[0]).unwrap();
        assert_eq!(json["DateTime"], "2024-01-01 00:00:00");
        assert_eq!(json["Hsig_forecast"], 1.234);
        assert_eq!(json["wind_direction"], 180.5);
    }
}

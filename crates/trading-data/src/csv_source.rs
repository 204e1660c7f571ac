//! CSV bar feed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{DeserializeRecordsIntoIter, ReaderBuilder};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use trading_core::error::FeedError;
use trading_core::traits::BarFeed;
use trading_core::types::Bar;

use crate::SequenceGuard;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "date",
        alias = "Time",
        alias = "datetime",
        alias = "Datetime",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    time: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume")]
    volume: f64,
}

/// Streams bars from a CSV source, one record per call.
pub struct CsvBarFeed<R: Read = File> {
    name: String,
    records: DeserializeRecordsIntoIter<R, CsvRecord>,
    guard: SequenceGuard,
}

impl CsvBarFeed<File> {
    /// Open a CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FeedError::NotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        debug!("Opened CSV feed {}", path.display());
        Ok(Self::from_reader(file, path.display().to_string()))
    }
}

impl<R: Read> CsvBarFeed<R> {
    /// Read CSV with a header row from any reader.
    pub fn from_reader(reader: R, name: impl Into<String>) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_deserialize();
        Self {
            name: name.into(),
            records,
            guard: SequenceGuard::new(),
        }
    }
}

impl<R: Read> BarFeed for CsvBarFeed<R> {
    fn next_bar(&mut self) -> Result<Option<Bar>, FeedError> {
        let Some(result) = self.records.next() else {
            return Ok(None);
        };
        let record_no = self.guard.records() + 1;

        let record = result.map_err(|e| FeedError::Parse {
            record: record_no,
            message: e.to_string(),
        })?;
        let timestamp = parse_timestamp(&record.time).ok_or_else(|| FeedError::Parse {
            record: record_no,
            message: format!("Could not parse date: {}", record.time),
        })?;

        let bar = Bar::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        );
        self.guard.admit(bar).map(Some)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parse a timestamp into Unix milliseconds.
///
/// Accepts common date/datetime layouts and Unix seconds or milliseconds.
pub fn parse_timestamp(date_str: &str) -> Option<i64> {
    const DATETIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.timestamp_millis());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Some(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp; assume milliseconds if > 10 digits
    let ts = date_str.parse::<i64>().ok()?;
    if ts > 10_000_000_000 {
        Some(ts)
    } else {
        ts.checked_mul(1000)
    }
}

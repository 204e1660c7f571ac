//! Bar feeds for the backtester.
//!
//! `CsvBarFeed` streams OHLCV rows from a CSV file one record at a time;
//! `VecFeed` serves bars already in memory. Both reject malformed rows and
//! timestamps that do not strictly increase.

mod csv_source;
mod sequence;
mod vec_feed;

pub use csv_source::{parse_timestamp, CsvBarFeed};
pub use sequence::SequenceGuard;
pub use vec_feed::VecFeed;

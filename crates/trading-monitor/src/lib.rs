//! Logging setup and the engine event journal.

mod journal;
mod logging;

pub use journal::LogJournal;
pub use logging::setup_logging;

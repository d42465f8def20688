//! Organization-wide bulk sync with bounded concurrency.

mod orchestrator;
mod report;

pub use orchestrator::{BulkSync, DEFAULT_MAX_CONCURRENCY, SyncOptions};
pub use report::SyncReport;

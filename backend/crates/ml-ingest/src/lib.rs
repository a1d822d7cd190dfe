//! Incremental listen ingestion.
//!
//! [`AccountScanner`] performs one atomic scan of one linked account: lock,
//! fetch everything newer than the resume cursor, record it, advance the
//! cursor, commit. [`Poller`] drives the scanner over every account of its
//! provider on a fixed interval until cancelled.

mod cursor_tracker;
mod error;
mod metrics;
mod poller;
mod scan_report;
mod scanner;


pub use error::{IngestError, Result as IngestResult};
pub use metrics::Metrics;
pub use poller::{Poller, PollerSettings, SweepReport};
pub use scan_report::ScanReport;
pub use scanner::{AccountScanner, ScannerConfig};

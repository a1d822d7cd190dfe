use std::fmt;

use chrono::{DateTime, Utc};

/// Outcome of one committed account scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// External account id the scan was run for
    pub account_id: String,
    pub fetched: usize,
    pub inserted: usize,
    /// Events that matched an existing listen and were skipped
    pub duplicates: usize,
    pub cursor_before: Option<DateTime<Utc>>,
    pub cursor_after: Option<DateTime<Utc>>,
}

impl ScanReport {
    pub fn cursor_advanced(&self) -> bool {
        self.cursor_after != self.cursor_before
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cursor = |at: Option<DateTime<Utc>>| {
            at.map(|at| at.to_rfc3339())
                .unwrap_or_else(|| String::from("unset"))
        };

        write!(
            f,
            "account {}: fetched {}, inserted {}, duplicates {}, cursor {} -> {}",
            self.account_id,
            self.fetched,
            self.inserted,
            self.duplicates,
            cursor(self.cursor_before),
            cursor(self.cursor_after),
        )
    }
}
